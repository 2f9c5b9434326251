//! Tick pacing, decoupled from any real clock.
//!
//! The frame loop measures elapsed wall time and hands it to a
//! [`TickScheduler`], which answers how many simulation ticks are due. Tests
//! drive schedulers with synthetic durations.

use std::fmt;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::MAX_CATCH_UP_TICKS;

/// Decides how many ticks fall due as time passes.
pub trait TickScheduler: fmt::Debug {
    /// Feeds `elapsed` time since the previous call and returns the number of
    /// ticks to run at the given tick `interval`.
    fn due_ticks(&mut self, elapsed: Duration, interval: Duration) -> u32;

    /// Forgets any partially elapsed tick.
    fn reset(&mut self);
}

/// Fires at most one tick per call once a full interval has passed since the
/// last tick. Time beyond that interval is discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedInterval {
    since_last_tick: Duration,
}

impl TickScheduler for FixedInterval {
    fn due_ticks(&mut self, elapsed: Duration, interval: Duration) -> u32 {
        if interval.is_zero() {
            return 0;
        }

        self.since_last_tick = self.since_last_tick.saturating_add(elapsed);
        if self.since_last_tick >= interval {
            self.since_last_tick = Duration::ZERO;
            1
        } else {
            0
        }
    }

    fn reset(&mut self) {
        self.since_last_tick = Duration::ZERO;
    }
}

/// Accumulates elapsed time and catches up with as many ticks as fit,
/// carrying the remainder into the next frame.
#[derive(Debug, Clone, Copy)]
pub struct Accumulator {
    accumulated: Duration,
    max_catch_up: u32,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::with_catch_up_limit(MAX_CATCH_UP_TICKS)
    }
}

impl Accumulator {
    /// Creates an accumulator that runs at most `max_catch_up` ticks per call.
    #[must_use]
    pub fn with_catch_up_limit(max_catch_up: u32) -> Self {
        Self {
            accumulated: Duration::ZERO,
            max_catch_up: max_catch_up.max(1),
        }
    }
}

impl TickScheduler for Accumulator {
    fn due_ticks(&mut self, elapsed: Duration, interval: Duration) -> u32 {
        if interval.is_zero() {
            return 0;
        }

        self.accumulated = self.accumulated.saturating_add(elapsed);

        let mut ticks = 0;
        while self.accumulated >= interval && ticks < self.max_catch_up {
            self.accumulated -= interval;
            ticks += 1;
        }

        if self.accumulated >= interval {
            log::debug!(
                "dropping {:?} of tick backlog after {ticks} catch-up ticks",
                self.accumulated
            );
            self.accumulated = Duration::ZERO;
        }

        ticks
    }

    fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

/// Scheduler selection exposed on the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum SchedulerKind {
    /// One tick per elapsed interval.
    Fixed,
    /// Catch-up ticks with carried remainder.
    Accumulator,
}

impl SchedulerKind {
    #[must_use]
    pub fn build(self) -> Box<dyn TickScheduler> {
        match self {
            Self::Fixed => Box::new(FixedInterval::default()),
            Self::Accumulator => Box::new(Accumulator::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Accumulator, FixedInterval, SchedulerKind, TickScheduler};

    const INTERVAL: Duration = Duration::from_millis(100);

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn fixed_waits_for_a_full_interval() {
        let mut scheduler = FixedInterval::default();

        assert_eq!(scheduler.due_ticks(ms(60), INTERVAL), 0);
        assert_eq!(scheduler.due_ticks(ms(60), INTERVAL), 1);
        assert_eq!(scheduler.due_ticks(ms(60), INTERVAL), 0);
    }

    #[test]
    fn fixed_never_fires_more_than_once() {
        let mut scheduler = FixedInterval::default();

        assert_eq!(scheduler.due_ticks(ms(1_000), INTERVAL), 1);
        assert_eq!(scheduler.due_ticks(ms(0), INTERVAL), 0);
    }

    #[test]
    fn accumulator_carries_remainder() {
        let mut scheduler = Accumulator::default();

        assert_eq!(scheduler.due_ticks(ms(250), INTERVAL), 2);
        // 50ms carried over.
        assert_eq!(scheduler.due_ticks(ms(60), INTERVAL), 1);
        assert_eq!(scheduler.due_ticks(ms(80), INTERVAL), 0);
        assert_eq!(scheduler.due_ticks(ms(10), INTERVAL), 1);
    }

    #[test]
    fn accumulator_caps_catch_up_and_drops_backlog() {
        let mut scheduler = Accumulator::with_catch_up_limit(3);

        assert_eq!(scheduler.due_ticks(ms(2_000), INTERVAL), 3);
        assert_eq!(scheduler.due_ticks(ms(0), INTERVAL), 0);
    }

    #[test]
    fn reset_discards_partial_progress() {
        let mut fixed = FixedInterval::default();
        let mut accumulator = Accumulator::default();

        let _ = fixed.due_ticks(ms(90), INTERVAL);
        let _ = accumulator.due_ticks(ms(90), INTERVAL);
        fixed.reset();
        accumulator.reset();

        assert_eq!(fixed.due_ticks(ms(20), INTERVAL), 0);
        assert_eq!(accumulator.due_ticks(ms(20), INTERVAL), 0);
    }

    #[test]
    fn zero_interval_never_ticks() {
        let mut scheduler = SchedulerKind::Accumulator.build();
        assert_eq!(scheduler.due_ticks(ms(500), Duration::ZERO), 0);

        let mut scheduler = SchedulerKind::Fixed.build();
        assert_eq!(scheduler.due_ticks(ms(500), Duration::ZERO), 0);
    }
}
