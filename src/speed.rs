use std::time::Duration;

use crate::config::{
    DEFAULT_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS, POINTS_PER_SPEED_STEP, SPEED_STEP_MS,
};

/// Score-driven tick pacing: the interval shrinks by `step` for every
/// `points_per_step` points and never drops below `floor`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SpeedPolicy {
    pub base: Duration,
    pub floor: Duration,
    pub step: Duration,
    pub points_per_step: u32,
}

impl Default for SpeedPolicy {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            floor: Duration::from_millis(MIN_TICK_INTERVAL_MS),
            step: Duration::from_millis(SPEED_STEP_MS),
            points_per_step: POINTS_PER_SPEED_STEP,
        }
    }
}

impl SpeedPolicy {
    /// Tick interval in effect at `score`.
    #[must_use]
    pub fn interval_for(&self, score: u32) -> Duration {
        let steps = score.checked_div(self.points_per_step).unwrap_or(0);
        self.base
            .saturating_sub(self.step.saturating_mul(steps))
            .max(self.floor)
    }

    /// How much faster than the base pace the game runs at `score`.
    #[must_use]
    pub fn multiplier(&self, score: u32) -> f64 {
        let interval = self.interval_for(score);
        if interval.is_zero() {
            return 1.0;
        }
        self.base.as_secs_f64() / interval.as_secs_f64()
    }

    /// Multiplier as shown in the HUD, e.g. `1.2x`.
    #[must_use]
    pub fn multiplier_label(&self, score: u32) -> String {
        format!("{:.1}x", self.multiplier(score))
    }
}
