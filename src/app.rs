use std::time::Duration;

use crate::config::GameConfig;
use crate::game::{DeathReason, GameState, RunState, TickOutcome};
use crate::input::Command;
use crate::scheduler::TickScheduler;
use crate::score::BestScoreStore;
use crate::speed::SpeedPolicy;

/// Status and helper text shown under the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Banner {
    Fresh,
    Paused,
    Resumed,
    GameOver,
}

impl Banner {
    #[must_use]
    pub fn status(self) -> &'static str {
        match self {
            Self::Fresh => "Game on! Collect food and avoid the walls or yourself.",
            Self::Paused => "Paused. Press spacebar to continue.",
            Self::Resumed => "Running.",
            Self::GameOver => "Game over. Press R to try again.",
        }
    }

    #[must_use]
    pub fn helper(self) -> &'static str {
        match self {
            Self::GameOver => "Game over! Press R to try again or Q to quit.",
            _ => "Use the arrow keys (or W/A/S/D) or drag to move. Press spacebar to pause.",
        }
    }
}

/// Read-only snapshot handed to a renderer.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub state: &'a GameState,
    pub best: u32,
    pub speed: &'a SpeedPolicy,
    pub banner: Banner,
    pub new_best: bool,
}

impl View<'_> {
    #[must_use]
    pub fn speed_label(&self) -> String {
        self.speed.multiplier_label(self.state.score)
    }

    /// True when the current run has beaten the best score it started with.
    #[must_use]
    pub fn is_new_best(&self) -> bool {
        self.new_best
    }
}

/// Owns one game session: state, pacing, best score and banner text.
#[derive(Debug)]
pub struct App<S: BestScoreStore> {
    state: GameState,
    scheduler: Box<dyn TickScheduler>,
    store: S,
    best: u32,
    speed: SpeedPolicy,
    banner: Banner,
    new_best: bool,
    should_quit: bool,
}

impl<S: BestScoreStore> App<S> {
    /// Starts a running game, reading the best score once from `store`.
    pub fn new(config: &GameConfig, mut store: S) -> Self {
        let best = store.load();
        log::info!(
            "starting {}x{} game, best score {best}",
            config.grid.tiles,
            config.grid.tiles
        );

        Self {
            state: GameState::from_config(config),
            scheduler: config.scheduler.build(),
            store,
            best,
            speed: config.speed,
            banner: Banner::Fresh,
            new_best: false,
            should_quit: false,
        }
    }

    /// Replaces the scheduler, keeping everything else.
    #[must_use]
    pub fn with_scheduler(mut self, scheduler: Box<dyn TickScheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Replaces the game state, e.g. to start from a prepared position.
    #[must_use]
    pub fn with_state(mut self, state: GameState) -> Self {
        self.state = state;
        self
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Turn(direction) => {
                let _ = self.state.buffer_direction(direction);
            }
            Command::TogglePause => match self.state.toggle_pause() {
                Some(RunState::Paused) => self.banner = Banner::Paused,
                Some(RunState::Running) => self.banner = Banner::Resumed,
                Some(RunState::GameOver) | None => {}
            },
            Command::Restart => {
                if self.state.is_over() {
                    self.state.restart();
                    self.scheduler.reset();
                    self.banner = Banner::Fresh;
                    self.new_best = false;
                    log::info!("restarted");
                }
            }
            Command::Quit => self.should_quit = true,
        }
    }

    /// Feeds wall time to the scheduler and runs the ticks that fall due.
    /// Time spent paused or after game over is not counted. Returns the
    /// number of ticks run.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.state.run_state != RunState::Running {
            return 0;
        }

        let interval = self.speed.interval_for(self.state.score);
        let due = self.scheduler.due_ticks(elapsed, interval);

        let mut ran = 0;
        for _ in 0..due {
            ran += 1;
            match self.state.step() {
                TickOutcome::Ate { score } => self.record_score(score),
                TickOutcome::Died(reason) => {
                    self.on_death(reason);
                    break;
                }
                TickOutcome::Moved | TickOutcome::Idle => {}
            }
        }
        ran
    }

    #[must_use]
    pub fn view(&self) -> View<'_> {
        View {
            state: &self.state,
            best: self.best,
            speed: &self.speed,
            banner: self.banner,
            new_best: self.new_best,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn best(&self) -> u32 {
        self.best
    }

    #[must_use]
    pub fn banner(&self) -> Banner {
        self.banner
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn record_score(&mut self, score: u32) {
        log::debug!("food eaten, score {score}, length {}", self.state.snake.len());
        if score <= self.best {
            return;
        }

        self.best = score;
        self.new_best = true;
        if let Err(error) = self.store.save(score) {
            log::warn!("failed to save best score: {error}");
        }
    }

    fn on_death(&mut self, reason: DeathReason) {
        self.banner = Banner::GameOver;
        log::info!(
            "game over ({reason:?}) with score {} after {} ticks",
            self.state.score,
            self.state.tick_count
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{App, Banner};
    use crate::config::{GameConfig, GridSize};
    use crate::game::{GameState, RunState};
    use crate::input::{Command, Direction};
    use crate::scheduler::FixedInterval;
    use crate::score::MemoryStore;
    use crate::snake::{Cell, Snake};

    const BASE: Duration = Duration::from_millis(120);

    fn seeded_config() -> GameConfig {
        GameConfig {
            seed: Some(99),
            ..GameConfig::default()
        }
    }

    fn app_with_food(food: Cell, best: u32) -> App<MemoryStore> {
        let mut state = GameState::new_with_seed(GridSize::new(20), 1);
        state.food = food;
        App::new(&seeded_config(), MemoryStore::with_best(best)).with_state(state)
    }

    #[test]
    fn best_score_is_read_at_start() {
        let app = App::new(&seeded_config(), MemoryStore::with_best(70));
        assert_eq!(app.best(), 70);
        assert_eq!(app.banner(), Banner::Fresh);
    }

    #[test]
    fn beating_best_score_persists_it() {
        let mut app = app_with_food(Cell::new(9, 10), 0);

        assert_eq!(app.advance(BASE), 1);

        assert_eq!(app.state().score, 10);
        assert_eq!(app.best(), 10);
        assert_eq!(app.store().saves(), 1);
        assert!(app.view().is_new_best());
    }

    #[test]
    fn lower_score_leaves_best_untouched() {
        let mut app = app_with_food(Cell::new(9, 10), 500);

        app.advance(BASE);

        assert_eq!(app.best(), 500);
        assert_eq!(app.store().saves(), 0);
        assert!(!app.view().is_new_best());
    }

    #[test]
    fn tying_best_score_is_not_a_new_best() {
        let mut app = app_with_food(Cell::new(9, 10), 10);

        app.advance(BASE);

        assert_eq!(app.state().score, 10);
        assert_eq!(app.best(), 10);
        assert_eq!(app.store().saves(), 0);
        assert!(!app.view().is_new_best());
    }

    #[test]
    fn restart_clears_new_best_flag() {
        let mut app = app_with_food(Cell::new(9, 10), 0);
        app.advance(BASE);
        assert!(app.view().is_new_best());

        while !app.state().is_over() {
            app.advance(BASE);
        }
        assert!(app.view().is_new_best());

        app.handle(Command::Restart);
        assert!(app.best() >= 10);
        assert!(!app.view().is_new_best());
    }

    #[test]
    fn accumulator_runs_catch_up_ticks() {
        let mut app = app_with_food(Cell::new(0, 0), 0);

        assert_eq!(app.advance(BASE * 3 + Duration::from_millis(10)), 3);
        assert_eq!(app.state().snake.head(), Cell::new(11, 10));
    }

    #[test]
    fn fixed_scheduler_runs_one_tick_per_frame() {
        let mut app = app_with_food(Cell::new(0, 0), 0)
            .with_scheduler(Box::new(FixedInterval::default()));

        assert_eq!(app.advance(BASE * 3), 1);
        assert_eq!(app.state().snake.head(), Cell::new(9, 10));
    }

    #[test]
    fn pause_stops_time_and_updates_banner() {
        let mut app = app_with_food(Cell::new(0, 0), 0);

        app.handle(Command::TogglePause);
        assert_eq!(app.banner(), Banner::Paused);
        assert_eq!(app.advance(BASE * 10), 0);
        assert_eq!(app.state().snake.head(), Cell::new(8, 10));

        app.handle(Command::TogglePause);
        assert_eq!(app.banner(), Banner::Resumed);
        assert_eq!(app.state().run_state, RunState::Running);
    }

    #[test]
    fn death_stops_remaining_ticks_and_sets_banner() {
        let mut state = GameState::new_with_seed(GridSize::new(20), 2);
        state.snake = Snake::new(Cell::new(18, 5), Direction::Right, 2);
        state.food = Cell::new(0, 0);
        let mut app = App::new(&seeded_config(), MemoryStore::default()).with_state(state);

        assert_eq!(app.advance(BASE * 5), 2);

        assert_eq!(app.state().run_state, RunState::GameOver);
        assert_eq!(app.banner(), Banner::GameOver);
        assert_eq!(app.advance(BASE * 5), 0);
    }

    #[test]
    fn restart_only_applies_after_game_over() {
        let mut state = GameState::new_with_seed(GridSize::new(20), 3);
        state.snake = Snake::new(Cell::new(19, 5), Direction::Right, 2);
        state.food = Cell::new(0, 0);
        let mut app = App::new(&seeded_config(), MemoryStore::default()).with_state(state);

        app.handle(Command::Restart);
        assert_eq!(app.state().snake.head(), Cell::new(19, 5));

        app.advance(BASE);
        assert!(app.state().is_over());

        app.handle(Command::Turn(Direction::Up));
        assert_eq!(app.state().snake.buffered_direction(), Direction::Right);

        app.handle(Command::Restart);
        assert_eq!(app.state().run_state, RunState::Running);
        assert_eq!(app.state().snake.head(), Cell::new(8, 10));
        assert_eq!(app.banner(), Banner::Fresh);
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = App::new(&seeded_config(), MemoryStore::default());
        assert!(!app.should_quit());

        app.handle(Command::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn speed_label_tracks_score() {
        let mut app = app_with_food(Cell::new(0, 0), 0);
        assert_eq!(app.view().speed_label(), "1.0x");

        let mut state = app.state().clone();
        state.score = 100;
        app = app.with_state(state);
        assert_eq!(app.view().speed_label(), "1.2x");
    }
}
