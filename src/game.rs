use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collision::{hits_self, hits_wall};
use crate::config::{GameConfig, GridSize, POINTS_PER_FOOD};
use crate::food::place_food;
use crate::input::Direction;
use crate::snake::{Cell, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunState {
    Running,
    Paused,
    GameOver,
}

/// What ended the run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Result of one call to [`GameState::step`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game is paused or over; nothing changed.
    Idle,
    Moved,
    /// Food was eaten; carries the new score.
    Ate { score: u32 },
    Died(DeathReason),
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub score: u32,
    pub run_state: RunState,
    pub death_reason: Option<DeathReason>,
    /// Successful moves since the last restart.
    pub tick_count: u64,
    grid: GridSize,
    points_per_food: u32,
    rng: StdRng,
}

impl GameState {
    /// Creates a running game with the starting snake and fresh food.
    #[must_use]
    pub fn new(grid: GridSize, points_per_food: u32, mut rng: StdRng) -> Self {
        let snake = Snake::initial(grid);
        let food = place_food(&mut rng, grid, &snake);

        Self {
            snake,
            food,
            score: 0,
            run_state: RunState::Running,
            death_reason: None,
            tick_count: 0,
            grid,
            points_per_food,
            rng,
        }
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(grid: GridSize, seed: u64) -> Self {
        Self::new(grid, POINTS_PER_FOOD, StdRng::seed_from_u64(seed))
    }

    /// Creates a state from validated settings, seeding from entropy unless
    /// a seed is configured.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config.grid, config.points_per_food, rng)
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.run_state == RunState::GameOver
    }

    /// Advances the simulation by one tick.
    ///
    /// The buffered direction becomes current, then the new head is checked
    /// against the walls and the body. Eating keeps the tail and places new
    /// food; otherwise the tail moves up. A collision only flips the run
    /// state, leaving snake, food and score as they were.
    pub fn step(&mut self) -> TickOutcome {
        if self.run_state != RunState::Running {
            return TickOutcome::Idle;
        }

        self.snake.adopt_buffered_direction();
        let head = self.snake.next_head_position();

        if hits_wall(head, self.grid) {
            return self.end(DeathReason::WallCollision);
        }

        let will_grow = head == self.food;
        if hits_self(head, self.snake.collision_body(will_grow)) {
            return self.end(DeathReason::SelfCollision);
        }

        self.snake.advance(head, will_grow);
        self.tick_count += 1;

        if will_grow {
            self.score = self.score.saturating_add(self.points_per_food);
            self.food = place_food(&mut self.rng, self.grid, &self.snake);
            TickOutcome::Ate { score: self.score }
        } else {
            TickOutcome::Moved
        }
    }

    /// Buffers a turn for the next tick. Ignored once the game is over, and
    /// when the turn reverses the current direction.
    pub fn buffer_direction(&mut self, direction: Direction) -> bool {
        if self.is_over() {
            return false;
        }
        self.snake.buffer_direction(direction)
    }

    /// Flips between running and paused. Returns the new state, or `None`
    /// when the game is over.
    pub fn toggle_pause(&mut self) -> Option<RunState> {
        self.run_state = match self.run_state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
            RunState::GameOver => return None,
        };
        Some(self.run_state)
    }

    /// Reinitialises every entity for a new run on the same grid.
    pub fn restart(&mut self) {
        self.snake = Snake::initial(self.grid);
        self.food = place_food(&mut self.rng, self.grid, &self.snake);
        self.score = 0;
        self.run_state = RunState::Running;
        self.death_reason = None;
        self.tick_count = 0;
    }

    fn end(&mut self, reason: DeathReason) -> TickOutcome {
        self.run_state = RunState::GameOver;
        self.death_reason = Some(reason);
        TickOutcome::Died(reason)
    }
}
