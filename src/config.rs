use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;

use crate::error::ConfigError;
use crate::scheduler::SchedulerKind;
use crate::speed::SpeedPolicy;

/// Square grid dimensions, counted in tiles per side.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub tiles: u16,
}

impl GridSize {
    #[must_use]
    pub const fn new(tiles: u16) -> Self {
        Self { tiles }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.tiles) * usize::from(self.tiles)
    }
}

/// Validated gameplay settings for one run of the program.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub grid: GridSize,
    pub speed: SpeedPolicy,
    pub points_per_food: u32,
    pub scheduler: SchedulerKind,
    /// Fixed RNG seed for reproducible food placement.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::new(DEFAULT_GRID_SIZE),
            speed: SpeedPolicy::default(),
            points_per_food: POINTS_PER_FOOD,
            scheduler: SchedulerKind::Accumulator,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Checks the grid and timing settings against the playable ranges.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first setting that is out of range.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let tiles = self.grid.tiles;
        if tiles < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                tiles,
                min: MIN_GRID_SIZE,
            });
        }
        if tiles > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                tiles,
                max: MAX_GRID_SIZE,
            });
        }
        if self.speed.floor.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if self.speed.floor > self.speed.base {
            return Err(ConfigError::FloorAboveBase {
                floor_ms: self.speed.floor.as_millis(),
                base_ms: self.speed.base.as_millis(),
            });
        }
        Ok(self)
    }
}

/// Colors for every element drawn on the board and HUD.
#[derive(Debug)]
pub struct Palette {
    pub background: Color,
    pub grid_line: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub border: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub hud_accent: Color,
    pub status: Color,
    pub helper: Color,
}

/// Slate background, sky-blue snake with a cyan head, rose food.
pub const PALETTE: Palette = Palette {
    background: Color::Rgb(2, 6, 23),
    grid_line: Color::Rgb(30, 41, 59),
    snake_head: Color::Rgb(34, 211, 238),
    snake_body: Color::Rgb(56, 189, 248),
    food: Color::Rgb(251, 113, 133),
    border: Color::Rgb(71, 85, 105),
    hud_label: Color::Rgb(148, 163, 184),
    hud_value: Color::White,
    hud_accent: Color::Rgb(34, 211, 238),
    status: Color::Rgb(226, 232, 240),
    helper: Color::Rgb(100, 116, 139),
};

/// Rounded board frame.
pub const BORDER_BOARD: border::Set = border::ROUNDED;

/// Terminal columns per grid tile; rows per tile is always one.
pub const TILE_WIDTH: u16 = 2;

pub const GLYPH_SNAKE: &str = "██";
pub const GLYPH_FOOD: &str = "●";
pub const GLYPH_GRID: &str = "·";

/// Tiles per side when no size is given.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Smallest grid that fits the starting snake with room to turn.
pub const MIN_GRID_SIZE: u16 = 5;

pub const MAX_GRID_SIZE: u16 = 100;

/// Length of the snake at start and after restart.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Score awarded per food eaten.
pub const POINTS_PER_FOOD: u32 = 10;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 120;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 60;

/// Score needed for each speed step.
pub const POINTS_PER_SPEED_STEP: u32 = 50;

/// Interval shaved off per speed step, in milliseconds.
pub const SPEED_STEP_MS: u64 = 8;

/// Upper bound on ticks replayed in one frame by the accumulator scheduler.
pub const MAX_CATCH_UP_TICKS: u32 = 5;

/// Event poll timeout between frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Key under which the best score is stored.
pub const BEST_SCORE_KEY: &str = "classic-snake-best";

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{GameConfig, GridSize};
    use crate::error::ConfigError;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate().ok(), Some(config));
    }

    #[test]
    fn tiny_grid_is_rejected() {
        let config = GameConfig {
            grid: GridSize::new(4),
            ..GameConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooSmall { tiles: 4, .. })
        ));
    }

    #[test]
    fn floor_above_base_is_rejected() {
        let mut config = GameConfig::default();
        config.speed.base = Duration::from_millis(50);
        config.speed.floor = Duration::from_millis(80);

        assert!(matches!(
            config.validate(),
            Err(ConfigError::FloorAboveBase {
                floor_ms: 80,
                base_ms: 50
            })
        ));
    }

    #[test]
    fn zero_floor_is_rejected() {
        let mut config = GameConfig::default();
        config.speed.floor = Duration::ZERO;

        assert!(matches!(config.validate(), Err(ConfigError::ZeroInterval)));
    }

    #[test]
    fn total_cells_is_square_of_tiles() {
        assert_eq!(GridSize::new(20).total_cells(), 400);
    }
}
