use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Rejected gameplay settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid of {tiles} tiles is too small; the minimum is {min}")]
    GridTooSmall { tiles: u16, min: u16 },

    #[error("grid of {tiles} tiles is too large; the maximum is {max}")]
    GridTooLarge { tiles: u16, max: u16 },

    #[error("tick interval must be at least one millisecond")]
    ZeroInterval,

    #[error("minimum tick interval ({floor_ms}ms) exceeds the base interval ({base_ms}ms)")]
    FloorAboveBase { floor_ms: u128, base_ms: u128 },
}

/// Failures while persisting the best score.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("could not determine a local data directory for the score file")]
    NoPath,

    #[error("failed to create score directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write score file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to serialize scores: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Top-level errors that abort the program.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("best score storage unavailable: {0}")]
    Score(#[from] ScoreError),

    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),

    #[error("failed to create log file {path}: {source}")]
    LogFile { path: PathBuf, source: io::Error },

    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
