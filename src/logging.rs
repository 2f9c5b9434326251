use std::fs::File;
use std::path::Path;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::error::AppError;

/// Sends `log` output to `path`. Stdout belongs to the game screen, so
/// without a path no logger is installed and log macros are no-ops.
///
/// # Errors
///
/// Returns [`AppError::LogFile`] when the file cannot be created and
/// [`AppError::Logger`] when a logger is already installed.
pub fn init(path: Option<&Path>, debug: bool) -> Result<(), AppError> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .add_filter_allow_str(env!("CARGO_CRATE_NAME"))
        .build();

    WriteLogger::init(level, config, file)?;
    log::info!("logging to {} at {level}", path.display());
    Ok(())
}
