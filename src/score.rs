use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::BEST_SCORE_KEY;
use crate::error::ScoreError;

const APP_DIR_NAME: &str = "classic-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Persistence for the single best-score number.
pub trait BestScoreStore: fmt::Debug {
    /// Reads the stored best score. Anything missing or malformed reads as 0.
    fn load(&mut self) -> u32;

    /// Stores a new best score.
    ///
    /// # Errors
    ///
    /// Returns a [`ScoreError`] when the score could not be written.
    fn save(&mut self, best: u32) -> Result<(), ScoreError>;
}

impl<T: BestScoreStore + ?Sized> BestScoreStore for Box<T> {
    fn load(&mut self) -> u32 {
        (**self).load()
    }

    fn save(&mut self, best: u32) -> Result<(), ScoreError> {
        (**self).save(best)
    }
}

/// On-disk layout: a flat JSON object of named values.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct ScoreFile {
    entries: BTreeMap<String, Value>,
}

/// Best score kept under a fixed key in a JSON file. Other keys in the file
/// are left alone.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    key: String,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: BEST_SCORE_KEY.to_owned(),
        }
    }

    /// Store at the platform-correct data directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::NoPath`] when the platform has no local data
    /// directory.
    pub fn at_default_path() -> Result<Self, ScoreError> {
        default_scores_path().map(Self::new).ok_or(ScoreError::NoPath)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Option<ScoreFile> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("could not read {}: {e}", self.path.display());
                return None;
            }
        };

        match serde_json::from_str::<ScoreFile>(&raw) {
            Ok(file) => Some(file),
            Err(e) => {
                log::warn!("ignoring malformed score file {}: {e}", self.path.display());
                None
            }
        }
    }
}

impl BestScoreStore for JsonFileStore {
    fn load(&mut self) -> u32 {
        let Some(file) = self.read_file() else {
            return 0;
        };
        let Some(value) = file.entries.get(&self.key) else {
            return 0;
        };

        parse_best_score(value).unwrap_or_else(|| {
            log::warn!("treating stored best score {value} as 0");
            0
        })
    }

    fn save(&mut self, best: u32) -> Result<(), ScoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ScoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut file = self.read_file().unwrap_or_default();
        file.entries.insert(self.key.clone(), Value::from(best));

        let mut json = serde_json::to_string_pretty(&file)?;
        json.push('\n');
        fs::write(&self.path, json).map_err(|source| ScoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Best score held in memory for the lifetime of the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStore {
    best: u32,
    saves: u32,
}

impl MemoryStore {
    #[must_use]
    pub fn with_best(best: u32) -> Self {
        Self { best, saves: 0 }
    }

    /// Number of successful saves so far.
    #[must_use]
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&mut self) -> u32 {
        self.best
    }

    fn save(&mut self, best: u32) -> Result<(), ScoreError> {
        self.best = best;
        self.saves += 1;
        Ok(())
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn default_scores_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|base| base.join(APP_DIR_NAME).join(SCORE_FILE_NAME))
}

/// Accepts non-negative integers, either as JSON numbers or as numeric
/// strings. Everything else is rejected.
fn parse_best_score(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    }
}
