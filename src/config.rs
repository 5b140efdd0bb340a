//! Runtime configuration for the terminal binary, read from the environment.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `BLOCK_ARCADE_SEED` | piece seed (`u32`); unset means OS entropy |
//! | `BLOCK_ARCADE_SCORES` | high score file path |
//! | `BLOCK_ARCADE_NO_SAVE` | `1`/`true` keeps scores in memory only |
//! | `BLOCK_ARCADE_LOG_PATH` | write log output to this file instead of stderr |
//!
//! Log filtering itself follows `RUST_LOG`.

use std::env;
use std::path::PathBuf;

use crate::store::JsonFileStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: Option<u32>,
    pub scores_path: PathBuf,
    pub persist_scores: bool,
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            scores_path: JsonFileStore::default_path(),
            persist_scores: true,
            log_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = non_empty("BLOCK_ARCADE_SEED").and_then(|s| s.parse().ok());
        let scores_path = non_empty("BLOCK_ARCADE_SCORES")
            .map(PathBuf::from)
            .unwrap_or_else(JsonFileStore::default_path);
        let persist_scores = !non_empty("BLOCK_ARCADE_NO_SAVE")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);
        let log_path = non_empty("BLOCK_ARCADE_LOG_PATH").map(PathBuf::from);

        Self {
            seed,
            scores_path,
            persist_scores,
            log_path,
        }
    }
}
