//! Persistent high scores.
//!
//! [`JsonFileStore`] keeps every game's best score in one JSON object keyed
//! by [`GameId::high_score_key`](block_arcade_core::GameId::high_score_key),
//! e.g. `{"tetrisHighScore": 1200}`. The whole file is rewritten on each
//! `set`.
//!
//! Storage trouble never reaches gameplay: an unreadable file is moved aside
//! to `highscores.json.bak` and loads as empty, and a failed write is logged
//! and dropped. The fallible `open`/`flush` are there for callers that want
//! to report errors themselves.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use block_arcade_core::HighScoreStore;

pub const APP_DIR_NAME: &str = "block-arcade";
pub const SCORES_FILE_NAME: &str = "highscores.json";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// `<config dir>/block-arcade/highscores.json`, or the working directory
    /// when the platform has no config dir.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
            .join(SCORES_FILE_NAME)
    }

    /// Read `path`. A missing file is an empty store; a malformed one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("parsing high scores in {}", path.display()))?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        };
        Ok(Self { path, values })
    }

    /// Like [`open`](Self::open) but falls back to an empty store. A file that
    /// could not be loaded is renamed to [`backup_path`](Self::backup_path)
    /// first, so the next `set` does not overwrite other games' scores.
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(&path) {
            Ok(store) => store,
            Err(e) => {
                log::warn!("ignoring high score file: {e:#}");
                if path.exists() {
                    let backup = Self::backup_path(&path);
                    match fs::rename(&path, &backup) {
                        Ok(()) => log::warn!("moved unreadable scores to {}", backup.display()),
                        Err(e) => log::warn!("could not move {} aside: {e}", path.display()),
                    }
                }
                Self {
                    path,
                    values: BTreeMap::new(),
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `path` with `.bak` appended to the file name.
    pub fn backup_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    /// Write every value back to disk, creating parent directories.
    pub fn flush(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let text = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, text)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

/// Stored values may be numbers or numeric strings; anything else is absent.
fn parse_score(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl HighScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.values.get(key).and_then(parse_score)
    }

    fn set(&mut self, key: &str, value: u32) {
        self.values.insert(key.to_string(), Value::from(value));
        match self.flush() {
            Ok(()) => log::debug!("saved {key}={value} to {}", self.path.display()),
            Err(e) => log::warn!("could not save high score: {e:#}"),
        }
    }
}
