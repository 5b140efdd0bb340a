//! High score collaborator.
//!
//! A plain key-value interface: read once when a game starts, written when a
//! finished game beats the stored value. Keys are per game
//! (see [`GameId::high_score_key`]). An absent key means "no high score yet".
//! Implementations absorb their own failures; gameplay never blocks on them.

use std::collections::HashMap;

use crate::types::GameId;

pub trait HighScoreStore {
    fn get(&self, key: &str) -> Option<u32>;
    fn set(&mut self, key: &str, value: u32);
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn get(&self, key: &str) -> Option<u32> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: u32) {
        (**self).set(key, value)
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for &mut S {
    fn get(&self, key: &str) -> Option<u32> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: u32) {
        (**self).set(key, value)
    }
}

/// Stored best score for `game`, 0 when absent.
pub fn load_high_score<S: HighScoreStore + ?Sized>(store: &S, game: GameId) -> u32 {
    store.get(game.high_score_key()).unwrap_or(0)
}

/// In-process store. Counts writes so callers can observe them.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: u32) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value);
        store
    }

    /// Number of `set` calls received
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u32) {
        self.writes += 1;
        self.values.insert(key.to_string(), value);
    }
}
