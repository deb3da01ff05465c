//! High score persistence
//!
//! A single best-score integer stored under a string key, read at load
//! and written on game over by the embedding front-end.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// The persisted high score record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScore {
    /// Storage key the record lives under
    pub key: String,
    /// Best score seen so far
    pub best: u32,
}

impl Default for HighScore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl HighScore {
    /// Default storage key
    pub const DEFAULT_KEY: &'static str = "splitshot_highscore";

    /// Fresh record with no score recorded yet
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            best: 0,
        }
    }

    /// Check whether a score would improve the record
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a score. Returns true if the best improved.
    pub fn record(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load the record from a JSON file. A missing or unreadable file
    /// yields a fresh record under the default key.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScore>(&json) {
                Ok(record) => {
                    log::info!("loaded high score {} ({})", record.best, record.key);
                    record
                }
                Err(err) => {
                    log::warn!("high score file corrupt, starting fresh: {err}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no high score file, starting fresh");
                Self::default()
            }
        }
    }

    /// Save the record as JSON
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("high score saved ({})", self.best);
        Ok(())
    }
}
