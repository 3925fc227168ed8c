use super::domain::ScoreKey;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Latest score published by each exercise and decision of a session.
///
/// Each key is written by exactly one owner on its terminal transition.
/// Unset keys read as zero.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SessionScoreRegistry {
    scores: BTreeMap<ScoreKey, i32>,
}

impl SessionScoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the score stored under `key`.
    pub fn publish(&mut self, key: &ScoreKey, value: i32) {
        self.scores.insert(key.clone(), value);
    }

    pub fn read(&self, key: &ScoreKey) -> i32 {
        self.scores.get(key).copied().unwrap_or(0)
    }

    pub fn contains(&self, key: &ScoreKey) -> bool {
        self.scores.contains_key(key)
    }

    /// Clears every key of the session.
    pub fn reset_all(&mut self) {
        let cleared = self.scores.len();
        self.scores.clear();
        info!(cleared, "session score registry reset");
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&ScoreKey, i32)> + '_ {
        self.scores.iter().map(|(key, value)| (key, *value))
    }
}
