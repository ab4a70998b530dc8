//! Key-event scripts for unattended sessions.
//!
//! A script is a JSON array of `{ "tick": N, "event": { "type": "Down", "key": "<up>" } }`
//! entries. Events fire at the start of their tick, in file order.

use std::path::Path;

use serde::{Deserialize, Serialize};

use starwake_sim::input::KeyEvent;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub tick: u64,
    pub event: KeyEvent,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    entries: Vec<ScriptEntry>,
}

impl Script {
    pub fn new(mut entries: Vec<ScriptEntry>) -> Self {
        // Stable, so same-tick events keep their file order.
        entries.sort_by_key(|e| e.tick);
        Self { entries }
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let entries: Vec<ScriptEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| AppError::ScriptIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Events scheduled for `tick`.
    pub fn events_at(&self, tick: u64) -> impl Iterator<Item = &KeyEvent> {
        let start = self.entries.partition_point(|e| e.tick < tick);
        self.entries[start..]
            .iter()
            .take_while(move |e| e.tick == tick)
            .map(|e| &e.event)
    }

    /// Tick of the last scheduled event.
    pub fn last_tick(&self) -> Option<u64> {
        self.entries.last().map(|e| e.tick)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
