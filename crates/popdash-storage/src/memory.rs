//! In-memory key-value backend.
//!
//! Used by tests across the workspace and for ephemeral runs where nothing
//! should touch the filesystem.

use std::collections::HashMap;

use serde_json::Value;

use crate::backend::{KvBackend, StorageResult};

/// In-memory key-value backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, Value>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-seeded with entries (for tests).
    pub fn with_entries(entries: HashMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, keys: &[&str]) -> StorageResult<HashMap<String, Value>> {
        let mut result = HashMap::new();
        for key in keys {
            if let Some(value) = self.entries.get(*key) {
                result.insert((*key).to_string(), value.clone());
            }
        }
        Ok(result)
    }

    fn set(&mut self, entries: HashMap<String, Value>) -> StorageResult<()> {
        self.entries.extend(entries);
        Ok(())
    }
}
