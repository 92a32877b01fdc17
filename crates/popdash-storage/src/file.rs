//! JSON-file key-value backend.
//!
//! Persists the whole key space as a single pretty-printed JSON object in the
//! user's config directory. Every call reads or rewrites the full file, which
//! keeps each `set` atomic with respect to the batch it was given.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::backend::{KvBackend, StorageError, StorageResult};

/// File-backed key-value store.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Create a backend at the given path.
    ///
    /// The file is created lazily on first write; a missing file reads as an
    /// empty store.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_all(&self) -> StorageResult<HashMap<String, Value>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(HashMap::new());
        }

        serde_json::from_str(&contents)
            .map_err(|e| StorageError::serialize(format!("{}: {}", self.path.display(), e)))
    }

    fn write_all(&self, entries: &HashMap<String, Value>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::serialize(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KvBackend for FileBackend {
    fn get(&self, keys: &[&str]) -> StorageResult<HashMap<String, Value>> {
        let all = self.read_all()?;
        let mut result = HashMap::new();
        for key in keys {
            if let Some(value) = all.get(*key) {
                result.insert((*key).to_string(), value.clone());
            }
        }
        Ok(result)
    }

    fn set(&mut self, entries: HashMap<String, Value>) -> StorageResult<()> {
        let mut all = self.read_all()?;
        all.extend(entries);
        self.write_all(&all)?;
        tracing::debug!("Wrote {} entries to {}", all.len(), self.path.display());
        Ok(())
    }
}
