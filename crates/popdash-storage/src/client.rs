//! Async client over a sync key-value backend.
//!
//! `KvClient` gives the rest of the workspace the asynchronous store contract
//! the popup expects, while backend work runs on the blocking thread pool.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::backend::{KvBackend, StorageError, StorageResult};

/// Cloneable async handle to a key-value backend.
#[derive(Clone)]
pub struct KvClient {
    backend: Arc<Mutex<dyn KvBackend>>,
}

impl KvClient {
    /// Wrap a backend in an async client.
    pub fn new<B: KvBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Arc::new(Mutex::new(backend)),
        }
    }

    /// Read the requested keys. Absent keys are omitted from the result.
    pub async fn get(&self, keys: &[&str]) -> StorageResult<HashMap<String, Value>> {
        let backend = self.backend.clone();
        let keys: Vec<String> = keys.iter().map(|k| (*k).to_string()).collect();
        tokio::task::spawn_blocking(move || {
            let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
            backend.lock().get(&refs)
        })
        .await
        .map_err(|e| StorageError::backend(format!("storage task failed: {}", e)))?
    }

    /// Write all entries in one batched call.
    pub async fn set(&self, entries: HashMap<String, Value>) -> StorageResult<()> {
        let backend = self.backend.clone();
        tokio::task::spawn_blocking(move || backend.lock().set(entries))
            .await
            .map_err(|e| StorageError::backend(format!("storage task failed: {}", e)))?
    }

    /// Read a single key, `None` when absent.
    pub async fn get_one(&self, key: &str) -> StorageResult<Option<Value>> {
        let mut result = self.get(&[key]).await?;
        Ok(result.remove(key))
    }

    /// Write a single key.
    pub async fn set_one(&self, key: &str, value: Value) -> StorageResult<()> {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value);
        self.set(entries).await
    }
}

impl std::fmt::Debug for KvClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("KvClient").finish()
    }
}
