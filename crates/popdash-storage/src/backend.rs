//! Storage backend trait and error types.
//!
//! This module defines the `KvBackend` trait that abstracts over different
//! key-value storage implementations (JSON file, in-memory).

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during key-value store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// The backend rejected a read or write.
    #[error("Storage error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Create a serialization error.
    pub fn serialize(message: impl Into<String>) -> Self {
        Self::Serialize(message.into())
    }

    /// Create a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// User-friendly message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Io(_) => "Unable to access saved data. Please try again.",
            StorageError::Serialize(_) => "Saved data is malformed. Consider resetting app data.",
            StorageError::Backend(_) => "A data operation failed. Please try again.",
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for key-value storage backends.
///
/// Mirrors the host store contract: `get` returns only the keys that are
/// present (an absent key is missing from the map, never an error), and
/// `set` applies all entries in one batched write that is atomic per call.
///
/// Note: Implementations don't need to be Sync - the KvClient wrapper handles
/// thread-safe access via Mutex.
pub trait KvBackend: Send {
    /// Read the requested keys. Absent keys are omitted from the result.
    fn get(&self, keys: &[&str]) -> StorageResult<HashMap<String, Value>>;

    /// Write all entries in one batch.
    fn set(&mut self, entries: HashMap<String, Value>) -> StorageResult<()>;
}
