//! Persistent to-do list over the key-value store.
//!
//! The list is an ordered, duplicate-permitting `Vec<String>` stored whole
//! under the `tasks` key; storage order is render order. Task strings are the
//! sole identity, so removing a task removes every textually identical copy.
//!
//! Each mutation is a read-modify-write round trip against the store, which
//! would lose an update if two mutations raced on the same prior list. Every
//! mutation therefore runs under an internal mutex, so concurrent calls
//! serialize and both effects persist.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::Mutex;

use popdash_storage::{KvClient, StorageError, StorageResult};

const TASKS_KEY: &str = "tasks";

/// Reads and mutates the task list through the key-value store.
#[derive(Debug, Clone)]
pub struct TaskListManager {
    store: KvClient,
    // Serializes read-modify-write round trips (single-flight queue).
    write_lock: Arc<Mutex<()>>,
}

impl TaskListManager {
    pub fn new(store: KvClient) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Load the full task list; a missing key reads as an empty list.
    pub async fn load_all(&self) -> StorageResult<Vec<String>> {
        match self.store.get_one(TASKS_KEY).await? {
            Some(value) => Self::decode(value),
            None => Ok(Vec::new()),
        }
    }

    /// Append `task` to the end of the list and return the updated list.
    pub async fn append(&self, task: &str) -> StorageResult<Vec<String>> {
        let _guard = self.write_lock.lock().await;

        let mut tasks = self.load_all().await?;
        tasks.push(task.to_string());
        self.store.set_one(TASKS_KEY, json!(tasks)).await?;

        tracing::debug!("Task saved: {}", task);
        Ok(tasks)
    }

    /// Remove every element equal to `task` and return the updated list.
    ///
    /// Removing an absent task succeeds as a no-op (the unchanged list is
    /// rewritten). Duplicate task strings are indistinguishable, so all
    /// matching copies go together.
    pub async fn remove(&self, task: &str) -> StorageResult<Vec<String>> {
        let _guard = self.write_lock.lock().await;

        let tasks = self.load_all().await?;
        let remaining: Vec<String> = tasks.into_iter().filter(|t| t != task).collect();
        self.store.set_one(TASKS_KEY, json!(remaining)).await?;

        tracing::debug!("Task deleted: {}", task);
        Ok(remaining)
    }

    fn decode(value: Value) -> StorageResult<Vec<String>> {
        serde_json::from_value(value)
            .map_err(|e| StorageError::serialize(format!("tasks key is not a string list: {}", e)))
    }
}
