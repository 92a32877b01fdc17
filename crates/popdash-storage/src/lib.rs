//! Key-value persistence for Popdash.
//!
//! An asynchronous, batched mapping from string keys to JSON values: a sync
//! `KvBackend` trait (file-backed or in-memory) wrapped by the async
//! `KvClient`. `get` never fails on absent keys; `set` applies its whole
//! batch in one call.

pub mod backend;
pub mod client;
pub mod file;
pub mod memory;

pub use backend::{KvBackend, StorageError, StorageResult};
pub use client::KvClient;
pub use file::FileBackend;
pub use memory::MemoryBackend;
