//! String key-value persistence behind the watch-progress tracker.
//!
//! Two backends are provided: [`FileStore`] keeps one JSON file per key under
//! a data directory, [`MemoryStore`] keeps values in a map and can be told to
//! fail writes.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use gear5tv_common::Result;

/// Synchronous string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key` in a single write.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
