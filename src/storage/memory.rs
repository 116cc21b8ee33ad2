use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use gear5tv_common::{Error, Result};
use parking_lot::RwLock;

use super::KeyValueStore;

/// In-process store, used when nothing should touch disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing the failure switch.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.values.write().insert(key.to_string(), value.to_string());
        store
    }

    /// Make every subsequent `set` fail (quota exceeded, disk full).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `set` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw value under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::storage("store is not writable"));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.values.write().insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_and_counts() {
        let store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.set("a", "2").unwrap();
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn test_failing_writes() {
        let store = MemoryStore::with_value("a", "old");
        store.set_fail_writes(true);
        assert!(matches!(store.set("a", "new"), Err(Error::Storage(_))));
        assert_eq!(store.raw("a").as_deref(), Some("old"));
        assert_eq!(store.write_count(), 0);
    }
}
