//! Watch-progress tracker.
//!
//! Keeps one entry per title, most recently updated first, bounded to
//! `max_entries`. The collection is mirrored in memory and written to the
//! key-value store as a single JSON array on every change. A store that
//! cannot be read yields an empty collection; a store that cannot be written
//! is logged and the in-memory mirror stays authoritative.

mod clock;
mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use types::*;

use std::collections::HashSet;
use std::sync::Arc;

use gear5tv_common::{ContentId, Result};
use parking_lot::RwLock;
use tokio::sync::broadcast;

use crate::storage::KeyValueStore;

/// Store key of the progress collection.
pub const DEFAULT_PROGRESS_KEY: &str = "gear5tv-watch-progress";

/// Retention cap.
pub const DEFAULT_MAX_ENTRIES: usize = 20;

pub struct ProgressTracker {
    entries: RwLock<Vec<WatchProgressEntry>>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    key: String,
    max_entries: usize,
    event_tx: broadcast::Sender<ProgressEvent>,
}

impl ProgressTracker {
    /// Create a tracker and load whatever the store currently holds.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        key: impl Into<String>,
        max_entries: usize,
    ) -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(64);
        let key = key.into();
        let max_entries = max_entries.max(1);
        let entries = load_entries(store.as_ref(), &key, max_entries);

        Arc::new(Self {
            entries: RwLock::new(entries),
            store,
            clock,
            key,
            max_entries,
            event_tx,
        })
    }

    /// Tracker with the default key and cap, stamped by the wall clock.
    pub fn with_defaults(store: Arc<dyn KeyValueStore>) -> Arc<Self> {
        Self::new(
            store,
            Arc::new(SystemClock),
            DEFAULT_PROGRESS_KEY,
            DEFAULT_MAX_ENTRIES,
        )
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.event_tx.subscribe()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Record a position, replacing any earlier entry for the same title.
    ///
    /// Only malformed input is an error. A failed store write is logged and
    /// the entry is still kept in memory.
    pub fn save_progress(&self, input: ProgressInput) -> Result<WatchProgressEntry> {
        input.validate()?;
        let now = self.clock.now_millis();

        let entry = {
            let mut entries = self.entries.write();
            // A clock that stepped back must not reorder the collection.
            let stamp = entries
                .first()
                .map_or(now, |newest| now.max(newest.updated_at_epoch_millis));
            let entry = input.into_entry(stamp);
            entries.retain(|e| e.content_id != entry.content_id);
            entries.insert(0, entry.clone());
            entries.truncate(self.max_entries);
            self.persist(&entries);
            entry
        };

        tracing::debug!(
            "Saved progress for {} S{}E{} at {:.1}/{:.1}s",
            entry.content_id,
            entry.season_index,
            entry.episode_index,
            entry.position_seconds,
            entry.duration_seconds
        );
        self.broadcast(ProgressEvent::Saved {
            entry: entry.clone(),
        });

        Ok(entry)
    }

    pub fn get_progress(&self, content_id: &str) -> Option<WatchProgressEntry> {
        let entries = self.entries.read();
        entries
            .iter()
            .find(|e| e.content_id.as_str() == content_id)
            .cloned()
    }

    /// Drop the entry for a title. Returns `false`, without writing, when
    /// there was none.
    pub fn remove_progress(&self, content_id: &str) -> bool {
        {
            let mut entries = self.entries.write();
            let len_before = entries.len();
            entries.retain(|e| e.content_id.as_str() != content_id);
            if entries.len() == len_before {
                return false;
            }
            self.persist(&entries);
        }

        tracing::debug!("Removed progress for {}", content_id);
        self.broadcast(ProgressEvent::Removed {
            content_id: ContentId::from(content_id),
        });
        true
    }

    /// The whole collection, most recent first.
    pub fn history(&self) -> Vec<WatchProgressEntry> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn persist(&self, entries: &[WatchProgressEntry]) {
        let result = serde_json::to_string(entries)
            .map_err(gear5tv_common::Error::from)
            .and_then(|json| self.store.set(&self.key, &json));
        if let Err(e) = result {
            tracing::warn!("Failed to persist watch progress: {}", e);
        }
    }

    fn broadcast(&self, event: ProgressEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::trace!("No subscribers for progress event");
        }
    }
}

/// Read, validate and normalize the stored collection.
fn load_entries(store: &dyn KeyValueStore, key: &str, max_entries: usize) -> Vec<WatchProgressEntry> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Failed to read watch progress: {}", e);
            return Vec::new();
        }
    };

    match parse_entries(&raw) {
        Ok(entries) => normalize(entries, max_entries),
        Err(e) => {
            tracing::warn!("Ignoring stored watch progress: {}", e);
            Vec::new()
        }
    }
}

/// Parse a stored collection, rejecting it as a whole if any entry is bad.
pub fn parse_entries(raw: &str) -> Result<Vec<WatchProgressEntry>> {
    let entries: Vec<WatchProgressEntry> = serde_json::from_str(raw)?;
    for entry in &entries {
        entry.validate()?;
    }
    Ok(entries)
}

/// Sort by recency, keep the newest entry per title, apply the cap.
pub fn normalize(mut entries: Vec<WatchProgressEntry>, max_entries: usize) -> Vec<WatchProgressEntry> {
    entries.sort_by(|a, b| b.updated_at_epoch_millis.cmp(&a.updated_at_epoch_millis));

    let mut seen = HashSet::new();
    entries.retain(|e| seen.insert(e.content_id.clone()));
    entries.truncate(max_entries);
    entries
}
