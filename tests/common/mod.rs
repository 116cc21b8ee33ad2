//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which wires a [`ProgressTracker`] to an
//! in-memory store and a manual clock so tests control both persistence and
//! timestamps.

#![allow(dead_code)]

use std::sync::Arc;

use gear5tv::config::Config;
use gear5tv::progress::{ManualClock, ProgressInput, ProgressTracker, DEFAULT_PROGRESS_KEY};
use gear5tv::state::AppState;
use gear5tv::storage::MemoryStore;

pub struct TestHarness {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<ManualClock>,
    pub tracker: Arc<ProgressTracker>,
}

impl TestHarness {
    /// Harness with the default retention cap.
    pub fn new() -> Self {
        Self::with_cap(20)
    }

    pub fn with_cap(max_entries: usize) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), max_entries)
    }

    /// Harness over a pre-seeded store.
    pub fn with_store(store: Arc<MemoryStore>, max_entries: usize) -> Self {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let tracker =
            ProgressTracker::new(store.clone(), clock.clone(), DEFAULT_PROGRESS_KEY, max_entries);
        Self {
            store,
            clock,
            tracker,
        }
    }

    /// Save after moving the clock forward one second.
    pub fn save(&self, id: &str, season: u32, episode: u32, position: f64, duration: f64) {
        self.clock.advance(1_000);
        self.tracker
            .save_progress(ProgressInput::new(id, season, episode, position, duration))
            .unwrap();
    }

    /// Ids in tracker order.
    pub fn ids(&self) -> Vec<String> {
        self.tracker
            .history()
            .iter()
            .map(|e| e.content_id.to_string())
            .collect()
    }

    /// Raw persisted collection.
    pub fn persisted(&self) -> serde_json::Value {
        let raw = self.store.raw(DEFAULT_PROGRESS_KEY).unwrap_or_else(|| "[]".to_string());
        serde_json::from_str(&raw).unwrap()
    }

    /// Reopen a tracker over the same store.
    pub fn reopen(&self) -> Arc<ProgressTracker> {
        ProgressTracker::new(
            self.store.clone(),
            self.clock.clone(),
            DEFAULT_PROGRESS_KEY,
            self.tracker.max_entries(),
        )
    }

    /// Application state sharing this harness's store and clock.
    pub fn app_state(&self) -> Arc<AppState> {
        AppState::with_store(Config::default(), self.store.clone(), self.clock.clone()).unwrap()
    }
}
