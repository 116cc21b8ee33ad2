//! Application wiring: one catalog, one tracker and one resolver built from
//! the configuration and shared by every surface.

use std::sync::Arc;

use anyhow::{Context, Result};
use gear5tv_catalog::Catalog;
use tokio::sync::broadcast;

use crate::config::Config;
use crate::playback::{PlaybackRequest, PlaybackSession};
use crate::player::SourceResolver;
use crate::progress::{Clock, ProgressEvent, ProgressTracker, SystemClock};
use crate::resume::ContinueWatchingSurface;
use crate::storage::{FileStore, KeyValueStore};

pub struct AppState {
    config: Config,
    catalog: Arc<Catalog>,
    tracker: Arc<ProgressTracker>,
    resolver: SourceResolver,
}

impl AppState {
    /// Build from config, persisting progress under `storage.data_dir`.
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let data_dir = config.storage.resolved_data_dir();
        tracing::debug!("Using data directory {:?}", data_dir);
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(data_dir));
        Self::with_store(config, store, Arc::new(SystemClock))
    }

    /// Build with an explicit store and clock.
    pub fn with_store(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Arc<Self>> {
        let catalog = match &config.catalog.path {
            Some(path) => Catalog::load(path)
                .with_context(|| format!("Failed to load catalog: {:?}", path))?,
            None => Catalog::embedded().context("Failed to load built-in catalog")?,
        };
        tracing::debug!("Catalog has {} titles", catalog.len());

        let tracker = ProgressTracker::new(
            store,
            clock,
            config.storage.progress_key.clone(),
            config.tracker.max_entries,
        );
        let resolver = SourceResolver::new(config.player.direct_extensions.clone());

        Ok(Arc::new(Self {
            config,
            catalog: Arc::new(catalog),
            tracker,
            resolver,
        }))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tracker(&self) -> &Arc<ProgressTracker> {
        &self.tracker
    }

    pub fn resolver(&self) -> &SourceResolver {
        &self.resolver
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.tracker.subscribe()
    }

    pub fn continue_watching(&self) -> ContinueWatchingSurface<Catalog> {
        ContinueWatchingSurface::new(
            self.tracker.clone(),
            self.catalog.clone(),
            self.config.resume.max_items,
        )
    }

    pub fn open_playback(&self, request: &PlaybackRequest) -> gear5tv_common::Result<PlaybackSession> {
        PlaybackSession::open(
            self.catalog.as_ref(),
            self.tracker.clone(),
            &self.resolver,
            request,
            self.config.player.save_interval_secs,
        )
    }
}
