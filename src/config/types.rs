use gear5tv_common::media;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::playback::DEFAULT_SAVE_INTERVAL_SECS;
use crate::progress::{DEFAULT_MAX_ENTRIES, DEFAULT_PROGRESS_KEY};
use crate::resume::DEFAULT_MAX_ITEMS;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub tracker: TrackerConfig,

    #[serde(default)]
    pub resume: ResumeConfig,

    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the progress file. `~` is expanded.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Key (file stem) of the progress collection.
    #[serde(default = "default_progress_key")]
    pub progress_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            progress_key: default_progress_key(),
        }
    }
}

impl StorageConfig {
    /// `data_dir` with `~` expanded.
    pub fn resolved_data_dir(&self) -> PathBuf {
        let raw = self.data_dir.to_string_lossy();
        PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("~/.local/share/gear5tv")
}

fn default_progress_key() -> String {
    DEFAULT_PROGRESS_KEY.to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrackerConfig {
    /// Maximum number of titles remembered.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResumeConfig {
    /// Maximum number of items in the continue-watching row.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
        }
    }
}

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerConfig {
    /// Extensions played natively (and therefore tracked).
    #[serde(default = "default_direct_extensions")]
    pub direct_extensions: Vec<String>,

    /// Seconds of movement between two progress saves.
    #[serde(default = "default_save_interval_secs")]
    pub save_interval_secs: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            direct_extensions: default_direct_extensions(),
            save_interval_secs: default_save_interval_secs(),
        }
    }
}

fn default_direct_extensions() -> Vec<String> {
    media::direct_media_extensions()
        .iter()
        .map(|e| e.to_string())
        .collect()
}

fn default_save_interval_secs() -> f64 {
    DEFAULT_SAVE_INTERVAL_SECS
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// JSON catalog to load instead of the built-in one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}
