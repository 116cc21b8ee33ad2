pub mod persist;
mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    tracing::debug!("Loaded config from {:?}", path);
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./gear5tv.toml",
        "./config.toml",
        "~/.config/gear5tv/config.toml",
        "/etc/gear5tv/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let key = config.storage.progress_key.trim();
    if key.is_empty() {
        anyhow::bail!("storage.progress_key cannot be empty");
    }
    if key.contains(['/', '\\']) {
        anyhow::bail!("storage.progress_key cannot contain path separators");
    }

    if config.tracker.max_entries == 0 {
        anyhow::bail!("tracker.max_entries cannot be 0");
    }
    if config.resume.max_items == 0 {
        anyhow::bail!("resume.max_items cannot be 0");
    }
    if config.resume.max_items > config.tracker.max_entries {
        tracing::warn!(
            "resume.max_items ({}) exceeds tracker.max_entries ({}); the row will never fill",
            config.resume.max_items,
            config.tracker.max_entries
        );
    }

    if config.player.direct_extensions.is_empty() {
        anyhow::bail!("player.direct_extensions cannot be empty");
    }
    for ext in &config.player.direct_extensions {
        if ext.trim_start_matches('.').trim().is_empty() {
            anyhow::bail!("player.direct_extensions contains an empty extension");
        }
    }

    let interval = config.player.save_interval_secs;
    if !interval.is_finite() || interval < 0.0 {
        anyhow::bail!("player.save_interval_secs must be a non-negative number, got {}", interval);
    }

    if let Some(path) = &config.catalog.path {
        if !path.exists() {
            tracing::warn!("Catalog file does not exist: {:?}", path);
        }
    }

    Ok(())
}
