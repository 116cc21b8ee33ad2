//! Configuration persistence using toml_edit to preserve formatting and comments.

use super::Config;
use anyhow::{Context, Result};
use std::path::Path;
use toml_edit::DocumentMut;

/// Save the config to a TOML file.
///
/// When the file already exists, each section is replaced in place so
/// comments and unrelated keys outside those sections survive.
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    let new_content =
        toml::to_string_pretty(config).with_context(|| "Failed to serialize config")?;
    let new_doc: DocumentMut = new_content
        .parse()
        .with_context(|| "Failed to parse serialized config")?;

    let doc = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let mut doc: DocumentMut = content
            .parse()
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        merge_sections(&mut doc, &new_doc);
        doc
    } else {
        new_doc
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }
    std::fs::write(path, doc.to_string())
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}

fn merge_sections(doc: &mut DocumentMut, new_doc: &DocumentMut) {
    for section in ["storage", "tracker", "resume", "player", "catalog"] {
        match new_doc.get(section) {
            Some(item) => match doc.get_mut(section).and_then(|i| i.as_table_mut()) {
                Some(table) => {
                    let new_keys: Vec<String> = item
                        .as_table()
                        .map(|t| t.iter().map(|(k, _)| k.to_string()).collect())
                        .unwrap_or_default();
                    let stale: Vec<String> = table
                        .iter()
                        .map(|(k, _)| k.to_string())
                        .filter(|k| !new_keys.contains(k))
                        .collect();
                    for key in stale {
                        table.remove(&key);
                    }
                    if let Some(new_table) = item.as_table() {
                        for (key, value) in new_table.iter() {
                            table[key] = value.clone();
                        }
                    }
                }
                None => doc[section] = item.clone(),
            },
            None => {
                doc.remove(section);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf/gear5tv.toml");

        let mut config = Config::default();
        config.tracker.max_entries = 42;
        config.catalog.path = Some(dir.path().join("catalog.json"));
        save_config(&path, &config).unwrap();

        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_preserves_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gear5tv.toml");
        std::fs::write(&path, "# my settings\n[tracker]\n# keep a lot\nmax_entries = 30\n").unwrap();

        let mut config = load_config(&path).unwrap();
        config.resume.max_items = 5;
        save_config(&path, &config).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# my settings"));
        assert!(content.contains("max_entries = 30"));

        let reloaded = load_config(&path).unwrap();
        assert_eq!(reloaded.resume.max_items, 5);
        assert_eq!(reloaded.tracker.max_entries, 30);
    }
}
