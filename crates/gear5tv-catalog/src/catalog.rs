//! Catalog loading and id lookup.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use gear5tv_common::{ContentId, Error, Result};

use crate::models::CatalogTitle;

/// Dataset compiled into the binary, used when no catalog file is configured.
const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

/// Synchronous, read-only lookup of titles by id.
pub trait CatalogLookup {
    /// Return the title with the given id, if the catalog contains it.
    fn find_by_id(&self, id: &str) -> Option<&CatalogTitle>;
}

/// In-memory, immutable collection of titles in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    titles: Vec<CatalogTitle>,
    index: HashMap<ContentId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting blank or duplicate ids and duplicate
    /// season/episode numbers within a title.
    pub fn new(titles: Vec<CatalogTitle>) -> Result<Self> {
        let mut index = HashMap::with_capacity(titles.len());

        for (pos, title) in titles.iter().enumerate() {
            if title.id.as_str().trim().is_empty() {
                return Err(Error::validation(format!(
                    "catalog entry {} has an empty id",
                    pos
                )));
            }
            if index.insert(title.id.clone(), pos).is_some() {
                return Err(Error::validation(format!(
                    "duplicate catalog id: {}",
                    title.id
                )));
            }
            validate_seasons(title)?;
        }

        Ok(Self { titles, index })
    }

    /// Load the dataset compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Parse a catalog from a JSON array of titles.
    pub fn from_json(json: &str) -> Result<Self> {
        let titles: Vec<CatalogTitle> = serde_json::from_str(json)?;
        Self::new(titles)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        tracing::debug!("Loaded {} titles from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// All titles in catalog order.
    pub fn titles(&self) -> &[CatalogTitle] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }
}

impl CatalogLookup for Catalog {
    fn find_by_id(&self, id: &str) -> Option<&CatalogTitle> {
        self.index
            .get(&ContentId::from(id))
            .and_then(|&pos| self.titles.get(pos))
    }
}

fn validate_seasons(title: &CatalogTitle) -> Result<()> {
    let mut seasons = HashSet::new();
    for season in &title.seasons {
        if !seasons.insert(season.season_number) {
            return Err(Error::validation(format!(
                "title {} lists season {} twice",
                title.id, season.season_number
            )));
        }

        let mut episodes = HashSet::new();
        for episode in &season.episodes {
            if !episodes.insert(episode.episode_number) {
                return Err(Error::validation(format!(
                    "title {} season {} lists episode {} twice",
                    title.id, season.season_number, episode.episode_number
                )));
            }
        }
    }
    Ok(())
}
