//! Catalog models matching the catalog JSON format.
//!
//! Field names are camelCase on the wire (`videoUrl`, `seasonNumber`), and
//! the title kind is stored under `type`.

use gear5tv_common::{AiringStatus, ContentId, ContentKind};
use serde::{Deserialize, Serialize};

/// A playable catalog entry: a movie or a series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogTitle {
    pub id: ContentId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    /// Locator for movies and for long-running series listed without
    /// per-episode data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub year: i32,
    pub rating: f32,
    pub status: AiringStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotlight_rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub studio: Option<String>,
    /// Release season (`winter`, `spring`, `summer`, `fall`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airing_season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_count: Option<u32>,
}

/// A season of a series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub season_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// A single episode with its own locator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub episode_number: u32,
    #[serde(default)]
    pub title: String,
    pub video_url: String,
    /// Display duration, e.g. `"24:00"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl CatalogTitle {
    pub fn is_series(&self) -> bool {
        self.kind == ContentKind::Series
    }

    /// Long-running series carry a declared episode count.
    pub fn is_long_series(&self) -> bool {
        self.is_series() && self.episode_count.is_some()
    }

    /// Look up an episode by season and episode number.
    pub fn find_episode(&self, season_number: u32, episode_number: u32) -> Option<&Episode> {
        self.seasons
            .iter()
            .find(|s| s.season_number == season_number)?
            .episodes
            .iter()
            .find(|e| e.episode_number == episode_number)
    }

    /// The first episode of the first season that has any episodes.
    pub fn first_episode(&self) -> Option<(&Season, &Episode)> {
        self.seasons
            .iter()
            .find_map(|s| s.episodes.first().map(|e| (s, e)))
    }

    /// Number of episodes, preferring listed episodes over the declared count.
    pub fn total_episodes(&self) -> u32 {
        let listed: usize = self.seasons.iter().map(|s| s.episodes.len()).sum();
        if listed > 0 {
            listed as u32
        } else {
            self.episode_count.unwrap_or(0)
        }
    }

    /// Case-insensitive genre membership.
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g.eq_ignore_ascii_case(genre))
    }

    pub fn shares_genre_with(&self, other: &CatalogTitle) -> bool {
        self.genres.iter().any(|g| other.has_genre(g))
    }
}
