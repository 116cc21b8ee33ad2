//! Core type definitions for catalog titles.
//!
//! All enums serialize in lowercase to match the catalog JSON format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a title is a single video or a multi-episode series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A single video (feature film, special).
    Movie,
    /// A title with seasons and episodes.
    Series,
}

impl ContentKind {
    /// Short label used in listings ("TV" or "Movie").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Series => "TV",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Series => write!(f, "series"),
        }
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "series" | "tv" => Ok(Self::Series),
            _ => Err(format!("Unknown content kind: {}", s)),
        }
    }
}

/// Airing status of a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiringStatus {
    /// Still releasing new episodes.
    Ongoing,
    /// Finished airing.
    Completed,
}

impl fmt::Display for AiringStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ongoing => write!(f, "ongoing"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for AiringStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("Unknown airing status: {}", s)),
        }
    }
}
