//! Sidebar filters and ordering.
//!
//! Every criterion is optional; `None` means "all". String criteria compare
//! case-insensitively, so `"action"` selects titles tagged `"Action"`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use gear5tv_common::{AiringStatus, ContentKind};

use crate::catalog::Catalog;
use crate::models::CatalogTitle;

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    /// Catalog order.
    #[default]
    Default,
    /// Highest rating first.
    Rating,
    /// Newest year first.
    Latest,
    /// Title A-Z, ignoring case.
    Title,
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "rating" => Ok(Self::Rating),
            "latest" => Ok(Self::Latest),
            "title" => Ok(Self::Title),
            _ => Err(format!("Unknown order: {}", s)),
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Rating => write!(f, "rating"),
            Self::Latest => write!(f, "latest"),
            Self::Title => write!(f, "title"),
        }
    }
}

/// Filter criteria applied to the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub genre: Option<String>,
    pub airing_season: Option<String>,
    pub studio: Option<String>,
    pub status: Option<AiringStatus>,
    pub kind: Option<ContentKind>,
    pub order_by: OrderBy,
}

impl FilterState {
    /// Reset every criterion to "all" and the order to default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn matches(&self, title: &CatalogTitle) -> bool {
        if let Some(genre) = &self.genre {
            if !title.has_genre(genre) {
                return false;
            }
        }

        if !matches_optional(self.airing_season.as_deref(), title.airing_season.as_deref()) {
            return false;
        }

        if !matches_optional(self.studio.as_deref(), title.studio.as_deref()) {
            return false;
        }

        if let Some(status) = self.status {
            if title.status != status {
                return false;
            }
        }

        if let Some(kind) = self.kind {
            if title.kind != kind {
                return false;
            }
        }

        true
    }
}

/// Interpret a sidebar choice, mapping `"all"` and blanks to `None`.
pub fn choice(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(value.to_string())
    }
}

fn matches_optional(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual
            .map(|a| a.eq_ignore_ascii_case(wanted))
            .unwrap_or(false),
    }
}

/// Apply filters and ordering to the catalog.
pub fn apply_filters<'a>(catalog: &'a Catalog, filters: &FilterState) -> Vec<&'a CatalogTitle> {
    let mut titles: Vec<&CatalogTitle> = catalog
        .titles()
        .iter()
        .filter(|t| filters.matches(t))
        .collect();

    match filters.order_by {
        OrderBy::Default => {}
        OrderBy::Rating => titles.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
        }),
        OrderBy::Latest => titles.sort_by(|a, b| b.year.cmp(&a.year)),
        OrderBy::Title => {
            titles.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
    }

    titles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(titles: &[&CatalogTitle]) -> Vec<String> {
        titles.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn test_no_filters_keeps_catalog_order() {
        let catalog = Catalog::embedded().unwrap();
        let result = apply_filters(&catalog, &FilterState::default());
        assert_eq!(result.len(), catalog.len());
        assert_eq!(result[0].id, catalog.titles()[0].id);
    }

    #[test]
    fn test_filter_by_kind_and_status() {
        let catalog = Catalog::embedded().unwrap();
        let filters = FilterState {
            kind: Some(ContentKind::Movie),
            ..Default::default()
        };
        let result = apply_filters(&catalog, &filters);
        assert_eq!(
            ids(&result),
            vec!["demon-slayer-infinity-castle", "doraemon-nobitas-earth-symphony"]
        );

        let filters = FilterState {
            status: Some(AiringStatus::Ongoing),
            kind: Some(ContentKind::Movie),
            ..Default::default()
        };
        assert!(apply_filters(&catalog, &filters).is_empty());
    }

    #[test]
    fn test_filter_by_genre_is_case_insensitive() {
        let catalog = Catalog::embedded().unwrap();
        let filters = FilterState {
            genre: Some("sci-fi".to_string()),
            ..Default::default()
        };
        assert_eq!(
            ids(&apply_filters(&catalog, &filters)),
            vec!["kaiju-no-8-season-2", "one-punch-man-season-3"]
        );
    }

    #[test]
    fn test_filter_by_studio_and_season() {
        let catalog = Catalog::embedded().unwrap();
        let filters = FilterState {
            studio: Some("pierrot".to_string()),
            airing_season: Some("Fall".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&catalog, &filters)), vec!["bleach"]);
    }

    #[test]
    fn test_order_by_rating() {
        let catalog = Catalog::embedded().unwrap();
        let filters = FilterState {
            order_by: OrderBy::Rating,
            ..Default::default()
        };
        let result = apply_filters(&catalog, &filters);
        assert_eq!(result[0].id.as_str(), "demon-slayer-infinity-castle");
        assert!(result.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[test]
    fn test_order_by_latest_and_title() {
        let catalog = Catalog::embedded().unwrap();
        let latest = apply_filters(
            &catalog,
            &FilterState {
                order_by: OrderBy::Latest,
                ..Default::default()
            },
        );
        assert!(latest.windows(2).all(|w| w[0].year >= w[1].year));

        let by_title = apply_filters(
            &catalog,
            &FilterState {
                order_by: OrderBy::Title,
                ..Default::default()
            },
        );
        assert_eq!(by_title[0].title, "Black Clover");
        assert_eq!(by_title[1].title, "Bleach");
    }

    #[test]
    fn test_choice_and_clear() {
        assert_eq!(choice("all"), None);
        assert_eq!(choice("ALL"), None);
        assert_eq!(choice(" "), None);
        assert_eq!(choice("Action"), Some("Action".to_string()));

        let mut filters = FilterState {
            genre: choice("Action"),
            order_by: "rating".parse().unwrap(),
            ..Default::default()
        };
        assert!(!filters.is_empty());
        filters.clear();
        assert!(filters.is_empty());
    }

    #[test]
    fn test_order_by_parse() {
        assert_eq!("Latest".parse::<OrderBy>().unwrap(), OrderBy::Latest);
        assert!("popularity".parse::<OrderBy>().is_err());
    }
}
