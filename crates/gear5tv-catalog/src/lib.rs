//! Gear5TV-Catalog: the read-only title catalog.
//!
//! The catalog is loaded once (from the embedded dataset or a JSON file) and
//! never mutated afterwards. Everything else in gear5tv reads it through
//! [`CatalogLookup`] or the free functions in [`queries`].
//!
//! # Modules
//!
//! - `models` - Titles, seasons and episodes
//! - `catalog` - Loading, validation and id lookup
//! - `queries` - Search, filter/sort and the derived home-page lists
//!
//! # Example
//!
//! ```
//! use gear5tv_catalog::{Catalog, CatalogLookup};
//! use gear5tv_catalog::queries::search;
//!
//! let catalog = Catalog::embedded().unwrap();
//! let title = catalog.find_by_id("one-piece").unwrap();
//! assert_eq!(title.title, "One Piece");
//!
//! let hits = search::search(&catalog, "naruto");
//! assert!(!hits.is_empty());
//! ```

pub mod catalog;
pub mod models;
pub mod queries;

pub use catalog::{Catalog, CatalogLookup};
pub use models::{CatalogTitle, Episode, Season};
