//! Derived rows shown on the home and watch pages.

use crate::catalog::{Catalog, CatalogLookup};
use crate::models::CatalogTitle;

/// Titles with a spotlight rank, lowest rank first.
pub fn spotlight(catalog: &Catalog) -> Vec<&CatalogTitle> {
    let mut titles: Vec<&CatalogTitle> = catalog
        .titles()
        .iter()
        .filter(|t| t.spotlight_rank.is_some())
        .collect();
    titles.sort_by_key(|t| t.spotlight_rank.unwrap_or(0));
    titles
}

/// The first `limit` titles in catalog order.
pub fn popular(catalog: &Catalog, limit: usize) -> Vec<&CatalogTitle> {
    catalog.titles().iter().take(limit).collect()
}

/// Other titles sharing at least one genre with `id`.
pub fn related<'a>(catalog: &'a Catalog, id: &str, limit: usize) -> Vec<&'a CatalogTitle> {
    let Some(anchor) = catalog.find_by_id(id) else {
        return Vec::new();
    };

    catalog
        .titles()
        .iter()
        .filter(|t| t.id != anchor.id && t.shares_genre_with(anchor))
        .take(limit)
        .collect()
}

/// Long-running series in catalog order.
pub fn long_series(catalog: &Catalog) -> Vec<&CatalogTitle> {
    catalog
        .titles()
        .iter()
        .filter(|t| t.is_long_series())
        .collect()
}

/// Titles with a trailer, newest year first.
pub fn latest_trailers(catalog: &Catalog, limit: usize) -> Vec<&CatalogTitle> {
    let mut titles: Vec<&CatalogTitle> = catalog
        .titles()
        .iter()
        .filter(|t| t.trailer_url.as_deref().is_some_and(|u| !u.trim().is_empty()))
        .collect();
    titles.sort_by(|a, b| b.year.cmp(&a.year));
    titles.into_iter().take(limit).collect()
}
