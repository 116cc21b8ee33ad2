//! Free-text title search.

use crate::catalog::Catalog;
use crate::models::CatalogTitle;

/// Find titles whose name or any genre contains `query`, ignoring case.
///
/// A blank query matches nothing. Results keep catalog order.
pub fn search<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a CatalogTitle> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    catalog
        .titles()
        .iter()
        .filter(|title| {
            title.title.to_lowercase().contains(&needle)
                || title
                    .genres
                    .iter()
                    .any(|g| g.to_lowercase().contains(&needle))
        })
        .collect()
}
