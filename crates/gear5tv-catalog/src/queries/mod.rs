//! Catalog query operations.
//!
//! - `search` - free-text search over titles and genres
//! - `filter` - sidebar filters and ordering
//! - `lists` - spotlight, popular, related and trailer rows

pub mod filter;
pub mod lists;
pub mod search;
