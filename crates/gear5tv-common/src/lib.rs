//! Gear5TV-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across gear5tv:
//!
//! - **Typed IDs**: a string wrapper for catalog titles and UUID wrappers for
//!   Pub Stream channels, videos and comments
//! - **Core Types**: Enums for content kind and airing status
//! - **Media Utilities**: Direct media file detection for playback locators
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use gear5tv_common::{ContentId, ContentKind, Error, Result};
//! use gear5tv_common::media::is_direct_media_locator;
//!
//! let id = ContentId::from("one-piece");
//! assert_eq!(id.as_str(), "one-piece");
//!
//! let kind = ContentKind::Series;
//! assert_eq!(kind.to_string(), "series");
//!
//! assert!(is_direct_media_locator("https://cdn.example.com/ep1.mp4?sig=abc"));
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("title"))
//! }
//! ```

pub mod error;
pub mod ids;
pub mod media;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
