//! Continue-watching row.
//!
//! Joins the tracker history against the catalog. Entries whose title is no
//! longer in the catalog are skipped, and a row with nothing to show is
//! `None` rather than an empty list.

use std::sync::Arc;

use gear5tv_catalog::CatalogLookup;
use gear5tv_common::{ContentId, ContentKind};
use serde::Serialize;

use crate::progress::{ProgressTracker, WatchProgressEntry};

/// Presentation cap.
pub const DEFAULT_MAX_ITEMS: usize = 10;

/// Percent watched, rounded and clamped to `0..=100`. A zero or unusable
/// duration gives 0.
pub fn compute_resume_percent(position_seconds: f64, duration_seconds: f64) -> u8 {
    if !duration_seconds.is_finite() || duration_seconds <= 0.0 || !position_seconds.is_finite() {
        return 0;
    }
    let percent = (position_seconds / duration_seconds * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Format seconds as `m:ss`. Minutes are not wrapped into hours.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Route of the watch page for an episode.
pub fn watch_link(content_id: &ContentId, season_index: u32, episode_index: u32) -> String {
    format!(
        "/watch/{}?season={}&episode={}",
        content_id, season_index, episode_index
    )
}

/// One resumable title.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeItem {
    pub content_id: ContentId,
    pub title: String,
    pub image: String,
    pub kind: ContentKind,
    pub season_index: u32,
    pub episode_index: u32,
    pub elapsed: String,
    pub remaining: String,
    pub percent: u8,
    pub link: String,
    pub updated_at_epoch_millis: i64,
}

impl ResumeItem {
    /// `S1 E3` for series, `Movie` otherwise.
    pub fn episode_label(&self) -> String {
        match self.kind {
            ContentKind::Series => format!("S{} E{}", self.season_index, self.episode_index),
            ContentKind::Movie => self.kind.label().to_string(),
        }
    }
}

/// Build the row from a most-recent-first history.
///
/// The first `max_items` entries are taken before the catalog join, so stale
/// entries reduce the row rather than being replaced by older ones.
pub fn build_section<C>(
    entries: &[WatchProgressEntry],
    catalog: &C,
    max_items: usize,
) -> Option<Vec<ResumeItem>>
where
    C: CatalogLookup + ?Sized,
{
    let items: Vec<ResumeItem> = entries
        .iter()
        .take(max_items)
        .filter_map(|entry| {
            let Some(title) = catalog.find_by_id(entry.content_id.as_str()) else {
                tracing::debug!("Skipping progress for unknown title {}", entry.content_id);
                return None;
            };

            Some(ResumeItem {
                content_id: entry.content_id.clone(),
                title: title.title.clone(),
                image: title.image.clone(),
                kind: title.kind,
                season_index: entry.season_index,
                episode_index: entry.episode_index,
                elapsed: format_time(entry.position_seconds),
                remaining: format_time(entry.remaining_seconds()),
                percent: compute_resume_percent(entry.position_seconds, entry.duration_seconds),
                link: watch_link(&entry.content_id, entry.season_index, entry.episode_index),
                updated_at_epoch_millis: entry.updated_at_epoch_millis,
            })
        })
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Continue-watching row bound to a tracker and catalog.
pub struct ContinueWatchingSurface<C> {
    tracker: Arc<ProgressTracker>,
    catalog: Arc<C>,
    max_items: usize,
}

impl<C: CatalogLookup> ContinueWatchingSurface<C> {
    pub fn new(tracker: Arc<ProgressTracker>, catalog: Arc<C>, max_items: usize) -> Self {
        Self {
            tracker,
            catalog,
            max_items,
        }
    }

    /// Current row, re-read from the tracker on every call.
    pub fn section(&self) -> Option<Vec<ResumeItem>> {
        build_section(&self.tracker.history(), self.catalog.as_ref(), self.max_items)
    }

    /// Remove a title from the row and from the tracker.
    pub fn remove(&self, content_id: &str) -> bool {
        self.tracker.remove_progress(content_id)
    }
}
