//! Playback of a single title.
//!
//! A session chooses what to play (trailer, movie, or an episode), classifies
//! the locator, and turns player time updates into throttled tracker saves.

use std::sync::Arc;

use gear5tv_catalog::{CatalogLookup, CatalogTitle};
use gear5tv_common::{ContentId, ContentKind, Error, Result};

use crate::player::{PlaybackSource, SourceResolver};
use crate::progress::{ProgressInput, ProgressTracker};

/// Minimum change in position between two saves.
pub const DEFAULT_SAVE_INTERVAL_SECS: f64 = 5.0;

/// What the viewer asked to play.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackRequest {
    pub content_id: ContentId,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub trailer: bool,
}

impl PlaybackRequest {
    pub fn new(content_id: impl Into<ContentId>) -> Self {
        Self {
            content_id: content_id.into(),
            season: None,
            episode: None,
            trailer: false,
        }
    }

    pub fn episode(mut self, season: u32, episode: u32) -> Self {
        self.season = Some(season);
        self.episode = Some(episode);
        self
    }

    pub fn trailer(mut self) -> Self {
        self.trailer = true;
        self
    }
}

/// The chosen unit of a title and how it plays.
#[derive(Debug, Clone, PartialEq)]
struct Selection {
    season_index: u32,
    episode_index: u32,
    locator: String,
    episode_title: Option<String>,
}

pub struct PlaybackSession {
    tracker: Arc<ProgressTracker>,
    content_id: ContentId,
    title: String,
    kind: ContentKind,
    selection: Selection,
    is_trailer: bool,
    source: PlaybackSource,
    save_interval: f64,
    last_saved: Option<f64>,
    last_observed: Option<(f64, f64)>,
}

impl PlaybackSession {
    /// Resolve a request against the catalog.
    ///
    /// Unknown titles, seasons and episodes are `NotFound`.
    pub fn open<C>(
        catalog: &C,
        tracker: Arc<ProgressTracker>,
        resolver: &SourceResolver,
        request: &PlaybackRequest,
        save_interval: f64,
    ) -> Result<Self>
    where
        C: CatalogLookup + ?Sized,
    {
        let title = catalog
            .find_by_id(request.content_id.as_str())
            .ok_or_else(|| Error::not_found(format!("title {}", request.content_id)))?;

        let mut selection = select_content(title, request, &tracker)?;

        let trailer = request
            .trailer
            .then(|| title.trailer_url.as_deref())
            .flatten()
            .filter(|url| !url.trim().is_empty());
        let is_trailer = trailer.is_some();
        if let Some(url) = trailer {
            selection.locator = url.to_string();
        } else if request.trailer {
            tracing::debug!("{} has no trailer, playing the title instead", title.id);
        }

        let source = resolver.resolve(&selection.locator);
        tracing::info!(
            "Playing {} S{}E{} ({}{})",
            title.id,
            selection.season_index,
            selection.episode_index,
            source.label(),
            if is_trailer { ", trailer" } else { "" }
        );

        Ok(Self {
            tracker,
            content_id: title.id.clone(),
            title: title.title.clone(),
            kind: title.kind,
            selection,
            is_trailer,
            source,
            save_interval: if save_interval.is_finite() && save_interval >= 0.0 {
                save_interval
            } else {
                DEFAULT_SAVE_INTERVAL_SECS
            },
            last_saved: None,
            last_observed: None,
        })
    }

    pub fn content_id(&self) -> &ContentId {
        &self.content_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn source(&self) -> &PlaybackSource {
        &self.source
    }

    pub fn season_index(&self) -> u32 {
        self.selection.season_index
    }

    pub fn episode_index(&self) -> u32 {
        self.selection.episode_index
    }

    pub fn episode_title(&self) -> Option<&str> {
        self.selection.episode_title.as_deref()
    }

    pub fn is_trailer(&self) -> bool {
        self.is_trailer
    }

    /// Whether time updates from the player are recorded.
    pub fn tracks_progress(&self) -> bool {
        !self.is_trailer && self.source.emits_time_updates()
    }

    /// Feed a player time update. Returns `true` when it was saved.
    pub fn on_time_update(&mut self, position: f64, duration: f64) -> bool {
        if !self.tracks_progress() {
            return false;
        }
        if !duration.is_finite() || duration <= 0.0 || !position.is_finite() {
            return false;
        }

        let position = position.clamp(0.0, duration);
        self.last_observed = Some((position, duration));

        let due = match self.last_saved {
            None => true,
            Some(last) => (position - last).abs() >= self.save_interval,
        };
        if !due {
            return false;
        }
        self.save(position, duration)
    }

    /// Save the latest observed position regardless of the throttle.
    pub fn flush(&mut self) -> bool {
        match self.last_observed {
            Some((position, duration)) if self.last_saved != Some(position) => {
                self.save(position, duration)
            }
            _ => false,
        }
    }

    /// Where playback should start, in seconds.
    pub fn resume_position(&self) -> f64 {
        if self.is_trailer {
            return 0.0;
        }
        match self.tracker.get_progress(self.content_id.as_str()) {
            Some(entry)
                if self.kind == ContentKind::Movie
                    || (entry.season_index == self.selection.season_index
                        && entry.episode_index == self.selection.episode_index) =>
            {
                entry.position_seconds
            }
            _ => 0.0,
        }
    }

    fn save(&mut self, position: f64, duration: f64) -> bool {
        let input = ProgressInput::new(
            self.content_id.clone(),
            self.selection.season_index,
            self.selection.episode_index,
            position,
            duration,
        );
        match self.tracker.save_progress(input) {
            Ok(_) => {
                self.last_saved = Some(position);
                true
            }
            Err(e) => {
                tracing::warn!("Dropping time update for {}: {}", self.content_id, e);
                false
            }
        }
    }
}

/// Pick the season/episode and locator for a title.
fn select_content(
    title: &CatalogTitle,
    request: &PlaybackRequest,
    tracker: &ProgressTracker,
) -> Result<Selection> {
    let standalone = |locator: &Option<String>| Selection {
        season_index: 1,
        episode_index: 1,
        locator: locator.clone().unwrap_or_default(),
        episode_title: None,
    };

    if title.kind == ContentKind::Movie || title.seasons.is_empty() {
        let requested_other = request.season.is_some_and(|s| s != 1)
            || request.episode.is_some_and(|e| e != 1);
        if title.is_series() && requested_other {
            return Err(Error::not_found(format!(
                "{} S{}E{}",
                title.id,
                request.season.unwrap_or(1),
                request.episode.unwrap_or(1)
            )));
        }
        return Ok(standalone(&title.video_url));
    }

    if request.season.is_some() || request.episode.is_some() {
        let season_number = match request.season {
            Some(s) => s,
            None => title.seasons[0].season_number,
        };
        let season = title
            .seasons
            .iter()
            .find(|s| s.season_number == season_number)
            .ok_or_else(|| Error::not_found(format!("{} season {}", title.id, season_number)))?;
        let episode = match request.episode {
            Some(e) => season.episodes.iter().find(|ep| ep.episode_number == e),
            None => season.episodes.first(),
        }
        .ok_or_else(|| {
            Error::not_found(format!(
                "{} S{}E{}",
                title.id,
                season_number,
                request.episode.unwrap_or(1)
            ))
        })?;

        return Ok(Selection {
            season_index: season.season_number,
            episode_index: episode.episode_number,
            locator: episode.video_url.clone(),
            episode_title: Some(episode.title.clone()),
        });
    }

    if let Some(saved) = tracker.get_progress(title.id.as_str()) {
        if let Some(episode) = title.find_episode(saved.season_index, saved.episode_index) {
            return Ok(Selection {
                season_index: saved.season_index,
                episode_index: saved.episode_index,
                locator: episode.video_url.clone(),
                episode_title: Some(episode.title.clone()),
            });
        }
        tracing::debug!(
            "Saved episode S{}E{} of {} no longer exists",
            saved.season_index,
            saved.episode_index,
            title.id
        );
    }

    match title.first_episode() {
        Some((season, episode)) => Ok(Selection {
            season_index: season.season_number,
            episode_index: episode.episode_number,
            locator: episode.video_url.clone(),
            episode_title: Some(episode.title.clone()),
        }),
        None => Ok(standalone(&title.video_url)),
    }
}
