use gear5tv_common::{ContentId, Error, Result};
use serde::{Deserialize, Serialize};

/// Saved playback position for one catalog title.
///
/// Collections written by older builds used `animeId`, `season`, `episode`,
/// `progress`, `duration` and `timestamp`; those names are still read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchProgressEntry {
    #[serde(alias = "animeId")]
    pub content_id: ContentId,
    #[serde(default = "default_index", alias = "season")]
    pub season_index: u32,
    #[serde(default = "default_index", alias = "episode")]
    pub episode_index: u32,
    #[serde(alias = "progress")]
    pub position_seconds: f64,
    #[serde(alias = "duration")]
    pub duration_seconds: f64,
    #[serde(alias = "timestamp")]
    pub updated_at_epoch_millis: i64,
}

fn default_index() -> u32 {
    1
}

impl WatchProgressEntry {
    /// Check the numeric fields are usable.
    pub fn validate(&self) -> Result<()> {
        if self.content_id.as_str().trim().is_empty() {
            return Err(Error::validation("entry has an empty content id"));
        }
        check_seconds("position", self.position_seconds)?;
        check_seconds("duration", self.duration_seconds)?;
        if self.updated_at_epoch_millis < 0 {
            return Err(Error::validation(format!(
                "entry {} has a negative timestamp",
                self.content_id
            )));
        }
        Ok(())
    }

    /// Seconds left to watch, never negative.
    pub fn remaining_seconds(&self) -> f64 {
        (self.duration_seconds - self.position_seconds).max(0.0)
    }
}

/// Values supplied by the player for one save.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressInput {
    pub content_id: ContentId,
    pub season_index: u32,
    pub episode_index: u32,
    pub position_seconds: f64,
    pub duration_seconds: f64,
}

impl ProgressInput {
    pub fn new(
        content_id: impl Into<ContentId>,
        season_index: u32,
        episode_index: u32,
        position_seconds: f64,
        duration_seconds: f64,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            season_index,
            episode_index,
            position_seconds,
            duration_seconds,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.content_id.as_str().trim().is_empty() {
            return Err(Error::invalid_input("content id is required"));
        }
        if self.season_index == 0 || self.episode_index == 0 {
            return Err(Error::invalid_input(format!(
                "season and episode start at 1, got S{}E{}",
                self.season_index, self.episode_index
            )));
        }
        check_seconds("position", self.position_seconds)?;
        check_seconds("duration", self.duration_seconds)
    }

    pub(crate) fn into_entry(self, updated_at_epoch_millis: i64) -> WatchProgressEntry {
        WatchProgressEntry {
            content_id: self.content_id,
            season_index: self.season_index,
            episode_index: self.episode_index,
            position_seconds: self.position_seconds,
            duration_seconds: self.duration_seconds,
            updated_at_epoch_millis,
        }
    }
}

fn check_seconds(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::invalid_input(format!(
            "{} must be a non-negative number of seconds, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Change notification broadcast by the tracker after each write.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// An entry was created or replaced.
    Saved {
        #[serde(flatten)]
        entry: WatchProgressEntry,
    },
    /// An entry was removed.
    Removed { content_id: ContentId },
}

impl ProgressEvent {
    pub fn content_id(&self) -> &ContentId {
        match self {
            ProgressEvent::Saved { entry } => &entry.content_id,
            ProgressEvent::Removed { content_id } => content_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_current_field_names() {
        let entry = ProgressInput::new("a", 1, 3, 300.0, 1200.0).into_entry(42);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["contentId"], "a");
        assert_eq!(json["seasonIndex"], 1);
        assert_eq!(json["episodeIndex"], 3);
        assert_eq!(json["positionSeconds"], 300.0);
        assert_eq!(json["durationSeconds"], 1200.0);
        assert_eq!(json["updatedAtEpochMillis"], 42);
    }

    #[test]
    fn test_reads_legacy_field_names() {
        let json = r#"{"animeId":"one-piece","season":1,"episode":2,"progress":61.5,"duration":1440,"timestamp":1700000000000}"#;
        let entry: WatchProgressEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.content_id.as_str(), "one-piece");
        assert_eq!(entry.episode_index, 2);
        assert_eq!(entry.position_seconds, 61.5);
        assert_eq!(entry.duration_seconds, 1440.0);
        assert_eq!(entry.updated_at_epoch_millis, 1_700_000_000_000);
    }

    #[test]
    fn test_validate_rejects_negative_and_blank() {
        let mut entry = ProgressInput::new("a", 1, 1, 10.0, 20.0).into_entry(1);
        assert!(entry.validate().is_ok());

        entry.position_seconds = -1.0;
        assert!(entry.validate().is_err());

        let input = ProgressInput::new(" ", 1, 1, 0.0, 0.0);
        assert!(input.validate().is_err());

        let input = ProgressInput::new("a", 1, 1, f64::NAN, 10.0);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_remaining_seconds() {
        let entry = ProgressInput::new("a", 1, 1, 90.0, 60.0).into_entry(1);
        assert_eq!(entry.remaining_seconds(), 0.0);
    }

    #[test]
    fn test_event_tagging() {
        let event = ProgressEvent::Removed {
            content_id: ContentId::from("x"),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "removed");
        assert_eq!(event.content_id().as_str(), "x");
    }
}
