use chrono::{DateTime, Utc};
use gear5tv_common::{ChannelId, CommentId, ContentId, Error, Result, VideoId};
use serde::{Deserialize, Serialize};

/// A creator channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub banner_url: Option<String>,
    pub subscriber_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user-uploaded video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    pub channel_id: ChannelId,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub views: u64,
    pub likes_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What a comment is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum CommentTarget {
    /// A catalog title.
    Title(ContentId),
    /// A Pub Stream video.
    Video(VideoId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub target: CommentTarget,
    pub user_name: String,
    pub comment_text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewChannel {
    pub name: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub banner_url: Option<String>,
}

impl NewChannel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Partial channel update. `None` leaves a field alone; a blank string
/// clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct ChannelUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub banner_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewVideo {
    pub channel_id: ChannelId,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
}

impl NewVideo {
    pub fn new(channel_id: ChannelId, title: impl Into<String>, video_url: impl Into<String>) -> Self {
        Self {
            channel_id,
            title: title.into(),
            description: None,
            video_url: video_url.into(),
            thumbnail_url: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub target: CommentTarget,
    pub user_name: String,
    pub comment_text: String,
}

impl NewComment {
    pub fn new(target: CommentTarget, user_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            target,
            user_name: user_name.into(),
            comment_text: text.into(),
        }
    }
}

/// Trim a required field, rejecting blanks.
pub(crate) fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::invalid_input(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// Trim an optional field; blank becomes `None`.
pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
