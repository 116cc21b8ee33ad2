//! Pub Stream: user channels, uploaded videos, likes, subscriptions and
//! comments.
//!
//! The hosted backend is reached through [`ContentService`]. An in-memory
//! implementation is provided for local use and tests.

mod memory;
mod types;

pub use memory::MemoryContentService;
pub use types::*;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gear5tv_common::{ChannelId, Result, VideoId};
use tokio::sync::broadcast;

#[async_trait]
pub trait ContentService: Send + Sync {
    async fn create_channel(&self, input: NewChannel) -> Result<Channel>;

    async fn update_channel(&self, id: ChannelId, update: ChannelUpdate) -> Result<Channel>;

    /// Delete a channel with its videos, subscriptions, and the likes and
    /// comments of those videos.
    async fn delete_channel(&self, id: ChannelId) -> Result<()>;

    async fn get_channel(&self, id: ChannelId) -> Result<Channel>;

    /// All channels, most subscribers first.
    async fn list_channels(&self) -> Result<Vec<Channel>>;

    async fn upload_video(&self, input: NewVideo) -> Result<Video>;

    /// All videos, newest first.
    async fn list_videos(&self) -> Result<Vec<Video>>;

    /// A channel's videos, newest first.
    async fn list_channel_videos(&self, channel_id: ChannelId) -> Result<Vec<Video>>;

    async fn get_video(&self, id: VideoId) -> Result<Video>;

    /// Count a view, returning the new total.
    async fn record_view(&self, id: VideoId) -> Result<u64>;

    /// Like or unlike a video. Returns whether the user now likes it.
    async fn toggle_like(&self, video_id: VideoId, user_name: &str) -> Result<bool>;

    async fn has_liked(&self, video_id: VideoId, user_name: &str) -> Result<bool>;

    /// Subscribe to or leave a channel. Returns whether the user is now
    /// subscribed.
    async fn toggle_subscription(&self, channel_id: ChannelId, user_name: &str) -> Result<bool>;

    async fn is_subscribed(&self, channel_id: ChannelId, user_name: &str) -> Result<bool>;

    async fn post_comment(&self, input: NewComment) -> Result<Comment>;

    /// Comments on a target, newest first.
    async fn list_comments(&self, target: &CommentTarget) -> Result<Vec<Comment>>;

    /// Receive comments posted to `target` from now on.
    fn subscribe_comments(&self, target: CommentTarget) -> CommentSubscription;
}

/// Live feed of new comments for one target.
pub struct CommentSubscription {
    target: CommentTarget,
    rx: broadcast::Receiver<Comment>,
}

impl CommentSubscription {
    pub fn new(target: CommentTarget, rx: broadcast::Receiver<Comment>) -> Self {
        Self { target, rx }
    }

    pub fn target(&self) -> &CommentTarget {
        &self.target
    }

    /// Next comment for the target, `None` once the service is gone.
    pub async fn next(&mut self) -> Option<Comment> {
        loop {
            match self.rx.recv().await {
                Ok(comment) if comment.target == self.target => return Some(comment),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Comment feed lagged, skipped {} comments", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// Compact count: `999`, `1.5K`, `3.4M`.
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Age of a timestamp: `Just now`, `5m ago`, `3h ago`, `2d ago`, then the
/// date.
pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{}d ago", days);
    }
    then.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1.0K");
        assert_eq!(format_count(1_500), "1.5K");
        assert_eq!(format_count(3_400_000), "3.4M");
    }

    #[test]
    fn test_format_relative_time() {
        let now = Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap();
        assert_eq!(format_relative_time(now - Duration::seconds(30), now), "Just now");
        assert_eq!(format_relative_time(now + Duration::minutes(5), now), "Just now");
        assert_eq!(format_relative_time(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_relative_time(now - Duration::hours(3), now), "3h ago");
        assert_eq!(format_relative_time(now - Duration::days(2), now), "2d ago");
        assert_eq!(format_relative_time(now - Duration::days(10), now), "2025-03-10");
    }
}
