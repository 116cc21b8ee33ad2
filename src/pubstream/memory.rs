use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gear5tv_common::{ChannelId, CommentId, Error, Result, VideoId};
use parking_lot::RwLock;
use tokio::sync::broadcast;

use super::types::{optional, required};
use super::{
    Channel, ChannelUpdate, Comment, CommentSubscription, CommentTarget, ContentService,
    NewChannel, NewComment, NewVideo, Video,
};

#[derive(Default)]
struct Tables {
    channels: Vec<Channel>,
    videos: Vec<Video>,
    likes: HashSet<(VideoId, String)>,
    subscriptions: HashSet<(ChannelId, String)>,
    comments: Vec<Comment>,
}

impl Tables {
    fn channel_mut(&mut self, id: ChannelId) -> Result<&mut Channel> {
        self.channels
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::not_found(format!("channel {}", id)))
    }

    fn video_mut(&mut self, id: VideoId) -> Result<&mut Video> {
        self.videos
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| Error::not_found(format!("video {}", id)))
    }
}

/// Process-local [`ContentService`].
pub struct MemoryContentService {
    tables: RwLock<Tables>,
    comment_tx: broadcast::Sender<Comment>,
}

impl Default for MemoryContentService {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryContentService {
    pub fn new() -> Self {
        let (comment_tx, _) = broadcast::channel(64);
        Self {
            tables: RwLock::new(Tables::default()),
            comment_tx,
        }
    }
}

/// Newest first; ties keep the most recently inserted first.
fn newest_first<T>(
    items: impl DoubleEndedIterator<Item = T>,
    created: fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    let mut items: Vec<T> = items.rev().collect();
    items.sort_by_key(|item| std::cmp::Reverse(created(item)));
    items
}

#[async_trait]
impl ContentService for MemoryContentService {
    async fn create_channel(&self, input: NewChannel) -> Result<Channel> {
        let now = Utc::now();
        let channel = Channel {
            id: ChannelId::new(),
            name: required("channel name", &input.name)?,
            description: optional(input.description.as_deref()),
            avatar_url: optional(input.avatar_url.as_deref()),
            banner_url: optional(input.banner_url.as_deref()),
            subscriber_count: 0,
            created_at: now,
            updated_at: now,
        };

        self.tables.write().channels.push(channel.clone());
        tracing::info!("Created channel {} ({})", channel.name, channel.id);
        Ok(channel)
    }

    async fn update_channel(&self, id: ChannelId, update: ChannelUpdate) -> Result<Channel> {
        let name = update
            .name
            .as_deref()
            .map(|n| required("channel name", n))
            .transpose()?;

        let mut tables = self.tables.write();
        let channel = tables.channel_mut(id)?;
        if let Some(name) = name {
            channel.name = name;
        }
        if let Some(description) = update.description.as_deref() {
            channel.description = optional(Some(description));
        }
        if let Some(avatar_url) = update.avatar_url.as_deref() {
            channel.avatar_url = optional(Some(avatar_url));
        }
        if let Some(banner_url) = update.banner_url.as_deref() {
            channel.banner_url = optional(Some(banner_url));
        }
        channel.updated_at = Utc::now();
        Ok(channel.clone())
    }

    async fn delete_channel(&self, id: ChannelId) -> Result<()> {
        let mut tables = self.tables.write();
        let before = tables.channels.len();
        tables.channels.retain(|c| c.id != id);
        if tables.channels.len() == before {
            return Err(Error::not_found(format!("channel {}", id)));
        }

        let removed: HashSet<VideoId> = tables
            .videos
            .iter()
            .filter(|v| v.channel_id == id)
            .map(|v| v.id)
            .collect();
        tables.videos.retain(|v| v.channel_id != id);
        tables.likes.retain(|(video_id, _)| !removed.contains(video_id));
        tables.subscriptions.retain(|(channel_id, _)| *channel_id != id);
        tables.comments.retain(|c| match &c.target {
            CommentTarget::Video(video_id) => !removed.contains(video_id),
            CommentTarget::Title(_) => true,
        });

        tracing::info!("Deleted channel {} and {} videos", id, removed.len());
        Ok(())
    }

    async fn get_channel(&self, id: ChannelId) -> Result<Channel> {
        self.tables
            .read()
            .channels
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("channel {}", id)))
    }

    async fn list_channels(&self) -> Result<Vec<Channel>> {
        let mut channels = self.tables.read().channels.clone();
        channels.sort_by(|a, b| b.subscriber_count.cmp(&a.subscriber_count));
        Ok(channels)
    }

    async fn upload_video(&self, input: NewVideo) -> Result<Video> {
        let title = required("video title", &input.title)?;
        let video_url = required("video url", &input.video_url)?;

        let mut tables = self.tables.write();
        tables.channel_mut(input.channel_id)?;

        let now = Utc::now();
        let video = Video {
            id: VideoId::new(),
            channel_id: input.channel_id,
            title,
            description: optional(input.description.as_deref()),
            video_url,
            thumbnail_url: optional(input.thumbnail_url.as_deref()),
            views: 0,
            likes_count: 0,
            created_at: now,
            updated_at: now,
        };
        tables.videos.push(video.clone());
        tracing::debug!("Uploaded video {} to channel {}", video.id, video.channel_id);
        Ok(video)
    }

    async fn list_videos(&self) -> Result<Vec<Video>> {
        let tables = self.tables.read();
        Ok(newest_first(tables.videos.iter().cloned(), |v: &Video| v.created_at))
    }

    async fn list_channel_videos(&self, channel_id: ChannelId) -> Result<Vec<Video>> {
        let tables = self.tables.read();
        let videos: Vec<Video> = tables
            .videos
            .iter()
            .filter(|v| v.channel_id == channel_id)
            .cloned()
            .collect();
        Ok(newest_first(videos.into_iter(), |v: &Video| v.created_at))
    }

    async fn get_video(&self, id: VideoId) -> Result<Video> {
        self.tables
            .read()
            .videos
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("video {}", id)))
    }

    async fn record_view(&self, id: VideoId) -> Result<u64> {
        let mut tables = self.tables.write();
        let video = tables.video_mut(id)?;
        video.views = video.views.saturating_add(1);
        Ok(video.views)
    }

    async fn toggle_like(&self, video_id: VideoId, user_name: &str) -> Result<bool> {
        let user_name = required("user name", user_name)?;

        let mut tables = self.tables.write();
        tables.video_mut(video_id)?;

        let key = (video_id, user_name);
        let liked = if tables.likes.remove(&key) {
            false
        } else {
            tables.likes.insert(key);
            true
        };

        let video = tables.video_mut(video_id)?;
        video.likes_count = if liked {
            video.likes_count.saturating_add(1)
        } else {
            video.likes_count.saturating_sub(1)
        };
        Ok(liked)
    }

    async fn has_liked(&self, video_id: VideoId, user_name: &str) -> Result<bool> {
        let key = (video_id, user_name.trim().to_string());
        Ok(self.tables.read().likes.contains(&key))
    }

    async fn toggle_subscription(&self, channel_id: ChannelId, user_name: &str) -> Result<bool> {
        let user_name = required("user name", user_name)?;

        let mut tables = self.tables.write();
        tables.channel_mut(channel_id)?;

        let key = (channel_id, user_name);
        let subscribed = if tables.subscriptions.remove(&key) {
            false
        } else {
            tables.subscriptions.insert(key);
            true
        };

        let channel = tables.channel_mut(channel_id)?;
        channel.subscriber_count = if subscribed {
            channel.subscriber_count.saturating_add(1)
        } else {
            channel.subscriber_count.saturating_sub(1)
        };
        Ok(subscribed)
    }

    async fn is_subscribed(&self, channel_id: ChannelId, user_name: &str) -> Result<bool> {
        let key = (channel_id, user_name.trim().to_string());
        Ok(self.tables.read().subscriptions.contains(&key))
    }

    async fn post_comment(&self, input: NewComment) -> Result<Comment> {
        let user_name = required("user name", &input.user_name)?;
        let comment_text = required("comment", &input.comment_text)?;

        let comment = {
            let mut tables = self.tables.write();
            match &input.target {
                CommentTarget::Video(video_id) => {
                    tables.video_mut(*video_id)?;
                }
                CommentTarget::Title(content_id) => {
                    required("title id", content_id.as_str())?;
                }
            }

            let comment = Comment {
                id: CommentId::new(),
                target: input.target,
                user_name,
                comment_text,
                created_at: Utc::now(),
            };
            tables.comments.push(comment.clone());
            comment
        };

        if self.comment_tx.send(comment.clone()).is_err() {
            tracing::trace!("No subscribers for comment event");
        }
        Ok(comment)
    }

    async fn list_comments(&self, target: &CommentTarget) -> Result<Vec<Comment>> {
        let tables = self.tables.read();
        let comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| &c.target == target)
            .cloned()
            .collect();
        Ok(newest_first(comments.into_iter(), |c: &Comment| c.created_at))
    }

    fn subscribe_comments(&self, target: CommentTarget) -> CommentSubscription {
        CommentSubscription::new(target, self.comment_tx.subscribe())
    }
}
