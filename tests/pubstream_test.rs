//! Integration tests for the Pub Stream content service.

use assert_matches::assert_matches;
use gear5tv::pubstream::{
    format_count, CommentTarget, ContentService, MemoryContentService, NewChannel, NewComment,
    NewVideo,
};
use gear5tv_common::{ContentId, Error, VideoId};

async fn channel_with_video(service: &MemoryContentService) -> (gear5tv_common::ChannelId, VideoId) {
    let channel = service.create_channel(NewChannel::new("Gear5 Clips")).await.unwrap();
    let video = service
        .upload_video(NewVideo::new(channel.id, "Opening", "https://cdn.example.com/op.mp4"))
        .await
        .unwrap();
    (channel.id, video.id)
}

#[tokio::test]
async fn like_toggles_and_never_goes_negative() {
    let service = MemoryContentService::new();
    let (_, video_id) = channel_with_video(&service).await;

    assert!(service.toggle_like(video_id, "luffy").await.unwrap());
    assert!(service.has_liked(video_id, "luffy").await.unwrap());
    assert_eq!(service.get_video(video_id).await.unwrap().likes_count, 1);

    assert!(!service.toggle_like(video_id, " luffy ").await.unwrap());
    assert!(!service.has_liked(video_id, "luffy").await.unwrap());
    assert_eq!(service.get_video(video_id).await.unwrap().likes_count, 0);

    assert_matches!(service.toggle_like(video_id, "  ").await, Err(Error::InvalidInput(_)));
    assert_matches!(
        service.toggle_like(VideoId::new(), "zoro").await,
        Err(Error::NotFound(_))
    );
}

#[tokio::test]
async fn subscriptions_drive_channel_order() {
    let service = MemoryContentService::new();
    let small = service.create_channel(NewChannel::new("Small")).await.unwrap();
    let big = service.create_channel(NewChannel::new("Big")).await.unwrap();

    for user in ["a", "b", "c"] {
        assert!(service.toggle_subscription(big.id, user).await.unwrap());
    }
    service.toggle_subscription(small.id, "a").await.unwrap();

    let channels = service.list_channels().await.unwrap();
    assert_eq!(channels[0].name, "Big");
    assert_eq!(channels[0].subscriber_count, 3);

    assert!(!service.toggle_subscription(big.id, "a").await.unwrap());
    assert!(!service.is_subscribed(big.id, "a").await.unwrap());
    assert_eq!(service.get_channel(big.id).await.unwrap().subscriber_count, 2);
}

#[tokio::test]
async fn delete_channel_cascades() {
    let service = MemoryContentService::new();
    let (channel_id, video_id) = channel_with_video(&service).await;
    let (other_channel, other_video) = channel_with_video(&service).await;

    service.toggle_like(video_id, "luffy").await.unwrap();
    service.toggle_subscription(channel_id, "luffy").await.unwrap();
    let target = CommentTarget::Video(video_id);
    service
        .post_comment(NewComment::new(target.clone(), "luffy", "Great!"))
        .await
        .unwrap();
    let title_target = CommentTarget::Title(ContentId::from("one-piece"));
    service
        .post_comment(NewComment::new(title_target.clone(), "nami", "Best arc"))
        .await
        .unwrap();

    service.delete_channel(channel_id).await.unwrap();

    assert_matches!(service.get_channel(channel_id).await, Err(Error::NotFound(_)));
    assert_matches!(service.get_video(video_id).await, Err(Error::NotFound(_)));
    assert!(!service.has_liked(video_id, "luffy").await.unwrap());
    assert!(!service.is_subscribed(channel_id, "luffy").await.unwrap());
    assert!(service.list_comments(&target).await.unwrap().is_empty());
    assert_eq!(service.list_comments(&title_target).await.unwrap().len(), 1);

    let videos = service.list_videos().await.unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].id, other_video);
    assert_eq!(
        service.list_channel_videos(other_channel).await.unwrap().len(),
        1
    );

    assert_matches!(service.delete_channel(channel_id).await, Err(Error::NotFound(_)));
}

#[tokio::test]
async fn lists_are_newest_first() {
    let service = MemoryContentService::new();
    let channel = service.create_channel(NewChannel::new("c")).await.unwrap();
    for title in ["first", "second", "third"] {
        service
            .upload_video(NewVideo::new(channel.id, title, "https://cdn.example.com/v.mp4"))
            .await
            .unwrap();
    }

    let titles: Vec<String> = service
        .list_channel_videos(channel.id)
        .await
        .unwrap()
        .into_iter()
        .map(|v| v.title)
        .collect();
    assert_eq!(titles, vec!["third", "second", "first"]);

    let target = CommentTarget::Title(ContentId::from("bleach"));
    for text in ["one", "two"] {
        service
            .post_comment(NewComment::new(target.clone(), "ichigo", text))
            .await
            .unwrap();
    }
    let comments = service.list_comments(&target).await.unwrap();
    assert_eq!(comments[0].comment_text, "two");
    assert_eq!(comments[1].comment_text, "one");
}

#[tokio::test]
async fn comment_validation() {
    let service = MemoryContentService::new();
    let target = CommentTarget::Title(ContentId::from("bleach"));

    assert_matches!(
        service.post_comment(NewComment::new(target.clone(), "", "hi")).await,
        Err(Error::InvalidInput(_))
    );
    assert_matches!(
        service.post_comment(NewComment::new(target, "ichigo", "   ")).await,
        Err(Error::InvalidInput(_))
    );
    assert_matches!(
        service
            .post_comment(NewComment::new(CommentTarget::Video(VideoId::new()), "ichigo", "hi"))
            .await,
        Err(Error::NotFound(_))
    );

    let comment = service
        .post_comment(NewComment::new(
            CommentTarget::Title(ContentId::from("bleach")),
            "  ichigo ",
            " Bankai! ",
        ))
        .await
        .unwrap();
    assert_eq!(comment.user_name, "ichigo");
    assert_eq!(comment.comment_text, "Bankai!");
}

#[tokio::test]
async fn comment_feed_filters_by_target() {
    let service = MemoryContentService::new();
    let watched = CommentTarget::Title(ContentId::from("one-piece"));
    let other = CommentTarget::Title(ContentId::from("bleach"));
    let mut feed = service.subscribe_comments(watched.clone());

    service
        .post_comment(NewComment::new(other, "a", "elsewhere"))
        .await
        .unwrap();
    service
        .post_comment(NewComment::new(watched.clone(), "b", "here"))
        .await
        .unwrap();

    let received = feed.next().await.unwrap();
    assert_eq!(received.comment_text, "here");
    assert_eq!(feed.target(), &watched);
}

#[test]
fn count_formatting() {
    assert_eq!(format_count(532), "532");
    assert_eq!(format_count(1_234), "1.2K");
    assert_eq!(format_count(2_500_000), "2.5M");
}
