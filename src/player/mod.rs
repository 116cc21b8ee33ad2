//! Playback source classification.
//!
//! A locator is resolved in order:
//! 1. blank -> [`PlaybackSource::Placeholder`]
//! 2. rewrite rules (video-hosting links -> canonical embed URL)
//! 3. allow-listed file extension -> [`PlaybackSource::DirectFile`]
//! 4. anything else -> [`PlaybackSource::Embedded`]
//!
//! Only direct files report playback position.

pub mod rules;

use gear5tv_common::media;
use serde::Serialize;

pub use rules::RewriteRule;

/// How a locator will be played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaybackSource {
    /// Nothing to play; show the "No video available" state.
    Placeholder,
    /// Native playback of a media file.
    DirectFile { url: String },
    /// Third-party player in an iframe.
    Embedded { url: String },
}

impl PlaybackSource {
    /// Whether the player reports `(position, duration)` updates.
    pub fn emits_time_updates(&self) -> bool {
        matches!(self, PlaybackSource::DirectFile { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            PlaybackSource::Placeholder => None,
            PlaybackSource::DirectFile { url } | PlaybackSource::Embedded { url } => Some(url),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlaybackSource::Placeholder => "placeholder",
            PlaybackSource::DirectFile { .. } => "direct",
            PlaybackSource::Embedded { .. } => "embedded",
        }
    }
}

/// Classifies locators with a rule table and an extension allow-list.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    rules: Vec<RewriteRule>,
    direct_extensions: Vec<String>,
}

impl Default for SourceResolver {
    fn default() -> Self {
        Self::new(media::direct_media_extensions().iter().map(|e| e.to_string()).collect())
    }
}

impl SourceResolver {
    pub fn new(direct_extensions: Vec<String>) -> Self {
        Self::with_rules(rules::default_rules(), direct_extensions)
    }

    pub fn with_rules(mut rules: Vec<RewriteRule>, direct_extensions: Vec<String>) -> Self {
        rules::sort_rules(&mut rules);
        Self {
            rules,
            direct_extensions,
        }
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    pub fn resolve(&self, locator: &str) -> PlaybackSource {
        let locator = locator.trim();
        if locator.is_empty() {
            return PlaybackSource::Placeholder;
        }

        let rewritten = rules::parse_locator(locator).and_then(|url| {
            rules::find_matching_rule(&self.rules, &url).map(|(rule, out)| {
                tracing::trace!("Locator rewritten by rule '{}'", rule.name);
                out
            })
        });
        let url = rewritten.unwrap_or_else(|| locator.to_string());

        if media::has_extension_in(&url, &self.direct_extensions) {
            PlaybackSource::DirectFile { url }
        } else {
            PlaybackSource::Embedded { url }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_file_with_query() {
        let source = SourceResolver::default().resolve("https://example.com/video.mp4?token=123");
        assert_eq!(
            source,
            PlaybackSource::DirectFile {
                url: "https://example.com/video.mp4?token=123".to_string()
            }
        );
        assert!(source.emits_time_updates());
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let source = SourceResolver::default().resolve("/media/Episode01.MKV");
        assert_eq!(source.label(), "direct");
    }

    #[test]
    fn test_youtube_rewritten_and_embedded() {
        let source = SourceResolver::default().resolve("https://youtube.com/watch?v=abc123");
        assert_eq!(
            source,
            PlaybackSource::Embedded {
                url: "https://www.youtube.com/embed/abc123?autoplay=0".to_string()
            }
        );
        assert!(!source.emits_time_updates());
    }

    #[test]
    fn test_other_hosts_are_embedded() {
        let source = SourceResolver::default().resolve("https://2anime.xyz/embed/bleach-episode-1");
        assert_eq!(source.label(), "embedded");
        assert_eq!(source.url(), Some("https://2anime.xyz/embed/bleach-episode-1"));
    }

    #[test]
    fn test_blank_is_placeholder() {
        let resolver = SourceResolver::default();
        assert_eq!(resolver.resolve(""), PlaybackSource::Placeholder);
        assert_eq!(resolver.resolve("   "), PlaybackSource::Placeholder);
        assert_eq!(resolver.resolve("").url(), None);
    }

    #[test]
    fn test_custom_extension_list() {
        let resolver = SourceResolver::new(vec![".m3u8".to_string()]);
        assert_eq!(resolver.resolve("https://cdn/x.m3u8").label(), "direct");
        assert_eq!(resolver.resolve("https://cdn/x.mp4").label(), "embedded");
    }
}
