//! Media locator utilities for detecting directly playable files.
//!
//! A locator is any string handed to the player: an absolute URL, a relative
//! path, or an embed link. These helpers look only at the final path segment,
//! ignoring any query string or fragment, and compare extensions
//! case-insensitively.

/// Extensions a native video element can play directly.
const DIRECT_MEDIA_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "mov", "avi", "mkv"];

/// Extract the lowercase file extension of a locator's last path segment.
///
/// # Examples
///
/// ```
/// use gear5tv_common::media::locator_extension;
///
/// assert_eq!(locator_extension("https://cdn.example.com/a/b.MP4?x=1").as_deref(), Some("mp4"));
/// assert_eq!(locator_extension("/videos/clip.webm#t=10").as_deref(), Some("webm"));
/// assert_eq!(locator_extension("https://example.com/embed/abc"), None);
/// ```
pub fn locator_extension(locator: &str) -> Option<String> {
    let without_fragment = locator.split('#').next().unwrap_or_default();
    let path = without_fragment.split('?').next().unwrap_or_default();
    let segment = path.rsplit('/').next().unwrap_or_default();

    let (_, ext) = segment.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Check whether a locator's extension is in the given allow-list.
///
/// Entries in `extensions` may carry a leading dot and any casing.
pub fn has_extension_in<S: AsRef<str>>(locator: &str, extensions: &[S]) -> bool {
    match locator_extension(locator) {
        Some(ext) => extensions
            .iter()
            .any(|e| e.as_ref().trim_start_matches('.').eq_ignore_ascii_case(&ext)),
        None => false,
    }
}

/// Check whether a locator points at a directly playable media file.
///
/// # Examples
///
/// ```
/// use gear5tv_common::media::is_direct_media_locator;
///
/// assert!(is_direct_media_locator("https://example.com/video.mp4?token=123"));
/// assert!(is_direct_media_locator("movie.MKV"));
/// assert!(!is_direct_media_locator("https://www.youtube.com/embed/abc123"));
/// ```
pub fn is_direct_media_locator(locator: &str) -> bool {
    has_extension_in(locator, DIRECT_MEDIA_EXTENSIONS)
}

/// Get the default list of direct media extensions.
///
/// # Examples
///
/// ```
/// use gear5tv_common::media::direct_media_extensions;
///
/// assert!(direct_media_extensions().contains(&"mp4"));
/// assert!(direct_media_extensions().contains(&"mkv"));
/// ```
#[must_use]
pub fn direct_media_extensions() -> &'static [&'static str] {
    DIRECT_MEDIA_EXTENSIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_direct_media_locator() {
        assert!(is_direct_media_locator("movie.mp4"));
        assert!(is_direct_media_locator("movie.webm"));
        assert!(is_direct_media_locator("movie.ogg"));
        assert!(is_direct_media_locator("movie.mov"));
        assert!(is_direct_media_locator("movie.avi"));
        assert!(is_direct_media_locator("movie.mkv"));

        // Case insensitive
        assert!(is_direct_media_locator("movie.MP4"));
        assert!(is_direct_media_locator("https://EXAMPLE.com/Movie.WebM"));

        // Query strings and fragments
        assert!(is_direct_media_locator("https://example.com/video.mp4?token=123"));
        assert!(is_direct_media_locator("https://example.com/video.mp4?a=1&b=2#t=30"));

        // Not direct media
        assert!(!is_direct_media_locator("https://2anime.xyz/embed/naruto-episode-1"));
        assert!(!is_direct_media_locator("https://example.com/video.mp4/page"));
        assert!(!is_direct_media_locator("https://example.com/page?file=video.mp4"));
        assert!(!is_direct_media_locator("video.m3u8"));
    }

    #[test]
    fn test_locator_extension_edge_cases() {
        assert_eq!(locator_extension(""), None);
        assert_eq!(locator_extension("https://example.com/"), None);
        assert_eq!(locator_extension("no_extension"), None);
        assert_eq!(locator_extension("trailing."), None);
        assert_eq!(locator_extension(".hidden.mkv").as_deref(), Some("mkv"));
        assert_eq!(locator_extension("show.s01e01.1080p.mkv").as_deref(), Some("mkv"));
    }

    #[test]
    fn test_has_extension_in_custom_list() {
        let list = vec![".M3U8".to_string(), "mp4".to_string()];
        assert!(has_extension_in("https://cdn/x/master.m3u8", &list));
        assert!(has_extension_in("clip.mp4", &list));
        assert!(!has_extension_in("clip.mkv", &list));
    }

    #[test]
    fn test_direct_media_extensions() {
        let exts = direct_media_extensions();
        assert_eq!(exts.len(), 6);
        for ext in ["mp4", "webm", "ogg", "mov", "avi", "mkv"] {
            assert!(exts.contains(&ext));
        }
    }
}
