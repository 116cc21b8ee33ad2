//! Locator rewrite rules.
//!
//! Each rule inspects a parsed URL and may return the provider's canonical
//! embeddable form. Rules are evaluated highest priority first and the first
//! match wins.

use url::Url;

type RewriteFn = fn(&Url) -> Option<String>;

/// A named matcher plus canonicalizer.
#[derive(Clone)]
pub struct RewriteRule {
    pub name: &'static str,
    pub priority: i32,
    rewrite: RewriteFn,
}

impl std::fmt::Debug for RewriteRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewriteRule")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish()
    }
}

impl RewriteRule {
    pub fn new(name: &'static str, priority: i32, rewrite: RewriteFn) -> Self {
        Self {
            name,
            priority,
            rewrite,
        }
    }

    /// Canonical form of `url` if this rule recognizes it.
    pub fn apply(&self, url: &Url) -> Option<String> {
        (self.rewrite)(url)
    }
}

/// Built-in rules, sorted by priority.
pub fn default_rules() -> Vec<RewriteRule> {
    let mut rules = vec![
        RewriteRule::new("youtube-watch", 100, youtube_watch),
        RewriteRule::new("youtube-short-link", 90, youtube_short_link),
    ];
    sort_rules(&mut rules);
    rules
}

/// Order rules for evaluation, highest priority first.
pub fn sort_rules(rules: &mut [RewriteRule]) {
    rules.sort_by(|a, b| b.priority.cmp(&a.priority));
}

/// Find the first rule that rewrites `url`, with its output.
pub fn find_matching_rule<'a>(rules: &'a [RewriteRule], url: &Url) -> Option<(&'a RewriteRule, String)> {
    rules
        .iter()
        .find_map(|rule| rule.apply(url).map(|rewritten| (rule, rewritten)))
}

/// Parse a locator, assuming `https` when the scheme is missing
/// (`youtube.com/watch?v=...`).
pub fn parse_locator(locator: &str) -> Option<Url> {
    match Url::parse(locator) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{}", locator)).ok()
        }
        Err(_) => None,
    }
}

fn youtube_embed(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}?autoplay=0", video_id)
}

fn is_video_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// `youtube.com/watch?v=ID` on the bare, `www.` and `m.` hosts.
fn youtube_watch(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    if !matches!(host, "youtube.com" | "www.youtube.com" | "m.youtube.com") {
        return None;
    }
    if !url.path().trim_end_matches('/').eq_ignore_ascii_case("/watch") {
        return None;
    }

    let (_, id) = url.query_pairs().find(|(k, _)| k == "v")?;
    is_video_id(&id).then(|| youtube_embed(&id))
}

/// `youtu.be/ID`.
fn youtube_short_link(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    if !matches!(host, "youtu.be" | "www.youtu.be") {
        return None;
    }

    let id = url.path_segments()?.find(|s| !s.is_empty())?;
    is_video_id(id).then(|| youtube_embed(id))
}
