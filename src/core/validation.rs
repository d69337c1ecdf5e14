//! URL and filename validation utilities
//!
//! Provides validation for user inputs:
//! - Instagram content URL validation (posts, reels, stories, IGTV)
//! - Content reference extraction (path segment + identifier)
//! - Filename sanitization for saved media

use lazy_regex::{lazy_regex, Lazy, Regex};
use thiserror::Error;
use url::Url;

/// Canonical Instagram content URL pattern.
///
/// Optional `http`/`https` scheme, optional `www.`, host `instagram.com`,
/// one accepted content segment and a non-empty identifier. Further path
/// segments (stories carry `/stories/<user>/<id>/`), a trailing slash and a
/// query or fragment are tolerated. Anchored at both ends, so anything with
/// whitespace or a foreign host never matches.
static INSTAGRAM_URL: Lazy<Regex> = lazy_regex!(
    r"^(?:https?://)?(?:www\.)?instagram\.com/(p|reel|reels|tv|stories|story)/([^/?#&\s]+)((?:/[^/?#&\s]+)*)/?(?:[?#]\S*)?$"i
);

/// Validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Nothing was entered
    #[error("Empty URL")]
    Empty,

    /// Not an accepted Instagram content URL
    #[error("Invalid Instagram URL: {0}")]
    InvalidUrl(String),
}

/// Kind of Instagram content a URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ContentKind {
    Post,
    Reel,
    Story,
    Tv,
}

impl ContentKind {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment.to_ascii_lowercase().as_str() {
            "p" => Some(Self::Post),
            "reel" | "reels" => Some(Self::Reel),
            "stories" | "story" => Some(Self::Story),
            "tv" => Some(Self::Tv),
            _ => None,
        }
    }
}

/// Content reference extracted from a validated URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRef {
    pub kind: ContentKind,
    /// Shortcode for posts/reels/tv, story id (or username when no id) for stories
    pub id: String,
}

/// Returns true iff `url` matches the canonical Instagram content URL pattern.
///
/// # Examples
/// ```
/// use instagrab::core::validation::is_valid_instagram_url;
///
/// assert!(is_valid_instagram_url("https://www.instagram.com/p/ABC123/"));
/// assert!(is_valid_instagram_url("https://instagram.com/reel/XYZ/"));
/// assert!(!is_valid_instagram_url("https://www.instagram.com/username/"));
/// assert!(!is_valid_instagram_url("https://evil.com/p/ABC123/"));
/// ```
pub fn is_valid_instagram_url(url: &str) -> bool {
    INSTAGRAM_URL.is_match(url)
}

/// Validates raw user input and parses it into a [`Url`].
///
/// Input is trimmed first. A missing scheme is treated as `https`.
///
/// # Returns
/// * `Ok(Url)` for an accepted Instagram content URL
/// * `Err(ValidationError::Empty)` for blank input
/// * `Err(ValidationError::InvalidUrl)` for anything else
pub fn validate_instagram_url(input: &str) -> Result<Url, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Empty);
    }

    if !is_valid_instagram_url(input) {
        return Err(ValidationError::InvalidUrl(input.to_string()));
    }

    let lowered = input.to_ascii_lowercase();
    let with_scheme = if lowered.starts_with("http://") || lowered.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    Url::parse(&with_scheme).map_err(|_| ValidationError::InvalidUrl(input.to_string()))
}

/// Extracts the content kind and identifier from an Instagram URL.
///
/// Supports `/p/<code>/`, `/reel/<code>/`, `/reels/<code>/`, `/tv/<code>/`,
/// `/stories/<user>/<id>/` and `/story/<user>/`.
pub fn extract_content_ref(url: &Url) -> Option<ContentRef> {
    let host = url.host_str()?.to_ascii_lowercase();
    if host != "instagram.com" && host != "www.instagram.com" {
        return None;
    }

    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    let (first, rest) = segments.split_first()?;
    let kind = ContentKind::from_segment(first)?;

    let id = match kind {
        // `/stories/<user>/<id>/` names the story; `/stories/<user>/` the reel tray
        ContentKind::Story => rest.get(1).or_else(|| rest.first())?,
        _ => rest.first()?,
    };

    Some(ContentRef {
        kind,
        id: (*id).to_string(),
    })
}

/// Sanitizes a filename by removing filesystem-unsafe characters.
///
/// Removes path separators, reserved characters (`:`, `*`, `?`, `"`, `<`,
/// `>`, `|`) and control characters.
///
/// # Examples
/// ```
/// use instagrab::core::validation::sanitize_filename;
///
/// assert_eq!(sanitize_filename("ABC123-image-0.jpg"), "ABC123-image-0.jpg");
/// assert_eq!(sanitize_filename("a/b:c.mp4"), "abc.mp4");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !['/', '\\', ':', '*', '?', '"', '<', '>', '|'].contains(c))
        .filter(|c| !c.is_control())
        .collect()
}
