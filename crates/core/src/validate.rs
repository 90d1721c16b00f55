use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

static URL_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"^https?://(www\.)?(youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)")
            .expect("static regex"),
        Regex::new(r"^https?://(www\.)?youtube\.com/watch\?.*v=").expect("static regex"),
    ]
});

static VIDEO_ID_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)")
            .expect("static regex"),
        Regex::new(r"youtube\.com/watch\?.*v=([^&\n?#]+)").expect("static regex"),
    ]
});

/// Whether `url` looks like a YouTube watch, short-link or embed URL.
pub fn is_valid_url(url: &str) -> bool {
    URL_PATTERNS.iter().any(|pattern| pattern.is_match(url))
}

/// Trim the raw input and check it, returning the URL to submit.
pub fn validate_input(raw: &str) -> Result<&str, ValidationError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(ValidationError::MissingUrl);
    }
    if !is_valid_url(url) {
        return Err(ValidationError::InvalidUrl);
    }
    Ok(url)
}

/// Pull the video id out of a YouTube URL.
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
