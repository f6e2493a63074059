//! Types for backend API requests and responses.

use chorus_core::Track;
use serde::{Deserialize, Serialize};

/// Configuration for connecting to a Chorus Player backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend (e.g., "https://music.example.com")
    pub base_url: String,
}

impl ApiConfig {
    /// Create a new config with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Response from the search endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Search hits in backend ranking order
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// A single search hit as returned by the backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResult {
    /// Backend track identifier
    #[serde(rename = "videoId")]
    pub video_id: String,

    /// Track title
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist: String,

    /// Duration in seconds
    #[serde(default)]
    pub duration: f64,

    /// Cover art URL
    #[serde(rename = "thumbnailUrl", default)]
    pub thumbnail_url: String,

    /// Backup cover art URL (lower quality mirror)
    #[serde(rename = "thumbnailUrlBackup", default)]
    pub thumbnail_url_backup: Option<String>,
}

impl From<SearchResult> for Track {
    fn from(result: SearchResult) -> Self {
        Track {
            id: result.video_id,
            title: result.title,
            artist: result.artist,
            album: None,
            duration: result.duration,
            thumbnail_url: result.thumbnail_url,
        }
    }
}

/// Response from the stream-info endpoint.
///
/// The backend either hands out a direct CDN URL the player can consume
/// as-is, or signals that its streaming proxy must be used instead.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamInfo {
    /// Direct CDN URL, when the backend found one
    #[serde(default)]
    pub url: Option<String>,

    /// Whether the backend proxy endpoint must be used instead of `url`
    #[serde(default)]
    pub needs_proxy: bool,

    /// Name of the upstream source that produced the URL
    #[serde(default)]
    pub source: Option<String>,
}
