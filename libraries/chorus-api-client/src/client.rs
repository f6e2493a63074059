//! Main backend API client.

use crate::error::{ApiClientError, Result};
use crate::types::{ApiConfig, SearchResponse, StreamInfo};
use chorus_core::Track;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the Chorus Player backend music API.
///
/// Cloning is cheap: the underlying HTTP connection pool is shared, which
/// lets background tasks (e.g. prefetch) carry their own handle.
///
/// # Example
///
/// ```ignore
/// use chorus_api_client::{ApiConfig, MusicApiClient};
///
/// let client = MusicApiClient::new(ApiConfig::new("https://music.example.com"))?;
/// let tracks = client.search("boards of canada").await?;
/// ```
#[derive(Debug, Clone)]
pub struct MusicApiClient {
    http: Client,
    base_url: String,
}

impl MusicApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        // Validate URL
        if config.base_url.is_empty() {
            return Err(ApiClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        // Create HTTP client with reasonable defaults
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("ChorusPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiClientError::Request)?;

        Ok(Self { http, base_url })
    }

    /// Get the backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search for tracks by free-text query.
    ///
    /// Used both for explicit search and for related-track lookups when
    /// the queue runs out.
    pub async fn search(&self, query: &str) -> Result<Vec<Track>> {
        let url = format!(
            "{}/api/search?q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        debug!(url = %url, query = %query, "Searching tracks");

        let response = self.http.get(&url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ApiClientError::ServerUnreachable(e.to_string())
            } else {
                ApiClientError::Request(e)
            }
        })?;

        let status = response.status();

        if status.is_success() {
            let search: SearchResponse = response.json().await.map_err(|e| {
                ApiClientError::ParseError(format!("Failed to parse search response: {}", e))
            })?;

            debug!(results = search.results.len(), "Search complete");
            Ok(search.results.into_iter().map(Track::from).collect())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Resolve a playable stream URL for a track.
    ///
    /// Asks the backend for a direct CDN URL first. When the backend has
    /// none (or signals `needs_proxy`, or is unreachable) the deterministic
    /// proxy endpoint is used instead, so this only fails on a malformed
    /// response body with a success status.
    pub async fn stream_url(&self, track_id: &str) -> Result<String> {
        let url = format!("{}/api/stream-info/{}", self.base_url, track_id);
        debug!(url = %url, track_id = %track_id, "Resolving stream URL");

        match self.fetch_stream_info(&url).await {
            Ok(info) => {
                if let (Some(direct), false) = (info.url, info.needs_proxy) {
                    debug!(
                        track_id = %track_id,
                        source = info.source.as_deref().unwrap_or("unknown"),
                        "Using direct CDN URL"
                    );
                    return Ok(direct);
                }
            }
            Err(e) => {
                warn!(track_id = %track_id, error = %e, "stream-info failed, using proxy");
            }
        }

        Ok(self.proxy_url(track_id))
    }

    /// Secondary proxy URL for a track, used only after a primary-source
    /// playback error. Deterministic, no network round trip.
    pub fn fallback_stream_url(&self, track_id: &str) -> String {
        format!("{}/api/piped-stream/{}", self.base_url, track_id)
    }

    /// Backend streaming proxy URL for a track.
    fn proxy_url(&self, track_id: &str) -> String {
        format!("{}/api/stream/{}", self.base_url, track_id)
    }

    async fn fetch_stream_info(&self, url: &str) -> Result<StreamInfo> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| {
                ApiClientError::ParseError(format!("Failed to parse stream info: {}", e))
            })
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}
