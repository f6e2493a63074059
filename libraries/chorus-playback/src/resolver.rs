//! Stream resolution seam
//!
//! The session never talks HTTP directly; it goes through this trait so
//! tests can substitute deterministic fakes. The production implementation
//! is [`MusicApiClient`] from `chorus-api-client`.

use crate::error::{PlaybackError, Result};
use async_trait::async_trait;
use chorus_api_client::MusicApiClient;
use chorus_core::Track;

/// Resolves track identifiers to playable URLs and backs auto-continuation.
#[async_trait]
pub trait StreamResolver: Send + Sync {
    /// Resolve the primary stream URL for a track.
    async fn stream_url(&self, track_id: &str) -> Result<String>;

    /// Resolve the secondary (fallback) stream URL for a track, used only
    /// after a primary-source playback error.
    async fn fallback_stream_url(&self, track_id: &str) -> Result<String>;

    /// Find tracks related to a free-text query (artist or title), used
    /// to replenish an exhausted queue.
    async fn related_tracks(&self, query: &str) -> Result<Vec<Track>>;
}

#[async_trait]
impl StreamResolver for MusicApiClient {
    async fn stream_url(&self, track_id: &str) -> Result<String> {
        MusicApiClient::stream_url(self, track_id)
            .await
            .map_err(|e| PlaybackError::Resolution(e.to_string()))
    }

    async fn fallback_stream_url(&self, track_id: &str) -> Result<String> {
        Ok(MusicApiClient::fallback_stream_url(self, track_id))
    }

    async fn related_tracks(&self, query: &str) -> Result<Vec<Track>> {
        self.search(query)
            .await
            .map_err(|e| PlaybackError::AutoContinuation(e.to_string()))
    }
}
