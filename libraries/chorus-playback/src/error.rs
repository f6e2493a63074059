//! Error types for playback orchestration

use thiserror::Error;

/// Playback errors
///
/// Every asynchronous failure during playback is caught at its call site
/// and folded into session state; nothing here propagates far enough to
/// tear down the session. [`PlaybackError::user_message`] maps each
/// variant to the text shown to the listener, if any.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Stream URL lookup failed or returned nothing
    #[error("Stream resolution failed: {0}")]
    Resolution(String),

    /// The media primitive reported an error on the primary source
    #[error("Primary source failed: {0}")]
    PrimaryPlayback(String),

    /// Error on the fallback source, or the fallback lookup itself failed
    #[error("Fallback source failed: {0}")]
    FallbackPlayback(String),

    /// Related-track search failed or returned nothing
    #[error("Auto-continuation failed: {0}")]
    AutoContinuation(String),

    /// The media primitive rejected a command
    #[error("Media transport error: {0}")]
    Transport(String),

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),
}

impl PlaybackError {
    /// The message surfaced to the listener when this error reaches
    /// session state. `None` means the failure is silent (an exhausted
    /// queue is a normal end state, not something to report).
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            PlaybackError::Resolution(_) | PlaybackError::Transport(_) => Some("Playback failed"),
            PlaybackError::PrimaryPlayback(_) => Some("Playback failed. Try again."),
            PlaybackError::FallbackPlayback(_) => Some("All sources failed. Try again later."),
            PlaybackError::AutoContinuation(_) | PlaybackError::IndexOutOfBounds(_) => None,
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
