//! Playback events
//!
//! Two event surfaces meet in the session:
//! - [`MediaEvent`]: lifecycle notifications from the media primitive,
//!   fed into `PlaybackSession::handle_event` by the platform binding.
//! - [`PlayerEvent`]: notifications the session queues for the UI,
//!   drained via `PlaybackSession::take_events`.

use crate::state::PlaybackPhase;
use serde::{Deserialize, Serialize};

/// Asynchronous lifecycle events emitted by the media primitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Playback position advanced
    Progress {
        /// Position from the start of the track, in seconds
        position_secs: f64,
    },

    /// The primitive learned the real track duration
    DurationKnown {
        /// Duration in seconds
        duration_secs: f64,
    },

    /// Enough data is buffered to start playing
    ReadyToPlay,

    /// Audible playback has actually started
    PlayingConfirmed,

    /// The track played to its end
    Completed,

    /// The current source failed
    Error {
        /// Opaque diagnostic from the primitive
        message: String,
    },
}

/// Events emitted by the session for UI synchronization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Playback phase changed
    StateChanged {
        /// The new phase
        phase: PlaybackPhase,
    },

    /// A different track became active
    TrackChanged {
        /// ID of the new (current) track
        track_id: String,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// The current track played to its natural end
    TrackFinished {
        /// ID of the finished track
        track_id: String,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume in [0, 1]
        volume: f32,
    },

    /// A user-visible playback error occurred
    Error {
        /// Error message
        message: String,
    },
}
