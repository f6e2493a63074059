//! Session state
//!
//! The single source of truth rendered by any consumer. All transitions
//! replace logically-related fields together, so no partial update is
//! ever observable between them.

use chorus_core::{RepeatMode, Track};
use serde::{Deserialize, Serialize};

/// Playback phase
///
/// `Loading -> Playing` is gated on the primitive's playing-confirmed
/// event; the ready-to-play event only moves `Loading -> Paused`
/// (loaded, audible playback not yet confirmed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackPhase {
    /// No track loaded
    #[default]
    Idle,

    /// Resolving or buffering a track
    Loading,

    /// Audibly playing
    Playing,

    /// Paused mid-track (or loaded but not confirmed playing)
    Paused,

    /// Playback failed; a subsequent play command recovers
    Erroring,
}

/// Snapshot of everything the UI needs to render the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Currently active track
    pub current_track: Option<Track>,

    /// Playback queue, replaced wholesale on each play/auto-continuation
    pub queue: Vec<Track>,

    /// Cursor into `queue`; `None` iff `current_track` is `None`
    pub queue_index: Option<usize>,

    /// Current playback phase
    pub phase: PlaybackPhase,

    /// Elapsed playback time in seconds
    pub current_time: f64,

    /// Track duration in seconds (0.0 = unknown)
    pub duration: f64,

    /// Volume in [0, 1]
    pub volume: f32,

    /// User-visible error message, if playback failed
    pub error: Option<String>,

    /// Whether shuffle is enabled
    pub is_shuffled: bool,

    /// Repeat mode
    pub repeat: RepeatMode,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_track: None,
            queue: Vec::new(),
            queue_index: None,
            phase: PlaybackPhase::Idle,
            current_time: 0.0,
            duration: 0.0,
            volume: 1.0,
            error: None,
            is_shuffled: false,
            repeat: RepeatMode::Off,
        }
    }
}

impl SessionState {
    /// Whether playback is audibly running.
    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }

    /// Whether a track is being resolved or buffered.
    pub fn is_loading(&self) -> bool {
        self.phase == PlaybackPhase::Loading
    }

    /// Playback progress in [0, 1]; 0 while the duration is unknown.
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Transition to loading a new track: track, queue, cursor, phase and
    /// timing all change in one step.
    pub(crate) fn begin_loading(&mut self, track: Track, queue: Vec<Track>, index: usize) {
        self.duration = track.duration;
        self.current_track = Some(track);
        self.queue = queue;
        self.queue_index = Some(index);
        self.phase = PlaybackPhase::Loading;
        self.error = None;
        self.current_time = 0.0;
    }

    /// Transition to a stable, retryable failure state.
    pub(crate) fn fail(&mut self, message: &str) {
        self.phase = PlaybackPhase::Erroring;
        self.error = Some(message.to_string());
    }
}
