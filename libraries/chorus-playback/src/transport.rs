//! Platform-agnostic media transport trait
//!
//! Abstracts the real-time media primitive (an HTML audio element, a
//! native decoder pipeline, ...) behind the command surface the session
//! needs. The session owns exactly one transport for its lifetime;
//! lifecycle events flow back in as [`crate::events::MediaEvent`].

use crate::error::Result;
use async_trait::async_trait;

/// Command surface of the media primitive.
///
/// Implementors bind a concrete player. `assign_source` + `load` +
/// `begin_playback` are always issued together when a new track starts;
/// `begin_playback` is the only fallible command, and its rejection is
/// folded into session state rather than propagated.
#[async_trait]
pub trait MediaTransport: Send {
    /// Point the primitive at a new stream URL.
    fn assign_source(&mut self, url: &str);

    /// (Re)load the assigned source.
    fn load(&mut self);

    /// Request playback start. May be rejected by the primitive.
    async fn begin_playback(&mut self) -> Result<()>;

    /// Pause playback.
    fn pause(&mut self);

    /// Resume playback of the already-loaded source.
    fn resume(&mut self);

    /// Seek to an absolute position, in seconds from the track start.
    fn seek_to(&mut self, position_secs: f64);

    /// Apply a volume in [0, 1]. Takes effect immediately, independent of
    /// playback state.
    fn set_volume(&mut self, volume: f32);
}
