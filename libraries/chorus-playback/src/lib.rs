//! Chorus Player - Playback Orchestration
//!
//! Platform-agnostic playback orchestration for Chorus Player.
//!
//! This crate provides:
//! - A playback session state machine (idle, loading, playing, paused, erroring)
//! - Queue advancement with shuffle, repeat modes, and auto-continuation
//! - One-track-ahead stream URL prefetching
//! - Two-tier primary/fallback stream error recovery
//!
//! # Architecture
//!
//! `chorus-playback` never touches a real audio device or the network
//! directly. The media primitive is injected through the
//! [`MediaTransport`] trait and stream resolution through the
//! [`StreamResolver`] trait; the production resolver is the HTTP client
//! from `chorus-api-client`. Lifecycle events from the primitive are fed
//! back in as [`MediaEvent`]s, and UI-facing changes come out as
//! [`PlayerEvent`]s via [`PlaybackSession::take_events`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod advance;
pub mod cache;
pub mod error;
pub mod events;
pub mod resolver;
pub mod session;
pub mod state;
pub mod transport;

pub use error::{PlaybackError, Result};
pub use events::{MediaEvent, PlayerEvent};
pub use resolver::StreamResolver;
pub use session::{PlaybackSession, SourceTier};
pub use state::{PlaybackPhase, SessionState};
pub use transport::MediaTransport;
