//! Chorus Player Core
//!
//! Shared domain types used across the Chorus Player crates.
//!
//! The core crate defines:
//! - **Domain Types**: [`Track`], [`RepeatMode`]
//!
//! # Example
//!
//! ```rust
//! use chorus_core::{RepeatMode, Track};
//!
//! let track = Track::new("abc123", "My Favorite Song", "Some Artist");
//! assert_eq!(track.duration, 0.0); // unknown until the player reports it
//!
//! assert_eq!(RepeatMode::Off.cycle(), RepeatMode::All);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod types;

pub use types::{RepeatMode, Track};
