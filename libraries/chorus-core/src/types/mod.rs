//! Domain types for Chorus Player.

mod repeat;
mod track;

pub use repeat::RepeatMode;
pub use track::Track;
