//! Track domain type

use serde::{Deserialize, Serialize};

/// A playable track.
///
/// Immutable descriptor of a song as returned by the backend search API.
/// All metadata is known up front except `duration`, which may be zero
/// until the media player reports the real value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Backend track identifier, stable and unique within a session
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name (may be empty for some backend results)
    pub artist: String,

    /// Album name
    pub album: Option<String>,

    /// Track duration in seconds (0.0 = unknown)
    pub duration: f64,

    /// Cover art URL
    pub thumbnail_url: String,
}

impl Track {
    /// Create a track with minimal metadata.
    pub fn new(id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            album: None,
            duration: 0.0,
            thumbnail_url: String::new(),
        }
    }

    /// The text used when searching for related tracks: the artist,
    /// falling back to the title when the artist is empty.
    pub fn related_query(&self) -> &str {
        if self.artist.is_empty() {
            &self.title
        } else {
            &self.artist
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_track_has_unknown_duration() {
        let track = Track::new("t1", "Song", "Artist");
        assert_eq!(track.id, "t1");
        assert_eq!(track.duration, 0.0);
        assert!(track.album.is_none());
    }

    #[test]
    fn related_query_prefers_artist() {
        let track = Track::new("t1", "Song", "Artist");
        assert_eq!(track.related_query(), "Artist");

        let untitled = Track::new("t2", "Song Only", "");
        assert_eq!(untitled.related_query(), "Song Only");
    }
}
