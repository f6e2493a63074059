//! Prefetch cache
//!
//! Maps track identifiers to resolved stream URLs so the next track can
//! start without a network round trip. Entries are write-once per key:
//! no eviction, no TTL. The cache lives as long as the session and is
//! cleared only on full teardown.

use std::collections::HashMap;

/// Write-once cache of resolved stream URLs, keyed by track identifier.
#[derive(Debug, Default)]
pub struct PrefetchCache {
    entries: HashMap<String, String>,
}

impl PrefetchCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a resolved URL.
    pub fn get(&self, track_id: &str) -> Option<String> {
        self.entries.get(track_id).cloned()
    }

    /// Check whether a track is already resolved.
    pub fn contains(&self, track_id: &str) -> bool {
        self.entries.contains_key(track_id)
    }

    /// Record a resolved URL. The first write for a key wins; later
    /// writes for the same key are ignored.
    pub fn insert(&mut self, track_id: String, url: String) {
        self.entries.entry(track_id).or_insert(url);
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries (session teardown only).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_then_hit() {
        let mut cache = PrefetchCache::new();
        assert!(cache.get("t1").is_none());

        cache.insert("t1".to_string(), "https://cdn.example.com/t1".to_string());
        assert_eq!(
            cache.get("t1").as_deref(),
            Some("https://cdn.example.com/t1")
        );
        assert!(cache.contains("t1"));
    }

    #[test]
    fn first_write_wins() {
        let mut cache = PrefetchCache::new();
        cache.insert("t1".to_string(), "first".to_string());
        cache.insert("t1".to_string(), "second".to_string());

        assert_eq!(cache.get("t1").as_deref(), Some("first"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_empties_cache() {
        let mut cache = PrefetchCache::new();
        cache.insert("t1".to_string(), "url".to_string());
        assert!(!cache.is_empty());

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("t1").is_none());
    }
}
