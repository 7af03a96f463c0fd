//! Process-wide TTL cache for resolved photo URIs.
//!
//! Google-hosted photo URIs stay valid for hours, and clients re-request the
//! same photo at the same dimensions constantly (list → detail → share). One
//! lookup per `(name, width, height)` per TTL window keeps the photo
//! endpoint cheap. Reads check freshness before reuse; every successful
//! lookup rewrites the entry with a fresh timestamp. No invalidation
//! protocol exists or is needed.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

const DEFAULT_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Cache key: photo resource name plus the requested dimensions.
pub type PhotoKey = (String, u32, Option<u32>);

#[derive(Debug, Clone)]
struct CachedUri {
    uri: String,
    stored_at: Instant,
}

#[derive(Debug, Clone)]
pub struct PhotoUriCache {
    ttl: Duration,
    entries: Arc<Mutex<HashMap<PhotoKey, CachedUri>>>,
}

impl PhotoUriCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the cached URI if present and fresh; evicts stale entries.
    pub async fn get(&self, key: &PhotoKey) -> Option<String> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.uri.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores a URI, refreshing the timestamp on overwrite.
    pub async fn insert(&self, key: PhotoKey, uri: String) {
        self.entries.lock().await.insert(
            key,
            CachedUri {
                uri,
                stored_at: Instant::now(),
            },
        );
    }
}

impl Default for PhotoUriCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> PhotoKey {
        ("places/p1/photos/ph1".to_owned(), 1200, Some(800))
    }

    #[tokio::test]
    async fn fresh_entries_are_returned() {
        let cache = PhotoUriCache::new();
        cache.insert(key(), "https://example.com/a".to_owned()).await;
        assert_eq!(
            cache.get(&key()).await.as_deref(),
            Some("https://example.com/a")
        );
    }

    #[tokio::test]
    async fn expired_entries_are_evicted() {
        let cache = PhotoUriCache::with_ttl(Duration::ZERO);
        cache.insert(key(), "https://example.com/a".to_owned()).await;
        assert_eq!(cache.get(&key()).await, None);
        // A second read still misses: the stale entry was removed.
        assert_eq!(cache.get(&key()).await, None);
    }

    #[tokio::test]
    async fn dimensions_are_part_of_the_key() {
        let cache = PhotoUriCache::new();
        cache.insert(key(), "https://example.com/a".to_owned()).await;
        let other = ("places/p1/photos/ph1".to_owned(), 640, Some(800));
        assert_eq!(cache.get(&other).await, None);
    }

    #[tokio::test]
    async fn insert_overwrites_existing_entries() {
        let cache = PhotoUriCache::new();
        cache.insert(key(), "https://example.com/a".to_owned()).await;
        cache.insert(key(), "https://example.com/b".to_owned()).await;
        assert_eq!(
            cache.get(&key()).await.as_deref(),
            Some("https://example.com/b")
        );
    }
}
