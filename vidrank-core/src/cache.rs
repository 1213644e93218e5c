// Caller-owned TTL cache for memoizing analysis results.
//
// Nothing in the scoring or classification engine needs a cache; this exists so
// callers that re-analyse the same batch can keep results without module-level
// state. Keys are usually produced by `batch_fingerprint`.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use crate::types::MetricItem;

#[derive(Debug)]
struct Entry<V> {
    value: V,
    inserted: Instant,
    ttl: Duration,
}

impl<V> Entry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.inserted) >= self.ttl
    }
}

/// Hit/miss counters since construction or the last [`TtlCache::clear`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Map whose entries expire once their age reaches their TTL.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: HashMap<K, Entry<V>>,
    hits: u64,
    misses: u64,
}

impl<K, V> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: Hash + Eq, V: Clone> TtlCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live value for `key`. An expired entry is dropped and counts as a miss.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = Instant::now();
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                self.hits += 1;
                Some(entry.value.clone())
            }
            Some(_) => {
                self.entries.remove(key);
                self.misses += 1;
                None
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insert or replace, restarting the entry's clock.
    pub fn put(&mut self, key: K, value: V, ttl: Duration) {
        self.entries.insert(
            key,
            Entry {
                value,
                inserted: Instant::now(),
                ttl,
            },
        );
    }

    /// Drop one entry. Returns whether it was present.
    pub fn invalidate(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Remove every expired entry, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before - self.entries.len()
    }

    /// Stored entries, including expired ones not yet cleaned up.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

/// Deterministic key for a batch plus whatever parameters shaped the result.
pub fn batch_fingerprint(items: &[MetricItem], params: &impl Hash) -> u64 {
    let mut hasher = DefaultHasher::new();
    items.len().hash(&mut hasher);
    for item in items {
        item.id.hash(&mut hasher);
        item.title.hash(&mut hasher);
        item.description.hash(&mut hasher);
        item.view_count.hash(&mut hasher);
        item.like_count.hash(&mut hasher);
        item.comment_count.hash(&mut hasher);
        item.duration_seconds.hash(&mut hasher);
        item.published_at.hash(&mut hasher);
    }
    params.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn put_then_get() {
        let mut cache = TtlCache::new();
        cache.put("k", 42, HOUR);
        assert_eq!(cache.get(&"k"), Some(42));
        assert_eq!(cache.get(&"missing"), None);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let mut cache = TtlCache::new();
        cache.put("k", 1, Duration::ZERO);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"k"), None);
        assert!(cache.is_empty(), "expired entry is dropped on access");
    }

    #[test]
    fn cleanup_drops_only_expired() {
        let mut cache = TtlCache::new();
        cache.put("stale", 1, Duration::ZERO);
        cache.put("fresh", 2, HOUR);
        assert_eq!(cache.cleanup_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"fresh"), Some(2));
    }

    #[test]
    fn invalidate_and_clear() {
        let mut cache = TtlCache::new();
        cache.put(1u64, "a", HOUR);
        cache.put(2u64, "b", HOUR);
        assert!(cache.invalidate(&1));
        assert!(!cache.invalidate(&1));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn put_replaces_value() {
        let mut cache = TtlCache::new();
        cache.put("k", 1, HOUR);
        cache.put("k", 2, HOUR);
        assert_eq!(cache.get(&"k"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn fingerprint_deterministic_and_sensitive() {
        let a = vec![MetricItem::new("a", 10, 1, 0)];
        let b = vec![MetricItem::new("a", 11, 1, 0)];
        assert_eq!(batch_fingerprint(&a, &"top"), batch_fingerprint(&a, &"top"));
        assert_ne!(batch_fingerprint(&a, &"top"), batch_fingerprint(&b, &"top"));
        assert_ne!(batch_fingerprint(&a, &"top"), batch_fingerprint(&a, &"bottom"));
    }
}
