use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct Entry<V> {
    inserted_at: Instant,
    value: V,
}

/// In-process TTL cache for read-through lookups (contact-by-email).
/// Expired entries answer as misses and are swept on the next insert.
pub struct TtlCache<V> {
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.inserted_at.elapsed() > self.ttl {
            return None;
        }
        Some(entry.value.clone())
    }

    pub async fn insert(&self, key: String, value: V) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, e| e.inserted_at.elapsed() <= self.ttl);
        entries.insert(
            key,
            Entry {
                inserted_at: Instant::now(),
                value,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hit_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(600));
        cache.insert("ghl:contact:a@b.co".to_string(), 7u32).await;
        assert_eq!(cache.get("ghl:contact:a@b.co").await, Some(7));
        assert_eq!(cache.get("ghl:contact:x@y.co").await, None);
    }

    #[tokio::test]
    async fn expired_entry_is_a_miss() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.insert("k".to_string(), 1u32).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn insert_overwrites() {
        let cache = TtlCache::new(Duration::from_secs(600));
        cache.insert("k".to_string(), 1u32).await;
        cache.insert("k".to_string(), 2u32).await;
        assert_eq!(cache.get("k").await, Some(2));
    }
}
