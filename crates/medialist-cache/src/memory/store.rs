//! In-memory cache implementation using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;

use medialist_core::config::cache::MemoryCacheConfig;
use medialist_core::result::AppResult;
use medialist_core::traits::cache::CacheProvider;

/// A cached value together with its requested lifetime.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expiry policy that honours the per-entry TTL recorded in [`Entry`].
///
/// Session entries must expire exactly with their access token, so a
/// cache-wide TTL is not enough here.
struct PerEntryExpiry;

impl Expiry<String, Entry> for PerEntryExpiry {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-memory cache provider using moka.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, Entry>,
    /// Default TTL for entries.
    default_ttl: Duration,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryExpiry)
            .build();

        Self {
            cache,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.cache
            .insert(
                key.to_string(),
                Entry {
                    value: value.to_string(),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        // Re-insert with the new TTL if the key is still live.
        if let Some(entry) = self.cache.get(key).await {
            self.cache
                .insert(
                    key.to_string(),
                    Entry {
                        value: entry.value,
                        ttl,
                    },
                )
                .await;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn flush_all(&self) -> AppResult<()> {
        self.cache.invalidate_all();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_provider() -> MemoryCacheProvider {
        let config = MemoryCacheConfig {
            max_capacity: 1000,
            time_to_live_seconds: 60,
        };
        MemoryCacheProvider::new(&config, 60)
    }

    #[tokio::test]
    async fn test_set_get() {
        let provider = make_provider();
        provider
            .set("key1", "value1", Duration::from_secs(60))
            .await
            .unwrap();
        let val = provider.get("key1").await.unwrap();
        assert_eq!(val, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let provider = make_provider();
        provider
            .set("key2", "value2", Duration::from_secs(60))
            .await
            .unwrap();
        provider.delete("key2").await.unwrap();
        let val = provider.get("key2").await.unwrap();
        assert_eq!(val, None);
    }

    #[tokio::test]
    async fn test_miss_is_plain_absence() {
        let provider = make_provider();
        // A key that never existed reads exactly like an expired one.
        let val = provider.get("nothing-here").await.unwrap();
        assert_eq!(val, None);
        assert!(!provider.exists("nothing-here").await.unwrap());
    }

    #[tokio::test]
    async fn test_per_entry_ttl_expires() {
        let provider = make_provider();
        provider
            .set("short", "lived", Duration::from_millis(20))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        let val = provider.get("short").await.unwrap();
        assert_eq!(val, None);
    }

    #[tokio::test]
    async fn test_expire_refreshes_ttl() {
        let provider = make_provider();
        provider
            .set("key3", "value3", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(provider.expire("key3", Duration::from_secs(1)).await.unwrap());
        assert!(!provider.expire("absent", Duration::from_secs(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_flush_all() {
        let provider = make_provider();
        provider.set_default("a", "1").await.unwrap();
        provider.set_default("b", "2").await.unwrap();
        provider.flush_all().await.unwrap();
        assert_eq!(provider.get("a").await.unwrap(), None);
        assert_eq!(provider.get("b").await.unwrap(), None);
    }
}
