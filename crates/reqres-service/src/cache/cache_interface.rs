//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use reqres_core::ReqResResult;
use std::time::Duration;

/// Longest lifetime a backend grants an entry (one year). Longer TTLs are capped.
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Cache interface for storing and retrieving cached data.
///
/// Values are JSON strings so the trait stays dyn-compatible. Individual
/// `get_raw`/`set_raw` calls are atomic per key; nothing spans a lookup
/// followed by a store, so two concurrent writers simply race and the later
/// write wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheInterface: Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> ReqResResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL and invalidation tags.
    ///
    /// Overwrites any existing entry at `key`.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration, tags: &[String]) -> ReqResResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> ReqResResult<bool>;

    /// Delete every entry carrying any of the given tags.
    ///
    /// Returns the number of entries deleted.
    async fn invalidate_tags(&self, tags: &[String]) -> ReqResResult<u64>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
///
/// This trait provides generic get/set methods that work with any serializable type.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> ReqResResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
        tags: &[String],
    ) -> ReqResResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl, tags).await
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}
