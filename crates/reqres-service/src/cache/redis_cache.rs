//! Redis-based cache implementation.

use super::{cache_keys, CacheInterface, MAX_TTL};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use reqres_core::{ReqResError, ReqResResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default TTL for cached items (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Redis-based cache service.
///
/// Values are stored with `SET EX`; each tag owns a Redis set listing the
/// keys stored under it, which `invalidate_tags` drains. A tag set expires
/// no earlier than its longest-lived member (`EXPIRE NX`/`GT`, Redis 7+).
pub struct RedisCacheService {
    /// Redis connection pool.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a Redis cache service from a URL.
    pub fn from_url(url: &str, pool_size: usize) -> ReqResResult<Self> {
        let mut cfg = deadpool_redis::Config::from_url(url);
        cfg.pool = Some(deadpool_redis::PoolConfig::new(pool_size));
        let pool = cfg
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .map_err(|e| ReqResError::Cache(format!("Failed to create Redis pool: {}", e)))?;
        Ok(Self::new(Arc::new(pool)))
    }

    /// Create a no-op cache service (for when caching is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> ReqResResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                ReqResError::Cache(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(ReqResError::Cache("Cache is disabled".to_string())),
        }
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> ReqResResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            ReqResError::Cache(format!("Failed to get key '{}': {}", key, e))
        })?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration, tags: &[String]) -> ReqResResult<()> {
        if !self.is_enabled() || ttl.is_zero() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.min(MAX_TTL).as_secs().max(1);

        let mut pipe = deadpool_redis::redis::pipe();
        pipe.atomic().set_ex(key, value, ttl_secs).ignore();
        for tag in tags {
            let index = cache_keys::tag_index(tag);
            pipe.sadd(&index, key).ignore();
            pipe.cmd("EXPIRE").arg(&index).arg(ttl_secs).arg("NX").ignore();
            pipe.cmd("EXPIRE").arg(&index).arg(ttl_secs).arg("GT").ignore();
        }

        let _: () = pipe.query_async(&mut conn).await.map_err(|e| {
            ReqResError::Cache(format!("Failed to set key '{}': {}", key, e))
        })?;

        debug!("Cached key '{}' with TTL {}s and tags {:?}", key, ttl_secs, tags);
        Ok(())
    }

    async fn delete(&self, key: &str) -> ReqResResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            ReqResError::Cache(format!("Failed to delete key '{}': {}", key, e))
        })?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn invalidate_tags(&self, tags: &[String]) -> ReqResResult<u64> {
        if !self.is_enabled() {
            return Ok(0);
        }

        let mut conn = self.get_conn().await?;
        let mut total: u64 = 0;

        for tag in tags {
            let index = cache_keys::tag_index(tag);
            let keys: Vec<String> = conn.smembers(&index).await.map_err(|e| {
                ReqResError::Cache(format!("Failed to read tag '{}': {}", tag, e))
            })?;

            if !keys.is_empty() {
                let deleted: i64 = conn.del(&keys).await.map_err(|e| {
                    ReqResError::Cache(format!("Failed to delete keys for tag '{}': {}", tag, e))
                })?;
                total += u64::try_from(deleted).unwrap_or(0);
            }

            let _: i64 = conn.del(&index).await.map_err(|e| {
                ReqResError::Cache(format!("Failed to delete tag index '{}': {}", index, e))
            })?;
        }

        debug!("Invalidated {} keys for tags {:?}", total, tags);
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_cache() {
        let cache = RedisCacheService::disabled();
        assert!(!cache.is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_cache_always_misses() {
        let cache = RedisCacheService::disabled();
        cache
            .set_raw("k", "v", DEFAULT_TTL, &["t".to_string()])
            .await
            .unwrap();
        assert!(cache.get_raw("k").await.unwrap().is_none());
        assert!(!cache.delete("k").await.unwrap());
        assert_eq!(cache.invalidate_tags(&["t".to_string()]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_from_url_builds_pool_lazily() {
        // Pool creation does not connect, so an unreachable host is fine here.
        let cache = RedisCacheService::from_url("redis://127.0.0.1:1", 2).unwrap();
        assert!(cache.is_enabled());
    }
}
