//! Process-local cache implementation.

use super::{CacheInterface, MAX_TTL};
use async_trait::async_trait;
use parking_lot::RwLock;
use reqres_core::ReqResResult;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
    tags: Vec<String>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// In-memory cache service.
///
/// Entries expire lazily: an expired entry is dropped when it is read, on
/// every write, or when [`InMemoryCacheService::purge_expired`] runs.
/// Lifetimes are capped at [`MAX_TTL`].
#[derive(Debug, Default)]
pub struct InMemoryCacheService {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCacheService {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet dropped.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every expired entry. Returns the number dropped.
    pub fn purge_expired(&self) -> usize {
        sweep(&mut self.entries.write(), Instant::now())
    }
}

fn sweep(entries: &mut HashMap<String, CacheEntry>, now: Instant) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| !entry.is_expired(now));
    let purged = before - entries.len();
    if purged > 0 {
        debug!("Purged {} expired cache entries", purged);
    }
    purged
}

#[async_trait]
impl CacheInterface for InMemoryCacheService {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> ReqResResult<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => {
                    debug!("Cache hit for key '{}'", key);
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {}
                None => {
                    debug!("Cache miss for key '{}'", key);
                    return Ok(None);
                }
            }
        }

        // Re-check under the write lock; a writer may have refreshed the entry.
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
            debug!("Cache entry for key '{}' expired", key);
            return Ok(None);
        }
        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration, tags: &[String]) -> ReqResResult<()> {
        if ttl.is_zero() {
            debug!("Skipping cache write for key '{}' with zero TTL", key);
            return Ok(());
        }

        let now = Instant::now();
        let entry = CacheEntry {
            value: value.to_string(),
            expires_at: now + ttl.min(MAX_TTL),
            tags: tags.to_vec(),
        };

        let mut entries = self.entries.write();
        sweep(&mut entries, now);
        entries.insert(key.to_string(), entry);

        debug!("Cached key '{}' with TTL {}s", key, ttl.as_secs());
        Ok(())
    }

    async fn delete(&self, key: &str) -> ReqResResult<bool> {
        let deleted = self.entries.write().remove(key).is_some();
        debug!("Deleted key '{}': {}", key, deleted);
        Ok(deleted)
    }

    async fn invalidate_tags(&self, tags: &[String]) -> ReqResResult<u64> {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.tags.iter().any(|tag| tags.contains(tag)));
        let deleted = (before - entries.len()) as u64;

        debug!("Invalidated {} entries for tags {:?}", deleted, tags);
        Ok(deleted)
    }
}
