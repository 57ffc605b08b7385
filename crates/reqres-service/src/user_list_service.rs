//! User list orchestration: cache lookup, fetch, validation, pipeline, store.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::mappers::decode_user_page;
use crate::pipeline::FilterPipeline;
use crate::source::UserSource;
use async_trait::async_trait;
use reqres_core::{Page, PageRequest, ReqResResult, User};
use reqres_plugin_api::{BlockConfig, PipelineContext};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Consumer surface of the user listing service.
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Returns one page of users.
    ///
    /// `cache_ttl_secs == 0` bypasses the cache entirely. Upstream and payload
    /// failures yield [`Page::empty`]; only observer failures are errors.
    async fn list_users(
        &self,
        request: PageRequest,
        cache_ttl_secs: u64,
        options: BlockConfig,
    ) -> ReqResResult<Page<User>>;

    /// Drops every cached page produced by this service.
    ///
    /// Returns the number of entries removed.
    async fn invalidate_all(&self) -> ReqResResult<u64>;

    /// Whether pages are served through an enabled cache backend.
    fn cache_enabled(&self) -> bool;
}

/// Read-through user list service.
pub struct UserListService {
    source: Arc<dyn UserSource>,
    cache: Arc<dyn CacheInterface>,
    pipeline: Arc<FilterPipeline>,
}

impl UserListService {
    /// Creates a new user list service.
    pub fn new(
        source: Arc<dyn UserSource>,
        cache: Arc<dyn CacheInterface>,
        pipeline: Arc<FilterPipeline>,
    ) -> Self {
        Self {
            source,
            cache,
            pipeline,
        }
    }

    /// Returns one page of users, consulting the cache when `cache_ttl_secs > 0`.
    pub async fn get_page(
        &self,
        request: PageRequest,
        cache_ttl_secs: u64,
        options: BlockConfig,
    ) -> ReqResResult<Page<User>> {
        let caching = cache_ttl_secs > 0 && self.cache.is_enabled();
        let key = cache_keys::user_list_page(request);

        if caching {
            if let Some(page) = self.cached(&key).await {
                return Ok(page);
            }
        }

        let body = match self.source.fetch(request).await {
            Ok(body) => body,
            Err(e) => {
                warn!(
                    "Fetching users page {} (per_page {}) failed: {}",
                    request.page, request.per_page, e
                );
                return Ok(Page::empty(request));
            }
        };

        let page = match decode_user_page(&body) {
            Ok(page) => page,
            Err(e) => {
                warn!("Discarding malformed users payload for page {}: {}", request.page, e);
                return Ok(Page::empty(request));
            }
        };

        let context = PipelineContext::new(
            request.page,
            request.per_page,
            page.total,
            page.total_pages,
            cache_ttl_secs,
            options,
        );
        let page = self.pipeline.run(page, context)?;

        if caching {
            self.store(&key, &page, cache_ttl_secs).await;
        }

        info!(
            "Listed {} users for page {} (total {})",
            page.len(),
            page.page,
            page.total
        );
        Ok(page)
    }

    async fn cached(&self, key: &str) -> Option<Page<User>> {
        match self.cache.get::<Page<User>>(key).await {
            Ok(Some(page)) => {
                debug!("Serving '{}' from cache", key);
                Some(page)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Cache lookup for '{}' failed, treating as miss: {}", key, e);
                None
            }
        }
    }

    async fn store(&self, key: &str, page: &Page<User>, ttl_secs: u64) {
        let tags = cache_keys::user_list_tags();
        if let Err(e) = self
            .cache
            .set(key, page, Duration::from_secs(ttl_secs), &tags)
            .await
        {
            warn!("Failed to cache '{}': {}", key, e);
        }
    }
}

#[async_trait]
impl UserProvider for UserListService {
    async fn list_users(
        &self,
        request: PageRequest,
        cache_ttl_secs: u64,
        options: BlockConfig,
    ) -> ReqResResult<Page<User>> {
        self.get_page(request, cache_ttl_secs, options).await
    }

    async fn invalidate_all(&self) -> ReqResResult<u64> {
        let removed = self
            .cache
            .invalidate_tags(&cache_keys::user_list_tags())
            .await?;
        info!("Invalidated {} cached user pages", removed);
        Ok(removed)
    }

    fn cache_enabled(&self) -> bool {
        self.cache.is_enabled()
    }
}

impl std::fmt::Debug for UserListService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserListService")
            .field("pipeline", &self.pipeline)
            .field("cache_enabled", &self.cache.is_enabled())
            .finish_non_exhaustive()
    }
}
