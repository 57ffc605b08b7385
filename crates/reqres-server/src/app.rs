//! Application builder.

use crate::startup::{print_startup_info, shutdown_signal};
use reqres_config::{AppConfig, CacheBackend, CacheConfig, FiltersConfig};
use reqres_core::{ReqResError, ReqResResult};
use reqres_plugin_api::Plugin;
use reqres_rest::{create_router, AppState};
use reqres_service::{
    CacheInterface, FilterPipeline, HttpUserSource, InMemoryCacheService, RedisCacheService,
    UserListService,
};
use reqres_user_filter_plugin::UserFilterPlugin;
use std::sync::Arc;
use tracing::info;

/// Builds the cache backend named by the configuration.
pub fn build_cache(config: &CacheConfig) -> ReqResResult<Arc<dyn CacheInterface>> {
    let cache: Arc<dyn CacheInterface> = match config.backend {
        CacheBackend::Memory => Arc::new(InMemoryCacheService::new()),
        CacheBackend::Redis => {
            let url = config.redis_url.as_deref().ok_or_else(|| {
                ReqResError::Configuration(
                    "cache.redis_url is required for the redis backend".to_string(),
                )
            })?;
            Arc::new(RedisCacheService::from_url(url, config.pool_size)?)
        }
        CacheBackend::Disabled => Arc::new(RedisCacheService::disabled()),
    };

    info!("Cache backend: {}", config.backend);
    Ok(cache)
}

/// Builds the observer pipeline, subscribing the bundled filter plugin when enabled.
#[must_use]
pub fn build_pipeline(config: &FiltersConfig) -> FilterPipeline {
    let mut pipeline = FilterPipeline::new();

    if config.enabled {
        let plugin = UserFilterPlugin::with_rules(
            config.blocked_domains.clone(),
            config.blocked_names.clone(),
        )
        .with_default_max_users(config.max_users);

        let descriptor = plugin.descriptor();
        info!("Enabling plugin {} v{}", descriptor.name, descriptor.version);
        pipeline.subscribe(&plugin);
    }

    pipeline
}

/// Builds the handler state: cache, upstream source, pipeline, and service.
pub fn build_state(config: &AppConfig) -> ReqResResult<AppState> {
    let cache = build_cache(&config.cache)?;
    let source = Arc::new(HttpUserSource::new(&config.upstream)?);
    let pipeline = Arc::new(build_pipeline(&config.filters));

    info!("Observer pipeline: {:?}", pipeline.observer_names());

    let service = UserListService::new(source, cache, pipeline);
    Ok(AppState::new(Arc::new(service), config.listing.clone()))
}

/// Application builder for constructing the server.
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the application and serves it until a shutdown signal arrives.
    pub async fn run(self) -> ReqResResult<()> {
        let config = self.config.unwrap_or_default();

        let state = build_state(&config)?;
        let router = create_router(state, &config.server);

        let addr = config.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| ReqResError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

        print_startup_info(&config);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ReqResError::Internal(format!("REST server error: {}", e)))?;

        info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_builder_with_config() {
        let builder = AppBuilder::new().with_config(AppConfig::default());
        assert!(builder.config.is_some());
        assert!(AppBuilder::default().config.is_none());
    }

    #[test]
    fn test_build_memory_cache() {
        let cache = build_cache(&CacheConfig::default()).unwrap();
        assert!(cache.is_enabled());
    }

    #[test]
    fn test_build_disabled_cache() {
        let config = CacheConfig {
            backend: CacheBackend::Disabled,
            ..Default::default()
        };
        assert!(!build_cache(&config).unwrap().is_enabled());
    }

    #[test]
    fn test_redis_cache_requires_url() {
        let config = CacheConfig {
            backend: CacheBackend::Redis,
            ..Default::default()
        };
        assert!(matches!(
            build_cache(&config),
            Err(ReqResError::Configuration(_))
        ));
    }

    #[test]
    fn test_pipeline_with_filters() {
        let pipeline = build_pipeline(&FiltersConfig::default());
        assert_eq!(
            pipeline.observer_names(),
            vec!["filter_by_email", "filter_by_name", "limit_users"]
        );
    }

    #[test]
    fn test_pipeline_without_filters() {
        let config = FiltersConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(build_pipeline(&config).is_empty());
    }

    #[test]
    fn test_build_state_uses_listing_defaults() {
        let mut config = AppConfig::default();
        config.listing.default_per_page = 10;
        let state = build_state(&config).unwrap();
        assert_eq!(state.listing.default_per_page, 10);
    }
}
