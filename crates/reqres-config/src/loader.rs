//! Configuration loader with layered sources.

use crate::{AppConfig, CacheBackend};
use config::{Config, ConfigError, Environment, File};
use reqres_core::ReqResError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `REQRES_` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, ReqResError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, ReqResError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), ReqResError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, ReqResError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("REQRES_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("REQRES")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_reqres_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_reqres_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }
}

/// Validates the configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), ReqResError> {
    if config.upstream.base_url.trim().is_empty() {
        return Err(ReqResError::Configuration(
            "Upstream base URL is required".to_string(),
        ));
    }

    url::Url::parse(&config.upstream.users_url()).map_err(|e| {
        ReqResError::Configuration(format!(
            "Invalid upstream URL '{}': {}",
            config.upstream.users_url(),
            e
        ))
    })?;

    if config.upstream.timeout_secs == 0 {
        return Err(ReqResError::Configuration(
            "Upstream timeout must be greater than zero".to_string(),
        ));
    }

    if config.listing.default_per_page == 0 {
        return Err(ReqResError::Configuration(
            "Default page size must be greater than zero".to_string(),
        ));
    }

    if config.cache.backend == CacheBackend::Redis && config.cache.redis_url.is_none() {
        return Err(ReqResError::Configuration(
            "Redis URL is required when the Redis cache backend is selected".to_string(),
        ));
    }

    if config.cache.backend == CacheBackend::Disabled && config.listing.cache_ttl_secs > 0 {
        warn!("Cache backend is disabled; listing.cache_ttl_secs has no effect");
    }

    Ok(())
}

fn config_error_to_reqres_error(err: ConfigError) -> ReqResError {
    ReqResError::Configuration(err.to_string())
}
