//! Application configuration structures.

use reqres_core::telemetry::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream user directory configuration.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Listing defaults (page size, cache lifetime).
    #[serde(default)]
    pub listing: ListingConfig,

    /// Result cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Bundled user filter configuration.
    #[serde(default)]
    pub filters: FiltersConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: LoggingConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "reqres-users".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Enable CORS.
    pub cors_enabled: bool,
    /// CORS allowed origins.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            cors_enabled: true,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    /// Returns the bind address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the request timeout as a Duration.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Upstream user directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the directory API.
    pub base_url: String,
    /// Path of the paginated users endpoint.
    pub users_endpoint: String,
    /// Header carrying the API key.
    pub api_key_header: String,
    /// API key value.
    pub api_key: String,
    /// Fetch timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://reqres.in/api".to_string(),
            users_endpoint: "/users".to_string(),
            api_key_header: "x-api-key".to_string(),
            api_key: "reqres-free-v1".to_string(),
            timeout_secs: 10,
        }
    }
}

impl UpstreamConfig {
    /// Returns the fetch timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the full users endpoint URL.
    #[must_use]
    pub fn users_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.users_endpoint)
    }
}

/// Listing defaults used when a caller does not specify them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Default page number.
    pub default_page: u64,
    /// Default number of users per page.
    pub default_per_page: u64,
    /// Cache lifetime in seconds; 0 disables caching.
    pub cache_ttl_secs: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_per_page: 6,
            cache_ttl_secs: 300, // 5 minutes
        }
    }
}

/// Cache backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Process-local cache.
    #[default]
    Memory,
    /// Shared Redis cache.
    Redis,
    /// No caching at all.
    Disabled,
}

impl std::fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Redis => write!(f, "redis"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// Result cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Which backend stores cached pages.
    pub backend: CacheBackend,
    /// Redis URL (required when `backend = "redis"`).
    pub redis_url: Option<String>,
    /// Redis connection pool size.
    pub pool_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            redis_url: None,
            pool_size: 10,
        }
    }
}

/// Bundled user filter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersConfig {
    /// Register the bundled filter plugin.
    pub enabled: bool,
    /// E-mail suffixes whose users are dropped.
    pub blocked_domains: Vec<String>,
    /// Full names whose users are dropped.
    pub blocked_names: Vec<String>,
    /// Default maximum number of users shown, when the caller gives none.
    pub max_users: Option<u64>,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            blocked_domains: vec!["@exclude.com".to_string(), "@spam.net".to_string()],
            blocked_names: vec!["Admin".to_string(), "Test User".to_string()],
            max_users: None,
        }
    }
}
