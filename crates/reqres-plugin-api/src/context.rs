//! Read-only metadata handed to observers alongside the user list.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied options, e.g. the settings of the block rendering the list.
pub type BlockConfig = Map<String, Value>;

/// Pagination and request metadata for one pipeline run.
///
/// Observers receive it by shared reference only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineContext {
    page: u64,
    per_page: u64,
    total: u64,
    total_pages: u64,
    cache_ttl_secs: u64,
    block_config: BlockConfig,
}

impl PipelineContext {
    /// Creates a new context.
    #[must_use]
    pub fn new(
        page: u64,
        per_page: u64,
        total: u64,
        total_pages: u64,
        cache_ttl_secs: u64,
        block_config: BlockConfig,
    ) -> Self {
        Self {
            page,
            per_page,
            total,
            total_pages,
            cache_ttl_secs,
            block_config,
        }
    }

    /// The requested page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// The requested page size.
    #[must_use]
    pub const fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Total number of users reported upstream.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Total number of pages reported upstream.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Cache lifetime requested by the caller; 0 means uncached.
    #[must_use]
    pub const fn cache_ttl_secs(&self) -> u64 {
        self.cache_ttl_secs
    }

    /// All caller-supplied options.
    #[must_use]
    pub fn block_config(&self) -> &BlockConfig {
        &self.block_config
    }

    /// Raw caller option by key.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.block_config.get(key)
    }

    /// Typed caller option by key. Returns `None` if absent or of another type.
    #[must_use]
    pub fn option<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.value(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Caller option as an unsigned integer; accepts numbers and numeric strings.
    #[must_use]
    pub fn option_u64(&self, key: &str) -> Option<u64> {
        match self.value(key)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
