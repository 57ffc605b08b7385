//! Caching infrastructure for the service layer.
//!
//! This module provides a cache abstraction with in-memory and Redis
//! implementations. Entries carry tags so that related entries can be
//! invalidated together.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface, MAX_TTL};
#[cfg(test)]
pub use cache_interface::MockCacheInterface;
pub use memory_cache::InMemoryCacheService;
pub use redis_cache::{RedisCacheService, DEFAULT_TTL};
