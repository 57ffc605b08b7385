//! Timeout wrapper for async operations.

use reqres_core::ReqResError;
use std::time::Duration;
use tracing::warn;

/// Wraps an async operation with a timeout.
///
/// Elapsing the deadline yields `ReqResError::Timeout`; the wrapped future is
/// dropped at that point.
pub async fn with_timeout<F, Fut, T>(duration: Duration, f: F) -> Result<T, ReqResError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, ReqResError>>,
{
    tokio::time::timeout(duration, f()).await.map_err(|_| {
        warn!("Operation timed out after {:?}", duration);
        ReqResError::Timeout(format!("Operation timed out after {:?}", duration))
    })?
}

/// Timeout configuration.
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Timeout for upstream directory calls.
    pub upstream_timeout: Duration,
}

impl TimeoutConfig {
    /// Creates a configuration from a number of seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            upstream_timeout: Duration::from_secs(secs),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_secs(10)
    }
}
