//! Application state for Axum handlers.

use reqres_config::ListingConfig;
use reqres_service::UserProvider;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_provider: Arc<dyn UserProvider>,
    /// Defaults applied when a request omits pagination or cache lifetime.
    pub listing: ListingConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(user_provider: Arc<dyn UserProvider>, listing: ListingConfig) -> Self {
        Self {
            user_provider,
            listing,
        }
    }
}
