//! User listing controller.

use crate::{
    extractors::ListUsersQuery,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::State,
    routing::{delete, get},
    Router,
};
use reqres_service::{CacheInvalidationResponse, UserListResponse};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/cache", delete(invalidate_cache))
}

/// List one page of users.
///
/// An unreachable upstream or malformed upstream payload yields an empty
/// page with zero totals, not an error.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(
        ("page" = Option<u64>, Query, description = "Page number, at least 1"),
        ("per_page" = Option<u64>, Query, description = "Users per page, 1 to 100"),
        ("cache_ttl" = Option<u64>, Query, description = "Cache lifetime in seconds (at most 31536000); 0 bypasses the cache"),
        ("max_users" = Option<u64>, Query, description = "Maximum number of users shown")
    ),
    responses(
        (status = 200, description = "Page of users", body = UserListResponse),
        (status = 400, description = "Invalid query parameters", body = reqres_core::ErrorResponse),
        (status = 500, description = "An observer failed", body = reqres_core::ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    query: ListUsersQuery,
) -> ApiResult<UserListResponse> {
    let request = query.page_request(&state.listing);
    let cache_ttl_secs = query.cache_ttl_secs(&state.listing);
    debug!(
        "List users request: page={} per_page={} cache_ttl={}",
        request.page, request.per_page, cache_ttl_secs
    );

    let page = state
        .user_provider
        .list_users(request, cache_ttl_secs, query.options)
        .await?;
    ok(UserListResponse::from(page))
}

/// Drop every cached user page.
#[utoipa::path(
    delete,
    path = "/users/cache",
    tag = "users",
    responses(
        (status = 200, description = "Cache invalidated", body = CacheInvalidationResponse),
        (status = 503, description = "Cache backend unavailable", body = reqres_core::ErrorResponse)
    )
)]
pub async fn invalidate_cache(State(state): State<AppState>) -> ApiResult<CacheInvalidationResponse> {
    debug!("Invalidate user cache request");

    let invalidated = state.user_provider.invalidate_all().await?;
    ok(CacheInvalidationResponse { invalidated })
}
