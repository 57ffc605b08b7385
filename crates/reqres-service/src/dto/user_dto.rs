//! User listing DTOs.

use reqres_core::{Page, User};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user as presented to API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub avatar_url: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id(),
            full_name: user.full_name(),
            email: user.email().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            avatar_url: user.avatar_url().to_string(),
        }
    }
}

/// One page of users with the totals reported upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
    pub users: Vec<UserResponse>,
}

impl From<Page<User>> for UserListResponse {
    fn from(page: Page<User>) -> Self {
        Self {
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            total_pages: page.total_pages,
            users: page.records.into_iter().map(UserResponse::from).collect(),
        }
    }
}

/// Outcome of a bulk cache invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CacheInvalidationResponse {
    /// Number of cached pages removed.
    pub invalidated: u64,
}
