//! OpenAPI documentation configuration.

use reqres_core::{ErrorResponse, FieldError};
use reqres_service::{CacheInvalidationResponse, UserListResponse, UserResponse};
use utoipa::OpenApi;

/// OpenAPI documentation for the ReqRes user listing API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ReqRes Users API",
        version = "1.0.0",
        description = "Cached, filterable listing of the ReqRes user directory",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::invalidate_cache,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ErrorResponse,
            FieldError,
            UserResponse,
            UserListResponse,
            CacheInvalidationResponse,
            crate::controllers::health_controller::HealthResponse,
            crate::controllers::health_controller::ReadinessResponse,
        )
    ),
    tags(
        (name = "users", description = "User listing endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_endpoints() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/users"));
        assert!(paths.iter().any(|p| p.as_str() == "/users/cache"));
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
    }
}
