//! Listing query extractor.
//!
//! `page`, `per_page` and `cache_ttl` are typed and validated; every other
//! query parameter is forwarded to the observer pipeline as a caller option.

use crate::responses::ApiResponse;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use reqres_config::ListingConfig;
use reqres_core::{field_errors, ErrorResponse, FieldError, PageRequest};
use reqres_plugin_api::BlockConfig;
use serde_json::Value;
use std::collections::HashMap;
use validator::{Validate, ValidationErrors};

/// Query parameters of the user listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ListUsersQuery {
    /// Page number (1-indexed).
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u64>,
    /// Users per page.
    #[validate(range(min = 1, max = 100, message = "per_page must be between 1 and 100"))]
    pub per_page: Option<u64>,
    /// Cache lifetime in seconds; 0 bypasses the cache. At most one year.
    #[validate(range(max = 31536000, message = "cache_ttl must be at most 31536000 seconds"))]
    pub cache_ttl: Option<u64>,
    /// Remaining parameters, e.g. `max_users`.
    pub options: BlockConfig,
}

impl ListUsersQuery {
    const RESERVED: [&'static str; 3] = ["page", "per_page", "cache_ttl"];

    /// Builds the query from raw parameters.
    pub fn from_params(params: HashMap<String, String>) -> Result<Self, ListUsersQueryRejection> {
        let mut invalid = Vec::new();
        let mut number = |key: &str| -> Option<u64> {
            let raw = params.get(key)?;
            match raw.trim().parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    invalid.push(FieldError {
                        field: key.to_string(),
                        message: format!("{} must be a non-negative integer", key),
                        code: "invalid_number".to_string(),
                    });
                    None
                }
            }
        };

        let page = number("page");
        let per_page = number("per_page");
        let cache_ttl = number("cache_ttl");

        if !invalid.is_empty() {
            return Err(ListUsersQueryRejection::Invalid(invalid));
        }

        let options = params
            .into_iter()
            .filter(|(key, _)| !Self::RESERVED.contains(&key.as_str()))
            .map(|(key, value)| (key, Value::String(value)))
            .collect();

        let query = Self {
            page,
            per_page,
            cache_ttl,
            options,
        };
        query
            .validate()
            .map_err(ListUsersQueryRejection::Validation)?;
        Ok(query)
    }

    /// Resolves the page request, filling gaps from the listing defaults.
    #[must_use]
    pub fn page_request(&self, defaults: &ListingConfig) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(defaults.default_page),
            self.per_page.unwrap_or(defaults.default_per_page),
        )
    }

    /// Resolves the cache lifetime, falling back to the listing default.
    #[must_use]
    pub fn cache_ttl_secs(&self, defaults: &ListingConfig) -> u64 {
        self.cache_ttl.unwrap_or(defaults.cache_ttl_secs)
    }
}

/// Rejection for an unusable listing query.
#[derive(Debug)]
pub enum ListUsersQueryRejection {
    /// The query string could not be decoded, or a number did not parse.
    Invalid(Vec<FieldError>),
    /// A value is out of range.
    Validation(ValidationErrors),
}

impl IntoResponse for ListUsersQueryRejection {
    fn into_response(self) -> Response {
        let details = match self {
            Self::Invalid(details) => details,
            Self::Validation(errors) => field_errors(&errors),
        };
        let error_response = ErrorResponse {
            code: "VALIDATION_ERROR".to_string(),
            message: "Invalid query parameters".to_string(),
            details: Some(details),
        };
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(error_response)),
        )
            .into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ListUsersQuery
where
    S: Send + Sync,
{
    type Rejection = ListUsersQueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ListUsersQueryRejection::Invalid(vec![FieldError {
                    field: "query".to_string(),
                    message: rejection.body_text(),
                    code: "invalid_query".to_string(),
                }])
            })?;
        Self::from_params(params)
    }
}
