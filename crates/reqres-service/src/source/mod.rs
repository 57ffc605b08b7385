//! Fetch collaborator: retrieves raw user payloads from the upstream directory.

use async_trait::async_trait;
use reqres_config::UpstreamConfig;
use reqres_core::{PageRequest, ReqResError, ReqResResult};
use reqres_resilience::{with_timeout, TimeoutConfig};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const SERVICE_NAME: &str = "reqres";

/// Source of raw user list payloads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Fetches the raw payload for one page.
    ///
    /// Status codes are not interpreted: any response that yields a body is
    /// returned as bytes. Transport failures and timeouts are errors.
    async fn fetch(&self, request: PageRequest) -> ReqResResult<Vec<u8>>;
}

/// [`UserSource`] over HTTP.
pub struct HttpUserSource {
    client: Client,
    users_url: String,
    headers: HeaderMap,
    timeouts: TimeoutConfig,
}

impl HttpUserSource {
    /// Creates a source with its own HTTP client.
    pub fn new(config: &UpstreamConfig) -> ReqResResult<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(16)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| ReqResError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Self::with_client(client, config)
    }

    /// Creates a source sharing an existing HTTP client.
    pub fn with_client(client: Client, config: &UpstreamConfig) -> ReqResResult<Self> {
        let mut headers = HeaderMap::new();
        if !config.api_key.is_empty() {
            let name = HeaderName::from_bytes(config.api_key_header.as_bytes()).map_err(|e| {
                ReqResError::Configuration(format!(
                    "Invalid API key header '{}': {}",
                    config.api_key_header, e
                ))
            })?;
            let value = HeaderValue::from_str(&config.api_key).map_err(|e| {
                ReqResError::Configuration(format!("Invalid API key value: {}", e))
            })?;
            headers.insert(name, value);
        }

        Ok(Self {
            client,
            users_url: config.users_url(),
            headers,
            timeouts: TimeoutConfig::from_secs(config.timeout_secs),
        })
    }

    /// The endpoint this source queries.
    #[must_use]
    pub fn users_url(&self) -> &str {
        &self.users_url
    }
}

#[async_trait]
impl UserSource for HttpUserSource {
    async fn fetch(&self, request: PageRequest) -> ReqResResult<Vec<u8>> {
        debug!(
            "GET {} page={} per_page={}",
            self.users_url, request.page, request.per_page
        );

        with_timeout(self.timeouts.upstream_timeout, || async {
            let response = self
                .client
                .get(&self.users_url)
                .query(&[("page", request.page), ("per_page", request.per_page)])
                .headers(self.headers.clone())
                .send()
                .await
                .map_err(|e| ReqResError::external(SERVICE_NAME, e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                debug!("Upstream answered {} for page {}", status, request.page);
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| ReqResError::external(SERVICE_NAME, e.to_string()))?;

            Ok(body.to_vec())
        })
        .await
    }
}

impl std::fmt::Debug for HttpUserSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpUserSource")
            .field("users_url", &self.users_url)
            .field("timeout", &self.timeouts.upstream_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> UpstreamConfig {
        UpstreamConfig {
            base_url: format!("{}/api", server.uri()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_sends_query_and_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "6"))
            .and(header("x-api-key", "reqres-free-v1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
            .expect(1)
            .mount(&server)
            .await;

        let source = HttpUserSource::new(&config_for(&server)).unwrap();
        let body = source.fetch(PageRequest::new(2, 6)).await.unwrap();
        assert_eq!(body, b"{\"ok\":true}".to_vec());
    }

    #[tokio::test]
    async fn test_error_status_still_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let source = HttpUserSource::new(&config_for(&server)).unwrap();
        let body = source.fetch(PageRequest::first()).await.unwrap();
        assert_eq!(body, b"unavailable".to_vec());
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.timeout_secs = 1;
        let source = HttpUserSource::new(&config).unwrap();

        let err = source.fetch(PageRequest::first()).await.unwrap_err();
        assert!(matches!(err, ReqResError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_external_error() {
        let config = UpstreamConfig {
            base_url: "http://127.0.0.1:1/api".to_string(),
            ..Default::default()
        };
        let source = HttpUserSource::new(&config).unwrap();
        let err = source.fetch(PageRequest::first()).await.unwrap_err();
        assert!(matches!(err, ReqResError::ExternalService { .. }));
        assert!(err.is_retriable());
    }

    #[test]
    fn test_invalid_header_name_rejected() {
        let config = UpstreamConfig {
            api_key_header: "bad header".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpUserSource::new(&config),
            Err(ReqResError::Configuration(_))
        ));
    }

    #[test]
    fn test_users_url() {
        let source = HttpUserSource::new(&UpstreamConfig::default()).unwrap();
        assert_eq!(source.users_url(), "https://reqres.in/api/users");
    }
}
