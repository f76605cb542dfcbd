//! wotatokens API adapter.
//!
//! Implements the `CodeRegistry` port over the remote REST API using
//! `reqwest`. Each call is sent once; there is no retry and no caching.
//!
//! # Configuration
//!
//! ```ignore
//! let config = WotatokensConfig::new(api_key);
//! let registry = HttpCodeRegistry::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Method, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::access_code::{AccessCode, CodeCatalog, CodeDetail, NewCode};
use crate::ports::{CodeRegistry, RegistryError};

use super::wire::{
    ApiEnvelope, CreateCodeBody, DeleteCodeBody, UpdateCodeBody, WireCatalog, WireCode,
    WireDetail,
};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://v2.jkt48connect.com/api/wotatokens";

/// wotatokens API configuration.
#[derive(Clone)]
pub struct WotatokensConfig {
    /// Shared API key, sent as the `apikey` query parameter.
    api_key: SecretString,

    /// Base URL of the API (default: [`DEFAULT_BASE_URL`]).
    api_base_url: String,
}

impl WotatokensConfig {
    /// Create a configuration for the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom API base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.api_base_url
    }
}

impl std::fmt::Debug for WotatokensConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WotatokensConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// HTTP implementation of `CodeRegistry`.
pub struct HttpCodeRegistry {
    config: WotatokensConfig,
    http_client: reqwest::Client,
}

impl HttpCodeRegistry {
    /// Create a new adapter with the given configuration.
    pub fn new(config: WotatokensConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Build an endpoint URL from the base URL plus path segments.
    /// Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RegistryError> {
        let mut url = Url::parse(&self.config.api_base_url).map_err(|e| {
            RegistryError::network(format!(
                "Invalid base URL '{}': {}",
                self.config.api_base_url, e
            ))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                RegistryError::network(format!(
                    "Base URL '{}' cannot carry a path",
                    self.config.api_base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Send one request and unwrap the response envelope.
    ///
    /// Returns the envelope's `data` when `status` is true.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, &str)],
        body: Option<&B>,
        operation: &'static str,
    ) -> Result<Option<Value>, RegistryError> {
        tracing::debug!(operation, method = %method, path = url.path(), "Calling code service");

        let mut request = self
            .http_client
            .request(method, url)
            .query(&[("apikey", self.config.api_key.expose_secret().as_str())])
            .query(query);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Code service request failed");
            RegistryError::network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(operation, status = status.as_u16(), body = %body, "Code service returned error status");
            return Err(RegistryError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ApiEnvelope = response.json().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Failed to parse code service response");
            RegistryError::decode(e.to_string())
        })?;

        if !envelope.status {
            tracing::warn!(
                operation,
                message = envelope.message.as_deref().unwrap_or(""),
                "Code service rejected request"
            );
            return Err(RegistryError::rejected(envelope.message));
        }

        Ok(envelope.data)
    }
}

/// Decode the envelope's `data` into a wire type.
fn decode_data<T: DeserializeOwned>(data: Option<Value>) -> Result<T, RegistryError> {
    let data = data.ok_or_else(|| RegistryError::decode("response has no data"))?;
    serde_json::from_value(data).map_err(|e| RegistryError::decode(e.to_string()))
}

#[async_trait]
impl CodeRegistry for HttpCodeRegistry {
    async fn create(&self, request: &NewCode) -> Result<AccessCode, RegistryError> {
        let url = self.endpoint(&["create"])?;
        let body = CreateCodeBody::from(request);

        let data = self
            .send(Method::POST, url, &[], Some(&body), "create")
            .await?;
        let code: WireCode = decode_data(data)?;

        tracing::info!(code = %code.code, email = %request.email, "Access code created");
        Ok(code.into())
    }

    async fn list(&self) -> Result<CodeCatalog, RegistryError> {
        let url = self.endpoint(&["all"])?;

        let data = self
            .send::<()>(Method::GET, url, &[], None, "list")
            .await?;
        let catalog: WireCatalog = decode_data(data)?;

        Ok(catalog.into())
    }

    async fn detail(&self, code: &str, email: &str) -> Result<CodeDetail, RegistryError> {
        let url = self.endpoint(&["detail", code])?;

        let data = self
            .send::<()>(Method::GET, url, &[("email", email)], None, "detail")
            .await?;
        let detail: WireDetail = decode_data(data)?;

        Ok(detail.into())
    }

    async fn set_active(
        &self,
        code: &str,
        email: &str,
        is_active: bool,
        metadata: Option<&Map<String, Value>>,
    ) -> Result<(), RegistryError> {
        let url = self.endpoint(&["update", code])?;
        let body = UpdateCodeBody {
            email,
            is_active,
            metadata,
        };

        self.send(Method::PUT, url, &[], Some(&body), "update")
            .await?;

        tracing::info!(code = %code, is_active, "Access code status updated");
        Ok(())
    }

    async fn delete(&self, code: &str, email: &str) -> Result<(), RegistryError> {
        let url = self.endpoint(&["delete", code])?;
        let body = DeleteCodeBody { email };

        self.send(Method::DELETE, url, &[], Some(&body), "delete")
            .await?;

        tracing::info!(code = %code, "Access code deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access_code::CodeDraft;
    use crate::domain::foundation::Timestamp;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const API_KEY: &str = "test-key";

    fn registry_for(server: &MockServer) -> HttpCodeRegistry {
        HttpCodeRegistry::new(WotatokensConfig::new(API_KEY).with_base_url(server.uri()))
    }

    fn new_code() -> NewCode {
        CodeDraft::new(" fan@example.com ", "Theater show")
            .validate(Timestamp::parse_lenient("2024-01-15T10:00:00Z").unwrap())
            .unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn config_defaults_to_public_endpoint() {
        let config = WotatokensConfig::new("k");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn config_debug_redacts_api_key() {
        let config = WotatokensConfig::new("super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn endpoint_appends_and_encodes_segments() {
        let registry = HttpCodeRegistry::new(
            WotatokensConfig::new("k").with_base_url("https://api.example.com/api/wotatokens/"),
        );

        let url = registry.endpoint(&["detail", "AB/12 3"]).unwrap();
        assert_eq!(url.path(), "/api/wotatokens/detail/AB%2F12%203");
    }

    #[test]
    fn endpoint_rejects_invalid_base_url() {
        let registry =
            HttpCodeRegistry::new(WotatokensConfig::new("k").with_base_url("not a url"));
        assert!(matches!(
            registry.endpoint(&["all"]),
            Err(RegistryError::Network(_))
        ));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Operations
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn create_posts_body_with_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/create"))
            .and(query_param("apikey", API_KEY))
            .and(body_json(json!({
                "email": "fan@example.com",
                "code_type": "custom",
                "purpose": "Theater show",
                "code_length": 8,
                "code_format": "alphanumeric",
                "usage_limit": 1,
                "expires_in_hours": 168,
                "metadata": {
                    "created_by": "admin",
                    "notes": "",
                    "created_at": "2024-01-15T10:00:00.000Z"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": true,
                "message": "Code created",
                "data": {"code": "AB12CD34", "email": "fan@example.com", "is_active": true}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let code = registry_for(&server).create(&new_code()).await.unwrap();

        assert_eq!(code.code, "AB12CD34");
        assert!(code.is_active);
    }

    #[tokio::test]
    async fn create_rejection_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/create"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": false,
                "message": "Email tidak valid"
            })))
            .mount(&server)
            .await;

        let result = registry_for(&server).create(&new_code()).await;

        assert_eq!(
            result,
            Err(RegistryError::rejected(Some("Email tidak valid".to_string())))
        );
    }

    #[tokio::test]
    async fn list_decodes_statistics_and_codes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/all"))
            .and(query_param("apikey", API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": true,
                "data": {
                    "statistics": {"total_codes": 2, "active_codes": 1, "used_codes": 1, "expired_codes": 0},
                    "codes": [
                        {"code": "AAA111", "email": "a@x.id", "purpose": "p", "is_active": true, "is_used": false},
                        {"code": "BBB222", "email": "b@x.id", "purpose": "q", "is_active": false, "is_used": true}
                    ]
                }
            })))
            .mount(&server)
            .await;

        let catalog = registry_for(&server).list().await.unwrap();

        assert_eq!(catalog.statistics.total_codes, 2);
        assert_eq!(catalog.statistics.used_codes, 1);
        assert_eq!(catalog.codes.len(), 2);
        assert_eq!(catalog.codes[1].code, "BBB222");
    }

    #[tokio::test]
    async fn detail_sends_email_query_and_decodes_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/detail/AAA111"))
            .and(query_param("email", "a@x.id"))
            .and(query_param("apikey", API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": true,
                "data": {
                    "code": {"code": "AAA111", "email": "a@x.id", "metadata": "{\"notes\":\"n\"}"},
                    "usage_history": [
                        {"action": "redeem", "status": "success", "created_at": "2024-01-02T03:04:05Z", "ip_address": "10.0.0.1"}
                    ]
                }
            })))
            .mount(&server)
            .await;

        let detail = registry_for(&server)
            .detail("AAA111", "a@x.id")
            .await
            .unwrap();

        assert_eq!(detail.code.metadata.get("notes"), Some(&json!("n")));
        assert_eq!(detail.usage_history.len(), 1);
        assert_eq!(detail.usage_history[0].ip_address.as_deref(), Some("10.0.0.1"));
    }

    #[tokio::test]
    async fn detail_mismatch_is_a_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/detail/AAA111"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"status": false})),
            )
            .mount(&server)
            .await;

        let result = registry_for(&server).detail("AAA111", "wrong@x.id").await;

        assert!(matches!(result, Err(RegistryError::Rejected { message: None })));
    }

    #[tokio::test]
    async fn set_active_puts_flag_and_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/update/AAA111"))
            .and(body_json(json!({
                "email": "a@x.id",
                "is_active": false,
                "metadata": {"notes": "paused"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
            .expect(1)
            .mount(&server)
            .await;

        let mut metadata = Map::new();
        metadata.insert("notes".to_string(), json!("paused"));

        registry_for(&server)
            .set_active("AAA111", "a@x.id", false, Some(&metadata))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_sends_email_in_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/delete/AAA111"))
            .and(query_param("apikey", API_KEY))
            .and(body_json(json!({"email": "a@x.id"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
            .expect(1)
            .mount(&server)
            .await;

        registry_for(&server)
            .delete("AAA111", "a@x.id")
            .await
            .unwrap();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Transport failures
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn non_success_status_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/all"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let result = registry_for(&server).list().await;

        assert_eq!(
            result,
            Err(RegistryError::Http {
                status: 500,
                body: "boom".to_string()
            })
        );
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/all"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let result = registry_for(&server).list().await;

        assert!(matches!(result, Err(RegistryError::Decode(_))));
    }

    #[tokio::test]
    async fn successful_status_without_data_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
            .mount(&server)
            .await;

        let result = registry_for(&server).list().await;

        assert!(matches!(result, Err(RegistryError::Decode(_))));
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let registry = HttpCodeRegistry::new(
            WotatokensConfig::new(API_KEY).with_base_url("http://127.0.0.1:9"),
        );

        let result = registry.list().await;

        assert!(matches!(result, Err(RegistryError::Network(_))));
    }
}
