//! Task API Client
//!
//! HTTP bindings to the task backend, organized by domain.

mod config;
mod error;
mod metrics;
mod storage;
mod tasks;
mod transport;

#[cfg(test)]
pub mod testing;

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use config::*;
pub use error::{ApiError, ErrorKind, Result};
pub use storage::{KeyValueStore, LocalStorage, MemoryStorage};
pub use tasks::{validate_create, validate_description, validate_title, validate_update};
pub use transport::{ApiRequest, HttpTransport, RawResponse, Transport};

/// Shared, cheaply cloneable API client.
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    transport: Arc<dyn Transport + Send + Sync>,
    storage: Arc<dyn KeyValueStore + Send + Sync>,
}

impl ApiClient {
    /// Browser client: `fetch` transport and `localStorage` persistence.
    pub fn new(config: ApiConfig) -> Self {
        let transport = HttpTransport::new(config.timeout);
        Self::with_parts(config, Arc::new(transport), Arc::new(LocalStorage))
    }

    pub fn with_parts(
        config: ApiConfig,
        transport: Arc<dyn Transport + Send + Sync>,
        storage: Arc<dyn KeyValueStore + Send + Sync>,
    ) -> Self {
        Self { config, transport, storage }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(AUTH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, token: &str) {
        self.storage.set(AUTH_TOKEN_KEY, token);
    }

    pub fn clear_token(&self) {
        self.storage.remove(AUTH_TOKEN_KEY);
    }

    pub(crate) fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    /// Send one request and return the body of a 2xx response.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<serde_json::Value>,
    ) -> Result<String> {
        let request = ApiRequest {
            method: method.clone(),
            path: path.to_string(),
            url: self.config.url(path),
            query,
            body,
            bearer: self.token(),
        };
        log::debug!(target: "api", "request: {} {}", method, path);

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                log::error!(target: "api", "network error on {} {}: {}", method, path, err);
                return Err(err);
            }
        };

        if response.is_success() {
            log::debug!(target: "api", "response: {} {}", response.status, path);
            return Ok(response.body);
        }

        let err = ApiError::from_status(response.status, &response.body);
        match err.kind() {
            ErrorKind::Unauthorized => {
                log::error!(target: "api", "unauthorized access: {} {}", method, path);
                self.clear_token();
            }
            ErrorKind::Forbidden => log::error!(target: "api", "forbidden access: {} {}", method, path),
            ErrorKind::NotFound => log::error!(target: "api", "resource not found: {} {}", method, path),
            ErrorKind::Server => log::error!(target: "api", "server error on {} {}: {}", method, path, err),
            _ => log::error!(target: "api", "API error {} on {} {}: {}", response.status, method, path, err),
        }
        Err(err)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: Vec<(String, String)>) -> Result<T> {
        let body = self.execute(Method::GET, path, query, None).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, payload: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = payload.map(serde_json::to_value).transpose()?;
        let text = self.execute(method, path, Vec::new(), body).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Request whose success response carries no body worth decoding.
    async fn send_empty(&self, method: Method, path: &str) -> Result<()> {
        self.execute(method, path, Vec::new(), None).await.map(|_| ())
    }

    /// `GET /health`; true on a 2xx.
    pub async fn health_check(&self) -> bool {
        match self.execute(Method::GET, "/health", Vec::new(), None).await {
            Ok(_) => true,
            Err(err) => {
                log::warn!(target: "api", "health check failed: {}", err);
                false
            }
        }
    }
}

fn page_query(skip: u32, limit: u32) -> Vec<(String, String)> {
    vec![
        ("skip".to_string(), skip.to_string()),
        ("limit".to_string(), limit.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::testing::{json_response, mock_client};
    use super::*;

    #[tokio::test]
    async fn test_bearer_attached_when_token_stored() {
        let (client, mock, _) = mock_client();
        client.set_token("secret");
        mock.push(json_response(200, serde_json::json!({"status": "ok"})));

        assert!(client.health_check().await);
        let sent = mock.requests();
        assert_eq!(sent[0].bearer.as_deref(), Some("secret"));
        assert_eq!(sent[0].url, "http://localhost:8000/health");
    }

    #[tokio::test]
    async fn test_no_bearer_without_token() {
        let (client, mock, _) = mock_client();
        mock.push(json_response(200, serde_json::json!({})));

        client.health_check().await;
        assert_eq!(mock.requests()[0].bearer, None);
    }

    #[tokio::test]
    async fn test_unauthorized_clears_token() {
        let (client, mock, storage) = mock_client();
        client.set_token("expired");
        mock.push(RawResponse { status: 401, body: r#"{"detail":"Not authenticated"}"#.into() });

        let err = client.get_metrics().await.unwrap_err();
        assert_eq!(err, ApiError::Unauthorized("Not authenticated".into()));
        assert_eq!(storage.get(AUTH_TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn test_forbidden_keeps_token() {
        let (client, mock, _) = mock_client();
        client.set_token("token");
        mock.push(RawResponse { status: 403, body: String::new() });

        let err = client.get_metrics().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(client.token().as_deref(), Some("token"));
    }

    #[tokio::test]
    async fn test_network_failure_propagates() {
        let (client, mock, _) = mock_client();
        mock.push_network_error("connection refused");

        let err = client.get_metrics().await.unwrap_err();
        assert_eq!(err, ApiError::Network("connection refused".into()));
        assert!(!client.health_check().await);
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (client, mock, _) = mock_client();
        mock.push(RawResponse { status: 200, body: "not json".into() });

        let err = client.get_metrics().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }
}
