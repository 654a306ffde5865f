//! HTTP transport.
//!
//! The client builds an [`ApiRequest`]; a [`Transport`] turns it into a
//! [`RawResponse`]. A transport only fails when no response was received,
//! status classification happens in the client.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_timers::future::TimeoutFuture;
use reqwest::header::ACCEPT;
use reqwest::Method;

use super::error::{ApiError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, used for logging and matching.
    pub path: String,
    /// Absolute URL.
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub bearer: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse>;
}

/// `fetch`-backed transport with a hard per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .header(ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let exchange = async move {
            let response = builder
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            Ok(RawResponse { status, body })
        };
        let deadline = TimeoutFuture::new(self.timeout.as_millis().min(u128::from(u32::MAX)) as u32);

        futures::pin_mut!(exchange);
        futures::pin_mut!(deadline);
        match select(exchange, deadline).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(ApiError::Network(format!(
                "request timed out after {}s",
                self.timeout.as_secs()
            ))),
        }
    }
}
