//! Shared HTTP client for the SnapVault REST API
//!
//! All resource services issue their requests through an [`ApiClient`]. The
//! production implementation is [`HttpClient`], built once per process with
//! the `/api/v1` base URL and a default `Content-Type: application/json`
//! header. Failures are passed through as-is: no retries, no fallbacks.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};

/// One outgoing request, relative to the API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            endpoint: endpoint.into(),
            body: None,
        }
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            endpoint: endpoint.into(),
            body: None,
        }
    }

    pub fn post<T: Serialize + ?Sized>(endpoint: impl Into<String>, payload: &T) -> Result<Self> {
        Ok(Self {
            method: Method::POST,
            endpoint: endpoint.into(),
            body: Some(serde_json::to_value(payload)?),
        })
    }

    pub fn put<T: Serialize + ?Sized>(endpoint: impl Into<String>, payload: &T) -> Result<Self> {
        Ok(Self {
            method: Method::PUT,
            endpoint: endpoint.into(),
            body: Some(serde_json::to_value(payload)?),
        })
    }
}

/// Raw status and body of a response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Map non-success statuses to errors. 404 becomes `NotFound`.
    pub fn error_for_status(self, endpoint: &str) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }

        let message = error_detail(&self.body)
            .unwrap_or_else(|| format!("Request to {} failed", endpoint));

        if self.status == 404 {
            return Err(DashboardError::not_found(format!("{} ({})", endpoint, message)));
        }
        Err(DashboardError::api(self.status, message))
    }

    /// Decode a successful body
    pub fn json<R: DeserializeOwned>(self, endpoint: &str) -> Result<R> {
        let reply = self.error_for_status(endpoint)?;
        serde_json::from_str(&reply.body).map_err(|e| {
            DashboardError::invalid_response(
                reply.status,
                format!("Unexpected response from {}: {}", endpoint, e),
            )
        })
    }

    /// Body of a successful response without any shape guarantee
    pub fn opaque(self, endpoint: &str) -> Result<Option<serde_json::Value>> {
        let reply = self.error_for_status(endpoint)?;
        let trimmed = reply.body.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            serde_json::from_str(trimmed)
                .unwrap_or_else(|_| serde_json::Value::String(trimmed.to_string())),
        ))
    }
}

/// Extract the human-readable part of an error body.
///
/// The backend answers `{"detail": "..."}`; validation failures carry a list
/// under `detail` instead, which is returned compacted.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let field = ["detail", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key))?;
    match field {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Transport seam shared by all resource services
#[allow(async_fn_in_trait)]
pub trait ApiClient {
    /// Send one request and return its raw reply
    async fn send(&self, request: ApiRequest) -> Result<ApiReply>;

    /// Send a request unless `cancel` fires first. A cancelled request's
    /// reply is dropped.
    async fn call(&self, request: ApiRequest, cancel: &CancellationToken) -> Result<ApiReply> {
        if cancel.is_cancelled() {
            return Err(DashboardError::cancelled(request.endpoint));
        }

        let endpoint = request.endpoint.clone();
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(endpoint = %endpoint, "request abandoned");
                Err(DashboardError::cancelled(endpoint))
            }
            reply = self.send(request) => reply,
        }
    }

    async fn get<R: DeserializeOwned>(&self, endpoint: &str, cancel: &CancellationToken) -> Result<R> {
        self.call(ApiRequest::get(endpoint), cancel)
            .await?
            .json(endpoint)
    }

    async fn post<T, R>(&self, endpoint: &str, payload: &T, cancel: &CancellationToken) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.call(ApiRequest::post(endpoint, payload)?, cancel)
            .await?
            .json(endpoint)
    }

    async fn put<T, R>(&self, endpoint: &str, payload: &T, cancel: &CancellationToken) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.call(ApiRequest::put(endpoint, payload)?, cancel)
            .await?
            .json(endpoint)
    }

    async fn delete(
        &self,
        endpoint: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<serde_json::Value>> {
        self.call(ApiRequest::delete(endpoint), cancel)
            .await?
            .opaque(endpoint)
    }
}

/// reqwest-backed client bound to one backend origin
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: DashboardConfig,
}

impl HttpClient {
    pub fn new(config: DashboardConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut client_builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .default_headers(headers);

        if !config.proxy_enabled() {
            client_builder = client_builder.no_proxy();
        }

        let client = client_builder.build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Probe `<origin>/health`, which lives outside the API prefix
    pub async fn health(&self, cancel: &CancellationToken) -> Result<bool> {
        let url = self.config.origin_url("/health");
        let probe = async {
            let response = self.client.get(&url).send().await?;
            let status = response.status();
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            Ok::<bool, DashboardError>(status.is_success() && body["status"] == "ok")
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DashboardError::cancelled("/health")),
            healthy = probe => healthy,
        }
    }
}

impl ApiClient for HttpClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiReply> {
        let url = self.config.endpoint_url(&request.endpoint);
        let started = Instant::now();

        let mut request_builder = self.client.request(request.method.clone(), &url);
        if let Some(body) = &request.body {
            request_builder = request_builder.json(body);
        }

        let response = request_builder.send().await.map_err(|e| {
            tracing::warn!(method = %request.method, endpoint = %request.endpoint, error = %e, "request failed");
            DashboardError::from(e)
        })?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(
            method = %request.method,
            endpoint = %request.endpoint,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed",
        );
        if !(200..300).contains(&status) {
            tracing::warn!(method = %request.method, endpoint = %request.endpoint, status, "non-success status");
        }

        Ok(ApiReply::new(status, body))
    }
}
