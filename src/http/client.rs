//! HTTP client for the translation service under test
//!
//! Thin wrapper over a single long-lived `reqwest::Client` that resolves
//! paths against the base URL, places credentials, and times each round-trip.

use anyhow::{Context, Result};
use reqwest::{Client, Method, Url};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::models::AuthPlacement;
use crate::utils::Timer;

/// HTTP client errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header {0}")]
    InvalidHeader(String),

    #[error("Invalid response body: {0}")]
    InvalidBody(String),
}

/// HTTP client bound to one service base URL
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl HttpClient {
    /// Create a client for `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build full URL with query parameters
    fn build_url(&self, request: &HttpRequest) -> Result<Url, HttpError> {
        let joined = format!("{}{}", self.base_url.trim_end_matches('/'), request.path);
        let mut url =
            Url::parse(&joined).map_err(|e| HttpError::InvalidUrl(format!("{joined}: {e}")))?;
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Send HTTP request and read the full body.
    ///
    /// `elapsed_ms` on the response covers dispatch through the last body byte.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = self.build_url(&request)?;
        debug!("Sending {} request to {}", request.method, request.path);

        let mut req_builder = self.client.request(request.method.clone(), url.clone());

        for (key, value) in &request.headers {
            let name = reqwest::header::HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| HttpError::InvalidHeader(key.clone()))?;
            let value = reqwest::header::HeaderValue::from_str(value)
                .map_err(|_| HttpError::InvalidHeader(key.clone()))?;
            req_builder = req_builder.header(name, value);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let timer = Timer::start(format!("{} {}", request.method, request.path));

        let response = req_builder
            .send()
            .await
            .map_err(|e| self.classify(e, &url))?;

        let status = response.status();

        let body = response.text().await.map_err(|e| self.classify(e, &url))?;
        let elapsed_ms = timer.stop();

        debug!(
            "Response: {} {} in {:.2}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            elapsed_ms
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            body,
            elapsed_ms,
        })
    }

    fn classify(&self, e: reqwest::Error, url: &Url) -> HttpError {
        if e.is_timeout() {
            HttpError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            HttpError::ConnectionRefused(url.to_string())
        } else {
            HttpError::RequestFailed(e.to_string())
        }
    }
}

/// HTTP request builder
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach the token wherever `placement` says this surface expects it
    pub fn authorize(mut self, placement: AuthPlacement, token: Option<&str>) -> Self {
        if let Some((key, value)) = placement.header(token) {
            self = self.header(key, value);
        }
        if let Some((key, value)) = placement.query(token) {
            self = self.query(key, value);
        }
        self
    }
}

/// HTTP response
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: String,
    pub elapsed_ms: f64,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<Value, HttpError> {
        serde_json::from_str(&self.body).map_err(|e| HttpError::InvalidBody(e.to_string()))
    }
}
