//! HTTP transport for the endpoint scraper.
//!
//! This crate is the network boundary of the workspace. It focuses on:
//!
//! - The [`Transport`] trait: the two GET primitives the engine needs, one
//!   returning a parsed JSON body and one returning raw bytes
//! - [`HttpTransport`], the default `reqwest`-backed implementation
//! - Validating configured API base URLs
//!
//! # Example
//!
//! ```ignore
//! use scraper_api::{HttpTransport, Transport};
//! use anyhow::Result;
//!
//! async fn run() -> Result<()> {
//!     let transport = HttpTransport::new()?;
//!     let body = transport
//!         .get_json("https://api.example.com/items/42", &[("Visitor-Id", "FIGMA-PLUGIN")])
//!         .await?;
//!     println!("{body}");
//!     Ok(())
//! }
//! ```

use std::env;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url, header};
use serde_json::Value;
use tracing::debug;

mod error;

pub use error::TransportError;

/// The network primitives consumed by an endpoint.
///
/// Implementations must treat any non-success status as an error. No retries,
/// timeouts or caching are expected at this layer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` with the extra `headers` and parse the body as JSON.
    async fn get_json(&self, url: &str, headers: &[(&str, &str)]) -> Result<Value, TransportError>;

    /// GET `url` with default headers and return the raw body.
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

#[derive(Debug, Clone)]
/// Thin wrapper around a configured `reqwest::Client`.
///
/// The client carries a consistent User-Agent header and no request timeout:
/// a stalled server stalls the corresponding call.
pub struct HttpTransport {
    pub http: Client,
    pub user_agent: String,
}

impl HttpTransport {
    /// Construct an [`HttpTransport`] with the default User-Agent.
    pub fn new() -> Result<Self> {
        let user_agent = format!("endpoint-scraper/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS);
        Self::with_user_agent(user_agent)
    }

    /// Construct an [`HttpTransport`] sending the given User-Agent.
    pub fn with_user_agent(user_agent: impl Into<String>) -> Result<Self> {
        let user_agent = user_agent.into();
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&user_agent).context("user agent header")?,
        );

        let http = Client::builder()
            .default_headers(default_headers)
            .build()
            .context("build http client")?;

        Ok(Self { http, user_agent })
    }

    async fn send(&self, url: &str, headers: header::HeaderMap) -> Result<reqwest::Response, TransportError> {
        let response = self
            .http
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| TransportError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "received response");
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn read_body(url: &str, response: reqwest::Response) -> Result<Vec<u8>, TransportError> {
        let bytes = response.bytes().await.map_err(|e| TransportError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str, headers: &[(&str, &str)]) -> Result<Value, TransportError> {
        let header_map = build_header_map(headers)?;
        let response = self.send(url, header_map).await?;
        let body = Self::read_body(url, response).await?;
        serde_json::from_slice(&body).map_err(|source| TransportError::Json {
            url: url.to_string(),
            source,
        })
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = self.send(url, header::HeaderMap::new()).await?;
        Self::read_body(url, response).await
    }
}

fn build_header_map(headers: &[(&str, &str)]) -> Result<header::HeaderMap, TransportError> {
    let mut header_map = header::HeaderMap::new();
    for (name, value) in headers {
        let header_name = header::HeaderName::from_bytes(name.as_bytes()).map_err(|e| TransportError::Header {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        let header_value = header::HeaderValue::from_str(value).map_err(|e| TransportError::Header {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        header_map.insert(header_name, header_value);
    }
    Ok(header_map)
}

/// Validate that a configured API base URL is usable as a request prefix.
///
/// Rules:
/// - must parse as an absolute URL
/// - scheme must be `http` or `https`
/// - must include a host
pub fn validate_base_url(base: &str) -> Result<()> {
    let parsed_base_url = Url::parse(base).map_err(|e| anyhow!("Invalid API base URL '{}': {}", base, e))?;

    if !matches!(parsed_base_url.scheme(), "http" | "https") {
        return Err(anyhow!(
            "API base must use http or https; got '{}://'",
            parsed_base_url.scheme()
        ));
    }

    if parsed_base_url.host_str().is_none() {
        return Err(anyhow!("API base '{}' must include a host", base));
    }

    Ok(())
}
