//! Shopcart REST API client.
//!
//! Every console action maps onto exactly one call here. Calls are never
//! retried; each one resolves to the decoded payload or an [`ApiError`]
//! whose [`ApiError::flash_text`] is what the operator sees.
//!
//! # API Reference
//!
//! - Base path: `{SHOPCART_API_URL}/api/shopcarts`
//! - Content type: `application/json` in both directions
//! - Errors: `{"status": <u16>, "error": <reason>, "message": <text>}`

mod items;
mod shopcarts;

use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use shopcart_core::ServerMessage;
use thiserror::Error;
use url::Url;

/// Flash text for failures that carry no readable server message.
pub const SERVER_ERROR: &str = "Server error!";

/// Flash text when a search is attempted without any filter.
pub const MISSING_QUERY: &str = "Please enter a search query";

/// Errors that can occur when calling the shopcart service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, reset, TLS...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service rejected the request and explained why.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Service rejected the request without a readable `message`.
    #[error("API error: {status} without a readable message")]
    Unreadable { status: u16 },

    /// Successful response whose body did not have the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Search attempted with neither `product_id` nor `name`; nothing was sent.
    #[error("Search query is empty")]
    MissingQuery,

    /// Base URL cannot carry the API path.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// The single message shown to the operator for this failure.
    ///
    /// Server messages are passed through verbatim.
    #[must_use]
    pub fn flash_text(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::MissingQuery => MISSING_QUERY.to_string(),
            Self::Http(_) | Self::Unreadable { .. } | Self::Decode(_) | Self::InvalidBaseUrl(_) => {
                SERVER_ERROR.to_string()
            }
        }
    }

    /// HTTP status of a rejected request, if the service answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Unreadable { status } => Some(*status),
            _ => None,
        }
    }

    /// Build the error for a failed response body.
    #[must_use]
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ServerMessage>(body) {
            Ok(ServerMessage {
                message: Some(message),
                ..
            }) => Self::Api { status, message },
            _ => Self::Unreadable { status },
        }
    }
}

/// Shopcart REST API client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct ShopcartApi {
    inner: Arc<ShopcartApiInner>,
}

struct ShopcartApiInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ShopcartApi {
    /// Create a new client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL cannot carry a path or the HTTP client
    /// fails to build.
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ShopcartApiInner { client, base_url }),
        })
    }

    /// Base URL of the service.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// URL of `/api/shopcarts/{segments...}`.
    ///
    /// Segments are percent-encoded as-is, so raw form input can never
    /// escape its path segment.
    #[must_use]
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .push("api")
                .push("shopcarts")
                .extend(segments);
        }
        url
    }

    /// Same as [`Self::endpoint`] with the given query pairs appended.
    #[must_use]
    pub fn endpoint_with_query(&self, segments: &[&str], pairs: &[(&str, &str)]) -> Url {
        let mut url = self.endpoint(segments);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }

    fn client(&self) -> &reqwest::Client {
        &self.inner.client
    }

    /// Send a request and decode its JSON payload.
    async fn send_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()));
        }

        Err(Self::parse_error(response).await)
    }

    /// Send a request whose success body is ignored (e.g. 204 No Content).
    async fn send_empty(request: reqwest::RequestBuilder) -> Result<(), ApiError> {
        let response = request.send().await?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(Self::parse_error(response).await)
    }

    /// Parse error response from the shopcart service.
    async fn parse_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.bytes().await.unwrap_or_default();
        let error = ApiError::from_body(status, &body);
        tracing::warn!(status, error = %error, "shopcart service rejected request");
        error
    }
}

impl std::fmt::Debug for ShopcartApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopcartApi")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}
