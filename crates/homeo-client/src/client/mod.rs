//! HTTP client for the storefront REST API.
//!
//! Wraps `reqwest` with the backend's error conventions: any non-2xx status
//! becomes [`ApiError::Status`] carrying the server's `message` field when it
//! sent one, or a caller-supplied fallback otherwise. Nothing is retried.

mod admin;
pub mod catalog;
mod payments;

use std::time::Duration;

use homeo_core::AppConfig;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::types::ErrorBody;

/// Client for the storefront backend.
///
/// Use [`ApiClient::new`] with the loaded configuration, or
/// [`ApiClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(super) client: Client,
    pub(super) base_url: Url,
}

impl ApiClient {
    /// Creates a client for the configured API URL, timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if the API URL does
    /// not parse.
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        Self::with_base_url(&config.api_url, config.http_timeout_secs, &config.user_agent)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` is not
    /// an absolute http(s) URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so joined paths extend the base path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "expected an http(s) URL".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot carry a path".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends `request` and returns the response if its status is 2xx.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on network failure and [`ApiError::Status`]
    /// on a non-2xx status, with the server's `message` or `failure`.
    pub(crate) async fn send_checked(
        &self,
        request: RequestBuilder,
        failure: &str,
    ) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| failure.to_owned());

        tracing::warn!(status = status.as_u16(), url = %url, message = %message, "request rejected");
        Err(ApiError::Status {
            status: status.as_u16(),
            url,
            message,
        })
    }

    /// Sends `request`, checks the status, and parses the body as `T`.
    ///
    /// # Errors
    ///
    /// Everything [`Self::send_checked`] returns, plus
    /// [`ApiError::Deserialize`] when the body does not match `T`.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
        failure: &str,
    ) -> Result<T, ApiError> {
        let response = self.send_checked(request, failure).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Deserialize {
            context: context.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
