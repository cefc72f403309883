use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the storefront API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status. `message` is the server's own
    /// `message` field when it sent one.
    #[error("{message} (HTTP {status})")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A request body could not be encoded.
    #[error("failed to encode {context}: {source}")]
    Encode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// The request was rejected locally before anything was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// HTTP status of a rejected request, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<homeo_core::CoreError> for ApiError {
    fn from(e: homeo_core::CoreError) -> Self {
        ApiError::InvalidRequest(e.to_string())
    }
}
