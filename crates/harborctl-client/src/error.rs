//! Error types for Harbor API operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during Harbor API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to connect to the Harbor API.
    #[error("Failed to connect to Harbor at {url}: {source}")]
    ConnectionFailed {
        /// API URL.
        url: String,
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// Authentication configuration is invalid.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Error message.
        message: String,
    },

    /// Resource not found.
    #[error("Not found: {resource}")]
    NotFound {
        /// Description of the missing resource.
        resource: String,
    },

    /// Non-success HTTP response from the API.
    #[error("Harbor API error: {status} - {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body or error message.
        message: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Credentials file could not be read or parsed.
    #[error("Credentials file {path}: {message}")]
    CredentialsFile {
        /// File path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Invalid API URL.
    #[error("Invalid URL: {url}")]
    InvalidUrl {
        /// URL string.
        url: String,
    },

    /// Create response carried no usable Location header.
    #[error("Harbor did not return a location for the created resource")]
    MissingLocation,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::ConnectionFailed {
                url: err
                    .url()
                    .map_or_else(|| "unknown".to_string(), ToString::to_string),
                source: err,
            }
        } else {
            let status = err.status().map_or(0, |s| s.as_u16());
            Self::Http {
                status,
                message: err.to_string(),
            }
        }
    }
}
