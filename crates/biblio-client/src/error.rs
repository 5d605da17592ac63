//! # Client Error Types
//!
//! Error types for calls to the remote library API.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest::Error / non-2xx status / bad JSON                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ClientError (this module) ← Adds context and categorization           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  WebError (in admin-web) ← Logs details, shows "request failed"        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Browser sees a generic message                                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use biblio_core::ValidationError;
use thiserror::Error;

/// Remote API errors.
///
/// The dashboard never shows these to the user verbatim; they are logged
/// and collapsed into one generic "request failed" condition.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL cannot be used.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A record id that cannot be placed in a request path.
    #[error("Invalid record id: {0}")]
    InvalidId(#[from] ValidationError),

    /// Could not reach the API.
    ///
    /// ## When This Occurs
    /// - DNS failure, refused connection
    /// - TLS handshake failure
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// No response within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The API answered with a non-2xx status.
    #[error("{operation} returned HTTP {status}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// The response body was not the JSON we expected.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Anything else reqwest reports.
    #[error("Request failed: {0}")]
    Internal(String),
}

/// Convert reqwest errors to ClientError.
///
/// ## Error Mapping
/// ```text
/// is_timeout()  → ClientError::Timeout
/// is_connect()  → ClientError::ConnectionFailed
/// is_decode()   → ClientError::Decode
/// Other         → ClientError::Internal
/// ```
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Internal(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// HTTP status returned by the API, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the API reported the record as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns true if the same request could succeed later.
    ///
    /// ## Retryable Errors
    /// - Connection failures and timeouts
    /// - 5xx responses (the hosted API cold-starts slowly)
    ///
    /// ## Non-Retryable Errors
    /// - 4xx responses
    /// - Bad ids, bad base URL, undecodable bodies
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::ConnectionFailed(_) | ClientError::Timeout => true,
            ClientError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if the error comes from our own configuration or input
    /// rather than from the API.
    pub fn is_config_error(&self) -> bool {
        matches!(self, ClientError::InvalidBaseUrl(_) | ClientError::InvalidId(_))
    }
}

/// Result type for API operations.
pub type ClientResult<T> = Result<T, ClientError>;
