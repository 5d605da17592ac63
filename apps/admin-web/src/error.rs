//! # Web Error Type
//!
//! What a failed handler turns into: an HTML error page with a status code.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ClientError (any API failure)                                         │
//! │       │  detail logged with tracing::error!                            │
//! │       ▼                                                                 │
//! │  WebError::Upstream ──► 502 "Request failed" (404 if API said so)      │
//! │                                                                         │
//! │  ValidationError / CoreError                                           │
//! │       ▼                                                                 │
//! │  WebError::BadRequest ──► 400 with the validation message              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The browser never sees upstream details: transport errors, status codes
//! and bodies all collapse into the same generic message.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use maud::html;
use thiserror::Error;

use biblio_client::ClientError;
use biblio_core::{CoreError, ValidationError};

use crate::views;

/// Generic message for any failed call to the library API.
pub const REQUEST_FAILED: &str = "Request failed. Please try again.";

#[derive(Debug, Error)]
pub enum WebError {
    /// The library API call failed.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] ClientError),

    /// The browser sent something we cannot act on.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::Upstream(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            WebError::Upstream(err) if err.is_config_error() => StatusCode::BAD_REQUEST,
            WebError::Upstream(_) => StatusCode::BAD_GATEWAY,
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Text shown on the error page.
    pub fn public_message(&self) -> String {
        match self {
            WebError::Upstream(err) if err.is_not_found() => "Not found".to_string(),
            WebError::Upstream(_) => REQUEST_FAILED.to_string(),
            WebError::BadRequest(message) => message.clone(),
        }
    }
}

impl From<ValidationError> for WebError {
    fn from(err: ValidationError) -> Self {
        WebError::BadRequest(err.to_string())
    }
}

impl From<CoreError> for WebError {
    fn from(err: CoreError) -> Self {
        WebError::BadRequest(err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            WebError::Upstream(err) => {
                // Log the actual error but return a generic message
                tracing::error!(error = %err, retryable = err.is_retryable(), "Library API request failed");
            }
            WebError::BadRequest(message) => {
                tracing::debug!(message = %message, "Rejected request");
            }
        }

        let body = views::page(
            "Error",
            None,
            html! {
                h1 { "Error" }
                (views::flash(Some(&self.public_message())))
                a.btn href="/libros" { "Volver" }
            },
        );

        (status, Html(body.into_string())).into_response()
    }
}

/// Result type for route handlers.
pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(status: u16) -> WebError {
        WebError::Upstream(ClientError::Status {
            operation: "list books",
            status,
            body: "secret stack trace".to_string(),
        })
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(upstream(500).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream(404).status(), StatusCode::NOT_FOUND);
        assert_eq!(WebError::Upstream(ClientError::Timeout).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            WebError::from(ValidationError::AmountsMustMatch).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_upstream_details_are_hidden() {
        let message = upstream(500).public_message();
        assert_eq!(message, REQUEST_FAILED);
        assert!(!message.contains("secret"));
    }

    #[test]
    fn test_validation_message_is_shown() {
        let err: WebError = ValidationError::NumbersMustBePositive.into();
        assert_eq!(err.public_message(), "All number fields must be greater than 0");
    }
}
