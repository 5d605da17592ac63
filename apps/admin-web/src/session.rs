//! # Session Guard
//!
//! Keeps anonymous browsers out of the dashboard.
//!
//! ```text
//! request ──► cookie `userId` present? ──yes──► handler
//!                      │
//!                      no
//!                      ▼
//!              303 See Other ──► login_url
//! ```
//!
//! The dashboard does not issue sessions. Login happens elsewhere and
//! leaves the cookie behind; this guard only checks that it is there.

use axum::extract::{Request, State};
use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::debug;

use crate::AppState;

/// Middleware for every dashboard route except `/health`.
pub async fn require_session(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let auth = &state.config.auth;

    if !auth.enabled || session_cookie(request.headers(), &auth.cookie_name).is_some() {
        return next.run(request).await;
    }

    debug!(path = %request.uri().path(), "No session cookie, redirecting to login");
    Redirect::to(&auth.login_url).into_response()
}

/// Value of cookie `name`, if present and non-empty.
pub fn session_cookie<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(cookies: &[&'static str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(COOKIE, HeaderValue::from_static(*cookie));
        }
        headers
    }

    #[test]
    fn test_cookie_found() {
        let headers = headers(&["theme=dark; userId=65f1; lang=es"]);
        assert_eq!(session_cookie(&headers, "userId"), Some("65f1"));
    }

    #[test]
    fn test_cookie_in_second_header() {
        let headers = headers(&["theme=dark", "userId=abc"]);
        assert_eq!(session_cookie(&headers, "userId"), Some("abc"));
    }

    #[test]
    fn test_cookie_missing_or_empty() {
        assert_eq!(session_cookie(&HeaderMap::new(), "userId"), None);
        assert_eq!(session_cookie(&headers(&["userId="]), "userId"), None);
        assert_eq!(session_cookie(&headers(&["otherUserId=1"]), "userId"), None);
    }
}
