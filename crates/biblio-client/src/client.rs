//! # Library API Client
//!
//! HTTP client creation and configuration for the remote library API.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Library API Client                                 │
//! │                                                                         │
//! │  admin-web startup                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ClientConfig::new(base_url) ← timeout, token                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LibraryClient::new(config) ← builds one reqwest::Client               │
//! │       │                                                                 │
//! │       │ cloned into every request handler (Arc inside)                  │
//! │       ▼                                                                 │
//! │  client.books()  ──► BookRepository  ──► GET /books ...                │
//! │  client.users()  ──► UserRepository  ──► GET /users/admin/allUsers ... │
//! │  client.rents()  ──► RentRepository  ──► GET /rent/rents ...           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every request goes through [`LibraryClient::send`], which turns
//! non-2xx statuses into [`ClientError::Status`] and logs the outcome.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use biblio_core::validation::validate_record_id;

use crate::error::{ClientError, ClientResult};
use crate::repository::books::BookRepository;
use crate::repository::rents::RentRepository;
use crate::repository::users::UserRepository;

/// Hosted API the dashboard was built against.
pub const DEFAULT_BASE_URL: &str = "https://api-express-web.onrender.com";

/// Longest upstream error body kept for logging.
const MAX_LOGGED_BODY: usize = 512;

// =============================================================================
// Configuration
// =============================================================================

/// Client configuration.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use biblio_client::ClientConfig;
///
/// let config = ClientConfig::new("https://api.example.org")
///     .timeout(Duration::from_secs(10))
///     .token("secret");
/// assert_eq!(config.token.as_deref(), Some("secret"));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API; endpoint paths are appended to it.
    pub base_url: String,

    /// Value of the `Authorization` header sent when creating books.
    pub token: Option<String>,

    /// Whole-request timeout.
    /// Default: 30 seconds (the hosted API cold-starts slowly)
    pub timeout: Duration,

    /// User-Agent header.
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("biblio-admin/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the authorization token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Clears or sets the token from an optional value; blank means none.
    pub fn maybe_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig::new(DEFAULT_BASE_URL)
    }
}

// =============================================================================
// Client
// =============================================================================

/// Handle to the remote library API providing repository access.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection
/// pool between clones.
#[derive(Debug, Clone)]
pub struct LibraryClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl LibraryClient {
    /// Creates a client from configuration.
    ///
    /// ## Returns
    /// * `Err(ClientError::InvalidBaseUrl)` - URL does not parse, is not
    ///   http/https, or cannot carry a path
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        debug!(base_url = %base_url, timeout = ?config.timeout, "Library API client created");

        Ok(LibraryClient {
            http,
            base_url,
            token: config.token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the book repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let books = client.books().list().await?;
    /// ```
    pub fn books(&self) -> BookRepository {
        BookRepository::new(self.clone())
    }

    /// Returns the user repository.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.clone())
    }

    /// Returns the rent repository.
    pub fn rents(&self) -> RentRepository {
        RentRepository::new(self.clone())
    }

    // =========================================================================
    // Request plumbing (used by the repositories)
    // =========================================================================

    /// Builds an endpoint URL from path segments, percent-encoding each.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Endpoint whose last segment is a record id.
    pub(crate) fn record_endpoint(&self, segments: &[&str], id: &str) -> ClientResult<Url> {
        validate_record_id(id)?;
        let mut all = segments.to_vec();
        all.push(id);
        self.endpoint(&all)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// Adds the `Authorization` header when a token is configured.
    pub(crate) fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(reqwest::header::AUTHORIZATION, token),
            None => request,
        }
    }

    /// Sends a request and maps non-2xx statuses to [`ClientError::Status`].
    pub(crate) async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> ClientResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(operation, error = %e, "API request failed");
            ClientError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(operation, status = status.as_u16(), "API request succeeded");
            return Ok(response);
        }

        let body = truncated_body(response).await;
        warn!(operation, status = status.as_u16(), body = %body, "API returned error status");
        Err(ClientError::Status {
            operation,
            status: status.as_u16(),
            body,
        })
    }

    /// GET an endpoint and decode its JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: Url,
    ) -> ClientResult<T> {
        let response = self.send(operation, self.request(Method::GET, url)).await?;
        decode(operation, response).await
    }

    /// Sends a JSON body and discards the response body.
    pub(crate) async fn send_json<B: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        method: Method,
        url: Url,
        body: &B,
    ) -> ClientResult<()> {
        self.send(operation, self.request(method, url).json(body))
            .await
            .map(|_| ())
    }
}

/// Decodes a JSON body, logging what failed to parse.
async fn decode<T: DeserializeOwned>(operation: &'static str, response: Response) -> ClientResult<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(operation, error = %e, "API response did not decode");
        ClientError::from(e)
    })
}

async fn truncated_body(response: Response) -> String {
    let mut text = response.text().await.unwrap_or_default();
    if text.len() > MAX_LOGGED_BODY {
        let mut cut = MAX_LOGGED_BODY;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
    text
}

/// Parses and checks a base URL.
pub fn parse_base_url(raw: &str) -> ClientResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| ClientError::InvalidBaseUrl(format!("{raw}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidBaseUrl(format!(
            "{raw}: scheme must be http or https"
        )));
    }

    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidBaseUrl(raw.to_string()));
    }

    Ok(url)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> LibraryClient {
        LibraryClient::new(ClientConfig::new(base)).unwrap()
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("http://localhost:4000")
            .timeout(Duration::from_secs(5))
            .maybe_token(Some("  ".to_string()));

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.token, None);
        assert_eq!(ClientConfig::default().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_parse_base_url() {
        assert!(parse_base_url("https://api.example.org").is_ok());
        assert!(parse_base_url(" http://127.0.0.1:3000/api ").is_ok());

        assert!(parse_base_url("ftp://api.example.org").is_err());
        assert!(parse_base_url("not a url").is_err());
        assert!(parse_base_url("mailto:admin@example.org").is_err());
    }

    #[test]
    fn test_endpoint_building() {
        let api = client("https://api.example.org");
        assert_eq!(
            api.endpoint(&["users", "admin", "allUsers"]).unwrap().as_str(),
            "https://api.example.org/users/admin/allUsers"
        );

        let api = client("https://api.example.org/v1/");
        assert_eq!(
            api.endpoint(&["books"]).unwrap().as_str(),
            "https://api.example.org/v1/books"
        );
    }

    #[test]
    fn test_record_endpoint_validates_id() {
        let api = client("https://api.example.org");
        assert_eq!(
            api.record_endpoint(&["books", "update"], "65f1").unwrap().as_str(),
            "https://api.example.org/books/update/65f1"
        );

        assert!(matches!(
            api.record_endpoint(&["books"], "../users"),
            Err(ClientError::InvalidId(_))
        ));
        assert!(api.record_endpoint(&["books"], "").is_err());
        assert!(matches!(
            api.record_endpoint(&["books", "delete"], ".."),
            Err(ClientError::InvalidId(_))
        ));
        assert!(matches!(
            api.record_endpoint(&["users", "admin", "clear-multa"], "."),
            Err(ClientError::InvalidId(_))
        ));
    }
}
