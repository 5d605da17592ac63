//! # Dashboard Configuration
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults          AdminConfig::default()                            │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  2. TOML file         $BIBLIO_CONFIG, or <config dir>/admin.toml        │
//! │          │            (missing default file is fine)                    │
//! │          ▼                                                              │
//! │  3. Environment       BIBLIO_BIND_ADDR, BIBLIO_PORT, BIBLIO_API_URL,    │
//! │          │            BIBLIO_API_TOKEN, BIBLIO_API_TIMEOUT_SECS,        │
//! │          │            BIBLIO_AUTH_ENABLED, BIBLIO_LOGIN_URL             │
//! │          ▼                                                              │
//! │  4. validate()        URL scheme, page sizes, port                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example File
//! ```toml
//! [server]
//! bind_addr = "0.0.0.0"
//! port = 3000
//!
//! [api]
//! base_url = "https://api-express-web.onrender.com"
//! token = "create-book-secret"
//! timeout_secs = 30
//!
//! [auth]
//! enabled = true
//! cookie_name = "userId"
//! login_url = "/login"
//!
//! [pages]
//! books = 10
//! users = 25
//! rents = 20
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use biblio_client::client::parse_base_url;
use biblio_client::{ClientConfig, DEFAULT_BASE_URL};
use biblio_core::validation::validate_page_size;
use biblio_core::{DEFAULT_BOOKS_PAGE_SIZE, DEFAULT_RENTS_PAGE_SIZE, DEFAULT_USERS_PAGE_SIZE};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "BIBLIO_CONFIG";

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "admin.toml";

// =============================================================================
// Configuration Error
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Where the dashboard listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Remote library API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    /// Sent as `Authorization` when creating books. Never logged.
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

/// Session guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub enabled: bool,
    pub cookie_name: String,
    pub login_url: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        AuthSettings {
            enabled: true,
            cookie_name: "userId".to_string(),
            login_url: "/login".to_string(),
        }
    }
}

/// Rows per page for each table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub books: usize,
    pub users: usize,
    pub rents: usize,
}

impl Default for PageSettings {
    fn default() -> Self {
        PageSettings {
            books: DEFAULT_BOOKS_PAGE_SIZE,
            users: DEFAULT_USERS_PAGE_SIZE,
            rents: DEFAULT_RENTS_PAGE_SIZE,
        }
    }
}

// =============================================================================
// Admin Config
// =============================================================================

/// Complete dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub pages: PageSettings,
}

impl AdminConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit path (argument or `BIBLIO_CONFIG`) must exist; the
    /// platform default file is optional.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses one TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading dashboard config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Platform config file location, e.g. `~/.config/biblio-admin/admin.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "biblio", "biblio-admin")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Applies overrides from a key lookup (the process environment in
    /// production).
    pub fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        if let Some(addr) = get("BIBLIO_BIND_ADDR") {
            self.server.bind_addr = addr;
        }

        if let Some(port) = get("BIBLIO_PORT") {
            self.server.port = parse_value("BIBLIO_PORT", &port)?;
        }

        if let Some(url) = get("BIBLIO_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(token) = get("BIBLIO_API_TOKEN") {
            self.api.token = Some(token).filter(|t| !t.trim().is_empty());
        }

        if let Some(secs) = get("BIBLIO_API_TIMEOUT_SECS") {
            self.api.timeout_secs = parse_value("BIBLIO_API_TIMEOUT_SECS", &secs)?;
        }

        if let Some(enabled) = get("BIBLIO_AUTH_ENABLED") {
            self.auth.enabled = parse_bool("BIBLIO_AUTH_ENABLED", &enabled)?;
        }

        if let Some(url) = get("BIBLIO_LOGIN_URL") {
            self.auth.login_url = url;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        parse_base_url(&self.api.base_url).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must not be 0".into()));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid("api.timeout_secs must be greater than 0".into()));
        }

        for (name, size) in [
            ("pages.books", self.pages.books),
            ("pages.users", self.pages.users),
            ("pages.rents", self.pages.rents),
        ] {
            validate_page_size(size).map_err(|e| ConfigError::Invalid(format!("{name}: {e}")))?;
        }

        if self.auth.enabled {
            if self.auth.cookie_name.trim().is_empty() {
                return Err(ConfigError::Invalid("auth.cookie_name must not be empty".into()));
            }
            if self.auth.login_url.trim().is_empty() {
                return Err(ConfigError::Invalid("auth.login_url must not be empty".into()));
            }
        }

        Ok(())
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.bind_addr, self.server.port)
    }

    /// Client settings derived from the `[api]` section.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api.base_url.clone())
            .timeout(Duration::from_secs(self.api.timeout_secs))
            .maybe_token(self.api.token.clone())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
