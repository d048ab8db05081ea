//! Client configuration
//!
//! Loaded from environment variables (optionally seeded from a `.env` file) or
//! from a config file layered under `ERP__`-prefixed environment variables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Connection settings for the ERP REST API
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// API root, e.g. `https://erp.example.com/api/v1`
    pub base_url: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
    pub user_agent: String,
    /// Static headers sent with every request
    pub headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_seconds: 30,
            user_agent: format!("erp-client/{}", env!("CARGO_PKG_VERSION")),
            headers: HashMap::new(),
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not set: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
    #[error("Config file error: {0}")]
    FileError(String),
}

impl From<ConfigError> for crate::error::ErpError {
    fn from(err: ConfigError) -> Self {
        crate::error::ErpError::Config(err.to_string())
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Read `.env` if present, then load from the environment
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded environment file");
        }
        Self::from_env()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        config.base_url =
            get("ERP_API_URL").ok_or_else(|| ConfigError::MissingEnvVar("ERP_API_URL".into()))?;

        if let Some(timeout) = get("ERP_API_TIMEOUT") {
            config.timeout_seconds = timeout.parse().map_err(|_| ConfigError::InvalidValue {
                key: "ERP_API_TIMEOUT".to_string(),
                message: format!("'{}' is not a number of seconds", timeout),
            })?;
        }
        if let Some(agent) = get("ERP_API_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(headers) = get("ERP_API_HEADERS") {
            config.headers = parse_headers(&headers)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load a config file (any format the `config` crate knows), with
    /// `ERP__BASE_URL`-style environment variables taking precedence
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(path))
            .add_source(::config::Environment::with_prefix("ERP").separator("__"))
            .build()
            .map_err(|e| ConfigError::FileError(e.to_string()))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| ConfigError::FileError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            key: "base_url".to_string(),
            message: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                key: "base_url".to_string(),
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_seconds".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Join the base URL and an API path
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Parse `Name=value;Other=value` into a header map
pub fn parse_headers(raw: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut headers = HashMap::new();
    for pair in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let (name, value) = pair.split_once('=').ok_or_else(|| ConfigError::InvalidValue {
            key: "ERP_API_HEADERS".to_string(),
            message: format!("expected name=value, got '{}'", pair),
        })?;
        headers.insert(name.trim().to_string(), value.trim().to_string());
    }
    Ok(headers)
}
