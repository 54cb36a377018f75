//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files. Every
//! section has defaults, so an empty file plus an API key is a valid config.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::gateway::BlockchainType;

/// Base URL of the sandbox backend.
pub const SANDBOX_ENDPOINT: &str = "https://sandbox.halliday.xyz/v1/";

/// Base URL of the production backend.
pub const PRODUCTION_ENDPOINT: &str = "https://api.halliday.xyz/v1/";

/// Root configuration for the wallet client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend connection settings.
    pub api: ApiConfig,

    /// Defaults applied to session operations.
    pub session: SessionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Backend API configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Client API key, sent as a bearer token.
    pub api_key: String,

    /// Use the sandbox backend instead of production.
    pub sandbox: bool,

    /// Explicit base URL; overrides `sandbox` when set.
    pub endpoint: Option<String>,

    /// Whole-request timeout.
    pub request_timeout_secs: u64,

    /// TCP connect timeout.
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            sandbox: true,
            endpoint: None,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    /// Resolved base URL, always with a trailing `/`.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        let raw = match &self.endpoint {
            Some(endpoint) => endpoint.as_str(),
            None if self.sandbox => SANDBOX_ENDPOINT,
            None => PRODUCTION_ENDPOINT,
        };

        if raw.ends_with('/') {
            Url::parse(raw)
        } else {
            Url::parse(&format!("{}/", raw))
        }
    }

    /// Value of the `Authorization` header.
    pub fn auth_header_value(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"<redacted>")
            .field("sandbox", &self.sandbox)
            .field("endpoint", &self.endpoint)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

/// Session defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Chain used when an operation does not name one.
    pub blockchain_type: BlockchainType,

    /// Ask the backend to sponsor gas for transactions.
    pub sponsor_gas: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            blockchain_type: BlockchainType::default(),
            sponsor_gas: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable output.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
