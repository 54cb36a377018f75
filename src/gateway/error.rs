//! Gateway error taxonomy.

use thiserror::Error;

use crate::gateway::types::{ApiErrorBody, ApiErrorCode};

/// Errors surfaced by a [`BackendGateway`](crate::gateway::BackendGateway).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// No response was received (connect failure, timeout, reset).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a status other than the documented one.
    #[error("backend returned {status}: {message}")]
    Api {
        status: u16,
        /// Raw structured code, preserved verbatim.
        code: Option<String>,
        message: String,
    },

    /// A success status with a body that does not match the expected shape.
    #[error("unparseable response: {0}")]
    Protocol(String),

    /// The gateway could not be constructed from its configuration.
    #[error("invalid gateway configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    /// Build an `Api` error from a non-success status and its raw body.
    ///
    /// A body that is not a structured error keeps its text as the message.
    pub fn from_error_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => GatewayError::Api {
                status,
                code: parsed.code,
                message: parsed.message.unwrap_or_else(|| body.to_string()),
            },
            Err(_) => GatewayError::Api {
                status,
                code: None,
                message: body.to_string(),
            },
        }
    }

    /// The structured backend code, if one was returned.
    pub fn api_code(&self) -> Option<ApiErrorCode> {
        match self {
            GatewayError::Api { code: Some(code), .. } => Some(ApiErrorCode::parse(code)),
            _ => None,
        }
    }

    /// True only for an `Api` error carrying `USER_DOES_NOT_EXIST`.
    pub fn is_user_does_not_exist(&self) -> bool {
        self.api_code() == Some(ApiErrorCode::UserDoesNotExist)
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Network(err.to_string())
    }
}
