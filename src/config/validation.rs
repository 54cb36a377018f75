//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0)
//! - Check the endpoint is an absolute http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use url::Url;

use crate::config::schema::ClientConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem, keyed by the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check every semantic rule and report all failures.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.api.api_key.trim().is_empty() {
        errors.push(ValidationError::new("api.api_key", "must not be empty"));
    }

    if config.api.request_timeout_secs == 0 {
        errors.push(ValidationError::new("api.request_timeout_secs", "must be greater than 0"));
    }

    if config.api.connect_timeout_secs == 0 {
        errors.push(ValidationError::new("api.connect_timeout_secs", "must be greater than 0"));
    }

    if let Some(endpoint) = &config.api.endpoint {
        match Url::parse(endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
            Ok(url) => errors.push(ValidationError::new(
                "api.endpoint",
                format!("unsupported URL '{}', expected http(s)", url),
            )),
            Err(e) => errors.push(ValidationError::new(
                "api.endpoint",
                format!("invalid URL '{}': {}", endpoint, e),
            )),
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ClientConfig {
        let mut config = ClientConfig::default();
        config.api.api_key = "pk_test".into();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = valid();
        config.api.api_key = "  ".into();
        config.api.request_timeout_secs = 0;
        config.api.connect_timeout_secs = 0;
        config.api.endpoint = Some("not a url".into());
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "api.api_key",
                "api.request_timeout_secs",
                "api.connect_timeout_secs",
                "api.endpoint",
                "observability.log_level",
            ]
        );
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let mut config = valid();
        config.api.endpoint = Some("ftp://example.com/v1/".into());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "api.endpoint");
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let mut config = valid();
        config.observability.log_level = "DEBUG".into();
        assert!(validate_config(&config).is_ok());
    }
}
