//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → ApiConfig → HttpGateway (base URL, bearer token, timeouts)
//!     → SessionConfig → Session defaults
//!     → ObservabilityConfig → init_logging
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError, ConfigResult};
pub use schema::{ApiConfig, ClientConfig, ObservabilityConfig, SessionConfig};
pub use validation::ValidationError;
