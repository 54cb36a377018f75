//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with player_id / tx_id / blockchain / stage fields
//!     → logging.rs (EnvFilter + fmt or JSON layer)
//!
//! Consumers:
//!     → stdout (human-readable or JSON lines)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - The library never installs a subscriber on its own; binaries call
//!   `init_logging`

pub mod logging;

pub use logging::init_logging;
