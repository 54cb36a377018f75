//! Session facade: the composition root handed to the game.
//!
//! # Data Flow
//! ```text
//! social login → LoginResponse (login.rs)
//!     → Session::handle_login → KeyMaterial::install
//!     → get_or_create_wallet → WalletProvisioner
//!     → submit / execute → TransactionPipeline
//!     → get_assets / get_balances / get_transaction → BackendGateway
//!     → every success → EventBus (events.rs) → subscribers
//! logout → Session::handle_logout → KeyMaterial::clear + UserInfo zeroized
//! ```
//!
//! # Design Decisions
//! - The caller owns the `Session`; nothing is looked up from global state
//! - Each call returns its own `Result`; events are a broadcast side channel

pub mod events;
pub mod facade;
pub mod login;

pub use events::{EventBus, SessionEvent};
pub use facade::{Session, SessionError, SessionResult};
pub use login::{LoginResponse, UserInfo};
