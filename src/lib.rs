//! Player Wallet Core Library

pub mod config;
pub mod crypto;
pub mod gateway;
pub mod observability;
pub mod session;
pub mod transaction;
pub mod wallet;

pub use config::schema::ClientConfig;
pub use crypto::KeyMaterial;
pub use gateway::{BackendGateway, BlockchainType, HttpGateway};
pub use session::{Session, SessionEvent};
pub use transaction::{TransactionPipeline, TransactionRequest};
pub use wallet::WalletProvisioner;
