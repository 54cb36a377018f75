//! Wallet provisioning.
//!
//! # Data Flow
//! ```text
//! Session::get_or_create_wallet(player_id, blockchain)
//!     → WalletProvisioner (provisioner.rs)
//!         → BackendGateway::get_wallets
//!         → KeyMaterial::derive_public_key → get_address_from_public_key
//!         → BackendGateway::create_account
//!         → BackendGateway::get_wallets (revalidate)
//!     ← Wallet | ProvisionError {step, source}
//! ```

pub mod provisioner;

pub use provisioner::{
    ProvisionError, ProvisionFailure, ProvisionResult, ProvisionStep, WalletProvisioner,
};
