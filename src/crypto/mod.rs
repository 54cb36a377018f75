//! Session key material and recoverable secp256k1 signing.
//!
//! # Data Flow
//! ```text
//! login response (hex private key)
//!     → codec.rs (validated hex decoding)
//!     → key_material.rs (SecretScalar owned for the session, public key derivation)
//!     → signer.rs (digest + secret → r ‖ s ‖ v)
//!     → logout: KeyMaterial::clear() zeroizes the scalar
//! ```
//!
//! # Security Constraints
//! - The secret scalar is never logged, serialized, or returned
//! - Entropy failures are hard errors, never skipped
//! - `v` is always `27 + recovery_id`; no chain-id offset is applied

pub mod codec;
pub mod key_material;
pub mod signer;
pub mod types;

pub use key_material::{KeyMaterial, SecretScalar};
pub use signer::{recover, sign};
pub use types::{CryptoError, CryptoResult, PublicKey, Signature};
