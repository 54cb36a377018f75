//! Key, signature and error types for the crypto subsystem.

use std::fmt;

use alloy::primitives::hex;
use thiserror::Error;

/// Length of an uncompressed SEC1 public key (`0x04 ‖ X ‖ Y`).
pub const PUBLIC_KEY_LEN: usize = 65;

/// Length of a recoverable signature (`r ‖ s ‖ v`).
pub const SIGNATURE_LEN: usize = 65;

/// Offset added to the native recovery id to produce `v`.
pub const RECOVERY_ID_OFFSET: u8 = 27;

/// Errors raised by key handling and signing.
///
/// None of the variants carry key bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Secret was not exactly 64 hexadecimal characters.
    #[error("secret key must be exactly 64 hexadecimal characters")]
    InvalidKeyFormat,

    /// Secret decodes to zero or to a value not below the curve order.
    #[error("secret key is not a valid secp256k1 scalar")]
    InvalidScalar,

    /// The platform RNG could not supply blinding entropy.
    #[error("platform entropy source unavailable")]
    EntropyUnavailable,

    /// Digest handed to the signer was not 32 bytes.
    #[error("digest must be 32 bytes, got {0}")]
    DigestLengthError(usize),

    /// No key material is installed (logged out).
    #[error("no key material installed for this session")]
    KeyNotInstalled,

    /// A signature could not be parsed or recovered.
    #[error("malformed recoverable signature")]
    InvalidSignature,

    /// The ECDSA backend rejected the signing request.
    #[error("signing failed")]
    SigningFailed,
}

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Uncompressed secp256k1 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Wrap a SEC1 uncompressed encoding.
    pub fn from_sec1(bytes: &[u8]) -> CryptoResult<Self> {
        let raw: [u8; PUBLIC_KEY_LEN] = bytes.try_into().map_err(|_| CryptoError::InvalidSignature)?;
        if raw[0] != 0x04 {
            return Err(CryptoError::InvalidSignature);
        }
        Ok(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// 130 lowercase hex characters, no `0x` prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

/// Recoverable ECDSA signature: `r(32) ‖ s(32) ‖ v(1)` with `v ∈ {27, 28}`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    pub(crate) fn from_parts(rs: &[u8], v: u8) -> Self {
        let mut raw = [0u8; SIGNATURE_LEN];
        raw[..64].copy_from_slice(rs);
        raw[64] = v;
        Self(raw)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    pub fn r(&self) -> &[u8] {
        &self.0[..32]
    }

    pub fn s(&self) -> &[u8] {
        &self.0[32..64]
    }

    pub fn v(&self) -> u8 {
        self.0[64]
    }

    /// `0x`-prefixed hex, the form placed in `signed_tx.signature`.
    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(self.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature").field("v", &self.v()).finish_non_exhaustive()
    }
}
