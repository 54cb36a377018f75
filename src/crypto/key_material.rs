//! Session-scoped key material and public key derivation.
//!
//! # Security
//! - The secret is installed from the login response and held only in memory
//! - It is zeroized on `clear()` and on drop
//! - `Debug` output is redacted

use std::fmt;

use k256::ecdsa::SigningKey;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{AffinePoint, FieldBytes, NonZeroScalar, ProjectivePoint, Scalar, U256};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto::codec;
use crate::crypto::types::{CryptoError, CryptoResult, PublicKey};

/// Raw 32-byte secp256k1 secret.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretScalar([u8; 32]);

impl SecretScalar {
    /// Decode a 64-character hex secret. The scalar range is not checked here.
    pub fn from_hex(hex_secret: &str) -> CryptoResult<Self> {
        let mut bytes = codec::decode_secret(hex_secret)?;
        let secret = Self(bytes);
        bytes.zeroize();
        Ok(secret)
    }

    fn field_bytes(&self) -> FieldBytes {
        *FieldBytes::from_slice(&self.0)
    }

    /// The secret as a non-zero scalar, rejecting 0 and values ≥ n.
    pub(crate) fn non_zero_scalar(&self) -> CryptoResult<NonZeroScalar> {
        let mut repr = self.field_bytes();
        let scalar = Option::<NonZeroScalar>::from(NonZeroScalar::from_repr(repr));
        repr.as_mut_slice().zeroize();
        scalar.ok_or(CryptoError::InvalidScalar)
    }

    pub(crate) fn signing_key(&self) -> CryptoResult<SigningKey> {
        let mut repr = self.field_bytes();
        let key = SigningKey::from_bytes(&repr).map_err(|_| CryptoError::InvalidScalar);
        repr.as_mut_slice().zeroize();
        key
    }

    /// Derive the uncompressed public key, blinding the generator
    /// multiplication with 32 bytes drawn from `rng`.
    pub fn derive_public_key_with<R>(&self, rng: &mut R) -> CryptoResult<PublicKey>
    where
        R: RngCore + CryptoRng,
    {
        let mut seed = Zeroizing::new([0u8; 32]);
        rng.try_fill_bytes(seed.as_mut())
            .map_err(|_| CryptoError::EntropyUnavailable)?;

        let scalar = Zeroizing::new(self.non_zero_scalar()?);
        let blinding = Zeroizing::new(<Scalar as Reduce<U256>>::reduce_bytes(FieldBytes::from_slice(
            seed.as_ref(),
        )));
        let sum = Zeroizing::new(**scalar + *blinding);

        // (d + b)·G − b·G = d·G
        let blinded = ProjectivePoint::GENERATOR * *sum;
        let point = AffinePoint::from(blinded - ProjectivePoint::GENERATOR * *blinding);

        PublicKey::from_sec1(point.to_encoded_point(false).as_bytes())
    }
}

impl fmt::Debug for SecretScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretScalar(<redacted>)")
    }
}

/// Owner of the session's secret for the lifetime of a login.
#[derive(Debug, Default)]
pub struct KeyMaterial {
    secret: Option<SecretScalar>,
}

impl KeyMaterial {
    /// Empty key material (logged out).
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a hex-encoded secret, replacing (and zeroizing) any previous one.
    pub fn install(&mut self, hex_secret: &str) -> CryptoResult<()> {
        let secret = SecretScalar::from_hex(hex_secret)?;
        self.clear();
        self.secret = Some(secret);
        Ok(())
    }

    pub fn is_installed(&self) -> bool {
        self.secret.is_some()
    }

    /// Borrow the installed secret.
    pub fn secret(&self) -> CryptoResult<&SecretScalar> {
        self.secret.as_ref().ok_or(CryptoError::KeyNotInstalled)
    }

    /// Derive the public key using the operating system RNG for blinding.
    pub fn derive_public_key(&self) -> CryptoResult<PublicKey> {
        self.secret()?.derive_public_key_with(&mut OsRng)
    }

    /// Overwrite the secret with zeros and drop it. Idempotent.
    pub fn clear(&mut self) {
        if let Some(mut secret) = self.secret.take() {
            secret.zeroize();
        }
    }
}
