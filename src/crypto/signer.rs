//! Recoverable ECDSA signing over 32-byte digests.
//!
//! Nonces are RFC 6979 deterministic, so signing the same digest with the
//! same key always yields the same signature.

use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};

use crate::crypto::key_material::SecretScalar;
use crate::crypto::types::{CryptoError, CryptoResult, PublicKey, Signature, RECOVERY_ID_OFFSET};

/// Required digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// Sign `digest` with `secret`, producing `r ‖ s ‖ v` with `v = 27 + recovery_id`.
pub fn sign(digest: &[u8], secret: &SecretScalar) -> CryptoResult<Signature> {
    if digest.len() != DIGEST_LEN {
        return Err(CryptoError::DigestLengthError(digest.len()));
    }

    let signing_key = secret.signing_key()?;
    let (signature, recovery_id) = signing_key
        .sign_prehash_recoverable(digest)
        .map_err(|_| CryptoError::SigningFailed)?;

    Ok(Signature::from_parts(
        &signature.to_bytes(),
        RECOVERY_ID_OFFSET + recovery_id.to_byte(),
    ))
}

/// Recover the signer's public key from a digest and signature.
pub fn recover(digest: &[u8], signature: &Signature) -> CryptoResult<PublicKey> {
    if digest.len() != DIGEST_LEN {
        return Err(CryptoError::DigestLengthError(digest.len()));
    }

    let recovery_id = signature
        .v()
        .checked_sub(RECOVERY_ID_OFFSET)
        .and_then(RecoveryId::from_byte)
        .ok_or(CryptoError::InvalidSignature)?;
    let rs = EcdsaSignature::from_slice(&signature.as_bytes()[..64])
        .map_err(|_| CryptoError::InvalidSignature)?;
    let verifying_key = VerifyingKey::recover_from_prehash(digest, &rs, recovery_id)
        .map_err(|_| CryptoError::InvalidSignature)?;

    PublicKey::from_sec1(verifying_key.to_encoded_point(false).as_bytes())
}
