//! Validated hex codecs.
//!
//! Every decoder returns a typed error; an empty string is never used as a
//! failure sentinel.

use alloy::primitives::hex;

use crate::crypto::types::{CryptoError, CryptoResult};

/// Number of hex characters in an encoded secret scalar.
pub const SECRET_HEX_LEN: usize = 64;

/// Decode a 64-character hex secret into 32 bytes.
///
/// No `0x` prefix is accepted. Range checks are left to derivation.
pub fn decode_secret(hex_secret: &str) -> CryptoResult<[u8; 32]> {
    if hex_secret.len() != SECRET_HEX_LEN || !hex_secret.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CryptoError::InvalidKeyFormat);
    }

    let mut out = [0u8; 32];
    hex::decode_to_slice(hex_secret, &mut out).map_err(|_| CryptoError::InvalidKeyFormat)?;
    Ok(out)
}

/// Strip an optional `0x`/`0X` prefix.
pub fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// Decode hex with an optional `0x` prefix.
pub fn decode_prefixed(value: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(strip_hex_prefix(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_secret_scalar_one() {
        let encoded = format!("{}1", "0".repeat(63));
        let bytes = decode_secret(&encoded).unwrap();
        assert_eq!(bytes[31], 1);
        assert!(bytes[..31].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_decode_secret_accepts_uppercase() {
        let encoded = "AB".repeat(32);
        assert_eq!(decode_secret(&encoded).unwrap(), [0xab; 32]);
    }

    #[test]
    fn test_decode_secret_rejects_bad_input() {
        let too_short = "a".repeat(63);
        let too_long = "a".repeat(65);
        let prefixed = format!("0x{}", "a".repeat(64));
        let bad_char = format!("{}g", "a".repeat(63));
        let multibyte = format!("{}é", "a".repeat(62));

        for input in ["", too_short.as_str(), too_long.as_str(), prefixed.as_str(), bad_char.as_str(), multibyte.as_str()] {
            assert_eq!(decode_secret(input), Err(CryptoError::InvalidKeyFormat), "input {:?}", input);
        }
    }

    #[test]
    fn test_decode_prefixed() {
        assert_eq!(decode_prefixed("0x0102").unwrap(), vec![1, 2]);
        assert_eq!(decode_prefixed("0102").unwrap(), vec![1, 2]);
        assert!(decode_prefixed("0xzz").is_err());
    }
}
