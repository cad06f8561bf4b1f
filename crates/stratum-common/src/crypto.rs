//! Digest helpers
//!
//! SHA-256 and HMAC-SHA-256 hex digests. The SHA-256 digest of a JWT is
//! what gets persisted for token validation and revocation, never the
//! token itself.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::error::StratumError;

type HmacSha256 = Hmac<Sha256>;

/// SHA-256 of the trimmed UTF-8 input, as lowercase hex.
///
/// Surrounding whitespace is stripped before hashing so that token
/// fingerprints do not vary with incidental whitespace.
pub fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.trim().as_bytes());
    const_hex::encode(digest)
}

/// HMAC-SHA-256 of `data` under `key`, as lowercase hex.
pub fn hmac_sha256_hex(data: &str, key: &str) -> Result<String, StratumError> {
    if key.is_empty() {
        return Err(StratumError::InvalidData("HMAC key is empty".to_string()));
    }
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|e| StratumError::Internal(format!("invalid HMAC key: {e}")))?;
    mac.update(data.as_bytes());
    Ok(const_hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        // SHA-256("abc")
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_trims_whitespace() {
        assert_eq!(sha256_hex("  abc\n"), sha256_hex("abc"));
    }

    #[test]
    fn test_hmac_sha256_known_vector() {
        // RFC 4231 test case 2
        let digest = hmac_sha256_hex("what do ya want for nothing?", "Jefe").unwrap();
        assert_eq!(
            digest,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_hmac_sha256_empty_key() {
        let err = hmac_sha256_hex("data", "").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_hmac_differs_by_key() {
        let a = hmac_sha256_hex("data", "key-a").unwrap();
        let b = hmac_sha256_hex("data", "key-b").unwrap();
        assert_ne!(a, b);
    }
}
