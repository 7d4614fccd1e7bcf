//! Cryptographic hashing utilities for the ledger
//!
//! Provides SHA-256 based hashing used to derive storage cell
//! identities from logical keys.

use sha2::{Digest, Sha256};

/// Computes SHA-256 hash of the input data
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes SHA-256 over several byte slices fed in sequence
///
/// Equivalent to hashing their concatenation without allocating it.
pub fn sha256_parts(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Computes SHA-256 hash and returns it as a hex string
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256() {
        let data = b"hello world";
        let hash = sha256(data);
        assert_eq!(hash.len(), 32);

        // Deterministic
        assert_eq!(sha256(data), sha256(data));

        // Different input, different hash
        assert_ne!(sha256(b"hello world"), sha256(b"hello worlds"));
    }

    #[test]
    fn test_sha256_parts_matches_concatenation() {
        let whole = sha256(b"hello world");
        let parts = sha256_parts(&[b"hello", b" ", b"world"]);
        assert_eq!(whole, parts);
    }

    #[test]
    fn test_sha256_hex() {
        let hex_str = sha256_hex(b"test");
        assert_eq!(hex_str.len(), 64);
        assert!(hex_str.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
