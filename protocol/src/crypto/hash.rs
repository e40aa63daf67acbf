//! # Hashing Utilities
//!
//! Two hash functions, used for two jobs:
//!
//! - **SHA-256** — the first stage of address derivation and the digest
//!   behind state roots.
//! - **RIPEMD-160** — 20-byte outputs for addresses and transaction IDs.
//!
//! Addresses are `RIPEMD-160(SHA-256(pubkey))`, the familiar "hash160"
//! construction. Transaction IDs are a single RIPEMD-160 over the signable
//! bytes.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use cobalt_protocol::crypto::sha256;
///
/// let hash = sha256(b"cobalt");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash several byte slices as if they were concatenated, without building
/// the concatenation.
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Compute the RIPEMD-160 hash of the input data.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// `RIPEMD-160(SHA-256(data))`. Used to derive addresses from public keys.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        let hash = sha256(b"");
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(hash.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_ripemd160_known_vector() {
        let hash = ripemd160(b"");
        let expected = hex::decode("9c1185a5c5e9fc54612808977ee8f548b2258d31").unwrap();
        assert_eq!(hash.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_ripemd160_abc_vector() {
        let hash = ripemd160(b"abc");
        let expected = hex::decode("8eb208f7e05d987a9b044a8e98c6b087f15a0bfc").unwrap();
        assert_eq!(hash.as_slice(), expected.as_slice());
    }

    #[test]
    fn hash160_is_ripemd_of_sha() {
        let data = b"public key bytes";
        assert_eq!(hash160(data), ripemd160(&sha256(data)));
    }

    #[test]
    fn test_sha256_multi_matches_concatenation() {
        let multi = sha256_multi(&[b"hello", b" world"]);
        assert_eq!(multi, sha256(b"hello world"));
    }

    #[test]
    fn different_inputs_different_hashes() {
        assert_ne!(ripemd160(b"cobalt"), ripemd160(b"Cobalt"));
    }
}
