//! SHA-256 helpers.
//!
//! The protocol uses exactly one hash function: SHA-256, both for deriving a
//! network id from its passphrase and for the digest that gets signed.

use sha2::{Digest, Sha256};

/// Output length of SHA-256.
pub const HASH_LENGTH: usize = 32;

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; HASH_LENGTH] {
    Sha256::digest(data).into()
}

/// Network id: SHA-256 of the passphrase's UTF-8 bytes.
pub fn network_id(passphrase: &str) -> [u8; HASH_LENGTH] {
    sha256(passphrase.as_bytes())
}
