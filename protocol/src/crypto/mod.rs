//! # Cryptographic Primitives
//!
//! Thin wrappers around audited implementations: `ed25519-dalek` for
//! signatures, `sha2` for hashing, `data-encoding` for the base32 strkey
//! text form. Nothing here is hand-rolled except the CRC16 checksum strkeys
//! require.

pub mod hash;
pub mod keys;
pub mod strkey;

pub use hash::{network_id, sha256};
pub use keys::{signature_hint, verify, KeyPair};
pub use strkey::{StrKeyError, StrKeyKind};
