//! Signature verification for envelopes.
//!
//! Checks run cheapest first: the four-byte hint is compared before any
//! Ed25519 work. A matching hint only selects a candidate key; the
//! signature must still verify against the payload digest.

use thiserror::Error;

use super::envelope::{DecoratedSignature, Transaction, TransactionEnvelope};
use super::types::PublicKey;
use crate::crypto::hash::HASH_LENGTH;
use crate::crypto::keys::{self, SIGNATURE_LENGTH};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("envelope carries no signatures")]
    Unsigned,

    /// The hint does not belong to the key being checked.
    #[error("signature hint {hint} does not match key {account}")]
    HintMismatch { hint: String, account: String },

    #[error("signature {index} is {len} bytes, expected 64")]
    MalformedSignature { index: usize, len: usize },

    #[error("signature {index} does not verify against {account}")]
    InvalidSignature { index: usize, account: String },

    /// The key's bytes are not an Ed25519 curve point.
    #[error("key {account} is not a usable Ed25519 public key")]
    InvalidPublicKey { account: String },

    /// No supplied key matches the signature's hint and verifies it.
    #[error("signature {index} (hint {hint}) matches none of the supplied keys")]
    UnknownSigner { index: usize, hint: String },
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Checks one decorated signature over `tx` against `public_key`.
pub fn verify_signature(
    tx: &Transaction,
    signature: &DecoratedSignature,
    public_key: &PublicKey,
    network_id: &[u8; HASH_LENGTH],
) -> Result<(), VerificationError> {
    check(0, &tx.hash(network_id), signature, public_key)
}

/// Checks every signature in `envelope` against the candidate `signers`.
///
/// Each signature must be produced by some key in `signers` whose hint it
/// carries. Extra signers that signed nothing are fine.
pub fn verify_envelope(
    envelope: &TransactionEnvelope,
    signers: &[PublicKey],
    network_id: &[u8; HASH_LENGTH],
) -> Result<(), VerificationError> {
    if envelope.signatures.is_empty() {
        return Err(VerificationError::Unsigned);
    }
    let digest = envelope.tx.hash(network_id);

    for (index, signature) in envelope.signatures.iter().enumerate() {
        if signature.signature.len() != SIGNATURE_LENGTH {
            return Err(VerificationError::MalformedSignature {
                index,
                len: signature.signature.len(),
            });
        }
        let verified = signers
            .iter()
            .filter(|key| key.signature_hint() == signature.hint)
            .any(|key| check(index, &digest, signature, key).is_ok());
        if !verified {
            return Err(VerificationError::UnknownSigner {
                index,
                hint: hex::encode(signature.hint),
            });
        }
    }
    Ok(())
}

fn check(
    index: usize,
    digest: &[u8; HASH_LENGTH],
    signature: &DecoratedSignature,
    public_key: &PublicKey,
) -> Result<(), VerificationError> {
    if public_key.signature_hint() != signature.hint {
        return Err(VerificationError::HintMismatch {
            hint: hex::encode(signature.hint),
            account: public_key.account_id(),
        });
    }
    if signature.signature.len() != SIGNATURE_LENGTH {
        return Err(VerificationError::MalformedSignature {
            index,
            len: signature.signature.len(),
        });
    }
    if keys::validate_public_key(public_key.as_bytes()).is_err() {
        return Err(VerificationError::InvalidPublicKey {
            account: public_key.account_id(),
        });
    }
    if !keys::verify(public_key.as_bytes(), digest, &signature.signature) {
        return Err(VerificationError::InvalidSignature {
            index,
            account: public_key.account_id(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
