//! Transaction signing.
//!
//! Signing is separate from building because the key may live elsewhere
//! (hardware wallet, remote signer). The signed message is never the raw
//! transaction: it is the SHA-256 of the encoded [`SignaturePayload`],
//! which binds the network id into the signature.
//!
//! [`SignaturePayload`]: super::envelope::SignaturePayload

use tracing::debug;

use super::envelope::{DecoratedSignature, SignatureBytes, Transaction, TransactionEnvelope};
use super::types::PublicKey;
use crate::account::Account;
use crate::config::MAX_SIGNATURES;
use crate::crypto::hash::HASH_LENGTH;
use crate::error::{Error, Result};

/// The digest an account signs for `tx` on the network `network_id`.
pub fn hash(tx: &Transaction, network_id: &[u8; HASH_LENGTH]) -> [u8; HASH_LENGTH] {
    tx.hash(network_id)
}

/// Produces a hint-tagged signature over `tx` without wrapping it.
///
/// The hint is the last four bytes of the signer's public key. Signer
/// failures are returned unchanged as [`Error::Signing`]; a signer output
/// longer than 64 bytes is refused as [`crate::xdr::XdrError::TooLong`].
pub fn decorated_signature(
    tx: &Transaction,
    signer: &dyn Account,
    passphrase: &str,
    network_id: &[u8; HASH_LENGTH],
) -> Result<DecoratedSignature> {
    let account_id = signer.public_key().ok_or(Error::MissingPublicKey)?;
    let public_key =
        PublicKey::from_account_id(&account_id).map_err(|_| Error::MissingPublicKey)?;

    let digest = hash(tx, network_id);
    let signature = SignatureBytes::try_from(signer.sign(&digest, passphrase)?)?;
    debug!(signer = %account_id, digest = %hex::encode(digest), "signed transaction");

    Ok(DecoratedSignature {
        hint: public_key.signature_hint(),
        signature,
    })
}

/// Signs `tx` and wraps it in an envelope holding exactly that signature.
///
/// Pure apart from the single call into `signer`.
///
/// ```rust
/// use lumen_protocol::crypto::{network_id, KeyPair};
/// use lumen_protocol::config::TEST_NETWORK_PASSPHRASE;
/// use lumen_protocol::transaction::{factories, sign_transaction, TransactionBuilder};
///
/// let kp = KeyPair::from_seed(&[1u8; 32]);
/// let dest = KeyPair::from_seed(&[2u8; 32]).account_id();
/// let tx = TransactionBuilder::new(kp.public_key(), 1)
///     .add_operation(factories::payment(&dest, 10, None, None).unwrap())
///     .build()
///     .unwrap();
/// let envelope = sign_transaction(&tx, &kp, "", &network_id(TEST_NETWORK_PASSPHRASE)).unwrap();
/// assert_eq!(envelope.signatures.len(), 1);
/// ```
pub fn sign_transaction(
    tx: &Transaction,
    signer: &dyn Account,
    passphrase: &str,
    network_id: &[u8; HASH_LENGTH],
) -> Result<TransactionEnvelope> {
    let signature = decorated_signature(tx, signer, passphrase, network_id)?;
    let mut envelope = TransactionEnvelope::new(tx.clone());
    envelope.add_signature(signature);
    Ok(envelope)
}

/// Adds another signer's signature to an existing envelope, keeping the
/// signatures already present in order.
///
/// Fails with [`Error::TooManySignatures`] once the envelope holds twenty
/// signatures. The signer is not asked to sign in that case.
pub fn add_signature(
    envelope: &mut TransactionEnvelope,
    signer: &dyn Account,
    passphrase: &str,
    network_id: &[u8; HASH_LENGTH],
) -> Result<()> {
    if envelope.signatures.is_full() {
        return Err(Error::TooManySignatures {
            limit: MAX_SIGNATURES,
        });
    }
    let signature = decorated_signature(&envelope.tx, signer, passphrase, network_id)?;
    envelope.add_signature(signature);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
