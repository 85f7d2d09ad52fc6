//! Transactions, signature payloads and envelopes.
//!
//! The signed message is never the transaction's fields directly. It is the
//! SHA-256 of the encoded [`SignaturePayload`]: network id, the
//! `ENVELOPE_TYPE_TX` tag, then the encoded transaction. Binding the network
//! id into the digest keeps a testnet signature from being replayed on the
//! public network.

use crate::config::{ENVELOPE_TYPE_TX, MAX_OPERATIONS, MAX_SIGNATURES, MAX_SIGNATURE_LENGTH};
use crate::crypto::hash::{sha256, HASH_LENGTH};
use crate::xdr::{BoundedBytes, BoundedVec, XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

use super::operation::Operation;
use super::types::{Memo, PublicKey, TimeBounds};

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// The operations of one transaction, at most 100.
pub type Operations = BoundedVec<Operation, MAX_OPERATIONS>;

/// Raw signature bytes, at most 64.
pub type SignatureBytes = BoundedBytes<MAX_SIGNATURE_LENGTH>;

/// The signatures of one envelope, at most 20.
pub type Signatures = BoundedVec<DecoratedSignature, MAX_SIGNATURES>;

/// Reserved extension point; only version 0 exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionExt {
    #[default]
    V0,
}

impl XdrEncode for TransactionExt {
    fn encode(&self, w: &mut XdrWriter) {
        match self {
            TransactionExt::V0 => w.write_discriminant(0),
        }
    }
}

impl XdrDecode for TransactionExt {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            0 => Ok(TransactionExt::V0),
            other => Err(r.unknown_variant("TransactionExt", other)),
        }
    }
}

/// A transaction as submitted to the network.
///
/// `seq_num` must be the source account's current sequence plus one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub source_account: PublicKey,
    /// Total fee in stroops.
    pub fee: u32,
    pub seq_num: u64,
    pub time_bounds: Option<TimeBounds>,
    pub memo: Memo,
    pub operations: Operations,
    pub ext: TransactionExt,
}

impl Transaction {
    /// The payload whose hash gets signed on the given network.
    pub fn signature_payload(&self, network_id: &[u8; HASH_LENGTH]) -> SignaturePayload {
        SignaturePayload {
            network_id: *network_id,
            tagged_transaction: TaggedTransaction::Tx(self.clone()),
        }
    }

    /// SHA-256 of the encoded signature payload: the digest signers sign
    /// and the transaction hash Horizon reports.
    pub fn hash(&self, network_id: &[u8; HASH_LENGTH]) -> [u8; HASH_LENGTH] {
        self.signature_payload(network_id).hash()
    }

    pub fn hash_hex(&self, network_id: &[u8; HASH_LENGTH]) -> String {
        hex::encode(self.hash(network_id))
    }
}

impl XdrEncode for Transaction {
    fn encode(&self, w: &mut XdrWriter) {
        self.source_account.encode(w);
        w.write_u32(self.fee);
        w.write_u64(self.seq_num);
        w.write_optional(self.time_bounds.as_ref());
        self.memo.encode(w);
        self.operations.encode(w);
        self.ext.encode(w);
    }
}

impl XdrDecode for Transaction {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            source_account: PublicKey::decode(r)?,
            fee: r.read_u32()?,
            seq_num: r.read_u64()?,
            time_bounds: r.read_optional()?,
            memo: Memo::decode(r)?,
            operations: Operations::decode(r)?,
            ext: TransactionExt::decode(r)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Signature payload
// ---------------------------------------------------------------------------

/// What a signature payload wraps. Only plain transactions are signed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggedTransaction {
    Tx(Transaction),
}

impl XdrEncode for TaggedTransaction {
    fn encode(&self, w: &mut XdrWriter) {
        match self {
            TaggedTransaction::Tx(tx) => {
                w.write_discriminant(ENVELOPE_TYPE_TX);
                tx.encode(w);
            }
        }
    }
}

impl XdrDecode for TaggedTransaction {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            ENVELOPE_TYPE_TX => Ok(TaggedTransaction::Tx(Transaction::decode(r)?)),
            other => Err(r.unknown_variant("EnvelopeType", other)),
        }
    }
}

/// Built only to be hashed; never stored or sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePayload {
    pub network_id: [u8; HASH_LENGTH],
    pub tagged_transaction: TaggedTransaction,
}

impl SignaturePayload {
    /// Encode first, then hash the encoded bytes.
    pub fn hash(&self) -> [u8; HASH_LENGTH] {
        sha256(&self.to_xdr())
    }
}

impl XdrEncode for SignaturePayload {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_fixed_opaque(&self.network_id);
        self.tagged_transaction.encode(w);
    }
}

impl XdrDecode for SignaturePayload {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            network_id: r.read_fixed_opaque()?,
            tagged_transaction: TaggedTransaction::decode(r)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// A signature tagged with the signer's hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratedSignature {
    /// Last four bytes of the signer's public key. An index, not a check.
    pub hint: [u8; 4],
    pub signature: SignatureBytes,
}

impl XdrEncode for DecoratedSignature {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_fixed_opaque(&self.hint);
        self.signature.encode(w);
    }
}

impl XdrDecode for DecoratedSignature {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            hint: r.read_fixed_opaque()?,
            signature: SignatureBytes::decode(r)?,
        })
    }
}

/// A transaction with its signatures, the unit submitted to Horizon.
/// Signature order is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEnvelope {
    pub tx: Transaction,
    pub signatures: Signatures,
}

impl TransactionEnvelope {
    pub fn new(tx: Transaction) -> Self {
        Self {
            tx,
            signatures: Signatures::new(),
        }
    }

    /// Appends a signature, keeping existing ones in order. Returns `false`
    /// once the envelope already holds the maximum of twenty.
    pub fn add_signature(&mut self, signature: DecoratedSignature) -> bool {
        self.signatures.push(signature).is_ok()
    }

    /// XDR, then base64: the `tx` form field Horizon expects.
    pub fn to_base64(&self) -> String {
        self.to_xdr_base64()
    }

    pub fn from_base64(encoded: &str) -> Result<Self, XdrError> {
        Self::from_xdr_base64(encoded)
    }
}

impl XdrEncode for TransactionEnvelope {
    fn encode(&self, w: &mut XdrWriter) {
        self.tx.encode(w);
        self.signatures.encode(w);
    }
}

impl XdrDecode for TransactionEnvelope {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            tx: Transaction::decode(r)?,
            signatures: Signatures::decode(r)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
