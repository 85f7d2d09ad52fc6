//! # Transaction Module
//!
//! The ledger's transaction grammar and everything needed to get a
//! transaction from values to a signed, submittable envelope.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        PublicKey, SignerKey, Asset, Price, Memo, TimeBounds
//! operation.rs    Operation and its eleven body variants
//! envelope.rs     Transaction, SignaturePayload, DecoratedSignature, TransactionEnvelope
//! builder.rs      TransactionBuilder and the ledger-backed build_transaction
//! signing.rs      Payload hashing and signing through an Account
//! verification.rs Hint matching and Ed25519 checks on envelopes
//! factories.rs    Shorthand constructors for common operations
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build** with [`TransactionBuilder`] or [`build_transaction`].
//! 2. **Sign** with [`sign_transaction`], adding co-signers with
//!    [`add_signature`].
//! 3. **Encode** with [`TransactionEnvelope::to_base64`] and submit.
//!
//! Every type here encodes through [`crate::xdr`]. Field order and union
//! discriminants are part of the network protocol and must not change.
//! Length-capped fields (memo text, operations, signatures, paths, home
//! domain, data entries) hold [`crate::xdr::BoundedVec`] and friends, so a
//! value over its cap is refused when built rather than when read back.

pub mod builder;
pub mod envelope;
pub mod factories;
pub mod operation;
pub mod signing;
pub mod types;
pub mod verification;

pub use builder::{build_transaction, TransactionBuilder};
pub use envelope::{
    DecoratedSignature, Operations, SignatureBytes, SignaturePayload, Signatures,
    TaggedTransaction, Transaction, TransactionEnvelope, TransactionExt,
};
pub use operation::{
    DataName, DataValue, HomeDomain, Operation, OperationBody, OperationType, PaymentPath,
};
pub use signing::{add_signature, hash, sign_transaction};
pub use types::{
    Asset, Memo, MemoText, Price, PublicKey, Signer, SignerKey, TimeBounds, TypeError,
};
pub use verification::{verify_envelope, verify_signature, VerificationError};
