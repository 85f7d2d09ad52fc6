// Copyright (c) 2026 Lumen Contributors. MIT License.
// See LICENSE for details.

//! # Lumen Protocol: Core Library
//!
//! Client-side core for the Stellar network: the XDR wire grammar,
//! transaction assembly, signing and the payment/trust flows built on top.
//!
//! ## Architecture
//!
//! - **xdr**: Big-endian, 4-byte aligned primitive codec. Everything on the
//!   wire goes through here.
//! - **transaction**: Keys, assets, memos, operations, envelopes, the
//!   builder, the signing pipeline and verification.
//! - **crypto**: SHA-256, Ed25519 keys and the base32 strkey text form.
//! - **account**: The signing capability callers hand in per account.
//! - **ledger**: Collaborator traits for sequence/balance queries and
//!   submission. `lumen-horizon` implements them over HTTP.
//! - **client**: `StellarClient`: payment, trust and account creation.
//! - **amount**: Decimal amount strings to stroops and back.
//! - **config**: Protocol constants and client configuration.
//! - **error**: One error type with a kind for every failure.
//!
//! ## Design Notes
//!
//! 1. Encoding, building and signing are synchronous and hold no state.
//!    The only suspension points are the ledger collaborators.
//! 2. The network id is fixed per client and read-only after construction.
//! 3. Decoding never guesses: unknown discriminants and over-long lengths
//!    are errors.

pub mod account;
pub mod amount;
pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod ledger;
pub mod transaction;
pub mod xdr;

pub use account::{Account, SigningError};
pub use client::{StellarClient, TrustOutcome};
pub use config::ClientConfig;
pub use error::{Error, ErrorKind, Result};
pub use ledger::{LedgerQuery, Submitter};
