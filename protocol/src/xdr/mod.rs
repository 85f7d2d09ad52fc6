//! # XDR Codec
//!
//! The External Data Representation primitives the Stellar wire protocol is
//! built from. Domain types in [`crate::transaction`] implement
//! [`XdrEncode`] / [`XdrDecode`] by sequencing the primitives here.
//!
//! ```text
//! codec.rs    XdrWriter / XdrReader, the encode/decode traits, integer impls
//! bounded.rs  BoundedVec / BoundedString / BoundedBytes for capped fields
//! error.rs    XdrError, the codec failure taxonomy
//! ```

pub mod bounded;
pub mod codec;
pub mod error;

pub use bounded::{BoundedBytes, BoundedString, BoundedVec};
pub use codec::{padding_for, XdrDecode, XdrEncode, XdrReader, XdrWriter};
pub use error::XdrError;
