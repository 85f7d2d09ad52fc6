//! Collaborators the client talks to over the network.
//!
//! The protocol crate performs no I/O. A ledger server sits behind these
//! two traits; `lumen-horizon` provides the HTTP implementation and tests
//! use in-memory doubles.

use async_trait::async_trait;

use crate::error::Result;
use crate::transaction::types::Asset;

/// Read access to account state.
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    /// Current sequence number of `account_id`. `Ok(None)` means the server
    /// answered but carried no usable sequence.
    ///
    /// Fails with `MissingAccount`, `Parse` or `Transport`.
    async fn sequence(&self, account_id: &str) -> Result<Option<u64>>;

    /// Balance of `asset` held by `account_id`, in stroops.
    ///
    /// Fails with `MissingAccount`, `MissingBalance`, `Parse` or `Transport`.
    async fn balance(&self, account_id: &str, asset: &Asset) -> Result<i64>;
}

/// Write access: hands a signed envelope to the network.
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Submits the base64 XDR envelope and returns the transaction hash.
    ///
    /// Fails with `ServerRejected` or `Transport`.
    async fn submit(&self, envelope_base64: &str) -> Result<String>;
}
