//! Transaction construction.
//!
//! [`TransactionBuilder`] assembles a [`Transaction`] from values the caller
//! already has. [`build_transaction`] is the networked variant: it resolves
//! the source key from an [`Account`] and, unless told otherwise, fetches
//! the next sequence number from the ledger.
//!
//! The builder does not sign. That happens in [`super::signing`].

use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use super::envelope::{Operations, Transaction, TransactionExt};
use super::operation::Operation;
use super::types::{Memo, PublicKey, TimeBounds, TypeError};
use crate::account::Account;
use crate::config::BASE_FEE;
use crate::error::{Error, Result};
use crate::ledger::LedgerQuery;

/// Fluent builder for an unsigned [`Transaction`].
///
/// ```rust
/// use lumen_protocol::crypto::KeyPair;
/// use lumen_protocol::transaction::{factories, TransactionBuilder};
///
/// let source = KeyPair::from_seed(&[1u8; 32]).public_key();
/// let dest = KeyPair::from_seed(&[2u8; 32]).account_id();
/// let tx = TransactionBuilder::new(source, 5)
///     .add_operation(factories::payment(&dest, 100, None, None).unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(tx.fee, 100);
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    source: PublicKey,
    sequence: u64,
    base_fee: u32,
    memo: Memo,
    time_bounds: Option<TimeBounds>,
    operations: Vec<Operation>,
}

impl TransactionBuilder {
    /// Starts a transaction for `source` carrying sequence number
    /// `sequence`, which must already be the account's current value plus
    /// one. The base fee defaults to [`BASE_FEE`].
    pub fn new(source: PublicKey, sequence: u64) -> Self {
        Self {
            source,
            sequence,
            base_fee: BASE_FEE,
            memo: Memo::None,
            time_bounds: None,
            operations: Vec::new(),
        }
    }

    /// Fee per operation in stroops.
    pub fn base_fee(mut self, base_fee: u32) -> Self {
        self.base_fee = base_fee;
        self
    }

    pub fn memo(mut self, memo: Memo) -> Self {
        self.memo = memo;
        self
    }

    pub fn time_bounds(mut self, time_bounds: TimeBounds) -> Self {
        self.time_bounds = Some(time_bounds);
        self
    }

    /// Makes the transaction invalid `timeout` after now (UTC).
    pub fn timeout(self, timeout: Duration) -> Self {
        let now = Utc::now().timestamp().max(0) as u64;
        self.time_bounds(TimeBounds {
            min_time: 0,
            max_time: now.saturating_add(timeout.as_secs()),
        })
    }

    pub fn add_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn operations(mut self, operations: impl IntoIterator<Item = Operation>) -> Self {
        self.operations.extend(operations);
        self
    }

    /// Produces the transaction. The fee is `base_fee` times the number of
    /// operations.
    pub fn build(self) -> std::result::Result<Transaction, TypeError> {
        let count = self.operations.len();
        if count == 0 {
            return Err(TypeError::OperationCount(count));
        }
        let operations =
            Operations::try_from(self.operations).map_err(|_| TypeError::OperationCount(count))?;
        let fee = self.base_fee.saturating_mul(count as u32);

        Ok(Transaction {
            source_account: self.source,
            fee,
            seq_num: self.sequence,
            time_bounds: self.time_bounds,
            memo: self.memo,
            operations,
            ext: TransactionExt::V0,
        })
    }
}

/// Builds a transaction for `account`.
///
/// A caller-supplied `sequence` greater than zero is used as-is. Otherwise
/// the ledger is asked once for the account's sequence and the result plus
/// one is used.
///
/// # Errors
///
/// - `MissingPublicKey` if `account` has no key or its key does not parse.
/// - Whatever the ledger returned, unchanged, if the lookup fails.
/// - `MissingSequence` if the lookup succeeds without a usable value.
pub async fn build_transaction<L>(
    ledger: &L,
    account: &dyn Account,
    operations: Vec<Operation>,
    sequence: Option<u64>,
    base_fee: u32,
) -> Result<Transaction>
where
    L: LedgerQuery + ?Sized,
{
    let account_id = account.public_key().ok_or(Error::MissingPublicKey)?;
    let source =
        PublicKey::from_account_id(&account_id).map_err(|_| Error::MissingPublicKey)?;

    let sequence = match sequence.filter(|seq| *seq > 0) {
        Some(seq) => seq,
        None => ledger
            .sequence(&account_id)
            .await?
            .and_then(|current| current.checked_add(1))
            .ok_or_else(|| Error::MissingSequence(account_id.clone()))?,
    };
    debug!(account = %account_id, sequence, ops = operations.len(), "building transaction");

    Ok(TransactionBuilder::new(source, sequence)
        .base_fee(base_fee)
        .operations(operations)
        .build()?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::SigningError;
    use crate::config::MAX_OPERATIONS;
    use crate::crypto::keys::KeyPair;
    use crate::error::ErrorKind;
    use crate::transaction::operation::OperationBody;
    use crate::transaction::types::Asset;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Ledger double returning a fixed sequence answer and counting calls.
    struct StubLedger {
        answer: fn(&str) -> Result<Option<u64>>,
        calls: AtomicUsize,
    }

    impl StubLedger {
        fn new(answer: fn(&str) -> Result<Option<u64>>) -> Self {
            Self {
                answer,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LedgerQuery for StubLedger {
        async fn sequence(&self, account_id: &str) -> Result<Option<u64>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.answer)(account_id)
        }

        async fn balance(&self, account_id: &str, _asset: &Asset) -> Result<i64> {
            Err(Error::MissingAccount(account_id.to_string()))
        }
    }

    struct Keyless;

    impl Account for Keyless {
        fn public_key(&self) -> Option<String> {
            None
        }

        fn sign(
            &self,
            _digest: &[u8; 32],
            _passphrase: &str,
        ) -> std::result::Result<Vec<u8>, SigningError> {
            Err(SigningError::Rejected("no key".into()))
        }
    }

    fn inflation() -> Operation {
        Operation::new(OperationBody::Inflation)
    }

    #[test]
    fn fee_scales_with_operation_count() {
        let source = KeyPair::from_seed(&[1u8; 32]).public_key();
        let tx = TransactionBuilder::new(source, 9)
            .base_fee(200)
            .operations(vec![inflation(), inflation(), inflation()])
            .build()
            .unwrap();
        assert_eq!(tx.fee, 600);
        assert_eq!(tx.seq_num, 9);
        assert_eq!(tx.memo, Memo::None);
        assert!(tx.time_bounds.is_none());
    }

    #[test]
    fn rejects_empty_and_oversized_operation_lists() {
        let source = KeyPair::from_seed(&[1u8; 32]).public_key();
        assert_eq!(
            TransactionBuilder::new(source, 1).build(),
            Err(TypeError::OperationCount(0))
        );
        let too_many = TransactionBuilder::new(source, 1)
            .operations(std::iter::repeat_with(inflation).take(MAX_OPERATIONS + 1))
            .build();
        assert_eq!(too_many, Err(TypeError::OperationCount(MAX_OPERATIONS + 1)));
    }

    #[test]
    fn timeout_sets_upper_bound_from_now() {
        let source = KeyPair::from_seed(&[1u8; 32]).public_key();
        let before = Utc::now().timestamp() as u64;
        let tx = TransactionBuilder::new(source, 1)
            .timeout(Duration::from_secs(30))
            .add_operation(inflation())
            .build()
            .unwrap();
        let bounds = tx.time_bounds.unwrap();
        assert_eq!(bounds.min_time, 0);
        assert!(bounds.max_time >= before + 30);
        assert!(bounds.max_time <= Utc::now().timestamp() as u64 + 30);
    }

    #[tokio::test]
    async fn explicit_sequence_skips_lookup() {
        let ledger = StubLedger::new(|_| Ok(Some(41)));
        let kp = KeyPair::from_seed(&[1u8; 32]);
        let tx = build_transaction(&ledger, &kp, vec![inflation()], Some(7), 100)
            .await
            .unwrap();
        assert_eq!(tx.seq_num, 7);
        assert_eq!(ledger.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fetched_sequence_is_incremented() {
        let ledger = StubLedger::new(|_| Ok(Some(41)));
        let kp = KeyPair::from_seed(&[1u8; 32]);
        for sequence in [None, Some(0)] {
            let tx = build_transaction(&ledger, &kp, vec![inflation()], sequence, 100)
                .await
                .unwrap();
            assert_eq!(tx.seq_num, 42);
            assert_eq!(tx.source_account, kp.public_key());
        }
        assert_eq!(ledger.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn keyless_account_is_missing_public_key() {
        let ledger = StubLedger::new(|_| Ok(Some(1)));
        let err = build_transaction(&ledger, &Keyless, vec![inflation()], Some(3), 100)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingPublicKey);
    }

    #[tokio::test]
    async fn lookup_errors_pass_through() {
        let ledger = StubLedger::new(|id| Err(Error::MissingAccount(id.to_string())));
        let kp = KeyPair::from_seed(&[1u8; 32]);
        let err = build_transaction(&ledger, &kp, vec![inflation()], None, 100)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingAccount);
        assert_eq!(ledger.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_lookup_is_missing_sequence() {
        let ledger = StubLedger::new(|_| Ok(None));
        let kp = KeyPair::from_seed(&[1u8; 32]);
        let err = build_transaction(&ledger, &kp, vec![inflation()], None, 100)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingSequence);
    }
}
