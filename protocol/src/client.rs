//! High-level client flows: payment, trust, account creation.
//!
//! [`StellarClient`] owns a [`ClientConfig`] and a ledger collaborator. The
//! network id is derived once at construction and never changes, so one
//! client can serve any number of concurrent calls.
//!
//! Payment and trust look up the destination's balance before building
//! anything. A missing account or trust line found by that lookup is reported
//! as [`Error::DestinationNotReadyForAsset`] with the lookup error kept as
//! its cause, and nothing is submitted.

use tracing::{info, warn};

use crate::account::Account;
use crate::config::ClientConfig;
use crate::crypto::hash::{network_id, HASH_LENGTH};
use crate::error::{Error, ErrorKind, Result};
use crate::ledger::{LedgerQuery, Submitter};
use crate::transaction::envelope::{Transaction, TransactionEnvelope};
use crate::transaction::operation::Operation;
use crate::transaction::types::Asset;
use crate::transaction::{builder, factories, signing};

/// Result of [`StellarClient::trust`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustOutcome {
    /// The account already holds the asset; no transaction was sent.
    AlreadyTrusted,
    /// A trust line was requested; carries the transaction hash.
    Submitted(String),
}

pub struct StellarClient<L> {
    config: ClientConfig,
    network_id: [u8; HASH_LENGTH],
    ledger: L,
}

impl<L> StellarClient<L>
where
    L: LedgerQuery + Submitter,
{
    pub fn new(config: ClientConfig, ledger: L) -> Self {
        let network_id = network_id(&config.network_passphrase);
        Self {
            config,
            network_id,
            ledger,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// SHA-256 of the configured network passphrase.
    pub fn network_id(&self) -> &[u8; HASH_LENGTH] {
        &self.network_id
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Current sequence number of `account_id`.
    pub async fn sequence(&self, account_id: &str) -> Result<u64> {
        self.ledger
            .sequence(account_id)
            .await?
            .ok_or_else(|| Error::MissingSequence(account_id.to_string()))
    }

    /// Balance in stroops; `asset` defaults to the configured asset.
    pub async fn balance(&self, account_id: &str, asset: Option<&Asset>) -> Result<i64> {
        let asset = asset.unwrap_or(&self.config.default_asset);
        self.ledger.balance(account_id, asset).await
    }

    /// Builds a transaction at the configured base fee. See
    /// [`builder::build_transaction`] for the sequence rules.
    pub async fn build_transaction(
        &self,
        account: &dyn Account,
        operations: Vec<Operation>,
        sequence: Option<u64>,
    ) -> Result<Transaction> {
        builder::build_transaction(
            &self.ledger,
            account,
            operations,
            sequence,
            self.config.base_fee,
        )
        .await
    }

    /// Signs `tx` for this client's network.
    pub fn sign(
        &self,
        tx: &Transaction,
        account: &dyn Account,
        passphrase: &str,
    ) -> Result<TransactionEnvelope> {
        signing::sign_transaction(tx, account, passphrase, &self.network_id)
    }

    /// Submits a signed envelope and returns the transaction hash.
    pub async fn submit(&self, envelope: &TransactionEnvelope) -> Result<String> {
        let hash = self.ledger.submit(&envelope.to_base64()).await?;
        info!(hash = %hash, seq = envelope.tx.seq_num, "transaction submitted");
        Ok(hash)
    }

    /// Funds `destination` with `starting_balance` stroops from `funder`.
    pub async fn create_account(
        &self,
        funder: &dyn Account,
        passphrase: &str,
        destination: &str,
        starting_balance: i64,
    ) -> Result<String> {
        let operation = factories::create_account(destination, starting_balance, None)?;
        self.execute(funder, passphrase, vec![operation]).await
    }

    /// Pays `amount` stroops of `asset` (the configured default when `None`)
    /// to `destination`.
    pub async fn payment(
        &self,
        from: &dyn Account,
        passphrase: &str,
        destination: &str,
        amount: i64,
        asset: Option<Asset>,
    ) -> Result<String> {
        let asset = asset.unwrap_or_else(|| self.config.default_asset.clone());
        self.ensure_ready(destination, &asset).await?;

        let operation = factories::payment(destination, amount, Some(asset), None)?;
        self.execute(from, passphrase, vec![operation]).await
    }

    /// Makes `account` trust `asset`.
    ///
    /// Returns [`TrustOutcome::AlreadyTrusted`] without sending anything
    /// when the account already holds a balance in the asset.
    pub async fn trust(
        &self,
        account: &dyn Account,
        passphrase: &str,
        asset: Asset,
        limit: Option<i64>,
    ) -> Result<TrustOutcome> {
        let account_id = account.public_key().ok_or(Error::MissingPublicKey)?;

        match self.ledger.balance(&account_id, &asset).await {
            Ok(_) => {
                info!(account = %account_id, asset = %asset, "trust line already present");
                Ok(TrustOutcome::AlreadyTrusted)
            }
            Err(err) if err.kind() == ErrorKind::MissingBalance => {
                let operation = factories::change_trust(asset, limit, None)?;
                let hash = self.execute(account, passphrase, vec![operation]).await?;
                Ok(TrustOutcome::Submitted(hash))
            }
            Err(err) => Err(not_ready(&account_id, &asset, err)),
        }
    }

    async fn ensure_ready(&self, destination: &str, asset: &Asset) -> Result<()> {
        match self.ledger.balance(destination, asset).await {
            Ok(_) => Ok(()),
            Err(err) => Err(not_ready(destination, asset, err)),
        }
    }

    async fn execute(
        &self,
        account: &dyn Account,
        passphrase: &str,
        operations: Vec<Operation>,
    ) -> Result<String> {
        let tx = self.build_transaction(account, operations, None).await?;
        let envelope = self.sign(&tx, account, passphrase)?;
        self.submit(&envelope).await
    }
}

/// Reinterprets a failed destination lookup. Only missing-account and
/// missing-balance are rewritten; everything else passes through.
fn not_ready(destination: &str, asset: &Asset, err: Error) -> Error {
    match err.kind() {
        ErrorKind::MissingAccount | ErrorKind::MissingBalance => {
            warn!(destination, asset = %asset, cause = %err, "destination not ready");
            Error::DestinationNotReadyForAsset {
                destination: destination.to_string(),
                asset: asset.to_string(),
                cause: Box::new(err),
            }
        }
        _ => err,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::SigningError;
    use crate::config::TEST_NETWORK_PASSPHRASE;
    use crate::crypto::keys::KeyPair;
    use crate::transaction::operation::OperationBody;
    use crate::transaction::types::PublicKey;
    use crate::transaction::verification::verify_envelope;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory ledger: accounts with a sequence and per-asset balances.
    #[derive(Default)]
    struct MockLedger {
        accounts: HashMap<String, (u64, HashMap<String, i64>)>,
        submitted: Mutex<Vec<String>>,
        transport_down: bool,
    }

    impl MockLedger {
        fn with_account(mut self, id: &str, seq: u64, balances: &[(&Asset, i64)]) -> Self {
            let balances = balances
                .iter()
                .map(|(asset, amount)| (asset.to_string(), *amount))
                .collect();
            self.accounts.insert(id.to_string(), (seq, balances));
            self
        }

        fn submitted(&self) -> Vec<TransactionEnvelope> {
            self.submitted
                .lock()
                .unwrap()
                .iter()
                .map(|b64| TransactionEnvelope::from_base64(b64).unwrap())
                .collect()
        }
    }

    #[async_trait]
    impl LedgerQuery for MockLedger {
        async fn sequence(&self, account_id: &str) -> Result<Option<u64>> {
            if self.transport_down {
                return Err(Error::Transport("connection refused".into()));
            }
            self.accounts
                .get(account_id)
                .map(|(seq, _)| Some(*seq))
                .ok_or_else(|| Error::MissingAccount(account_id.to_string()))
        }

        async fn balance(&self, account_id: &str, asset: &Asset) -> Result<i64> {
            if self.transport_down {
                return Err(Error::Transport("connection refused".into()));
            }
            let (_, balances) = self
                .accounts
                .get(account_id)
                .ok_or_else(|| Error::MissingAccount(account_id.to_string()))?;
            balances
                .get(&asset.to_string())
                .copied()
                .ok_or_else(|| Error::missing_balance(account_id, asset))
        }
    }

    #[async_trait]
    impl Submitter for MockLedger {
        async fn submit(&self, envelope_base64: &str) -> Result<String> {
            let envelope = TransactionEnvelope::from_base64(envelope_base64)?;
            self.submitted
                .lock()
                .unwrap()
                .push(envelope_base64.to_string());
            Ok(envelope
                .tx
                .hash_hex(&network_id(TEST_NETWORK_PASSPHRASE)))
        }
    }

    struct Locked(KeyPair);

    impl Account for Locked {
        fn public_key(&self) -> Option<String> {
            Some(self.0.account_id())
        }

        fn sign(
            &self,
            _digest: &[u8; 32],
            _passphrase: &str,
        ) -> std::result::Result<Vec<u8>, SigningError> {
            Err(SigningError::WrongPassphrase)
        }
    }

    fn alice() -> KeyPair {
        KeyPair::from_seed(&[1u8; 32])
    }

    fn bob() -> KeyPair {
        KeyPair::from_seed(&[2u8; 32])
    }

    fn usd() -> Asset {
        let issuer = KeyPair::from_seed(&[3u8; 32]).public_key();
        Asset::credit("USD", issuer).unwrap()
    }

    fn client(ledger: MockLedger) -> StellarClient<MockLedger> {
        StellarClient::new(ClientConfig::testnet(), ledger)
    }

    #[tokio::test]
    async fn payment_builds_signs_and_submits() {
        let (alice, bob) = (alice(), bob());
        let ledger = MockLedger::default()
            .with_account(&alice.account_id(), 10, &[(&Asset::Native, 500)])
            .with_account(&bob.account_id(), 3, &[(&Asset::Native, 1)]);
        let client = client(ledger);

        let hash = client
            .payment(&alice, "", &bob.account_id(), 100, None)
            .await
            .unwrap();

        let submitted = client.ledger().submitted();
        assert_eq!(submitted.len(), 1);
        let envelope = &submitted[0];
        assert_eq!(hash, envelope.tx.hash_hex(client.network_id()));
        assert_eq!(envelope.tx.seq_num, 11);
        assert_eq!(envelope.tx.fee, 100);
        assert!(verify_envelope(envelope, &[alice.public_key()], client.network_id()).is_ok());
        match &envelope.tx.operations[0].body {
            OperationBody::Payment(p) => {
                assert_eq!(p.destination, bob.public_key());
                assert_eq!(p.amount, 100);
                assert_eq!(p.asset, Asset::Native);
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[tokio::test]
    async fn payment_to_missing_destination_is_not_ready() {
        let alice = alice();
        let ledger = MockLedger::default().with_account(&alice.account_id(), 10, &[]);
        let client = client(ledger);

        let err = client
            .payment(&alice, "", &bob().account_id(), 100, None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DestinationNotReadyForAsset);
        match err {
            Error::DestinationNotReadyForAsset { cause, .. } => {
                assert_eq!(cause.kind(), ErrorKind::MissingAccount)
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(client.ledger().submitted().is_empty());
    }

    #[tokio::test]
    async fn payment_without_trust_line_is_not_ready() {
        let (alice, bob) = (alice(), bob());
        let ledger = MockLedger::default()
            .with_account(&alice.account_id(), 10, &[(&usd(), 50)])
            .with_account(&bob.account_id(), 3, &[(&Asset::Native, 1)]);
        let client = client(ledger);

        let err = client
            .payment(&alice, "", &bob.account_id(), 5, Some(usd()))
            .await
            .unwrap_err();
        match err {
            Error::DestinationNotReadyForAsset { cause, asset, .. } => {
                assert_eq!(cause.kind(), ErrorKind::MissingBalance);
                assert_eq!(asset, usd().to_string());
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(client.ledger().submitted().is_empty());
    }

    #[tokio::test]
    async fn transport_failures_pass_through_unchanged() {
        let ledger = MockLedger {
            transport_down: true,
            ..Default::default()
        };
        let client = client(ledger);
        let err = client
            .payment(&alice(), "", &bob().account_id(), 1, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn trust_short_circuits_when_balance_exists() {
        let bob = bob();
        let ledger = MockLedger::default().with_account(&bob.account_id(), 3, &[(&usd(), 0)]);
        let client = client(ledger);

        let outcome = client.trust(&bob, "", usd(), None).await.unwrap();
        assert_eq!(outcome, TrustOutcome::AlreadyTrusted);
        assert!(client.ledger().submitted().is_empty());
    }

    #[tokio::test]
    async fn trust_submits_change_trust_when_line_missing() {
        let bob = bob();
        let ledger =
            MockLedger::default().with_account(&bob.account_id(), 3, &[(&Asset::Native, 1)]);
        let client = client(ledger);

        let outcome = client.trust(&bob, "", usd(), Some(1_000)).await.unwrap();
        let submitted = client.ledger().submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(
            outcome,
            TrustOutcome::Submitted(submitted[0].tx.hash_hex(client.network_id()))
        );
        match &submitted[0].tx.operations[0].body {
            OperationBody::ChangeTrust(op) => {
                assert_eq!(op.line, usd());
                assert_eq!(op.limit, 1_000);
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[tokio::test]
    async fn trust_for_missing_account_is_not_ready() {
        let client = client(MockLedger::default());
        let err = client.trust(&bob(), "", usd(), None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DestinationNotReadyForAsset);
    }

    #[tokio::test]
    async fn create_account_funds_destination() {
        let alice = alice();
        let ledger = MockLedger::default().with_account(&alice.account_id(), 0, &[]);
        let client = client(ledger);
        let dest = KeyPair::generate();

        client
            .create_account(&alice, "", &dest.account_id(), 20_000_000)
            .await
            .unwrap();

        let submitted = client.ledger().submitted();
        assert_eq!(submitted[0].tx.seq_num, 1);
        assert_eq!(
            submitted[0].tx.operations[0].body,
            OperationBody::CreateAccount(crate::transaction::operation::CreateAccountOp {
                destination: PublicKey::from_account_id(&dest.account_id()).unwrap(),
                starting_balance: 20_000_000,
            })
        );
    }

    #[tokio::test]
    async fn signing_failure_stops_before_submission() {
        let (alice, bob) = (alice(), bob());
        let ledger = MockLedger::default()
            .with_account(&alice.account_id(), 10, &[])
            .with_account(&bob.account_id(), 3, &[(&Asset::Native, 1)]);
        let client = client(ledger);

        let err = client
            .payment(&Locked(alice), "bad", &bob.account_id(), 1, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Signing);
        assert!(client.ledger().submitted().is_empty());
    }

    #[tokio::test]
    async fn sequence_and_balance_use_defaults() {
        let bob = bob();
        let ledger =
            MockLedger::default().with_account(&bob.account_id(), 7, &[(&Asset::Native, 42)]);
        let client = client(ledger);
        assert_eq!(client.sequence(&bob.account_id()).await.unwrap(), 7);
        assert_eq!(client.balance(&bob.account_id(), None).await.unwrap(), 42);
        let err = client
            .balance(&bob.account_id(), Some(&usd()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingBalance);
    }
}
