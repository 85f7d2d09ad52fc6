//! Shorthand constructors for the operations the client flows submit.
//!
//! Account arguments are `G...` strkeys. They are decoded here, so a
//! malformed string fails with `InvalidKey` instead of producing a bogus
//! key. An optional `source` overrides the transaction's source account
//! for that one operation.

use super::operation::{ChangeTrustOp, CreateAccountOp, Operation, OperationBody, PaymentOp};
use super::types::{Asset, PublicKey};
use crate::config::DEFAULT_TRUST_LIMIT;
use crate::error::Result;

fn with_source(body: OperationBody, source: Option<&str>) -> Result<Operation> {
    let operation = Operation::new(body);
    Ok(match source {
        Some(source) => operation.with_source(PublicKey::from_account_id(source)?),
        None => operation,
    })
}

/// Funds a new account with `starting_balance` stroops of the native asset.
pub fn create_account(
    destination: &str,
    starting_balance: i64,
    source: Option<&str>,
) -> Result<Operation> {
    let body = OperationBody::CreateAccount(CreateAccountOp {
        destination: PublicKey::from_account_id(destination)?,
        starting_balance,
    });
    with_source(body, source)
}

/// Sends `amount` stroops of `asset` (native when `None`).
pub fn payment(
    destination: &str,
    amount: i64,
    asset: Option<Asset>,
    source: Option<&str>,
) -> Result<Operation> {
    let body = OperationBody::Payment(PaymentOp {
        destination: PublicKey::from_account_id(destination)?,
        asset: asset.unwrap_or_default(),
        amount,
    });
    with_source(body, source)
}

/// Creates or updates a trust line. `limit` defaults to the maximum; zero
/// removes the line.
pub fn change_trust(asset: Asset, limit: Option<i64>, source: Option<&str>) -> Result<Operation> {
    let body = OperationBody::ChangeTrust(ChangeTrustOp {
        line: asset,
        limit: limit.unwrap_or(DEFAULT_TRUST_LIMIT),
    });
    with_source(body, source)
}

/// Merges the source account into `destination`.
pub fn account_merge(destination: &str, source: Option<&str>) -> Result<Operation> {
    let body = OperationBody::AccountMerge(PublicKey::from_account_id(destination)?);
    with_source(body, source)
}
