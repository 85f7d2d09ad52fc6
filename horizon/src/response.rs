//! Horizon response bodies and the pure functions that interpret them.
//!
//! Parsing is kept apart from the HTTP client so every malformed-body case
//! can be tested without a server. A 200 body that is not JSON is a parse
//! error; an account record without a `balances` array is treated as a
//! missing account, never as an empty balance list.

use lumen_protocol::amount::to_stroops;
use lumen_protocol::transaction::Asset;
use serde::Deserialize;
use serde_json::Value;

use crate::error::HorizonError;

/// One entry of an account's `balances` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BalanceLine {
    /// Decimal string with seven places, e.g. `"100.0000000"`.
    pub balance: String,
    pub asset_type: String,
    #[serde(default)]
    pub asset_code: Option<String>,
    #[serde(default)]
    pub asset_issuer: Option<String>,
}

impl BalanceLine {
    /// Whether this line holds `asset`. Credit lines must agree on
    /// `asset_type` too, since a short code can be issued as alphanum12.
    pub fn matches(&self, asset: &Asset) -> bool {
        let asset_type = match asset {
            Asset::Native => return self.asset_type == "native",
            Asset::CreditAlphanum4 { .. } => "credit_alphanum4",
            Asset::CreditAlphanum12 { .. } => "credit_alphanum12",
        };
        self.asset_type == asset_type
            && self.asset_code.as_deref() == Some(asset.code().as_str())
            && self.asset_issuer.as_deref() == asset.issuer().map(|k| k.account_id()).as_deref()
    }
}

/// The parts of `GET /accounts/{id}` the client uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub account_id: String,
    /// `None` when the record has no parseable `sequence`.
    pub sequence: Option<u64>,
    pub balances: Vec<BalanceLine>,
}

impl AccountRecord {
    /// Balance of `asset` in stroops.
    pub fn balance(&self, asset: &Asset) -> Result<i64, HorizonError> {
        let line = self
            .balances
            .iter()
            .find(|line| line.matches(asset))
            .ok_or_else(|| HorizonError::NoBalance {
                account: self.account_id.clone(),
                asset: asset.clone(),
            })?;
        to_stroops(&line.balance).map_err(|e| HorizonError::Malformed(e.to_string()))
    }
}

/// Parses an account record body.
pub fn parse_account(account_id: &str, body: &str) -> Result<AccountRecord, HorizonError> {
    let value: Value = serde_json::from_str(body)?;

    let balances = match value.get("balances") {
        Some(Value::Array(lines)) => lines
            .iter()
            .cloned()
            .map(serde_json::from_value)
            .collect::<Result<Vec<BalanceLine>, _>>()?,
        _ => return Err(HorizonError::AccountNotFound(account_id.to_string())),
    };

    // Horizon sends the sequence as a string to survive JSON number limits.
    let sequence = match value.get("sequence") {
        Some(Value::String(s)) => s.parse().ok(),
        Some(Value::Number(n)) => n.as_u64(),
        _ => None,
    };

    Ok(AccountRecord {
        account_id: account_id.to_string(),
        sequence,
        balances,
    })
}

/// Interprets the response to `POST /transactions`.
///
/// Success yields the transaction hash. A body carrying
/// `extras.result_codes` becomes [`HorizonError::Rejected`]; any other
/// failure keeps its status and body.
pub fn parse_submit_response(status: u16, body: &str) -> Result<String, HorizonError> {
    if (200..300).contains(&status) {
        let value: Value = serde_json::from_str(body)?;
        return value
            .get("hash")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| HorizonError::Malformed("submission response has no hash".into()));
    }

    let codes = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/extras/result_codes").cloned());
    match codes {
        Some(codes) => {
            let result_code = codes
                .get("transaction")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            let operation_codes = codes
                .get("operations")
                .and_then(Value::as_array)
                .map(|ops| {
                    ops.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            Err(HorizonError::Rejected {
                result_code,
                operation_codes,
            })
        }
        None => Err(HorizonError::Status {
            status,
            body: body.chars().take(500).collect(),
        }),
    }
}
