//! Horizon client error types.
//!
//! [`HorizonError`] keeps the HTTP-level detail. At the collaborator
//! boundary it collapses into the protocol crate's [`lumen_protocol::Error`]
//! kinds so callers branch on the same taxonomy whatever the transport.

use lumen_protocol::transaction::Asset;
use lumen_protocol::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HorizonError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// 404, or a record without a `balances` array.
    #[error("account {0} not found")]
    AccountNotFound(String),

    #[error("account {account} has no {asset} balance")]
    NoBalance { account: String, asset: Asset },

    #[error("malformed response: {0}")]
    Malformed(String),

    /// Horizon rejected the transaction with result codes.
    #[error("transaction rejected: {result_code} {operation_codes:?}")]
    Rejected {
        result_code: String,
        operation_codes: Vec<String>,
    },

    /// Any other non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<HorizonError> for Error {
    fn from(err: HorizonError) -> Self {
        match err {
            HorizonError::Http(e) => Error::Transport(e.to_string()),
            HorizonError::Status { status, body } => {
                Error::Transport(format!("HTTP {status}: {body}"))
            }
            HorizonError::Json(e) => Error::Parse(e.to_string()),
            HorizonError::Malformed(msg) => Error::Parse(msg),
            HorizonError::AccountNotFound(account) => Error::MissingAccount(account),
            HorizonError::NoBalance { account, asset } => Error::missing_balance(&account, &asset),
            HorizonError::Rejected {
                result_code,
                operation_codes,
            } => Error::ServerRejected {
                result_code,
                operation_codes,
            },
            HorizonError::Url(e) => Error::Encoding(e.to_string()),
            HorizonError::Config(msg) => Error::Encoding(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_protocol::ErrorKind;

    #[test]
    fn maps_onto_protocol_kinds() {
        let cases = [
            (
                HorizonError::AccountNotFound("GA".into()),
                ErrorKind::MissingAccount,
            ),
            (
                HorizonError::NoBalance {
                    account: "GA".into(),
                    asset: Asset::Native,
                },
                ErrorKind::MissingBalance,
            ),
            (HorizonError::Malformed("x".into()), ErrorKind::Parse),
            (
                HorizonError::Rejected {
                    result_code: "tx_bad_seq".into(),
                    operation_codes: vec![],
                },
                ErrorKind::ServerRejected,
            ),
            (
                HorizonError::Status {
                    status: 503,
                    body: "busy".into(),
                },
                ErrorKind::Transport,
            ),
        ];
        for (err, kind) in cases {
            assert_eq!(Error::from(err).kind(), kind);
        }
    }

    #[test]
    fn no_balance_keeps_the_asset_text() {
        let err = Error::from(HorizonError::NoBalance {
            account: "GA".into(),
            asset: Asset::Native,
        });
        assert_eq!(err.to_string(), "account GA has no native balance");
    }

    #[test]
    fn json_errors_are_parse_errors() {
        let json = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        assert_eq!(Error::from(HorizonError::from(json)).kind(), ErrorKind::Parse);
    }
}
