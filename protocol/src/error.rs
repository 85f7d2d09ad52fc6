//! Crate-wide error taxonomy.
//!
//! Every fallible public operation resolves to [`Error`]. Callers should
//! branch on [`Error::kind`] rather than on message text.

use thiserror::Error;

use crate::account::SigningError;
use crate::amount::AmountError;
use crate::crypto::strkey::StrKeyError;
use crate::transaction::types::{Asset, TypeError};
use crate::xdr::XdrError;

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Signing or building was attempted for an account without a usable
    /// public key.
    #[error("account has no public key")]
    MissingPublicKey,

    /// The ledger has no such account.
    #[error("account {0} not found")]
    MissingAccount(String),

    /// The account exists but holds no balance in the asset.
    #[error("account {account} has no {asset} balance")]
    MissingBalance { account: String, asset: String },

    /// The sequence lookup succeeded but returned nothing usable.
    #[error("no sequence number for account {0}")]
    MissingSequence(String),

    /// A server response could not be understood.
    #[error("malformed server response: {0}")]
    Parse(String),

    /// Converting to bytes or to a request body failed.
    #[error("encoding failure: {0}")]
    Encoding(String),

    #[error(transparent)]
    Signing(#[from] SigningError),

    /// The server refused the transaction.
    #[error("transaction rejected: {result_code}")]
    ServerRejected {
        result_code: String,
        operation_codes: Vec<String>,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("xdr: {0}")]
    Xdr(#[from] XdrError),

    /// The envelope already holds the most signatures the network accepts.
    #[error("envelope already holds {limit} signatures")]
    TooManySignatures { limit: usize },

    #[error("invalid key: {0}")]
    InvalidKey(#[from] StrKeyError),

    #[error(transparent)]
    InvalidValue(#[from] TypeError),

    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    /// The destination cannot receive the asset yet: the account does not
    /// exist or has no trust line. `cause` is the underlying lookup error.
    #[error("destination {destination} is not ready to receive {asset}")]
    DestinationNotReadyForAsset {
        destination: String,
        asset: String,
        #[source]
        cause: Box<Error>,
    },
}

/// The kind of an [`Error`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingPublicKey,
    MissingAccount,
    MissingBalance,
    MissingSequence,
    Parse,
    Encoding,
    Signing,
    ServerRejected,
    Transport,
    UnknownVariant,
    LengthMismatch,
    TruncatedInput,
    InvalidPadding,
    InvalidDiscriminant,
    InvalidEncoding,
    TrailingBytes,
    TooManySignatures,
    InvalidKey,
    InvalidValue,
    InvalidAmount,
    DestinationNotReadyForAsset,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingPublicKey => ErrorKind::MissingPublicKey,
            Error::MissingAccount(_) => ErrorKind::MissingAccount,
            Error::MissingBalance { .. } => ErrorKind::MissingBalance,
            Error::MissingSequence(_) => ErrorKind::MissingSequence,
            Error::Parse(_) => ErrorKind::Parse,
            Error::Encoding(_) => ErrorKind::Encoding,
            Error::Signing(_) => ErrorKind::Signing,
            Error::ServerRejected { .. } => ErrorKind::ServerRejected,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Xdr(e) => match e {
                XdrError::UnknownVariant { .. } => ErrorKind::UnknownVariant,
                XdrError::LengthMismatch { .. } | XdrError::TooLong { .. } => {
                    ErrorKind::LengthMismatch
                }
                XdrError::TruncatedInput { .. } => ErrorKind::TruncatedInput,
                XdrError::InvalidPadding { .. } => ErrorKind::InvalidPadding,
                XdrError::InvalidDiscriminant { .. } => ErrorKind::InvalidDiscriminant,
                XdrError::InvalidEncoding(_) => ErrorKind::InvalidEncoding,
                XdrError::TrailingBytes { .. } => ErrorKind::TrailingBytes,
            },
            Error::TooManySignatures { .. } => ErrorKind::TooManySignatures,
            Error::InvalidKey(_) => ErrorKind::InvalidKey,
            Error::InvalidValue(_) => ErrorKind::InvalidValue,
            Error::InvalidAmount(_) => ErrorKind::InvalidAmount,
            Error::DestinationNotReadyForAsset { .. } => ErrorKind::DestinationNotReadyForAsset,
        }
    }

    /// `MissingBalance` for `asset` on `account`, in the asset's text form.
    pub fn missing_balance(account: &str, asset: &Asset) -> Self {
        Error::MissingBalance {
            account: account.to_string(),
            asset: asset.to_string(),
        }
    }
}
