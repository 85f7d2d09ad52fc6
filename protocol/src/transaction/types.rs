//! Value types shared by operations and transactions: keys, assets, signers,
//! prices, memos and time bounds.
//!
//! Each type's `encode`/`decode` pair is the wire grammar. Field order and
//! discriminant values are fixed by the network protocol.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{MAX_MEMO_TEXT, SIGNATURE_HINT_LENGTH};
use crate::crypto::keys::signature_hint;
use crate::crypto::strkey::{self, StrKeyError, StrKeyKind};
use crate::xdr::{BoundedString, XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

/// Errors constructing value types from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("invalid asset code {0:?}: expected 1-12 ASCII alphanumerics")]
    InvalidAssetCode(String),

    #[error("invalid asset {0:?}: expected \"native\" or \"CODE:ISSUER\"")]
    MalformedAsset(String),

    #[error("invalid key: {0}")]
    InvalidKey(#[from] StrKeyError),

    #[error("memo text is {0} bytes, limit is 28")]
    MemoTooLong(usize),

    #[error("transaction has {0} operations, expected 1 to 100")]
    OperationCount(usize),
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

const PUBLIC_KEY_TYPE_ED25519: i32 = 0;

/// An account's public key. Ed25519 is the only algorithm on the network.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicKey {
    Ed25519([u8; 32]),
}

impl PublicKey {
    /// Parses a `G...` account id.
    pub fn from_account_id(account_id: &str) -> Result<Self, StrKeyError> {
        strkey::decode_account_id(account_id).map(PublicKey::Ed25519)
    }

    pub fn account_id(&self) -> String {
        strkey::encode_account_id(self.as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        match self {
            PublicKey::Ed25519(bytes) => bytes,
        }
    }

    /// Last four key bytes, as carried in a decorated signature.
    pub fn signature_hint(&self) -> [u8; SIGNATURE_HINT_LENGTH] {
        signature_hint(self.as_bytes())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.account_id())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.account_id())
    }
}

impl FromStr for PublicKey {
    type Err = StrKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_account_id(s)
    }
}

impl XdrEncode for PublicKey {
    fn encode(&self, w: &mut XdrWriter) {
        match self {
            PublicKey::Ed25519(bytes) => {
                w.write_discriminant(PUBLIC_KEY_TYPE_ED25519);
                w.write_fixed_opaque(bytes);
            }
        }
    }
}

impl XdrDecode for PublicKey {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            PUBLIC_KEY_TYPE_ED25519 => Ok(PublicKey::Ed25519(r.read_fixed_opaque()?)),
            other => Err(r.unknown_variant("PublicKeyType", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// SignerKey / Signer
// ---------------------------------------------------------------------------

const SIGNER_KEY_TYPE_ED25519: i32 = 0;
const SIGNER_KEY_TYPE_PRE_AUTH_TX: i32 = 1;
const SIGNER_KEY_TYPE_HASH_X: i32 = 2;

/// The key of an additional account signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignerKey {
    /// An Ed25519 public key.
    Ed25519([u8; 32]),
    /// Hash of a transaction authorized in advance.
    PreAuthTx([u8; 32]),
    /// SHA-256 of a preimage revealed at signing time.
    HashX([u8; 32]),
}

impl SignerKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        match self {
            SignerKey::Ed25519(b) | SignerKey::PreAuthTx(b) | SignerKey::HashX(b) => b,
        }
    }

    /// The strkey text form (`G...`, `T...` or `X...`).
    pub fn to_strkey(&self) -> String {
        let kind = match self {
            SignerKey::Ed25519(_) => StrKeyKind::AccountId,
            SignerKey::PreAuthTx(_) => StrKeyKind::PreAuthTx,
            SignerKey::HashX(_) => StrKeyKind::Sha256Hash,
        };
        strkey::encode(kind, self.as_bytes())
    }
}

impl From<PublicKey> for SignerKey {
    fn from(key: PublicKey) -> Self {
        SignerKey::Ed25519(*key.as_bytes())
    }
}

impl XdrEncode for SignerKey {
    fn encode(&self, w: &mut XdrWriter) {
        let discriminant = match self {
            SignerKey::Ed25519(_) => SIGNER_KEY_TYPE_ED25519,
            SignerKey::PreAuthTx(_) => SIGNER_KEY_TYPE_PRE_AUTH_TX,
            SignerKey::HashX(_) => SIGNER_KEY_TYPE_HASH_X,
        };
        w.write_discriminant(discriminant);
        w.write_fixed_opaque(self.as_bytes());
    }
}

impl XdrDecode for SignerKey {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            SIGNER_KEY_TYPE_ED25519 => Ok(SignerKey::Ed25519(r.read_fixed_opaque()?)),
            SIGNER_KEY_TYPE_PRE_AUTH_TX => Ok(SignerKey::PreAuthTx(r.read_fixed_opaque()?)),
            SIGNER_KEY_TYPE_HASH_X => Ok(SignerKey::HashX(r.read_fixed_opaque()?)),
            other => Err(r.unknown_variant("SignerKeyType", other)),
        }
    }
}

/// A signer and its weight. The network caps weights at 255; the codec
/// does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signer {
    pub key: SignerKey,
    pub weight: u32,
}

impl XdrEncode for Signer {
    fn encode(&self, w: &mut XdrWriter) {
        self.key.encode(w);
        w.write_u32(self.weight);
    }
}

impl XdrDecode for Signer {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Signer {
            key: SignerKey::decode(r)?,
            weight: r.read_u32()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

pub(crate) const ASSET_TYPE_NATIVE: i32 = 0;
pub(crate) const ASSET_TYPE_CREDIT_ALPHANUM4: i32 = 1;
pub(crate) const ASSET_TYPE_CREDIT_ALPHANUM12: i32 = 2;

/// An asset: lumens, or a credit identified by code and issuer.
///
/// Codes are stored right-padded with zero bytes to their fixed width, so
/// two assets are equal exactly when kind, padded code and issuer match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Asset {
    #[default]
    Native,
    CreditAlphanum4 { code: [u8; 4], issuer: PublicKey },
    CreditAlphanum12 { code: [u8; 12], issuer: PublicKey },
}

impl Asset {
    /// A credit asset. Codes of 1-4 characters become alphanum4, 5-12
    /// become alphanum12.
    pub fn credit(code: &str, issuer: PublicKey) -> Result<Self, TypeError> {
        let valid = !code.is_empty()
            && code.len() <= 12
            && code.bytes().all(|b| b.is_ascii_alphanumeric());
        if !valid {
            return Err(TypeError::InvalidAssetCode(code.to_string()));
        }
        if code.len() <= 4 {
            Ok(Asset::CreditAlphanum4 {
                code: pad_code(code),
                issuer,
            })
        } else {
            Ok(Asset::CreditAlphanum12 {
                code: pad_code(code),
                issuer,
            })
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Asset::Native)
    }

    /// The code without padding; `"XLM"` for the native asset.
    pub fn code(&self) -> String {
        match self {
            Asset::Native => "XLM".to_string(),
            Asset::CreditAlphanum4 { code, .. } => unpad_code(code),
            Asset::CreditAlphanum12 { code, .. } => unpad_code(code),
        }
    }

    pub fn issuer(&self) -> Option<&PublicKey> {
        match self {
            Asset::Native => None,
            Asset::CreditAlphanum4 { issuer, .. } | Asset::CreditAlphanum12 { issuer, .. } => {
                Some(issuer)
            }
        }
    }
}

fn pad_code<const N: usize>(code: &str) -> [u8; N] {
    let mut padded = [0u8; N];
    padded[..code.len()].copy_from_slice(code.as_bytes());
    padded
}

fn unpad_code(code: &[u8]) -> String {
    let end = code.iter().position(|b| *b == 0).unwrap_or(code.len());
    String::from_utf8_lossy(&code[..end]).into_owned()
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issuer() {
            None => f.write_str("native"),
            Some(issuer) => write!(f, "{}:{}", self.code(), issuer),
        }
    }
}

impl FromStr for Asset {
    type Err = TypeError;

    /// Accepts `native` (or `XLM`) and `CODE:G...`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("native") || s.eq_ignore_ascii_case("xlm") {
            return Ok(Asset::Native);
        }
        let (code, issuer) = s
            .split_once(':')
            .ok_or_else(|| TypeError::MalformedAsset(s.to_string()))?;
        Asset::credit(code, PublicKey::from_account_id(issuer)?)
    }
}

impl TryFrom<String> for Asset {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> Self {
        asset.to_string()
    }
}

impl XdrEncode for Asset {
    fn encode(&self, w: &mut XdrWriter) {
        match self {
            Asset::Native => w.write_discriminant(ASSET_TYPE_NATIVE),
            Asset::CreditAlphanum4 { code, issuer } => {
                w.write_discriminant(ASSET_TYPE_CREDIT_ALPHANUM4);
                w.write_fixed_opaque(code);
                issuer.encode(w);
            }
            Asset::CreditAlphanum12 { code, issuer } => {
                w.write_discriminant(ASSET_TYPE_CREDIT_ALPHANUM12);
                w.write_fixed_opaque(code);
                issuer.encode(w);
            }
        }
    }
}

impl XdrDecode for Asset {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            ASSET_TYPE_NATIVE => Ok(Asset::Native),
            ASSET_TYPE_CREDIT_ALPHANUM4 => Ok(Asset::CreditAlphanum4 {
                code: r.read_fixed_opaque()?,
                issuer: PublicKey::decode(r)?,
            }),
            ASSET_TYPE_CREDIT_ALPHANUM12 => Ok(Asset::CreditAlphanum12 {
                code: r.read_fixed_opaque()?,
                issuer: PublicKey::decode(r)?,
            }),
            other => Err(r.unknown_variant("AssetType", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Price
// ---------------------------------------------------------------------------

/// A rational price `n / d`. A zero denominator is the caller's problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    pub n: i32,
    pub d: i32,
}

impl Price {
    pub fn new(n: i32, d: i32) -> Self {
        Self { n, d }
    }
}

impl XdrEncode for Price {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_i32(self.n);
        w.write_i32(self.d);
    }
}

impl XdrDecode for Price {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Price {
            n: r.read_i32()?,
            d: r.read_i32()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Memo
// ---------------------------------------------------------------------------

const MEMO_NONE: i32 = 0;
const MEMO_TEXT: i32 = 1;
const MEMO_ID: i32 = 2;
const MEMO_HASH: i32 = 3;
const MEMO_RETURN: i32 = 4;

/// Memo text: up to 28 bytes of UTF-8.
pub type MemoText = BoundedString<MAX_MEMO_TEXT>;

/// Application metadata attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Memo {
    #[default]
    None,
    Text(MemoText),
    Id(u64),
    Hash([u8; 32]),
    /// Hash of the transaction this one refunds.
    Return([u8; 32]),
}

impl Memo {
    /// A text memo, rejecting text over 28 bytes.
    pub fn text(text: impl Into<String>) -> Result<Self, TypeError> {
        let text = text.into();
        let len = text.len();
        MemoText::try_from(text)
            .map(Memo::Text)
            .map_err(|_| TypeError::MemoTooLong(len))
    }
}

impl XdrEncode for Memo {
    fn encode(&self, w: &mut XdrWriter) {
        match self {
            Memo::None => w.write_discriminant(MEMO_NONE),
            Memo::Text(text) => {
                w.write_discriminant(MEMO_TEXT);
                text.encode(w);
            }
            Memo::Id(id) => {
                w.write_discriminant(MEMO_ID);
                w.write_u64(*id);
            }
            Memo::Hash(hash) => {
                w.write_discriminant(MEMO_HASH);
                w.write_fixed_opaque(hash);
            }
            Memo::Return(hash) => {
                w.write_discriminant(MEMO_RETURN);
                w.write_fixed_opaque(hash);
            }
        }
    }
}

impl XdrDecode for Memo {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            MEMO_NONE => Ok(Memo::None),
            MEMO_TEXT => Ok(Memo::Text(MemoText::decode(r)?)),
            MEMO_ID => Ok(Memo::Id(r.read_u64()?)),
            MEMO_HASH => Ok(Memo::Hash(r.read_fixed_opaque()?)),
            MEMO_RETURN => Ok(Memo::Return(r.read_fixed_opaque()?)),
            other => Err(r.unknown_variant("MemoType", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// TimeBounds
// ---------------------------------------------------------------------------

/// Validity window in Unix seconds. `max_time == 0` means no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

impl XdrEncode for TimeBounds {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_u64(self.min_time);
        w.write_u64(self.max_time);
    }
}

impl XdrDecode for TimeBounds {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(TimeBounds {
            min_time: r.read_u64()?,
            max_time: r.read_u64()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
