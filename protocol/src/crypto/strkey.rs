//! # StrKey
//!
//! The base32 text form of keys and hashes: one version byte selecting the
//! kind (and the leading letter), the 32-byte payload, and a CRC16-XModem
//! checksum appended little-endian.
//!
//! ```text
//! G...  account id        (6 << 3)
//! S...  secret seed       (18 << 3)
//! T...  pre-auth tx hash  (19 << 3)
//! X...  sha256 hash-x     (23 << 3)
//! ```

use data_encoding::BASE32_NOPAD;
use thiserror::Error;

use crate::config::{VERSION_ACCOUNT_ID, VERSION_PRE_AUTH_TX, VERSION_SEED, VERSION_SHA256_HASH};

/// Decoded length: version byte, payload, two checksum bytes.
const DECODED_LENGTH: usize = 1 + 32 + 2;

/// Errors while decoding a strkey string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrKeyError {
    #[error("invalid base32 in strkey")]
    InvalidBase32,

    #[error("invalid strkey length: {0} decoded bytes")]
    InvalidLength(usize),

    #[error("unexpected strkey version byte {found:#04x}, expected {expected:#04x}")]
    InvalidVersion { expected: u8, found: u8 },

    #[error("strkey checksum mismatch")]
    InvalidChecksum,
}

/// The kinds of value a strkey can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrKeyKind {
    AccountId,
    Seed,
    PreAuthTx,
    Sha256Hash,
}

impl StrKeyKind {
    pub fn version_byte(self) -> u8 {
        match self {
            StrKeyKind::AccountId => VERSION_ACCOUNT_ID,
            StrKeyKind::Seed => VERSION_SEED,
            StrKeyKind::PreAuthTx => VERSION_PRE_AUTH_TX,
            StrKeyKind::Sha256Hash => VERSION_SHA256_HASH,
        }
    }
}

/// Encodes a 32-byte payload as a strkey of the given kind.
pub fn encode(kind: StrKeyKind, payload: &[u8; 32]) -> String {
    let mut data = Vec::with_capacity(DECODED_LENGTH);
    data.push(kind.version_byte());
    data.extend_from_slice(payload);
    let checksum = crc16_xmodem(&data);
    data.extend_from_slice(&checksum.to_le_bytes());
    BASE32_NOPAD.encode(&data)
}

/// Decodes a strkey, checking its kind and checksum.
pub fn decode(kind: StrKeyKind, encoded: &str) -> Result<[u8; 32], StrKeyError> {
    let data = BASE32_NOPAD
        .decode(encoded.as_bytes())
        .map_err(|_| StrKeyError::InvalidBase32)?;
    if data.len() != DECODED_LENGTH {
        return Err(StrKeyError::InvalidLength(data.len()));
    }

    let expected = kind.version_byte();
    if data[0] != expected {
        return Err(StrKeyError::InvalidVersion {
            expected,
            found: data[0],
        });
    }

    let (body, checksum) = data.split_at(DECODED_LENGTH - 2);
    if crc16_xmodem(body).to_le_bytes() != checksum {
        return Err(StrKeyError::InvalidChecksum);
    }

    let mut payload = [0u8; 32];
    payload.copy_from_slice(&body[1..]);
    Ok(payload)
}

pub fn encode_account_id(key: &[u8; 32]) -> String {
    encode(StrKeyKind::AccountId, key)
}

pub fn decode_account_id(encoded: &str) -> Result<[u8; 32], StrKeyError> {
    decode(StrKeyKind::AccountId, encoded)
}

pub fn encode_seed(seed: &[u8; 32]) -> String {
    encode(StrKeyKind::Seed, seed)
}

pub fn decode_seed(encoded: &str) -> Result<[u8; 32], StrKeyError> {
    decode(StrKeyKind::Seed, encoded)
}

/// CRC16-XModem (poly 0x1021, init 0).
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for byte in data {
        crc ^= (*byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}
