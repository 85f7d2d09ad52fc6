//! # Protocol Configuration & Constants
//!
//! Wire-level bounds, network passphrases, and the immutable per-client
//! configuration. The bounds mirror the published XDR grammar; decoders use
//! them to refuse oversized input before allocating.

use serde::{Deserialize, Serialize};

use crate::transaction::types::Asset;

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Passphrase of the public production network.
pub const PUBLIC_NETWORK_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// Passphrase of the SDF test network.
pub const TEST_NETWORK_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Horizon instance serving the test network.
pub const TESTNET_HORIZON_URL: &str = "https://horizon-testnet.stellar.org";

/// Horizon instance serving the public network.
pub const PUBLIC_HORIZON_URL: &str = "https://horizon.stellar.org";

// ---------------------------------------------------------------------------
// Amounts & Fees
// ---------------------------------------------------------------------------

/// Minimum fee per operation, in stroops.
pub const BASE_FEE: u32 = 100;

/// One lumen is ten million stroops.
pub const STROOPS_PER_LUMEN: i64 = 10_000_000;

/// Decimal places in Horizon amount strings.
pub const AMOUNT_DECIMALS: usize = 7;

/// Trust line limit used when the caller does not name one.
pub const DEFAULT_TRUST_LIMIT: i64 = i64::MAX;

// ---------------------------------------------------------------------------
// Key & Signature Sizes
// ---------------------------------------------------------------------------

/// Signature hint length: the trailing bytes of the signer's public key.
pub const SIGNATURE_HINT_LENGTH: usize = 4;

/// Upper bound on the opaque signature field.
pub const MAX_SIGNATURE_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// XDR Bounds
// ---------------------------------------------------------------------------

pub const MAX_OPERATIONS: usize = 100;
pub const MAX_SIGNATURES: usize = 20;
pub const MAX_PATH_LENGTH: usize = 5;
pub const MAX_MEMO_TEXT: usize = 28;
pub const MAX_HOME_DOMAIN: usize = 32;
pub const MAX_DATA_NAME: usize = 64;
pub const MAX_DATA_VALUE: usize = 64;

/// `ENVELOPE_TYPE_TX`: tags the transaction arm of a signature payload.
pub const ENVELOPE_TYPE_TX: i32 = 2;

// ---------------------------------------------------------------------------
// StrKey Version Bytes
// ---------------------------------------------------------------------------

/// `G...` account ids.
pub const VERSION_ACCOUNT_ID: u8 = 6 << 3;
/// `S...` secret seeds.
pub const VERSION_SEED: u8 = 18 << 3;
/// `T...` pre-authorized transaction hashes.
pub const VERSION_PRE_AUTH_TX: u8 = 19 << 3;
/// `X...` hash-x signers.
pub const VERSION_SHA256_HASH: u8 = 23 << 3;

// ---------------------------------------------------------------------------
// Client Configuration
// ---------------------------------------------------------------------------

/// Settings fixed for the lifetime of a client.
///
/// Nothing here is mutated after construction, so a single value can be
/// shared by every concurrent signing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Network passphrase mixed into every signature payload.
    pub network_passphrase: String,

    /// Asset used by payment calls that do not name one.
    #[serde(default)]
    pub default_asset: Asset,

    /// Fee charged per operation, in stroops.
    #[serde(default = "default_base_fee")]
    pub base_fee: u32,
}

fn default_base_fee() -> u32 {
    BASE_FEE
}

impl ClientConfig {
    pub fn new(network_passphrase: impl Into<String>) -> Self {
        Self {
            network_passphrase: network_passphrase.into(),
            default_asset: Asset::Native,
            base_fee: BASE_FEE,
        }
    }

    /// Test network, native default asset.
    pub fn testnet() -> Self {
        Self::new(TEST_NETWORK_PASSPHRASE)
    }

    /// Public network, native default asset.
    pub fn public() -> Self {
        Self::new(PUBLIC_NETWORK_PASSPHRASE)
    }

    pub fn with_default_asset(mut self, asset: Asset) -> Self {
        self.default_asset = asset;
        self
    }

    pub fn with_base_fee(mut self, base_fee: u32) -> Self {
        self.base_fee = base_fee;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::testnet()
    }
}
