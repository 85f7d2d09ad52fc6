// Copyright (c) 2026 Lumen Contributors. MIT License.
// See LICENSE for details.

//! # Lumen Horizon
//!
//! The network side of `lumen-protocol`: a Horizon REST client that answers
//! sequence and balance queries and submits signed envelopes.
//!
//! ```rust,no_run
//! use lumen_horizon::{HorizonClient, HorizonConfig};
//! use lumen_protocol::{ClientConfig, StellarClient};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let horizon = HorizonClient::new(HorizonConfig::from_env()?)?;
//! let client = StellarClient::new(ClientConfig::testnet(), horizon);
//! # let _ = client;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod response;

pub use client::HorizonClient;
pub use config::HorizonConfig;
pub use error::HorizonError;
pub use logging::{init_logging, LogFormat};
pub use response::{AccountRecord, BalanceLine};
