//! Horizon connection settings.

use std::time::Duration;

use lumen_protocol::config::{PUBLIC_HORIZON_URL, TESTNET_HORIZON_URL};
use serde::Deserialize;

use crate::error::HorizonError;

/// Base URL override.
pub const ENV_HORIZON_URL: &str = "HORIZON_URL";
/// Request timeout override, whole seconds.
pub const ENV_HORIZON_TIMEOUT_SECS: &str = "HORIZON_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HorizonConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            base_url: TESTNET_HORIZON_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("lumen-horizon/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HorizonConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// SDF's public network Horizon.
    pub fn public() -> Self {
        Self::new(PUBLIC_HORIZON_URL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Defaults overridden by `HORIZON_URL` and `HORIZON_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, HorizonError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HorizonError> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_HORIZON_URL) {
            config.base_url = url;
        }
        if let Some(secs) = lookup(ENV_HORIZON_TIMEOUT_SECS) {
            config.timeout_secs = secs.trim().parse().map_err(|_| {
                HorizonError::Config(format!("{ENV_HORIZON_TIMEOUT_SECS}={secs:?} is not a number"))
            })?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_testnet() {
        let config = HorizonConfig::default();
        assert_eq!(config.base_url, "https://horizon-testnet.stellar.org");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.starts_with("lumen-horizon/"));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = HorizonConfig::from_lookup(lookup(&[
            (ENV_HORIZON_URL, "http://localhost:8000"),
            (ENV_HORIZON_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 5);

        let untouched = HorizonConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(untouched, HorizonConfig::default());
    }

    #[test]
    fn bad_timeout_is_a_config_error() {
        let err = HorizonConfig::from_lookup(lookup(&[(ENV_HORIZON_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, HorizonError::Config(_)));
    }

    #[test]
    fn deserializes_with_partial_fields() {
        let config: HorizonConfig =
            serde_json::from_str(r#"{"base_url": "https://horizon.stellar.org"}"#).unwrap();
        assert_eq!(config, HorizonConfig::public());
    }
}
