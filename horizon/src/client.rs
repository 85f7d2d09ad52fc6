//! Async Horizon HTTP client.
//!
//! Implements the protocol crate's [`LedgerQuery`] and [`Submitter`] over
//! Horizon's REST API: `GET /accounts/{id}` and `POST /transactions`.
//! One request per call; retries and backoff are left to the caller.

use async_trait::async_trait;
use lumen_protocol::transaction::Asset;
use lumen_protocol::{LedgerQuery, Result, Submitter};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, info, warn};
use url::{form_urlencoded, Url};

use crate::config::HorizonConfig;
use crate::error::HorizonError;
use crate::response::{parse_account, parse_submit_response, AccountRecord};

pub struct HorizonClient {
    http: reqwest::Client,
    base_url: Url,
    config: HorizonConfig,
}

impl HorizonClient {
    pub fn new(config: HorizonConfig) -> std::result::Result<Self, HorizonError> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(HorizonError::Config(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    /// Client for SDF's test network Horizon.
    pub fn testnet() -> std::result::Result<Self, HorizonError> {
        Self::new(HorizonConfig::default())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn config(&self) -> &HorizonConfig {
        &self.config
    }

    /// Fetches and parses an account record.
    pub async fn account(
        &self,
        account_id: &str,
    ) -> std::result::Result<AccountRecord, HorizonError> {
        let url = endpoint(&self.base_url, &["accounts", account_id]);
        debug!(%url, "fetching account");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(HorizonError::AccountNotFound(account_id.to_string()));
        }
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(HorizonError::Status {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }
        parse_account(account_id, &body)
    }

    /// Posts a base64 XDR envelope and returns the transaction hash.
    pub async fn submit_transaction(
        &self,
        envelope_base64: &str,
    ) -> std::result::Result<String, HorizonError> {
        let url = endpoint(&self.base_url, &["transactions"]);
        let resp = self
            .http
            .post(url)
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .body(form_body(envelope_base64))
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        match parse_submit_response(status, &body) {
            Ok(hash) => {
                info!(%hash, "horizon accepted transaction");
                Ok(hash)
            }
            Err(err) => {
                warn!(status, error = %err, "horizon refused transaction");
                Err(err)
            }
        }
    }
}

/// `base` with `segments` appended, each percent-encoded as a path segment.
fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // Checked in `HorizonClient::new`.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// The `tx=` form body. Base64's `+`, `/` and `=` are percent-encoded.
fn form_body(envelope_base64: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("tx", envelope_base64)
        .finish()
}

#[async_trait]
impl LedgerQuery for HorizonClient {
    async fn sequence(&self, account_id: &str) -> Result<Option<u64>> {
        let record = self.account(account_id).await?;
        debug!(account = account_id, sequence = ?record.sequence, "sequence lookup");
        Ok(record.sequence)
    }

    async fn balance(&self, account_id: &str, asset: &Asset) -> Result<i64> {
        let record = self.account(account_id).await?;
        Ok(record.balance(asset)?)
    }
}

#[async_trait]
impl Submitter for HorizonClient {
    async fn submit(&self, envelope_base64: &str) -> Result<String> {
        Ok(self.submit_transaction(envelope_base64).await?)
    }
}
