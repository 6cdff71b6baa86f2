//! Blockchain-explorer data providers.
//!
//! A [`DataProvider`] knows two things: how to turn an explorer `action`
//! and a wallet address into a request URL, and how to fetch the raw body
//! behind such a URL. Everything that interprets the body lives with the
//! caller.
//!
//! Providers are built from their [`ProviderConfig`] and a caller-owned
//! [`reqwest::Client`]; the client (and with it the request timeout) is
//! shared, never created here.

mod blockscout;
mod etherscan;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::Deserialize;

pub use blockscout::BlockscoutProvider;
pub use etherscan::EtherscanProvider;

use crate::{ProviderError, Result};

/// First block of the fixed list range.
pub const START_BLOCK: &str = "0";
/// Last block of the fixed list range.
pub const END_BLOCK: &str = "99999999";

/// Capability shared by every explorer backend.
#[async_trait]
pub trait DataProvider: Send + Sync + fmt::Debug {
    /// Build the list request for `action` on `wallet_address`.
    ///
    /// Pure string construction: no I/O happens here.
    fn build_request_url(&self, action: &str, wallet_address: &str) -> Url;

    /// Fetch the raw response body behind `url`.
    ///
    /// `tag` only labels logs and errors.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Transport`] when the request cannot be completed and
    /// [`ProviderError::NonSuccessStatus`] when the explorer answers with a non-2xx
    /// status.
    async fn fetch_transaction_data(&self, url: &Url, tag: &str) -> Result<String>;
}

/// Connection settings for one provider.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Explorer API endpoint. Optional for Etherscan, required for Blockscout.
    pub base_url: Option<String>,
    /// API key sent as the `apikey` query parameter.
    pub api_key: String,
    /// Accepted for compatibility with existing config files; requests are
    /// never retried.
    pub retries: u32,
}

impl ProviderConfig {
    /// The configured base URL, treating an empty string as absent.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// Settings for every supported provider, keyed by provider name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Settings for [`ProviderKind::Etherscan`].
    pub etherscan: ProviderConfig,
    /// Settings for [`ProviderKind::Blockscout`].
    pub blockscout: ProviderConfig,
}

impl ProvidersConfig {
    /// Settings for `kind`.
    #[must_use]
    pub const fn get(&self, kind: ProviderKind) -> &ProviderConfig {
        match kind {
            ProviderKind::Etherscan => &self.etherscan,
            ProviderKind::Blockscout => &self.blockscout,
        }
    }
}

/// Supported explorer backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// `etherscan.io` or any Etherscan-hosted chain explorer.
    Etherscan,
    /// A Blockscout instance (usually self-hosted).
    Blockscout,
}

impl ProviderKind {
    /// Lower-case provider name as used in configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Etherscan => "etherscan",
            Self::Blockscout => "blockscout",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "etherscan" => Ok(Self::Etherscan),
            "blockscout" => Ok(Self::Blockscout),
            _ => Err(ProviderError::UnknownProvider(s.to_owned())),
        }
    }
}

/// Resolve `provider_type` (case-insensitive) to a ready provider.
///
/// # Errors
///
/// Returns [`ProviderError::UnknownProvider`] for an unsupported type and
/// [`ProviderError::Configuration`] when the provider's settings are unusable.
pub fn new_provider(
    provider_type: &str,
    config: &ProvidersConfig,
    client: Client,
) -> Result<Arc<dyn DataProvider>> {
    let kind: ProviderKind = provider_type.parse()?;
    let settings = config.get(kind);
    if settings.retries > 0 {
        tracing::warn!(
            provider = %kind,
            retries = settings.retries,
            "retries are configured but requests are never retried"
        );
    }

    Ok(match kind {
        ProviderKind::Etherscan => Arc::new(EtherscanProvider::new(settings, client)?),
        ProviderKind::Blockscout => Arc::new(BlockscoutProvider::new(settings, client)?),
    })
}

/// Parse a configured base URL.
fn parse_base_url(kind: ProviderKind, raw: &str) -> Result<Url> {
    Url::parse(raw)
        .map_err(|e| ProviderError::Configuration(format!("invalid {kind} base URL `{raw}`: {e}")))
}

/// Build an account-module list URL in the Etherscan query shape.
///
/// `api_key` is omitted when `None`. Any query already present on `base`
/// (e.g. `chainid=1`) is preserved in front.
fn account_list_url(base: &Url, action: &str, wallet: &str, api_key: Option<&str>) -> Url {
    let mut url = base.clone();
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("module", "account")
            .append_pair("action", action)
            .append_pair("address", wallet);
        if let Some(key) = api_key {
            query.append_pair("apikey", key);
        }
        query
            .append_pair("startblock", START_BLOCK)
            .append_pair("endblock", END_BLOCK)
            .append_pair("sort", "asc");
    }
    url
}

/// Issue a JSON GET and return the body of a 2xx response.
async fn get_body(client: &Client, url: &Url, tag: &str) -> Result<String> {
    let transport = |source: reqwest::Error| ProviderError::Transport {
        tag: tag.to_owned(),
        source,
    };

    let response = client
        .get(url.clone())
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(transport)?;

    let status = response.status();
    tracing::debug!(tag, status = status.as_u16(), "explorer responded");

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::NonSuccessStatus {
            tag: tag.to_owned(),
            status: status.as_u16(),
            body,
        });
    }

    response.text().await.map_err(transport)
}
