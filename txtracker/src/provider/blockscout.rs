//! Blockscout provider.
//!
//! Blockscout serves an Etherscan-compatible `/api` endpoint, but every
//! instance lives at its own URL, so a base URL must be configured. The
//! API key is optional and only sent when set.

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::{DataProvider, ProviderConfig, ProviderKind, account_list_url, get_body, parse_base_url};
use crate::{ProviderError, Result};

/// Provider for a Blockscout instance.
#[derive(Debug, Clone)]
pub struct BlockscoutProvider {
    api_key: Option<String>,
    base_url: Url,
    client: Client,
}

impl BlockscoutProvider {
    /// Create a provider for the configured instance.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Configuration`] if no base URL is configured or it
    /// does not parse.
    pub fn new(config: &ProviderConfig, client: Client) -> Result<Self> {
        let raw = config.base_url().ok_or_else(|| {
            ProviderError::Configuration("blockscout requires `base_url` to be set".to_owned())
        })?;
        let api_key = Some(config.api_key.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_owned);

        Ok(Self {
            api_key,
            base_url: parse_base_url(ProviderKind::Blockscout, raw)?,
            client,
        })
    }

    /// The instance requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl DataProvider for BlockscoutProvider {
    fn build_request_url(&self, action: &str, wallet_address: &str) -> Url {
        account_list_url(
            &self.base_url,
            action,
            wallet_address,
            self.api_key.as_deref(),
        )
    }

    async fn fetch_transaction_data(&self, url: &Url, tag: &str) -> Result<String> {
        get_body(&self.client, url, tag).await
    }
}
