//! Etherscan (and Etherscan-hosted chain explorer) provider.

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::{DataProvider, ProviderConfig, ProviderKind, account_list_url, get_body, parse_base_url};
use crate::Result;

/// Provider for the public Etherscan account API.
#[derive(Debug, Clone)]
pub struct EtherscanProvider {
    api_key: String,
    base_url: Url,
    client: Client,
}

impl EtherscanProvider {
    /// Public endpoint used when no base URL is configured.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.etherscan.io/api";

    /// Create a provider, falling back to [`Self::DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::ProviderError::Configuration`] if the configured base URL
    /// does not parse.
    pub fn new(config: &ProviderConfig, client: Client) -> Result<Self> {
        let raw = config.base_url().unwrap_or(Self::DEFAULT_BASE_URL);
        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: parse_base_url(ProviderKind::Etherscan, raw)?,
            client,
        })
    }

    /// The endpoint requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl DataProvider for EtherscanProvider {
    fn build_request_url(&self, action: &str, wallet_address: &str) -> Url {
        account_list_url(&self.base_url, action, wallet_address, Some(&self.api_key))
    }

    async fn fetch_transaction_data(&self, url: &Url, tag: &str) -> Result<String> {
        get_body(&self.client, url, tag).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderError;

    #[test]
    fn defaults_to_public_endpoint() {
        let provider = EtherscanProvider::new(&ProviderConfig::default(), Client::new()).unwrap();
        assert_eq!(
            provider.base_url().as_str(),
            EtherscanProvider::DEFAULT_BASE_URL,
            "fallback endpoint"
        );
    }

    #[test]
    fn builds_list_request() {
        let config = ProviderConfig {
            api_key: "ABC123".to_owned(),
            ..ProviderConfig::default()
        };
        let provider = EtherscanProvider::new(&config, Client::new()).unwrap();
        let url = provider.build_request_url("tokentx", "0xWallet");
        assert_eq!(
            url.as_str(),
            "https://api.etherscan.io/api?module=account&action=tokentx&address=0xWallet\
             &apikey=ABC123&startblock=0&endblock=99999999&sort=asc",
            "request URL"
        );
    }

    #[test]
    fn invalid_base_url_is_a_configuration_error() {
        let config = ProviderConfig {
            base_url: Some("not a url".to_owned()),
            ..ProviderConfig::default()
        };
        let err = EtherscanProvider::new(&config, Client::new()).unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)), "got {err:?}");
    }
}
