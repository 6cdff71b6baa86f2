//! Runtime configuration loaded from `config.toml`.
//!
//! ```toml
//! wallet_address = "0x..."
//! provider = "etherscan"
//! output_dir = "files/reports"
//! timeout_secs = 15
//!
//! [providers.etherscan]
//! api_key = "..."
//!
//! [providers.blockscout]
//! base_url = "https://eth.blockscout.com/api"
//! ```
//!
//! Command-line flags override the wallet, provider and output directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use txtracker::ProvidersConfig;

use crate::pipeline::DEFAULT_OUTPUT_DIR;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wallet whose activity is reported.
    pub wallet_address: Option<String>,
    /// Provider type passed to [`txtracker::new_provider`].
    pub provider: String,
    /// Directory the reports are written to.
    pub output_dir: PathBuf,
    /// Per-request HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Per-provider connection settings.
    pub providers: ProvidersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wallet_address: None,
            provider: "etherscan".to_owned(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout_secs: 15,
            providers: ProvidersConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// HTTP timeout applied to every explorer request.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The configured wallet, if it is non-empty.
    #[must_use]
    pub fn wallet(&self) -> Option<&str> {
        self.wallet_address
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
    }
}
