//! Error type shared by every data provider.

use thiserror::Error;

/// Result alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Failures raised while constructing a provider or talking to an explorer.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A provider was configured without a value it cannot run without
    /// (e.g. a self-hosted explorer with no base URL), or with one that
    /// does not parse.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The provider type string does not name a known provider.
    #[error("unknown data provider: {0}")]
    UnknownProvider(String),

    /// The HTTP request could not be sent or its body could not be read.
    #[error("request for {tag} failed: {source}")]
    Transport {
        /// Category tag the request was issued for.
        tag: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The explorer answered with a non-2xx status.
    #[error("explorer request for {tag} failed with status {status}: {body}")]
    NonSuccessStatus {
        /// Category tag the request was issued for.
        tag: String,
        /// HTTP status code.
        status: u16,
        /// Response body, kept for diagnostics.
        body: String,
    },
}
