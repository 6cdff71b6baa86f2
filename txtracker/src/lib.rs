//! Explorer models and data providers for wallet transaction reports.
//!
//! The crate covers everything up to the raw explorer response:
//!
//! - [`ReportCategory`]: the four tracked kinds of wallet activity and the
//!   explorer action each is fetched with.
//! - [`provider`]: the [`DataProvider`] capability, its Etherscan and
//!   Blockscout implementations and the [`new_provider`] factory.
//! - [`types`]: the response [`Envelope`] and the per-category record
//!   types behind [`Transactions`].

pub mod category;
pub mod error;
pub mod provider;
pub mod types;

pub use category::{ParseCategoryError, ReportCategory};
pub use error::{ProviderError, Result};
pub use provider::{DataProvider, ProviderConfig, ProviderKind, ProvidersConfig, new_provider};
pub use types::{Envelope, Transactions};
