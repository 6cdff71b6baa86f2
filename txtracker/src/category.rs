//! Static registry of the report categories.
//!
//! Each category pairs the explorer `action` it is fetched with and the
//! labels used when it is written out. Adding a category means adding a
//! variant here and a matching arm in the report normalizer.

use std::fmt;
use std::str::FromStr;

/// One kind of wallet activity tracked by the reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportCategory {
    /// Plain value transfers sent from or to the wallet (`txlist`).
    ExternalTransfer,
    /// Value moved by contract execution traces (`txlistinternal`).
    InternalTransfer,
    /// ERC-20 token transfer events (`tokentx`).
    Erc20Transfer,
    /// ERC-721 / ERC-1155 token transfer events (`tokennfttx`).
    Erc721Transfer,
}

impl ReportCategory {
    /// Every category, in registry order.
    pub const ALL: &[Self] = &[
        Self::ExternalTransfer,
        Self::InternalTransfer,
        Self::Erc20Transfer,
        Self::Erc721Transfer,
    ];

    /// Explorer `action` query value for this category.
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::ExternalTransfer => "txlist",
            Self::InternalTransfer => "txlistinternal",
            Self::Erc20Transfer => "tokentx",
            Self::Erc721Transfer => "tokennfttx",
        }
    }

    /// Display tag used in logs and error messages.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::ExternalTransfer => "EXTERNAL_REPORT",
            Self::InternalTransfer => "INTERNAL_REPORT",
            Self::Erc20Transfer => "ERC20_REPORT",
            Self::Erc721Transfer => "ERC721_REPORT",
        }
    }

    /// Slug used in report file names.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::ExternalTransfer => "external",
            Self::InternalTransfer => "internal",
            Self::Erc20Transfer => "erc-20",
            Self::Erc721Transfer => "erc-721",
        }
    }

    /// Human-readable transaction type written into every report row.
    #[must_use]
    pub const fn transaction_type(self) -> &'static str {
        match self {
            Self::ExternalTransfer => "ETH Transfer",
            Self::InternalTransfer => "Internal",
            Self::Erc20Transfer => "ERC-20 Transfer",
            Self::Erc721Transfer => "ERC-721 Transfer",
        }
    }

    /// Report file name for `wallet`, e.g. `0xabc_erc-20_report.csv`.
    #[must_use]
    pub fn file_name(self, wallet: &str) -> String {
        format!("{wallet}_{}_report.csv", self.slug())
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Returned when a string names no [`ReportCategory`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown report category `{0}` (expected one of: external, internal, erc-20, erc-721)")]
pub struct ParseCategoryError(String);

impl FromStr for ReportCategory {
    type Err = ParseCategoryError;

    /// Accepts the file slug or the display tag, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.slug().eq_ignore_ascii_case(s) || c.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseCategoryError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_match_explorer_endpoints() {
        let actions: Vec<_> = ReportCategory::ALL.iter().map(|c| c.action()).collect();
        assert_eq!(
            actions,
            ["txlist", "txlistinternal", "tokentx", "tokennfttx"],
            "registry order or action codes changed"
        );
    }

    #[test]
    fn file_name_uses_slug() {
        assert_eq!(
            ReportCategory::Erc721Transfer.file_name("0xabc"),
            "0xabc_erc-721_report.csv",
            "unexpected file name"
        );
    }

    #[test]
    fn parses_slug_and_tag() {
        assert_eq!("ERC-20".parse::<ReportCategory>(), Ok(ReportCategory::Erc20Transfer), "slug");
        assert_eq!(
            "internal_report".parse::<ReportCategory>(),
            Ok(ReportCategory::InternalTransfer),
            "tag"
        );
        assert!("erc-1155".parse::<ReportCategory>().is_err(), "unknown slug");
    }
}
