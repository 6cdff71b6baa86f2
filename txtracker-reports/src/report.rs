//! Unified report row and the export metadata that drives serialization.
//!
//! Any row type becomes writable by implementing [`Exportable`]: a static,
//! ordered table of [`Column`]s, each pairing an export name with an
//! accessor that yields a typed [`Cell`]. The table is checked by the
//! compiler; nothing is discovered at run time.

use std::borrow::Cow;
use std::fmt;

/// One typed cell value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    /// Text, written verbatim.
    Text(&'a str),
    /// Signed integer, written base-10.
    Int(i64),
    /// Unsigned integer, written base-10.
    UInt(u64),
    /// Decimal number, written positionally (never in exponent form).
    Decimal(f64),
    /// Boolean, written as `true` / `false`.
    Bool(bool),
    /// Absent value, written as an empty cell.
    Empty,
}

impl<'a> Cell<'a> {
    /// Render the cell as CSV field text.
    #[must_use]
    pub fn render(self) -> Cow<'a, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Int(n) => Cow::Owned(n.to_string()),
            Self::UInt(n) => Cow::Owned(n.to_string()),
            Self::Decimal(n) => Cow::Owned(n.to_string()),
            Self::Bool(b) => Cow::Borrowed(if b { "true" } else { "false" }),
            Self::Empty => Cow::Borrowed(""),
        }
    }
}

impl<'a> From<Option<&'a str>> for Cell<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(Self::Empty, Self::Text)
    }
}

/// One exported column: header name plus field accessor.
pub struct Column<T> {
    /// Header written for this column.
    pub name: &'static str,
    /// Reads this column's value from a row.
    pub value: fn(&T) -> Cell<'_>,
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column").field("name", &self.name).finish_non_exhaustive()
    }
}

/// A row type with a declared export layout.
pub trait Exportable: Sized + 'static {
    /// Columns in export order.
    const COLUMNS: &'static [Column<Self>];

    /// Header names in export order.
    fn headers() -> impl Iterator<Item = &'static str> {
        Self::COLUMNS.iter().map(|c| c.name)
    }

    /// This row's cells in export order.
    fn cells(&self) -> impl Iterator<Item = Cow<'_, str>> {
        Self::COLUMNS.iter().map(move |c| (c.value)(self).render())
    }
}

/// The category-agnostic record written to every report.
///
/// Built once from an explorer record and never linked back to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRow {
    /// Transaction hash.
    pub transaction_hash: String,
    /// UTC date time, `YYYY-MM-DD HH:MM:SS`.
    pub date_time: String,
    /// Sender address.
    pub from_address: String,
    /// Recipient address.
    pub to_address: String,
    /// Category label such as `ETH Transfer`.
    pub transaction_type: String,
    /// Contract address of the moved asset, if any.
    pub asset_contract_address: String,
    /// `ETH` or `"<symbol> <name>"` for tokens.
    pub asset_symbol_name: String,
    /// NFT token ID; empty for fungible transfers.
    pub token_id: String,
    /// Amount moved, as the explorer reports it.
    pub value_amount: String,
    /// Gas figure reported by the explorer.
    pub gas_fee_eth: String,
}

impl Exportable for ReportRow {
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            name: "Transaction Hash",
            value: |r| Cell::Text(&r.transaction_hash),
        },
        Column {
            name: "Date Time",
            value: |r| Cell::Text(&r.date_time),
        },
        Column {
            name: "From Address",
            value: |r| Cell::Text(&r.from_address),
        },
        Column {
            name: "To Address",
            value: |r| Cell::Text(&r.to_address),
        },
        Column {
            name: "Transaction Type",
            value: |r| Cell::Text(&r.transaction_type),
        },
        Column {
            name: "Asset Contract Address",
            value: |r| Cell::Text(&r.asset_contract_address),
        },
        Column {
            name: "Asset Symbol/Name",
            value: |r| Cell::Text(&r.asset_symbol_name),
        },
        Column {
            name: "Token ID",
            value: |r| Cell::from(Some(r.token_id.as_str()).filter(|s| !s.is_empty())),
        },
        Column {
            name: "Value Amount",
            value: |r| Cell::Text(&r.value_amount),
        },
        Column {
            name: "Gas Fee (ETH)",
            value: |r| Cell::Text(&r.gas_fee_eth),
        },
    ];
}
