//! Projection of explorer records into [`ReportRow`]s.
//!
//! | Category | asset symbol/name | token ID | value amount |
//! |----------|-------------------|----------|--------------|
//! | external | `ETH` | empty | `value` |
//! | internal | `ETH` | empty | `value` |
//! | ERC-20 | `"<symbol> <name>"` | empty | `value` |
//! | ERC-721 | `"<symbol> <name>"` | `tokenID` | `transactionIndex` |
//!
//! Every row takes its hash, addresses, contract address and `gas` straight
//! from the record and its transaction type from the [`ReportCategory`].

use chrono::DateTime;
use serde_json::value::RawValue;
use txtracker::ReportCategory;
use txtracker::Transactions;
use txtracker::types::{ExternalTransaction, InternalTransaction, NftTransaction, TokenTransaction};

use crate::error::{ReportError, Result};
use crate::report::ReportRow;

/// Symbol used for native-currency transfers.
pub const NATIVE_SYMBOL: &str = "ETH";

/// Output of the `0` timestamp some explorers send for pending traces.
pub const ZERO_TIMESTAMP: &str = "00-00-0000 00:00:00";

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a Unix-seconds timestamp string as a UTC `YYYY-MM-DD HH:MM:SS`.
///
/// `"0"` maps to [`ZERO_TIMESTAMP`].
///
/// # Errors
///
/// Returns [`ReportError::InvalidTimestamp`] if `raw` is not a base-10
/// 64-bit integer (the empty string included) or lies outside the range a
/// calendar date can represent.
pub fn format_unix_timestamp(raw: &str) -> Result<String> {
    let invalid = || ReportError::InvalidTimestamp {
        value: raw.to_owned(),
    };

    let secs: i64 = raw.parse().map_err(|_| invalid())?;
    if secs == 0 {
        return Ok(ZERO_TIMESTAMP.to_owned());
    }

    let dt = DateTime::from_timestamp(secs, 0).ok_or_else(invalid)?;
    Ok(dt.format(DATE_TIME_FORMAT).to_string())
}

/// Decode `result` as `category`'s records and project them into rows.
///
/// An empty list yields an empty vector.
///
/// # Errors
///
/// Returns [`ReportError::SchemaDecode`] if `result` is not a list of the
/// category's records and [`ReportError::InvalidTimestamp`] if any record's
/// timestamp is malformed.
pub fn normalize(category: ReportCategory, result: &RawValue) -> Result<Vec<ReportRow>> {
    rows_from(&Transactions::decode(category, result)?)
}

/// Project already decoded records into rows, preserving their order.
///
/// # Errors
///
/// Returns [`ReportError::InvalidTimestamp`] if any record's timestamp is
/// malformed.
pub fn rows_from(transactions: &Transactions) -> Result<Vec<ReportRow>> {
    match transactions {
        Transactions::External(list) => list.iter().map(external_row).collect(),
        Transactions::Internal(list) => list.iter().map(internal_row).collect(),
        Transactions::Erc20(list) => list.iter().map(erc20_row).collect(),
        Transactions::Erc721(list) => list.iter().map(erc721_row).collect(),
    }
}

fn external_row(tx: &ExternalTransaction) -> Result<ReportRow> {
    Ok(ReportRow {
        transaction_hash: tx.hash.clone(),
        date_time: format_unix_timestamp(&tx.time_stamp)?,
        from_address: tx.from.clone(),
        to_address: tx.to.clone(),
        transaction_type: ReportCategory::ExternalTransfer.transaction_type().to_owned(),
        asset_contract_address: tx.contract_address.clone(),
        asset_symbol_name: NATIVE_SYMBOL.to_owned(),
        token_id: String::new(),
        value_amount: tx.value.clone(),
        gas_fee_eth: tx.gas.clone(),
    })
}

fn internal_row(tx: &InternalTransaction) -> Result<ReportRow> {
    Ok(ReportRow {
        transaction_hash: tx.hash.clone(),
        date_time: format_unix_timestamp(&tx.time_stamp)?,
        from_address: tx.from.clone(),
        to_address: tx.to.clone(),
        transaction_type: ReportCategory::InternalTransfer.transaction_type().to_owned(),
        asset_contract_address: tx.contract_address.clone(),
        asset_symbol_name: NATIVE_SYMBOL.to_owned(),
        token_id: String::new(),
        value_amount: tx.value.clone(),
        gas_fee_eth: tx.gas.clone(),
    })
}

fn erc20_row(tx: &TokenTransaction) -> Result<ReportRow> {
    Ok(ReportRow {
        transaction_hash: tx.hash.clone(),
        date_time: format_unix_timestamp(&tx.time_stamp)?,
        from_address: tx.from.clone(),
        to_address: tx.to.clone(),
        transaction_type: ReportCategory::Erc20Transfer.transaction_type().to_owned(),
        asset_contract_address: tx.contract_address.clone(),
        asset_symbol_name: format!("{} {}", tx.token_symbol, tx.token_name),
        token_id: String::new(),
        value_amount: tx.value.clone(),
        gas_fee_eth: tx.gas.clone(),
    })
}

// NFT records carry no amount; the value column is filled from
// `transactionIndex`.
fn erc721_row(tx: &NftTransaction) -> Result<ReportRow> {
    Ok(ReportRow {
        transaction_hash: tx.hash.clone(),
        date_time: format_unix_timestamp(&tx.time_stamp)?,
        from_address: tx.from.clone(),
        to_address: tx.to.clone(),
        transaction_type: ReportCategory::Erc721Transfer.transaction_type().to_owned(),
        asset_contract_address: tx.contract_address.clone(),
        asset_symbol_name: format!("{} {}", tx.token_symbol, tx.token_name),
        token_id: tx.token_id.clone(),
        value_amount: tx.transaction_index.clone(),
        gas_fee_eth: tx.gas.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> Box<RawValue> {
        RawValue::from_string(json.to_owned()).unwrap()
    }

    #[test]
    fn formats_unix_seconds_in_utc() {
        assert_eq!(
            format_unix_timestamp("1710298091").unwrap(),
            "2024-03-13 02:48:11",
            "known instant"
        );
    }

    #[test]
    fn zero_timestamp_maps_to_sentinel() {
        assert_eq!(format_unix_timestamp("0").unwrap(), ZERO_TIMESTAMP, "sentinel");
    }

    #[test]
    fn rejects_malformed_timestamps() {
        for input in ["not-a-timestamp", "", "17.5", "99999999999999999999", "9223372036854775807"] {
            let err = format_unix_timestamp(input).unwrap_err();
            assert!(
                matches!(err, ReportError::InvalidTimestamp { ref value } if value == input),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn external_projection() {
        let rows = normalize(
            ReportCategory::ExternalTransfer,
            &raw(r#"[{"hash":"0xh","timeStamp":"1710298091","from":"0xf","to":"0xt",
                      "contractAddress":"","value":"1000000000000000000","gas":"21000"}]"#),
        )
        .unwrap();
        assert_eq!(
            rows,
            [ReportRow {
                transaction_hash: "0xh".to_owned(),
                date_time: "2024-03-13 02:48:11".to_owned(),
                from_address: "0xf".to_owned(),
                to_address: "0xt".to_owned(),
                transaction_type: "ETH Transfer".to_owned(),
                asset_contract_address: String::new(),
                asset_symbol_name: "ETH".to_owned(),
                token_id: String::new(),
                value_amount: "1000000000000000000".to_owned(),
                gas_fee_eth: "21000".to_owned(),
            }],
            "external row"
        );
    }

    #[test]
    fn internal_projection() {
        let rows = normalize(
            ReportCategory::InternalTransfer,
            &raw(r#"[{"hash":"0xi","timeStamp":"0","value":"5","gas":"2300","type":"call"}]"#),
        )
        .unwrap();
        assert_eq!(rows[0].transaction_type, "Internal", "type label");
        assert_eq!(rows[0].asset_symbol_name, "ETH", "native asset");
        assert_eq!(rows[0].date_time, ZERO_TIMESTAMP, "zero timestamp");
        assert_eq!(rows[0].value_amount, "5", "value");
    }

    #[test]
    fn erc20_projection_joins_symbol_and_name() {
        let rows = normalize(
            ReportCategory::Erc20Transfer,
            &raw(r#"[{"hash":"0xe","timeStamp":"1","tokenSymbol":"USDC","tokenName":"USD Coin",
                      "contractAddress":"0xc","value":"2500000","gas":"65000"}]"#),
        )
        .unwrap();
        let row = &rows[0];
        assert_eq!(row.transaction_type, "ERC-20 Transfer", "type label");
        assert_eq!(row.asset_symbol_name, "USDC USD Coin", "symbol + name");
        assert_eq!(row.asset_contract_address, "0xc", "contract");
        assert_eq!(row.token_id, "", "no token id");
        assert_eq!(row.value_amount, "2500000", "raw amount");
    }

    /// Pins current behaviour: the ERC-721 value column is the record's
    /// `transactionIndex`, not an amount.
    #[test]
    fn erc721_value_amount_is_transaction_index() {
        let rows = normalize(
            ReportCategory::Erc721Transfer,
            &raw(r#"[{"hash":"0xn","timeStamp":"1710298091","tokenSymbol":"BAYC",
                      "tokenName":"BoredApeYachtClub","tokenID":"8817",
                      "transactionIndex":"93","gas":"120000"}]"#),
        )
        .unwrap();
        let row = &rows[0];
        assert_eq!(row.transaction_type, "ERC-721 Transfer", "type label");
        assert_eq!(row.asset_symbol_name, "BAYC BoredApeYachtClub", "symbol + name");
        assert_eq!(row.token_id, "8817", "token id");
        assert_eq!(row.value_amount, "93", "value taken from transactionIndex");
        assert_eq!(row.gas_fee_eth, "120000", "gas");
    }

    #[test]
    fn one_row_per_record_in_order() {
        let rows = normalize(
            ReportCategory::ExternalTransfer,
            &raw(r#"[{"hash":"0x1","timeStamp":"1"},{"hash":"0x2","timeStamp":"2"},
                     {"hash":"0x3","timeStamp":"3"}]"#),
        )
        .unwrap();
        let hashes: Vec<_> = rows.iter().map(|r| r.transaction_hash.as_str()).collect();
        assert_eq!(hashes, ["0x1", "0x2", "0x3"], "order preserved");
    }

    #[test]
    fn empty_list_gives_no_rows() {
        let rows = normalize(ReportCategory::Erc20Transfer, &raw("[]")).unwrap();
        assert!(rows.is_empty(), "no rows");
    }

    #[test]
    fn bad_timestamp_fails_the_category() {
        let err = normalize(
            ReportCategory::ExternalTransfer,
            &raw(r#"[{"hash":"0x1","timeStamp":"1"},{"hash":"0x2","timeStamp":"soon"}]"#),
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::InvalidTimestamp { .. }), "got {err:?}");
    }

    #[test]
    fn null_fields_still_produce_a_row() {
        let rows = normalize(
            ReportCategory::ExternalTransfer,
            &raw(r#"[{"hash":"0xh","timeStamp":"1710298091","from":"0xf","to":null,
                      "contractAddress":null,"value":"1","gas":"21000"}]"#),
        )
        .unwrap();
        assert_eq!(rows.len(), 1, "row kept");
        assert_eq!(rows[0].to_address, "", "null recipient");
        assert_eq!(rows[0].asset_contract_address, "", "null contract");
        assert_eq!(rows[0].date_time, "2024-03-13 02:48:11", "other fields intact");
    }

    #[test]
    fn null_result_gives_no_rows() {
        let rows = normalize(ReportCategory::ExternalTransfer, &raw("null")).unwrap();
        assert!(rows.is_empty(), "null is an empty list");
    }

    #[test]
    fn non_list_result_is_a_schema_error() {
        let err = normalize(ReportCategory::InternalTransfer, &raw(r#""Max rate limit reached""#))
            .unwrap_err();
        assert!(matches!(err, ReportError::SchemaDecode(_)), "got {err:?}");
    }
}
