//! Explorer response models.
//!
//! Every account-module query answers with the same [`Envelope`]; its
//! `result` stays an undecoded JSON fragment until the caller knows which
//! [`ReportCategory`] it asked for, at which point [`Transactions::decode`]
//! turns it into the matching record list.
//!
//! All record fields are kept as the decimal / hex strings the explorer
//! sends, under the explorer's JSON key names. Fields an explorer omits or
//! sends as `null` decode as empty strings, and a `null` result decodes as
//! an empty list.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;

use crate::ReportCategory;

/// Accept a JSON string, number or `null` for a string field.
fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNum {
        Str(String),
        Num(serde_json::Number),
    }
    Ok(match Option::<StringOrNum>::deserialize(deserializer)? {
        Some(StringOrNum::Str(s)) => s,
        Some(StringOrNum::Num(n)) => n.to_string(),
        None => String::new(),
    })
}

/// Decode a record list, treating `null` as empty.
fn decode_list<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, serde_json::Error> {
    Ok(serde_json::from_str::<Option<Vec<T>>>(json)?.unwrap_or_default())
}

/// Outer `{status, message, result}` shape of every explorer response.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    /// `"1"` on success, `"0"` on error or when nothing was found.
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub status: String,
    /// Short explorer message, e.g. `"OK"` or `"No transactions found"`.
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub message: String,
    /// Category-dependent payload, decoded later.
    pub result: Box<RawValue>,
}

impl Envelope {
    /// Decode an envelope from a raw response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a JSON object with a `result`.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Whether the explorer flagged the call as successful.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "1"
    }
}

/// A normal (external) transaction, as returned by `txlist`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExternalTransaction {
    /// Block the transaction was mined in.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub block_number: String,
    /// Unix seconds of the block.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub time_stamp: String,
    /// Transaction hash.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub hash: String,
    /// Sender nonce.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub nonce: String,
    /// Hash of the containing block.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub block_hash: String,
    /// Position within the block.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub transaction_index: String,
    /// Sender address.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub from: String,
    /// Recipient address; empty for contract creation.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub to: String,
    /// Value in wei.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub value: String,
    /// Gas limit.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub gas: String,
    /// Gas price in wei.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub gas_price: String,
    /// `"0"` for success, `"1"` for a reverted call.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub is_error: String,
    /// Receipt status, `"1"` for success.
    #[serde(rename = "txreceipt_status", deserialize_with = "deserialize_lenient_string")]
    pub tx_receipt_status: String,
    /// Call data.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub input: String,
    /// Created contract, if this was a deployment.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub contract_address: String,
    /// Gas used by the block up to and including this transaction.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub cumulative_gas_used: String,
    /// Gas used by this transaction.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub gas_used: String,
    /// Confirmations at query time.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub confirmations: String,
    /// Four-byte selector of the called method.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub method_id: String,
    /// Decoded signature of the called method.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub function_name: String,
}

/// An internal (trace) transaction, as returned by `txlistinternal`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InternalTransaction {
    /// Block the parent transaction was mined in.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub block_number: String,
    /// Unix seconds of the block.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub time_stamp: String,
    /// Hash of the parent transaction.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub hash: String,
    /// Calling address.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub from: String,
    /// Called address.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub to: String,
    /// Value in wei.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub value: String,
    /// Created contract, for `create` traces.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub contract_address: String,
    /// Call data.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub input: String,
    /// Trace type, e.g. `call` or `create`.
    #[serde(rename = "type", deserialize_with = "deserialize_lenient_string")]
    pub kind: String,
    /// Gas made available to the trace.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub gas: String,
    /// Gas used by the trace.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub gas_used: String,
    /// Position of the trace in the call tree.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub trace_id: String,
    /// `"0"` for success, `"1"` for a reverted trace.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub is_error: String,
    /// Revert reason, if any.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub err_code: String,
}

/// An ERC-20 transfer event, as returned by `tokentx`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenTransaction {
    /// Block the transfer was mined in.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub block_number: String,
    /// Unix seconds of the block.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub time_stamp: String,
    /// Hash of the emitting transaction.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub hash: String,
    /// Sender nonce of the emitting transaction.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub nonce: String,
    /// Hash of the containing block.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub block_hash: String,
    /// Token sender.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub from: String,
    /// Token contract.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub contract_address: String,
    /// Token recipient.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub to: String,
    /// Raw token amount, not scaled by `token_decimal`.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub value: String,
    /// Token name, e.g. `USD Coin`.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub token_name: String,
    /// Token ticker, e.g. `USDC`.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub token_symbol: String,
    /// Decimals of the token.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub token_decimal: String,
    /// Position of the emitting transaction within the block.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub transaction_index: String,
    /// Gas limit of the emitting transaction.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub gas: String,
    /// Gas price in wei.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub gas_price: String,
    /// Gas used by the emitting transaction.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub gas_used: String,
    /// Gas used by the block up to and including the transaction.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub cumulative_gas_used: String,
    /// Call data of the emitting transaction.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub input: String,
    /// Confirmations at query time.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub confirmations: String,
}

/// An ERC-721 / ERC-1155 transfer event, as returned by `tokennfttx`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NftTransaction {
    /// Block the transfer was mined in.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub block_number: String,
    /// Unix seconds of the block.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub time_stamp: String,
    /// Hash of the emitting transaction.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub hash: String,
    /// Sender nonce of the emitting transaction.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub nonce: String,
    /// Hash of the containing block.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub block_hash: String,
    /// Previous owner.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub from: String,
    /// Collection contract.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub contract_address: String,
    /// New owner.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub to: String,
    /// Transferred token ID.
    #[serde(rename = "tokenID", deserialize_with = "deserialize_lenient_string")]
    pub token_id: String,
    /// Collection name.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub token_name: String,
    /// Collection ticker.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub token_symbol: String,
    /// Usually `"0"` for NFTs.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub token_decimal: String,
    /// Position of the emitting transaction within the block.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub transaction_index: String,
    /// Gas limit of the emitting transaction.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub gas: String,
    /// Gas price in wei.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub gas_price: String,
    /// Gas used by the emitting transaction.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub gas_used: String,
    /// Gas used by the block up to and including the transaction.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub cumulative_gas_used: String,
    /// Call data of the emitting transaction.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub input: String,
    /// Confirmations at query time.
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub confirmations: String,
}

/// The decoded `result` of one category query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transactions {
    /// Records for [`ReportCategory::ExternalTransfer`].
    External(Vec<ExternalTransaction>),
    /// Records for [`ReportCategory::InternalTransfer`].
    Internal(Vec<InternalTransaction>),
    /// Records for [`ReportCategory::Erc20Transfer`].
    Erc20(Vec<TokenTransaction>),
    /// Records for [`ReportCategory::Erc721Transfer`].
    Erc721(Vec<NftTransaction>),
}

impl Transactions {
    /// Decode a raw `result` array into the record type of `category`.
    ///
    /// A `null` result is an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not an array of that category's records
    /// (explorers put an error string in `result` when a call fails).
    pub fn decode(category: ReportCategory, raw: &RawValue) -> Result<Self, serde_json::Error> {
        let json = raw.get();
        Ok(match category {
            ReportCategory::ExternalTransfer => Self::External(decode_list(json)?),
            ReportCategory::InternalTransfer => Self::Internal(decode_list(json)?),
            ReportCategory::Erc20Transfer => Self::Erc20(decode_list(json)?),
            ReportCategory::Erc721Transfer => Self::Erc721(decode_list(json)?),
        })
    }

    /// Number of decoded records.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::External(v) => v.len(),
            Self::Internal(v) => v.len(),
            Self::Erc20(v) => v.len(),
            Self::Erc721(v) => v.len(),
        }
    }

    /// Whether the explorer returned no activity for this category.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
