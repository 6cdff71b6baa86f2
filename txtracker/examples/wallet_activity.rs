#![allow(clippy::print_stdout, reason = "example prints its results")]
//! Fetch a wallet's activity in every report category and print how many
//! records each returned.
//!
//! Usage:
//!   ETHERSCAN_API_KEY=... cargo run --example `wallet_activity` -- 0xWALLET
//!
//! Without an API key the request URLs are printed and nothing is fetched.

use reqwest::Client;
use txtracker::{Envelope, ProviderConfig, ProvidersConfig, ReportCategory, Transactions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let wallet = std::env::args()
        .nth(1)
        .ok_or("usage: wallet_activity <wallet-address>")?;
    let api_key = std::env::var("ETHERSCAN_API_KEY").unwrap_or_default();

    let config = ProvidersConfig {
        etherscan: ProviderConfig {
            api_key: api_key.clone(),
            ..ProviderConfig::default()
        },
        ..ProvidersConfig::default()
    };
    let provider = txtracker::new_provider("etherscan", &config, Client::new())?;

    for &category in ReportCategory::ALL {
        let url = provider.build_request_url(category.action(), &wallet);
        if api_key.is_empty() {
            println!("[{category}] {url}");
            continue;
        }

        let body = provider.fetch_transaction_data(&url, category.tag()).await?;
        let envelope = Envelope::from_json(&body)?;
        match Transactions::decode(category, &envelope.result) {
            Ok(records) => println!("[{category}] {} records", records.len()),
            Err(_) => println!("[{category}] {}: {}", envelope.message, envelope.result),
        }
    }

    Ok(())
}
