//! Wallet transaction report CLI.
//!
//! Fetches a wallet's activity from a blockchain explorer and writes one
//! CSV report per transaction category.
//!
//! # Usage
//!
//! ```bash
//! # Generate every report using ./config.toml
//! txtracker-reports generate
//!
//! # Override the wallet and write somewhere else
//! txtracker-reports generate --wallet 0xabc... --output-dir ./out
//!
//! # Only ERC-20 and ERC-721 transfers, from a Blockscout instance
//! txtracker-reports generate --provider blockscout --category erc-20 --category erc-721
//!
//! # Show the category registry
//! txtracker-reports categories
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use txtracker::ReportCategory;
use txtracker_reports::ReportPipeline;
use txtracker_reports::config::Config;

/// Wallet transaction report generator.
#[derive(Debug, Parser)]
#[command(name = "txtracker-reports", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch the wallet's activity and write one CSV per category.
    Generate {
        /// Configuration file.
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,

        /// Wallet address; overrides `wallet_address` from the config.
        #[arg(long)]
        wallet: Option<String>,

        /// Provider type (`etherscan` or `blockscout`); overrides the config.
        #[arg(long)]
        provider: Option<String>,

        /// Report directory; overrides `output_dir` from the config.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Only generate these categories (`external`, `internal`, `erc-20`,
        /// `erc-721`). May be repeated; defaults to all.
        #[arg(long = "category")]
        categories: Vec<ReportCategory>,
    },

    /// List the report categories and the explorer action each uses.
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            config,
            wallet,
            provider,
            output_dir,
            categories,
        } => {
            let overrides = Overrides {
                wallet,
                provider,
                output_dir,
            };
            cmd_generate(&config, overrides, &categories).await
        }
        Command::Categories => {
            cmd_categories();
            Ok(())
        }
    }
}

/// Command-line values that replace their config file counterparts.
#[derive(Debug)]
struct Overrides {
    wallet: Option<String>,
    provider: Option<String>,
    output_dir: Option<PathBuf>,
}

impl Overrides {
    fn apply(self, config: &mut Config) {
        if self.wallet.is_some() {
            config.wallet_address = self.wallet;
        }
        if let Some(provider) = self.provider {
            config.provider = provider;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
    }
}

/// Execute the `generate` subcommand.
async fn cmd_generate(
    config_path: &Path,
    overrides: Overrides,
    categories: &[ReportCategory],
) -> Result<()> {
    let started = Instant::now();

    let mut config = Config::load(config_path)?;
    overrides.apply(&mut config);

    let wallet = config
        .wallet()
        .context("no wallet address: set `wallet_address` in the config or pass --wallet")?
        .to_owned();

    let client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()
        .context("building HTTP client")?;
    let provider = txtracker::new_provider(&config.provider, &config.providers, client)
        .with_context(|| format!("creating `{}` data provider", config.provider))?;

    let mut pipeline = ReportPipeline::new(provider, wallet, &config.output_dir);
    if !categories.is_empty() {
        pipeline = pipeline.with_categories(categories);
    }

    let report = pipeline.run().await;
    for path in report.written() {
        tracing::info!(path = %path.display(), "report available");
    }

    tracing::info!(elapsed = ?started.elapsed(), "total execution time");
    report.into_result()?;
    Ok(())
}

/// Execute the `categories` subcommand.
#[allow(clippy::print_stdout, reason = "the registry table is command output")]
fn cmd_categories() {
    println!(
        "{:<10} {:<18} {:<16} {:<18} File",
        "Slug", "Tag", "Action", "Type"
    );
    println!("{}", "-".repeat(90));

    for category in ReportCategory::ALL {
        println!(
            "{:<10} {:<18} {:<16} {:<18} {}",
            category.slug(),
            category.tag(),
            category.action(),
            category.transaction_type(),
            category.file_name("<wallet>"),
        );
    }
}
