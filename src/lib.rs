pub mod cli;
pub mod core;
pub mod providers;
pub mod store;
pub mod ticker;

use crate::core::Chain;
use crate::core::config::AppConfig;
use crate::core::locale::EnvLocale;
use crate::ticker::TickerPipeline;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub use crate::core::config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Fetch and show tickers
    Prices,
    /// Show the unit options of a chain, optionally selecting one
    Units { chain: Chain, unit: Option<String> },
    /// Change the fiat currency prices are shown in
    SetFiat { fiat_ticker: String },
}

/// Wires the pipeline with the configured settings store and price provider.
pub fn build_pipeline(config: AppConfig) -> Result<TickerPipeline> {
    let settings = store::open_settings(&config);
    let fetcher = providers::CoinbaseProvider::new(config.coinbase_base_url())
        .context("Failed to create price provider")?;
    let locale = EnvLocale::new(&config.fiat_tickers);

    Ok(TickerPipeline::new(
        config,
        settings,
        Arc::new(fetcher),
        &locale,
    ))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Wallet ticker starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let mut pipeline = build_pipeline(config)?;

    match command {
        AppCommand::Prices => cli::prices::run(&mut pipeline).await,
        AppCommand::Units { chain, unit } => {
            cli::units::run(&mut pipeline, chain, unit.as_deref()).await
        }
        AppCommand::SetFiat { fiat_ticker } => {
            let fiat_ticker = fiat_ticker.to_uppercase();
            if !pipeline.state().fiat_tickers.contains(&fiat_ticker) {
                anyhow::bail!(
                    "Unsupported fiat currency {}, expected one of {}",
                    fiat_ticker,
                    pipeline.state().fiat_tickers.join(", ")
                );
            }
            pipeline.set_fiat_ticker(&fiat_ticker).await;
            println!("Prices will be shown in {fiat_ticker}");
            Ok(())
        }
    }
}
