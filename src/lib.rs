pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::convert::Direction;
use crate::core::RateCache;
use crate::core::config::AppConfig;
use crate::providers::CoinGeckoSource;
use anyhow::Result;
use tracing::{debug, info};

/// Commands that need rates, as dispatched by the binary.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Rates,
    ToCrypto {
        amount: f64,
        fiat: Option<String>,
        asset: Option<String>,
    },
    FromCrypto {
        amount: f64,
        fiat: Option<String>,
        asset: Option<String>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("coinrate starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load_or_default()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = &config.providers.coingecko;
    let source = CoinGeckoSource::new(&provider.base_url, provider.timeout())?;
    let cache = RateCache::with_ttl(source, config.cache_ttl());

    match command {
        AppCommand::Rates => cli::rates::run(&cache).await,
        AppCommand::ToCrypto {
            amount,
            fiat,
            asset,
        } => {
            let fiat = fiat.unwrap_or_else(|| config.currency.clone());
            let asset = asset.unwrap_or_else(|| config.asset.clone());
            cli::convert::run(&cache, Direction::ToCrypto, amount, &fiat, &asset).await
        }
        AppCommand::FromCrypto {
            amount,
            fiat,
            asset,
        } => {
            let fiat = fiat.unwrap_or_else(|| config.currency.clone());
            let asset = asset.unwrap_or_else(|| config.asset.clone());
            cli::convert::run(&cache, Direction::FromCrypto, amount, &fiat, &asset).await
        }
    }
}
