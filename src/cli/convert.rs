use super::ui;
use crate::core::{
    Clock, CryptoAsset, FiatCurrency, RateCache, RateSource, format_crypto_amount,
    format_currency_amount,
};
use anyhow::{Context, Result};

/// Direction of a conversion command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToCrypto,
    FromCrypto,
}

/// Formats a conversion result line, or a notice when the pair has no usable rate.
pub fn describe(
    direction: Direction,
    amount: f64,
    result: f64,
    fiat: FiatCurrency,
    asset: CryptoAsset,
) -> String {
    let (input, output) = match direction {
        Direction::ToCrypto => (
            format!("{} {fiat}", format_currency_amount(amount, fiat.code())),
            format!("{} {asset}", format_crypto_amount(result, asset.ticker())),
        ),
        Direction::FromCrypto => (
            format!("{} {asset}", format_crypto_amount(amount, asset.ticker())),
            format!("{} {fiat}", format_currency_amount(result, fiat.code())),
        ),
    };

    if result == 0.0 && amount > 0.0 {
        return format!(
            "{input} = {}",
            ui::style_text(
                &format!("not convertible (no {asset}/{fiat} rate)"),
                ui::StyleType::Error
            )
        );
    }
    format!("{input} = {}", ui::style_text(&output, ui::StyleType::Value))
}

pub async fn run<S: RateSource, C: Clock>(
    cache: &RateCache<S, C>,
    direction: Direction,
    amount: f64,
    fiat_code: &str,
    asset: &str,
) -> Result<()> {
    let fiat: FiatCurrency = fiat_code
        .parse()
        .with_context(|| format!("Cannot convert to or from {fiat_code}"))?;
    let asset: CryptoAsset = asset
        .parse()
        .with_context(|| format!("Cannot convert to or from {asset}"))?;

    let pb = ui::new_spinner("Fetching rates...");
    let snapshot = cache.snapshot().await;
    let result = match direction {
        Direction::ToCrypto => snapshot
            .table
            .convert_to_crypto(amount, fiat.code(), asset.id()),
        Direction::FromCrypto => snapshot
            .table
            .convert_from_crypto(amount, fiat.code(), asset.id()),
    };
    pb.finish_and_clear();

    println!("{}", describe(direction, amount, result, fiat, asset));
    if snapshot.is_degraded() {
        println!("{}", ui::freshness_line(&snapshot));
    }
    Ok(())
}
