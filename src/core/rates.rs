//! Rate tables and the snapshots handed out by the cache

use crate::core::asset::CryptoAsset;
use crate::core::fiat::FiatCurrency;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Fiat units per one unit of a crypto asset. A rate of `0.0` means "unknown".
pub type FiatRates = BTreeMap<FiatCurrency, f64>;

/// Spot rates for every supported asset against every supported fiat currency.
///
/// Tables are only built through [`RateTable::from_fn`], so each one is complete
/// and never holds a negative or non-finite rate.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    bitcoin: FiatRates,
    monero: FiatRates,
}

impl RateTable {
    pub fn from_fn(mut rate: impl FnMut(CryptoAsset, FiatCurrency) -> f64) -> Self {
        let mut build = |asset: CryptoAsset| -> FiatRates {
            FiatCurrency::ALL
                .into_iter()
                .map(|fiat| (fiat, sanitize(rate(asset, fiat))))
                .collect()
        };
        let bitcoin = build(CryptoAsset::Bitcoin);
        let monero = build(CryptoAsset::Monero);
        Self { bitcoin, monero }
    }

    pub fn rates_for(&self, asset: CryptoAsset) -> &FiatRates {
        match asset {
            CryptoAsset::Bitcoin => &self.bitcoin,
            CryptoAsset::Monero => &self.monero,
        }
    }

    pub fn rate(&self, asset: CryptoAsset, fiat: FiatCurrency) -> f64 {
        self.rates_for(asset).get(&fiat).copied().unwrap_or(0.0)
    }

    /// Case-insensitive lookup by raw identifiers; unknown asset or fiat yields `0.0`.
    pub fn lookup(&self, asset: &str, fiat_code: &str) -> f64 {
        match (asset.parse::<CryptoAsset>(), fiat_code.parse::<FiatCurrency>()) {
            (Ok(asset), Ok(fiat)) => self.rate(asset, fiat),
            _ => 0.0,
        }
    }

    /// Fiat `amount` expressed in units of `asset`; `0.0` when not convertible.
    pub fn convert_to_crypto(&self, amount: f64, fiat_code: &str, asset: &str) -> f64 {
        let rate = self.lookup(asset, fiat_code);
        if rate > 0.0 && is_convertible(amount) {
            finite_or_zero(amount / rate)
        } else {
            0.0
        }
    }

    /// `crypto_amount` of `asset` expressed in fiat; `0.0` when not convertible.
    pub fn convert_from_crypto(&self, crypto_amount: f64, fiat_code: &str, asset: &str) -> f64 {
        let rate = self.lookup(asset, fiat_code);
        if rate > 0.0 && is_convertible(crypto_amount) {
            finite_or_zero(crypto_amount * rate)
        } else {
            0.0
        }
    }

    /// Hardcoded table served when no rates were ever fetched. The values are
    /// ballpark figures only and must not be treated as market prices.
    pub fn fallback() -> Self {
        Self::from_fn(|asset, fiat| match asset {
            CryptoAsset::Bitcoin => fallback_bitcoin(fiat),
            CryptoAsset::Monero => fallback_monero(fiat),
        })
    }
}

fn sanitize(rate: f64) -> f64 {
    if rate.is_finite() && rate > 0.0 {
        rate
    } else {
        0.0
    }
}

fn is_convertible(amount: f64) -> bool {
    amount.is_finite() && amount >= 0.0
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn fallback_bitcoin(fiat: FiatCurrency) -> f64 {
    match fiat {
        FiatCurrency::Usd => 65_000.0,
        FiatCurrency::Eur => 60_000.0,
        FiatCurrency::Gbp => 51_000.0,
        FiatCurrency::Cad => 88_000.0,
        FiatCurrency::Aud => 98_000.0,
        FiatCurrency::Jpy => 9_700_000.0,
        FiatCurrency::Cny => 470_000.0,
        FiatCurrency::Inr => 5_400_000.0,
        FiatCurrency::Brl => 350_000.0,
        FiatCurrency::Mxn => 1_100_000.0,
        FiatCurrency::Ngn => 95_000_000.0,
        FiatCurrency::Ghs => 950_000.0,
        FiatCurrency::Kes => 8_400_000.0,
        FiatCurrency::Zar => 1_200_000.0,
        FiatCurrency::Rub => 6_000_000.0,
        FiatCurrency::Try => 2_100_000.0,
    }
}

fn fallback_monero(fiat: FiatCurrency) -> f64 {
    match fiat {
        FiatCurrency::Usd => 160.0,
        FiatCurrency::Eur => 148.0,
        FiatCurrency::Gbp => 126.0,
        FiatCurrency::Cad => 217.0,
        FiatCurrency::Aud => 241.0,
        FiatCurrency::Jpy => 23_900.0,
        FiatCurrency::Cny => 1_160.0,
        FiatCurrency::Inr => 13_300.0,
        FiatCurrency::Brl => 860.0,
        FiatCurrency::Mxn => 2_700.0,
        FiatCurrency::Ngn => 234_000.0,
        FiatCurrency::Ghs => 2_340.0,
        FiatCurrency::Kes => 20_700.0,
        FiatCurrency::Zar => 2_950.0,
        FiatCurrency::Rub => 14_800.0,
        FiatCurrency::Try => 5_200.0,
    }
}

/// Where the rates in a [`RateSnapshot`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Fetched from upstream by this call.
    Fresh,
    /// Served from the cache within its TTL.
    Cached,
    /// Refresh failed; the last successfully fetched table was served.
    Stale,
    /// Refresh failed and nothing was ever fetched; hardcoded rates were served.
    Fallback,
}

impl Display for Freshness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Freshness::Fresh => "fresh",
                Freshness::Cached => "cached",
                Freshness::Stale => "stale",
                Freshness::Fallback => "fallback",
            }
        )
    }
}

#[derive(Debug, Clone)]
pub struct RateSnapshot {
    pub table: RateTable,
    pub freshness: Freshness,
    /// Wall-clock time of the fetch that produced `table`; `None` for fallback rates.
    pub as_of: Option<DateTime<Utc>>,
}

impl RateSnapshot {
    pub fn is_degraded(&self) -> bool {
        matches!(self.freshness, Freshness::Stale | Freshness::Fallback)
    }
}
