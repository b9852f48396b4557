//! The closed set of fiat currencies rates are quoted in

use std::fmt::Display;
use std::str::FromStr;

/// Precision used for codes outside the supported set.
pub const DEFAULT_FIAT_DECIMALS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum FiatCurrency {
    Usd,
    Eur,
    Gbp,
    Cad,
    Aud,
    Jpy,
    Cny,
    Inr,
    Brl,
    Mxn,
    Ngn,
    Ghs,
    Kes,
    Zar,
    Rub,
    Try,
}

impl FiatCurrency {
    pub const ALL: [FiatCurrency; 16] = [
        FiatCurrency::Usd,
        FiatCurrency::Eur,
        FiatCurrency::Gbp,
        FiatCurrency::Cad,
        FiatCurrency::Aud,
        FiatCurrency::Jpy,
        FiatCurrency::Cny,
        FiatCurrency::Inr,
        FiatCurrency::Brl,
        FiatCurrency::Mxn,
        FiatCurrency::Ngn,
        FiatCurrency::Ghs,
        FiatCurrency::Kes,
        FiatCurrency::Zar,
        FiatCurrency::Rub,
        FiatCurrency::Try,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            FiatCurrency::Usd => "USD",
            FiatCurrency::Eur => "EUR",
            FiatCurrency::Gbp => "GBP",
            FiatCurrency::Cad => "CAD",
            FiatCurrency::Aud => "AUD",
            FiatCurrency::Jpy => "JPY",
            FiatCurrency::Cny => "CNY",
            FiatCurrency::Inr => "INR",
            FiatCurrency::Brl => "BRL",
            FiatCurrency::Mxn => "MXN",
            FiatCurrency::Ngn => "NGN",
            FiatCurrency::Ghs => "GHS",
            FiatCurrency::Kes => "KES",
            FiatCurrency::Zar => "ZAR",
            FiatCurrency::Rub => "RUB",
            FiatCurrency::Try => "TRY",
        }
    }

    /// Display precision. Yen has no minor unit in circulation.
    pub fn decimals(&self) -> usize {
        match self {
            FiatCurrency::Jpy => 0,
            _ => DEFAULT_FIAT_DECIMALS,
        }
    }

    pub fn format_amount(&self, amount: f64) -> String {
        format!("{:.*}", self.decimals(), amount)
    }
}

/// Display precision for a raw currency code, falling back to two decimals.
pub fn decimals_for_code(code: &str) -> usize {
    code.parse::<FiatCurrency>()
        .map_or(DEFAULT_FIAT_DECIMALS, |fiat| fiat.decimals())
}

impl Display for FiatCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for FiatCurrency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        FiatCurrency::ALL
            .into_iter()
            .find(|fiat| fiat.code() == code)
            .ok_or_else(|| anyhow::anyhow!("Unsupported fiat currency: {}", s))
    }
}
