//! Supported crypto assets

use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum CryptoAsset {
    Bitcoin,
    Monero,
}

impl CryptoAsset {
    pub const ALL: [CryptoAsset; 2] = [CryptoAsset::Bitcoin, CryptoAsset::Monero];

    /// Identifier used by the upstream market data API.
    pub fn id(&self) -> &'static str {
        match self {
            CryptoAsset::Bitcoin => "bitcoin",
            CryptoAsset::Monero => "monero",
        }
    }

    pub fn ticker(&self) -> &'static str {
        match self {
            CryptoAsset::Bitcoin => "BTC",
            CryptoAsset::Monero => "XMR",
        }
    }

    /// Number of decimal places shown for amounts of this asset.
    pub fn decimals(&self) -> usize {
        match self {
            CryptoAsset::Bitcoin => 8,
            CryptoAsset::Monero => 12,
        }
    }

    pub fn format_amount(&self, amount: f64) -> String {
        format!("{:.*}", self.decimals(), amount)
    }
}

impl Display for CryptoAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ticker())
    }
}

impl FromStr for CryptoAsset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bitcoin" | "btc" => Ok(CryptoAsset::Bitcoin),
            "monero" | "xmr" => Ok(CryptoAsset::Monero),
            _ => Err(anyhow::anyhow!("Unsupported crypto asset: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_ids_and_tickers() {
        assert_eq!("bitcoin".parse::<CryptoAsset>().unwrap(), CryptoAsset::Bitcoin);
        assert_eq!("BTC".parse::<CryptoAsset>().unwrap(), CryptoAsset::Bitcoin);
        assert_eq!("Monero".parse::<CryptoAsset>().unwrap(), CryptoAsset::Monero);
        assert_eq!("xmr".parse::<CryptoAsset>().unwrap(), CryptoAsset::Monero);
    }

    #[test]
    fn test_parse_rejects_unknown_asset() {
        let err = "ethereum".parse::<CryptoAsset>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported crypto asset: ethereum");
    }

    #[test]
    fn test_format_amount_precision() {
        assert_eq!(CryptoAsset::Bitcoin.format_amount(0.002), "0.00200000");
        assert_eq!(CryptoAsset::Monero.format_amount(1.5), "1.500000000000");
    }
}
