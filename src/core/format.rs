//! Display formatting for crypto and fiat amounts

use crate::core::asset::CryptoAsset;
use crate::core::fiat::decimals_for_code;

/// Formats `amount` with the fixed precision of `asset` (8 for BTC, 12 for XMR).
/// Unrecognized assets get the plain `f64` representation.
pub fn format_crypto_amount(amount: f64, asset: &str) -> String {
    match asset.parse::<CryptoAsset>() {
        Ok(asset) => asset.format_amount(amount),
        Err(_) => amount.to_string(),
    }
}

/// Formats `amount` with the display precision of `fiat_code`; unknown codes use two decimals.
pub fn format_currency_amount(amount: f64, fiat_code: &str) -> String {
    format!("{:.*}", decimals_for_code(fiat_code), amount)
}
