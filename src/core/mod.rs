//! Core rate types, the cache and its collaborators

pub mod asset;
pub mod cache;
pub mod clock;
pub mod config;
pub mod fiat;
pub mod format;
pub mod log;
pub mod rates;
pub mod source;

// Re-export main types for cleaner imports
pub use asset::CryptoAsset;
pub use cache::{CACHE_TTL, RateCache};
pub use clock::{Clock, SystemClock};
pub use fiat::FiatCurrency;
pub use format::{format_crypto_amount, format_currency_amount};
pub use rates::{Freshness, RateSnapshot, RateTable};
pub use source::RateSource;
