pub mod coingecko;

pub use coingecko::CoinGeckoSource;
