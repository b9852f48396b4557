use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, instrument};

use crate::core::asset::CryptoAsset;
use crate::core::fiat::FiatCurrency;
use crate::core::rates::RateTable;
use crate::core::source::RateSource;

/// `{ "<asset id>": { "<fiat code, lower case>": price | null } }`
type SimplePriceResponse = HashMap<String, HashMap<String, Option<f64>>>;

/// Spot rates from the CoinGecko `simple/price` endpoint, one request per fetch.
pub struct CoinGeckoSource {
    base_url: String,
    client: reqwest::Client,
}

impl CoinGeckoSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("coinrate/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(CoinGeckoSource {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn price_url(&self) -> String {
        let ids = CryptoAsset::ALL.map(|asset| asset.id()).join(",");
        let vs_currencies = FiatCurrency::ALL
            .map(|fiat| fiat.code().to_lowercase())
            .join(",");
        format!(
            "{}/api/v3/simple/price?ids={ids}&vs_currencies={vs_currencies}",
            self.base_url
        )
    }
}

/// Validates a `simple/price` payload into a complete table. Both assets must be
/// present; individual missing or null prices become the `0.0` sentinel.
fn parse_simple_price(text: &str) -> Result<RateTable> {
    let data: SimplePriceResponse =
        serde_json::from_str(text).context("Failed to parse simple price response")?;

    if let Some(missing) = CryptoAsset::ALL
        .iter()
        .find(|asset| !data.contains_key(asset.id()))
    {
        return Err(anyhow!("No rate data found for asset: {}", missing.id()));
    }

    Ok(RateTable::from_fn(|asset, fiat| {
        data.get(asset.id())
            .and_then(|prices| prices.get(&fiat.code().to_lowercase()))
            .copied()
            .flatten()
            .unwrap_or(0.0)
    }))
}

#[async_trait]
impl RateSource for CoinGeckoSource {
    #[instrument(name = "CoinGeckoRateFetch", skip(self))]
    async fn fetch_rates(&self) -> Result<RateTable> {
        let url = self.price_url();
        debug!("Requesting spot rates from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for spot rates",
                response.status()
            ));
        }

        let text = response
            .text()
            .await
            .context("Failed to get response text")?;

        parse_simple_price(&text).inspect_err(|e| {
            error!(error = %e, response = %text, "Rejected spot rate response");
        })
    }
}
