use std::time::Duration;
use tracing::info;
use wiremock::ResponseTemplate;

use coinrate::core::{
    CryptoAsset, FiatCurrency, Freshness, RateCache, RateTable, format_crypto_amount,
};
use coinrate::providers::CoinGeckoSource;

mod test_utils {
    use coinrate::core::FiatCurrency;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const PRICE_PATH: &str = "/api/v3/simple/price";

    /// Builds a complete simple-price body with the given USD prices; other currencies
    /// are quoted at the USD price times two.
    pub fn price_body(btc_usd: f64, xmr_usd: f64) -> String {
        let quotes = |usd: f64| {
            FiatCurrency::ALL
                .iter()
                .map(|fiat| {
                    let price = if *fiat == FiatCurrency::Usd { usd } else { usd * 2.0 };
                    format!(r#""{}": {}"#, fiat.code().to_lowercase(), price)
                })
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            r#"{{"bitcoin": {{{}}}, "monero": {{{}}}}}"#,
            quotes(btc_usd),
            quotes(xmr_usd)
        )
    }

    pub async fn create_mock_server(
        response: ResponseTemplate,
        expected_calls: u64,
    ) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(PRICE_PATH))
            .respond_with(response)
            .expect(expected_calls)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(base_url: &str, extra: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
providers:
  coingecko:
    base_url: "{base_url}"
    timeout_secs: 2
{extra}
"#
        );
        std::fs::write(config_file.path(), config_content).expect("Failed to write config file");
        config_file
    }
}

fn source_for(uri: &str) -> CoinGeckoSource {
    CoinGeckoSource::new(uri, Duration::from_secs(2)).expect("Failed to build source")
}

#[test_log::test(tokio::test)]
async fn test_end_to_end_conversion_with_single_fetch() {
    let body = test_utils::price_body(50000.0, 150.0);
    let mock_server =
        test_utils::create_mock_server(ResponseTemplate::new(200).set_body_string(body), 1).await;
    let cache = RateCache::new(source_for(&mock_server.uri()));

    let btc = cache.convert_to_crypto(100.0, "usd", "bitcoin").await;
    info!(?btc, "Converted 100 USD");
    assert_eq!(btc, 0.002);
    assert_eq!(format_crypto_amount(btc, "BTC"), "0.00200000");

    let xmr_usd = cache.get_rate("monero", "USD").await;
    assert_eq!(xmr_usd, 150.0);
    assert_eq!(cache.convert_from_crypto(2.0, "usd", "monero").await, 300.0);

    let first = cache.get_rates().await;
    let second = cache.get_rates().await;
    assert_eq!(first, second);
    for asset in CryptoAsset::ALL {
        for fiat in FiatCurrency::ALL {
            assert!(first.rate(asset, fiat) > 0.0);
        }
    }
    // MockServer verifies the single expected request on drop
}

#[test_log::test(tokio::test)]
async fn test_upstream_error_without_cache_serves_fallback() {
    let mock_server = test_utils::create_mock_server(ResponseTemplate::new(500), 1).await;
    let cache = RateCache::new(source_for(&mock_server.uri()));

    let snapshot = cache.snapshot().await;
    assert_eq!(snapshot.freshness, Freshness::Fallback);
    assert_eq!(snapshot.table, RateTable::fallback());
}

#[test_log::test(tokio::test)]
async fn test_expired_cache_refetches_once() {
    let body = test_utils::price_body(60000.0, 170.0);
    let mock_server =
        test_utils::create_mock_server(ResponseTemplate::new(200).set_body_string(body), 2).await;
    let cache = RateCache::with_ttl(source_for(&mock_server.uri()), Duration::from_millis(200));

    assert_eq!(cache.snapshot().await.freshness, Freshness::Fresh);
    assert_eq!(cache.snapshot().await.freshness, Freshness::Cached);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(cache.snapshot().await.freshness, Freshness::Fresh);
    assert_eq!(cache.snapshot().await.freshness, Freshness::Cached);
}

#[test_log::test(tokio::test)]
async fn test_failed_refresh_serves_stale_table() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer};

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(test_utils::PRICE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(test_utils::price_body(50000.0, 150.0)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(test_utils::PRICE_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = RateCache::with_ttl(source_for(&mock_server.uri()), Duration::from_millis(20));
    let original = cache.get_rates().await;

    tokio::time::sleep(Duration::from_millis(40)).await;
    let snapshot = cache.snapshot().await;
    assert_eq!(snapshot.freshness, Freshness::Stale);
    assert_eq!(snapshot.table, original);
    assert_eq!(
        snapshot.table.rate(CryptoAsset::Bitcoin, FiatCurrency::Usd),
        50000.0
    );
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let body = test_utils::price_body(50000.0, 150.0);
    let mock_server =
        test_utils::create_mock_server(ResponseTemplate::new(200).set_body_string(body), 3).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "currency: \"EUR\"");
    let config_path = config_file.path().to_str().unwrap();

    for command in [
        coinrate::AppCommand::Rates,
        coinrate::AppCommand::ToCrypto {
            amount: 100.0,
            fiat: None,
            asset: Some("XMR".to_string()),
        },
        coinrate::AppCommand::FromCrypto {
            amount: 0.5,
            fiat: Some("jpy".to_string()),
            asset: None,
        },
    ] {
        let result = coinrate::run_command(command, Some(config_path)).await;
        assert!(
            result.is_ok(),
            "run_command failed with: {:?}",
            result.err()
        );
    }
}

#[test_log::test(tokio::test)]
async fn test_app_flow_survives_upstream_outage() {
    let mock_server = test_utils::create_mock_server(ResponseTemplate::new(502), 1).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "");

    let result = coinrate::run_command(
        coinrate::AppCommand::ToCrypto {
            amount: 25.0,
            fiat: Some("GBP".to_string()),
            asset: Some("BTC".to_string()),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Outage should degrade, not fail: {result:?}");
}

#[test_log::test(tokio::test)]
async fn test_app_flow_rejects_unsupported_currency() {
    let mock_server = test_utils::create_mock_server(ResponseTemplate::new(200), 0).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "");

    let result = coinrate::run_command(
        coinrate::AppCommand::ToCrypto {
            amount: 25.0,
            fiat: Some("CHF".to_string()),
            asset: None,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Cannot convert to or from CHF");
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("absent.yaml");

    let result =
        coinrate::run_command(coinrate::AppCommand::Rates, Some(missing.to_str().unwrap())).await;
    assert!(
        result
            .unwrap_err()
            .to_string()
            .starts_with("Failed to read config file")
    );
}
