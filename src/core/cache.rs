//! Read-through cache of spot rates with stale-on-failure fallback

use crate::core::clock::{Clock, SystemClock};
use crate::core::rates::{Freshness, RateSnapshot, RateTable};
use crate::core::source::RateSource;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// How long a successfully fetched table is served without refreshing.
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

struct CacheEntry {
    table: RateTable,
    fetched_at: Instant,
    fetched_at_utc: DateTime<Utc>,
}

/// Serves rate tables from an upstream [`RateSource`], refreshing at most once per TTL.
///
/// None of the public operations fail. When a refresh fails, the last fetched table is
/// served even if it has expired, and if there is none the hardcoded
/// [`RateTable::fallback`] is served instead. Conversions report "not convertible" as `0.0`.
///
/// The entry lock is held while a refresh is in flight, so concurrent callers during
/// expiry share a single upstream request.
pub struct RateCache<S, C = SystemClock> {
    source: S,
    clock: C,
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl<S: RateSource> RateCache<S, SystemClock> {
    pub fn new(source: S) -> Self {
        Self::with_ttl(source, CACHE_TTL)
    }

    pub fn with_ttl(source: S, ttl: Duration) -> Self {
        Self::with_clock(source, SystemClock, ttl)
    }
}

impl<S: RateSource, C: Clock> RateCache<S, C> {
    pub fn with_clock(source: S, clock: C, ttl: Duration) -> Self {
        Self {
            source,
            clock,
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the current rates tagged with where they came from.
    pub async fn snapshot(&self) -> RateSnapshot {
        let mut entry = self.entry.lock().await;

        if let Some(cached) = entry.as_ref() {
            let age = self.clock.now().saturating_duration_since(cached.fetched_at);
            if age < self.ttl {
                debug!(?age, "Rate cache HIT");
                return RateSnapshot {
                    table: cached.table.clone(),
                    freshness: Freshness::Cached,
                    as_of: Some(cached.fetched_at_utc),
                };
            }
            debug!(?age, "Rate cache entry expired");
        } else {
            debug!("Rate cache MISS");
        }

        match self.source.fetch_rates().await {
            Ok(table) => {
                let fetched_at_utc = Utc::now();
                *entry = Some(CacheEntry {
                    table: table.clone(),
                    fetched_at: self.clock.now(),
                    fetched_at_utc,
                });
                info!("Refreshed crypto rates");
                RateSnapshot {
                    table,
                    freshness: Freshness::Fresh,
                    as_of: Some(fetched_at_utc),
                }
            }
            Err(e) => match entry.as_ref() {
                Some(previous) => {
                    warn!(
                        error = %e,
                        as_of = %previous.fetched_at_utc,
                        "Rate refresh failed, serving stale rates"
                    );
                    RateSnapshot {
                        table: previous.table.clone(),
                        freshness: Freshness::Stale,
                        as_of: Some(previous.fetched_at_utc),
                    }
                }
                None => {
                    warn!(error = %e, "Rate refresh failed, serving fallback rates");
                    RateSnapshot {
                        table: RateTable::fallback(),
                        freshness: Freshness::Fallback,
                        as_of: None,
                    }
                }
            },
        }
    }

    pub async fn get_rates(&self) -> RateTable {
        self.snapshot().await.table
    }

    /// Rate for `asset` in `fiat_code`, both matched case-insensitively. `0.0` if unknown.
    pub async fn get_rate(&self, asset: &str, fiat_code: &str) -> f64 {
        self.get_rates().await.lookup(asset, fiat_code)
    }

    /// Converts a fiat amount into units of `asset`. Returns `0.0` when not convertible.
    pub async fn convert_to_crypto(&self, amount: f64, fiat_code: &str, asset: &str) -> f64 {
        self.get_rates()
            .await
            .convert_to_crypto(amount, fiat_code, asset)
    }

    /// Converts an amount of `asset` into fiat. Returns `0.0` when not convertible.
    pub async fn convert_from_crypto(
        &self,
        crypto_amount: f64,
        fiat_code: &str,
        asset: &str,
    ) -> f64 {
        self.get_rates()
            .await
            .convert_from_crypto(crypto_amount, fiat_code, asset)
    }
}
