//! Upstream rate source abstraction

use crate::core::rates::RateTable;
use anyhow::Result;
use async_trait::async_trait;

/// Fetches a complete table of current spot rates in a single request.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateTable>;
}
