//! Market data abstractions and core types

use crate::country::Country;
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

/// A single OHLC bar as returned by the remote source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OhlcRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// One point of a historical series after the date axis has been reformatted
/// to the canonical `YYYY/MM/DD` key.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

pub type HistoricalSeries = Vec<PricePoint>;

/// Current trading snapshot for a single stock.
#[derive(Debug, Clone, Deserialize)]
pub struct OverviewRecord {
    pub symbol: String,
    pub name: String,
    pub last: f64,
    pub change: String,
    pub change_percentage: String,
}

/// The upstream market-data service: index listings, historical OHLC series
/// and per-stock overview snapshots for a country. Failures are propagated
/// to the caller unmodified; no retries happen at this level.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Index names available for `country`, in the source's natural order.
    async fn list_indices(&self, country: Country) -> Result<Vec<String>>;

    /// Historical OHLC bars for `index` between `from` and `to`, both
    /// inclusive.
    async fn fetch_history(
        &self,
        index: &str,
        country: Country,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<OhlcRecord>>;

    /// Overview snapshot for every stock traded in `country`.
    async fn fetch_overview(&self, country: Country) -> Result<Vec<OverviewRecord>>;
}
