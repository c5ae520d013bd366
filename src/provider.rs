//! The query surface the presentation layer consumes.

use crate::composition::CompositionStore;
use crate::country::{Country, normalize_ticker};
use crate::error::{Error, Result};
use crate::market_data::{HistoricalSeries, MarketDataProvider, OverviewRecord, PricePoint};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Canonical date key used on the historical series' date axis.
const DATE_KEY_FORMAT: &str = "%Y/%m/%d";

/// Per-company weighting row, projected from the composition set.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyWeighting {
    pub company: String,
    pub weighting: f64,
}

/// Per-sector aggregate, summed over all companies sharing a sector.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorWeighting {
    pub sector: String,
    pub weighting: f64,
}

/// Resolves a country to its data sources and answers index queries:
/// available indices, historical series, component overviews and weighting
/// aggregates. Composition reads are memoized by the store; historical and
/// overview data represent time-varying external state and are fetched fresh
/// on every call.
pub struct IndexDataProvider {
    country: Country,
    market: Arc<dyn MarketDataProvider>,
    store: CompositionStore,
}

impl IndexDataProvider {
    /// Fails with [`Error::Config`] when `country` is not in the supported
    /// set.
    pub fn new(
        country: &str,
        market: Arc<dyn MarketDataProvider>,
        store: CompositionStore,
    ) -> Result<Self> {
        let country = country.parse::<Country>()?;
        debug!("Resolved country to {}", country);
        Ok(Self {
            country,
            market,
            store,
        })
    }

    pub fn country(&self) -> Country {
        self.country
    }

    /// The list of available index names, in the remote source's order.
    pub async fn available_indices(&self) -> Result<Vec<String>> {
        self.market.list_indices(self.country).await
    }

    /// The time series of the index values between `start` and `end`, both
    /// inclusive, with the date axis keyed as `YYYY/MM/DD`.
    pub async fn index_data(
        &self,
        name: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HistoricalSeries> {
        if start >= end {
            return Err(Error::InvalidRange { start, end });
        }

        let bars = self
            .market
            .fetch_history(name, self.country, start, end)
            .await?;

        // An empty series has no date axis to reformat.
        if bars.is_empty() {
            return Ok(Vec::new());
        }

        Ok(bars
            .into_iter()
            .map(|bar| PricePoint {
                date: bar.date.format(DATE_KEY_FORMAT).to_string(),
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
            })
            .collect())
    }

    /// Overview records for the stocks making up `index_name`, in the
    /// overview feed's order. An index without local composition data yields
    /// an empty result.
    pub async fn components_overview(&self, index_name: &str) -> Result<Vec<OverviewRecord>> {
        let composition = self.store.get(index_name)?;
        if composition.is_empty() {
            warn!("No index overview found for {}", index_name);
            return Ok(Vec::new());
        }

        // The composition files and the overview feed disagree on suffix
        // conventions for some markets, so match against both the raw and
        // the normalized ticker, case-insensitively.
        let mut wanted: HashSet<String> = HashSet::new();
        for record in &composition {
            wanted.insert(record.ticker.to_uppercase());
            wanted.insert(normalize_ticker(self.country, &record.ticker).to_uppercase());
        }

        let overview = self.market.fetch_overview(self.country).await?;
        Ok(overview
            .into_iter()
            .map(|mut record| {
                record.symbol = record.symbol.to_uppercase();
                record
            })
            .filter(|record| wanted.contains(&record.symbol))
            .collect())
    }

    /// The weightings of the individual stocks of the index, as
    /// `(Company, Weighting)` rows.
    pub fn weightings(&self, index_name: &str) -> Result<Vec<CompanyWeighting>> {
        let composition = self.store.get(index_name)?;
        if composition.is_empty() {
            warn!("No index weightings found for {}", index_name);
            return Ok(Vec::new());
        }

        Ok(composition
            .into_iter()
            .map(|record| CompanyWeighting {
                company: record.company,
                weighting: record.weighting,
            })
            .collect())
    }

    /// The weightings of the sectors of the index, summed per sector and
    /// sorted by sector name.
    pub fn sector_weightings(&self, index_name: &str) -> Result<Vec<SectorWeighting>> {
        let composition = self.store.get(index_name)?;
        if composition.is_empty() {
            warn!("No index weightings found for {}", index_name);
            return Ok(Vec::new());
        }

        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for record in composition {
            *totals.entry(record.sector).or_insert(0.0) += record.weighting;
        }

        Ok(totals
            .into_iter()
            .map(|(sector, weighting)| SectorWeighting { sector, weighting })
            .collect())
    }

    /// Normalizes a batch of tickers to the overview feed's convention for
    /// the resolved country.
    pub fn preprocess_tickers<'a, I>(&self, tickers: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        tickers
            .into_iter()
            .map(|ticker| normalize_ticker(self.country, ticker))
            .collect()
    }
}
