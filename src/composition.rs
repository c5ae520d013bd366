//! Local index-composition files.
//!
//! One CSV per index, named after the index, with a `Company, Sector,
//! Ticker, Weighting` header. Not every index has curated composition data;
//! an absent file is a valid state and yields an empty record set.

use crate::cache::LruCache;
use crate::error::Result;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

/// One component company of an index.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CompositionRecord {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Weighting")]
    pub weighting: f64,
}

/// Capacity of the per-index memoization cache. Composition files are
/// immutable once loaded, so a read is done at most once per cached name.
const CACHE_CAPACITY: usize = 20;

pub struct CompositionStore {
    data_dir: PathBuf,
    cache: LruCache<String, Vec<CompositionRecord>>,
}

impl CompositionStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_capacity(data_dir, CACHE_CAPACITY)
    }

    pub fn with_capacity(data_dir: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: LruCache::new(capacity),
        }
    }

    /// Returns the composition records for `index_name`, reading the file at
    /// most once per cached name. A missing file yields an empty vec.
    pub fn get(&self, index_name: &str) -> Result<Vec<CompositionRecord>> {
        if let Some(cached) = self.cache.get(&index_name.to_string()) {
            return Ok(cached);
        }

        let records = self.read_file(index_name)?;
        self.cache.put(index_name.to_string(), records.clone());
        Ok(records)
    }

    fn read_file(&self, index_name: &str) -> Result<Vec<CompositionRecord>> {
        let path = self.data_dir.join(format!("{index_name}.csv"));
        if !path.is_file() {
            return Ok(Vec::new());
        }

        info!("Reading {}", path.display());
        let mut reader = csv::Reader::from_path(&path)?;
        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: CompositionRecord = result?;
            records.push(record);
        }
        Ok(records)
    }
}
