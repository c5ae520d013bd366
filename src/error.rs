use chrono::NaiveDate;
use thiserror::Error;

/// Failure taxonomy for the data-access layer.
///
/// Missing composition data is deliberately not represented here: an index
/// without a local composition file is an expected state and surfaces as an
/// empty result with a warning, never as an error.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad configuration, e.g. an unsupported country. Raised at
    /// construction time, never mid-query.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A historical query with `start >= end`. The caller must correct the
    /// inputs; ranges are never silently swapped or clamped.
    #[error("Invalid date range: start {start} must be before end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Any failure from the remote market-data service. Propagated as-is;
    /// retries, if wanted, belong to the remote client.
    #[error("Remote source error: {0}")]
    Remote(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Remote(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Remote(format!("Malformed response: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
