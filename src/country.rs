//! Country resolution and ticker normalization.

use crate::error::{Error, Result};
use std::fmt::Display;
use std::str::FromStr;

/// The supported markets. Both the remote source and the local composition
/// files are keyed off a single resolved `Country` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Country {
    Netherlands,
    Germany,
}

impl Country {
    /// The lowercase identifier the remote market-data source expects.
    pub fn source_name(&self) -> &'static str {
        match self {
            Country::Netherlands => "netherlands",
            Country::Germany => "germany",
        }
    }

}

impl Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source_name())
    }
}

impl FromStr for Country {
    type Err = Error;

    /// Accepts either the two-letter country code or the full lowercase
    /// name, resolving both to one canonical value.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "NL" | "NETHERLANDS" => Ok(Country::Netherlands),
            "DE" | "GERMANY" => Ok(Country::Germany),
            _ => Err(Error::Config(format!(
                "Country must be NL or DE, got {s:?} instead"
            ))),
        }
    }
}

/// Strips the share-class suffix the German overview feed appends to ticker
/// symbols (`Gn`, or a bare `G`). Composition files carry the unsuffixed
/// symbols, so the join between the two fails without this. Other markets
/// pass through unchanged.
pub fn normalize_ticker(country: Country, ticker: &str) -> String {
    if country != Country::Germany {
        return ticker.to_string();
    }
    if let Some(stripped) = ticker.strip_suffix("Gn") {
        stripped.to_string()
    } else if let Some(stripped) = ticker.strip_suffix('G') {
        stripped.to_string()
    } else {
        ticker.to_string()
    }
}
