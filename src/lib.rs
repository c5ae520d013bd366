pub mod cache;
pub mod composition;
pub mod config;
pub mod country;
pub mod display;
pub mod error;
pub mod log;
pub mod market_data;
pub mod provider;
pub mod providers;
pub mod ui;

use crate::composition::CompositionStore;
use crate::provider::IndexDataProvider;
use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

/// Environment variable overriding the configured country.
pub const COUNTRY_ENV_VAR: &str = "IDX_COUNTRY";

/// The closed set of views the CLI can render. Adding a view is a
/// compile-time-visible change; every variant is matched exhaustively in
/// [`run_command`].
#[derive(Debug, Clone)]
pub enum AppCommand {
    Indices,
    History {
        index: String,
        from: NaiveDate,
        to: NaiveDate,
    },
    Overview {
        index: String,
    },
    Weightings {
        index: String,
    },
    Sectors {
        index: String,
    },
}

fn build_provider(
    config: &config::AppConfig,
    country_override: Option<&str>,
) -> Result<IndexDataProvider> {
    let env_country = std::env::var(COUNTRY_ENV_VAR).ok();
    let country = country_override
        .map(str::to_string)
        .or(env_country)
        .unwrap_or_else(|| config.country.clone());

    let base_url = config
        .providers
        .investing
        .as_ref()
        .map_or(config::DEFAULT_BASE_URL, |p| &p.base_url);
    let market = providers::investing::InvestingProvider::new(base_url);
    let store = CompositionStore::new(config.data_dir()?);

    Ok(IndexDataProvider::new(&country, Arc::new(market), store)?)
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    country_override: Option<&str>,
) -> Result<()> {
    info!("Index browser starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = build_provider(&config, country_override)?;
    let country = provider.country();

    match command {
        AppCommand::Indices => {
            let spinner = ui::new_spinner("Fetching available indices...");
            let names = provider.available_indices().await;
            spinner.finish_and_clear();
            println!("{}", display::indices_table(country.source_name(), &names?));
        }
        AppCommand::History { index, from, to } => {
            let spinner = ui::new_spinner("Fetching historical data...");
            let series = provider.index_data(&index, from, to).await;
            spinner.finish_and_clear();
            println!("{}", display::history_table(&index, &series?));
        }
        AppCommand::Overview { index } => {
            let spinner = ui::new_spinner("Fetching components overview...");
            let records = provider.components_overview(&index).await;
            spinner.finish_and_clear();
            println!("{}", display::overview_table(&index, &records?));
        }
        AppCommand::Weightings { index } => {
            let weightings = provider.weightings(&index)?;
            println!("{}", display::weightings_table(&index, &weightings));
        }
        AppCommand::Sectors { index } => {
            let weightings = provider.sector_weightings(&index)?;
            println!("{}", display::sectors_table(&index, &weightings));
        }
    }

    Ok(())
}
