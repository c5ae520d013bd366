use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use idx::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Country to query (two-letter code or full name), overriding config
    #[arg(short = 'C', long, global = true)]
    country: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for idx::AppCommand {
    fn from(cmd: Commands) -> idx::AppCommand {
        match cmd {
            Commands::Indices => idx::AppCommand::Indices,
            Commands::History { index, from, to } => idx::AppCommand::History { index, from, to },
            Commands::Overview { index } => idx::AppCommand::Overview { index },
            Commands::Weightings { index } => idx::AppCommand::Weightings { index },
            Commands::Sectors { index } => idx::AppCommand::Sectors { index },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List the indices available for the configured country
    Indices,
    /// Display historical OHLC values for an index
    History {
        /// Index name as listed by `indices`
        index: String,
        /// Start date (YYYY-MM-DD), inclusive
        #[arg(long)]
        from: NaiveDate,
        /// End date (YYYY-MM-DD), inclusive
        #[arg(long)]
        to: NaiveDate,
    },
    /// Display the current overview of an index's component stocks
    Overview { index: String },
    /// Display per-company weightings of an index
    Weightings { index: String },
    /// Display per-sector weightings of an index
    Sectors { index: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => {
            idx::run_command(
                cmd.into(),
                cli.config_path.as_deref(),
                cli.country.as_deref(),
            )
            .await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = idx::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
country: "NL"

providers:
  investing:
    base_url: "https://data.investing.example.com"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
