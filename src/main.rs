use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use nfl::cache::{SeasonCache, DEFAULT_CACHE_SIZE};
use nfl::commands;
use nfl::config::{self, Config};
use nfl::data_provider::{DataProvider, NflverseClient, StatsSource};

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "nfl")]
#[command(
    about = "NFL weekly player stats viewer",
    long_about = "NFL weekly player stats viewer\n\nIf no command is specified, the program starts in interactive mode."
)]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Use built-in fixture data instead of the network
    #[cfg(feature = "development")]
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable teams
    Teams,
    /// List the selectable seasons
    Years,
    /// Print one team's weekly stats for a season
    Stats {
        /// Team display name (e.g. "Kansas City Chiefs")
        #[arg(short, long)]
        team: String,

        /// Season year (1999-2024)
        #[arg(short, long)]
        year: String,
    },
    /// Display current configuration
    Config,
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

#[cfg(feature = "development")]
fn mock_source(cli: &Cli) -> Option<Arc<dyn StatsSource>> {
    cli.mock.then(|| {
        tracing::info!("Using fixture data source");
        Arc::new(nfl::dev::mock_source::MockSource::new()) as Arc<dyn StatsSource>
    })
}

#[cfg(not(feature = "development"))]
fn mock_source(_cli: &Cli) -> Option<Arc<dyn StatsSource>> {
    None
}

/// Build the provider the whole process shares
fn create_provider(cli: &Cli, config: &Config) -> anyhow::Result<Arc<DataProvider>> {
    let source: Arc<dyn StatsSource> = match mock_source(cli) {
        Some(source) => source,
        None => Arc::new(NflverseClient::from_config(config)?),
    };
    let cache = SeasonCache::new(DEFAULT_CACHE_SIZE, config.cache_ttl_secs);
    Ok(Arc::new(DataProvider::with_cache(source, cache)))
}

/// Execute a CLI command by routing it to the appropriate command handler
async fn execute_command(
    provider: &DataProvider,
    config: &Config,
    command: Commands,
) -> anyhow::Result<()> {
    match command {
        Commands::Config => commands::config::run(config),
        Commands::Teams => commands::teams::run(provider).await,
        Commands::Years => commands::years::run(provider),
        Commands::Stats { team, year } => commands::stats::run(provider, &team, &year).await,
    }
}

#[tokio::main]
async fn main() {
    let (config, config_error) = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    // Reported only now so the warning reaches the log file too
    if let Some(e) = config_error {
        eprintln!("Warning: config {}, using defaults", e);
        tracing::warn!("CONFIG: {}, using defaults", e);
    }

    let provider = match create_provider(&cli, &config) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            tracing::error!("Failed to create data provider: {:#}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        None => {
            if let Err(e) = nfl::tui::run(provider, config).await {
                eprintln!("Error running TUI: {}", e);
                std::process::exit(1);
            }
        }
        Some(command) => {
            if let Err(e) = execute_command(&provider, &config, command).await {
                eprintln!("Error: {:#}", e);
                tracing::error!("Command failed: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}
