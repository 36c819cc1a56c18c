//! TC Error Code Scraper main entry point
//!
//! This is the command-line interface for scraping the TwinCAT NC error code
//! documentation into CSV and PLC source files.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tc_errcode_scraper::config::{load_config_with_hash, validate, Config};
use tc_errcode_scraper::crawler::run_scrape;
use tc_errcode_scraper::output::print_statistics;
use tracing_subscriber::EnvFilter;

/// TC Error Code Scraper
///
/// Scrapes the error code tables of the Beckhoff NC documentation and writes
/// them as a CSV file plus TwinCAT PLC enum, description and converter
/// sources.
#[derive(Parser, Debug)]
#[command(name = "tc-errcode-scraper")]
#[command(version)]
#[command(about = "Scrapes TwinCAT NC error codes into CSV and PLC sources", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Entry page holding the "Further Information" links
    #[arg(long, value_name = "URL")]
    entry_url: Option<String>,

    /// Base URL prepended to relative links
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Path of the CSV output file
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Directory for the generated PLC files
    #[arg(long, value_name = "DIR")]
    plc_dir: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without fetching anything
    #[arg(long, conflicts_with = "summary")]
    dry_run: bool,

    /// Print run statistics when the scrape finishes
    #[arg(long)]
    summary: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli).context("Failed to load configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_scrape(config, cli.summary).await;
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tc_errcode_scraper=info,warn"),
            1 => EnvFilter::new("tc_errcode_scraper=debug,info"),
            2 => EnvFilter::new("tc_errcode_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any), applies command-line overrides and validates
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Could not load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(entry_url) = &cli.entry_url {
        config.source.entry_url = entry_url.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.source.base_url = base_url.clone();
    }
    if let Some(output) = &cli.output {
        config.output.csv_path = output.clone();
    }
    if let Some(plc_dir) = &cli.plc_dir {
        config.output.plc_dir = plc_dir.clone();
    }

    validate(&config)?;
    Ok(config)
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== TC Error Code Scraper Dry Run ===\n");

    println!("Source:");
    println!("  Entry URL: {}", config.source.entry_url);
    println!("  Base URL: {}", config.source.base_url);

    println!("\nHTTP:");
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  User agent: {}", config.http.user_agent);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  PLC directory: {}", config.output.plc_dir);

    println!("\n✓ Configuration is valid");
}

/// Handles the scrape run
///
/// Failures that abort the run are logged with their full cause chain; the
/// process still exits normally.
async fn handle_scrape(config: Config, summary: bool) {
    match run_scrape(config).await {
        Ok(report) => {
            tracing::info!("Scraping completed! Generated files:");
            for path in &report.artifacts.written {
                tracing::info!("- {}", path.display());
            }
            for (path, e) in &report.artifacts.failed {
                tracing::error!("- {} (failed: {})", path.display(), e);
            }

            if summary {
                print_statistics(&report.stats);
            }
        }
        Err(e) => {
            let error = anyhow::Error::new(e).context("Scrape run aborted");
            tracing::error!("An unexpected error occurred: {:?}", error);
        }
    }
}
