//! Migration-Audit main entry point
//!
//! This is the command-line interface for the Migration-Audit page auditor.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use migration_audit::config::{
    base_url_from_env, load_config_with_hash, load_dotenv, validate_concurrency, AuditConfig,
    Credentials,
};
use migration_audit::crawler::Coordinator;
use migration_audit::input::load_targets;
use migration_audit::output::{print_statistics, write_csv_report, RunStatistics};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Migration-Audit: residual defect finder for migrated sites
///
/// Fetches every page listed in the input CSV with HTTP Basic auth, checks
/// the links and copy inside `<main>`, and writes one CSV row per problem.
#[derive(Parser, Debug)]
#[command(name = "migration-audit")]
#[command(version = "1.0.0")]
#[command(about = "Audit migrated pages for residual defects", long_about = None)]
struct Cli {
    /// CSV file listing the pages to audit
    #[arg(short, long, value_name = "FILE", default_value = "pages.csv")]
    input: PathBuf,

    /// Where to write the issue report
    #[arg(short, long, value_name = "FILE", default_value = "migration_audit_report.csv")]
    output: PathBuf,

    /// Audit only the first N pages (0 audits every page)
    #[arg(short, long, value_name = "N")]
    limit: Option<usize>,

    /// Number of pages audited at once (overrides the config file)
    #[arg(short, long, value_name = "N")]
    concurrency: Option<usize>,

    /// Optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("migration_audit=info,warn"),
            1 => EnvFilter::new("migration_audit=debug,info"),
            2 => EnvFilter::new("migration_audit=trace,debug"),
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

/// Runs one complete audit
async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_configuration(cli.config.as_deref())?;

    if let Some(concurrency) = cli.concurrency {
        validate_concurrency(concurrency).context("Invalid --concurrency")?;
        config.crawler.concurrency = concurrency;
    }

    match load_dotenv()? {
        Some(path) => tracing::debug!("Loaded environment from {}", path.display()),
        None => tracing::debug!("No .env file found"),
    }

    // Credentials are checked before any input is read or page fetched
    let credentials = Credentials::from_env().context("Missing HTTP credentials")?;
    let base_url = base_url_from_env()?;

    tracing::info!("Reading pages from: {}", cli.input.display());
    let targets = load_targets(&cli.input, base_url.as_ref(), cli.limit)
        .with_context(|| format!("Failed to load {}", cli.input.display()))?;

    let coordinator = Coordinator::new(&config, credentials)?;

    let started_at = Utc::now();
    let report = coordinator.run(&targets).await;
    let finished_at = Utc::now();

    write_csv_report(&cli.output, &report)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    if !cli.quiet {
        let stats = RunStatistics::from_report(&report, started_at, finished_at);
        println!();
        print_statistics(&stats);
        println!("\n✓ Report written to: {}", cli.output.display());
    }

    Ok(())
}

/// Loads the config file when given, otherwise the built-in defaults
fn load_configuration(path: Option<&std::path::Path>) -> anyhow::Result<AuditConfig> {
    let Some(path) = path else {
        tracing::debug!("No config file given, using defaults");
        return Ok(AuditConfig::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}
