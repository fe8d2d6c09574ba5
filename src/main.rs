//! Termtally main entry point
//!
//! Starts the count endpoint in front of a fresh in-memory engine.

use clap::Parser;
use std::path::PathBuf;
use termtally::config::{load_config, Config};
use termtally::engine::Engine;
use termtally::server;
use tracing_subscriber::EnvFilter;

/// Termtally: a depth-bounded keyword counting crawler
///
/// Serves a single endpoint that fetches a URL, follows its links to the
/// configured depth, and counts how often a keyword occurs across the
/// resulting neighborhood of pages.
#[derive(Parser, Debug)]
#[command(name = "termtally")]
#[command(version)]
#[command(about = "Depth-bounded keyword counting crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    tracing::info!(
        "max depth {}, fetch timeout {}s, {} workers",
        config.crawler.max_depth,
        config.crawler.fetch_timeout_secs,
        config.crawler.worker_pool_size
    );

    let engine = Engine::new(&config)?;
    server::serve(engine, &config).await?;

    Ok(())
}

fn setup_logging(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
