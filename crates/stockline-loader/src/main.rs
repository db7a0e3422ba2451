//! Stockline Loader - bulk CSV ingestion tool

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use stockline_common::logging::{init_logging, LogConfig, LogLevel};
use stockline_loader::{
    client::{ApiClient, DEFAULT_SERVER_URL},
    loader::{self, DEFAULT_BATCH_SIZE},
    source::CsvSource,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "stockline-loader")]
#[command(author, version, about = "Bulk-load a catalog CSV into the Stockline ingestion service")]
struct Cli {
    /// CSV file to load (16 positional columns, header row skipped)
    file: PathBuf,

    /// Base URL of the ingestion service
    #[arg(long, env = "STOCKLINE_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,

    /// Shared API secret
    #[arg(long, env = "STOCKLINE_API_KEY")]
    api_key: String,

    /// Records per batch submission (capped at the server's limit of 1000)
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables override the built defaults where set.
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("stockline-loader".to_string())
        .build()
        .merge_env()?;

    init_logging(&log_config)?;

    info!(file = %cli.file.display(), server = %cli.server_url, "Starting catalog load");

    let client = ApiClient::new(cli.server_url, cli.api_key)?;

    // An unreadable source is the one fatal error of a run: nothing has been
    // submitted yet, so there is nothing to report.
    let source = CsvSource::open(&cli.file)?;

    let summary = loader::run(source, &client, cli.batch_size).await?;

    info!(%summary, "Load complete");

    if !summary.is_complete() {
        warn!(
            batches_failed = summary.batches_failed,
            rows_rejected = summary.rows_rejected,
            "Load finished with dropped work; re-running from the start is safe"
        );
    }

    Ok(())
}
