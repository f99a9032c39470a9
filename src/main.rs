//! Command-line entry point: scrape boxscores and write reports.
//!
//! ```sh
//! nhl_boxscore --date 2018-06-07 -j ./json -m ./markdown
//! ```

use chrono::Local;
use clap::Parser;
use nhl_boxscore::cli::Cli;
use nhl_boxscore::config::load_config;
use nhl_boxscore::fetch::build_client;
use nhl_boxscore::models::BoxscoreReport;
use nhl_boxscore::outputs::{json, markdown};
use nhl_boxscore::scrapers::schedule::{fetch_boxscores, index_boxscores};
use nhl_boxscore::utils::ensure_writable_dir;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("nhl_boxscore starting up");

    let args = Cli::parse();
    debug!(?args.uris, ?args.date, ?args.json_output_dir, "Parsed CLI arguments");

    let mut config = load_config(args.config.as_deref()).await?;
    if let Some(base_url) = args.base_url.clone() {
        config.base_url = base_url;
    }
    info!(base_url = %config.base_url, concurrency = config.concurrency, "Using configuration");

    // Early check: ensure output dirs are writable
    for dir in std::iter::once(&args.json_output_dir).chain(args.markdown_output_dir.as_ref()) {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "Output directory is not writable");
            return Err(e);
        }
    }

    let client = build_client(&config)?;

    // ---- Index ----
    let mut uris = args.uris.clone();
    if let Some(date) = args.date {
        let indexed = index_boxscores(&client, &config.base_url, date).await?;
        uris.extend(indexed);
    }
    info!(count = uris.len(), "Boxscores to fetch");

    // ---- Fetch ----
    let boxscores = fetch_boxscores(&client, &config.base_url, uris, config.concurrency).await;

    let report = BoxscoreReport {
        generated_at: Local::now().to_rfc3339(),
        date: args.date,
        boxscores,
    };

    // ---- Output ----
    if let Err(e) = json::write_report(&report, &args.json_output_dir).await {
        error!(error = %e, "Failed to write JSON report");
        return Err(e);
    }

    if let Some(dir) = &args.markdown_output_dir {
        if let Err(e) = markdown::write_report(&report, dir).await {
            error!(path = %dir, error = %e, "Failed to write Markdown report");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        games = report.boxscores.len(),
        "Execution complete"
    );

    Ok(())
}
