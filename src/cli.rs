//! Command-line interface definitions.
//!
//! All options can be given as flags; the site root can also come from the
//! environment.

use chrono::NaiveDate;
use clap::Parser;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # A single game
/// nhl_boxscore 201806070VEG -j ./json
///
/// # Every game on a date, with a Markdown table
/// nhl_boxscore --date 2018-06-07 -j ./json -m ./markdown
///
/// # Against a mirror
/// BOXSCORE_BASE_URL=http://localhost:8080 nhl_boxscore 201806070VEG -j ./json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Boxscore identifiers to scrape, e.g. 201806070VEG
    #[arg(value_name = "URI", required_unless_present = "date")]
    pub uris: Vec<String>,

    /// Scrape every game played on this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Output directory for the JSON report
    #[arg(short, long)]
    pub json_output_dir: String,

    /// Output directory for the Markdown results table
    #[arg(short, long)]
    pub markdown_output_dir: Option<String>,

    /// Optional path to config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Site root, overriding the config file
    #[arg(long, env = "BOXSCORE_BASE_URL")]
    pub base_url: Option<String>,
}
