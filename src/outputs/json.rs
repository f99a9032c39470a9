//! JSON output.
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! ├── 2018-06-07.json    # games indexed by date
//! └── boxscores.json     # games requested by identifier
//! ```
//!
//! Each game is written with all of its fields plus the resolved `winner`,
//! `winning_name` and `losing_name`.

use crate::models::{Boxscore, BoxscoreReport, Side};
use chrono::NaiveDate;
use serde::Serialize;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

#[derive(Serialize)]
struct GameRecord<'a> {
    #[serde(flatten)]
    boxscore: &'a Boxscore,
    winner: Option<Side>,
    winning_name: Option<&'a str>,
    losing_name: Option<&'a str>,
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    generated_at: &'a str,
    date: Option<NaiveDate>,
    games: Vec<GameRecord<'a>>,
}

/// Serialize a report to a JSON string.
pub fn report_to_json(report: &BoxscoreReport) -> Result<String, serde_json::Error> {
    let document = ReportDocument {
        generated_at: &report.generated_at,
        date: report.date,
        games: report
            .boxscores
            .iter()
            .map(|boxscore| GameRecord {
                boxscore,
                winner: boxscore.winner(),
                winning_name: boxscore.winning_name(),
                losing_name: boxscore.losing_name(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&document)
}

/// File name the report is written under.
pub fn report_filename(report: &BoxscoreReport) -> String {
    match report.date {
        Some(date) => format!("{}.json", date),
        None => "boxscores.json".to_string(),
    }
}

/// Write a [`BoxscoreReport`] into `json_output_dir`, creating it if needed.
///
/// Returns the path written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_report(
    report: &BoxscoreReport,
    json_output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let json = report_to_json(report)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = format!(
        "{}/{}",
        json_output_dir.trim_end_matches('/'),
        report_filename(report)
    );
    fs::write(&path, json).await?;
    info!(%path, games = report.boxscores.len(), "Wrote JSON report");
    Ok(path)
}
