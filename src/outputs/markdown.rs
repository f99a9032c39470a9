//! Markdown results table.
//!
//! One row per game:
//!
//! ```text
//! | Away | Score | Home | Winner |
//! |------|-------|------|--------|
//! | Washington Capitals | 4-3 | Vegas Golden Knights | WSH |
//! ```
//!
//! Ties and games without a known result show `-` as the winner.

use crate::models::{Boxscore, BoxscoreReport};
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

fn game_row(game: &Boxscore) -> String {
    let score = |goals: Option<i32>| goals.map_or_else(|| "?".to_string(), |g| g.to_string());
    let team = |name: Option<&str>, abbr: Option<&str>| {
        name.or(abbr).unwrap_or("Unknown").replace('|', "\\|")
    };
    let winner = game
        .winning_abbr()
        .or_else(|| game.winning_name())
        .unwrap_or("-");

    format!(
        "| {} | {}-{} | {} | {} |\n",
        team(game.away().name(), game.away().abbreviation()),
        score(game.away().goals()),
        score(game.home().goals()),
        team(game.home().name(), game.home().abbreviation()),
        winner
    )
}

/// Render a report as a Markdown document.
pub fn report_to_markdown(report: &BoxscoreReport) -> String {
    let mut md = match report.date {
        Some(date) => format!("# Results for {}\n\n", date),
        None => "# Results\n\n".to_string(),
    };

    if report.boxscores.is_empty() {
        md.push_str("_No games found._\n");
        return md;
    }

    md.push_str("| Away | Score | Home | Winner |\n");
    md.push_str("|------|-------|------|--------|\n");
    for game in &report.boxscores {
        md.push_str(&game_row(game));
    }
    md.push_str(&format!("\n_Generated {}_\n", report.generated_at));
    md
}

/// Write the Markdown rendering of `report` into `markdown_output_dir`.
#[instrument(level = "info", skip_all, fields(%markdown_output_dir))]
pub async fn write_report(
    report: &BoxscoreReport,
    markdown_output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    fs::create_dir_all(markdown_output_dir).await?;
    let name = match report.date {
        Some(date) => format!("{}.md", date),
        None => "boxscores.md".to_string(),
    };
    let path = format!("{}/{}", markdown_output_dir.trim_end_matches('/'), name);
    fs::write(&path, report_to_markdown(report)).await?;
    info!(%path, "Wrote Markdown report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const BOXSCORE_PAGE: &str = include_str!("../../tests/fixtures/201806070VEG.html");

    fn report(boxscores: Vec<Boxscore>) -> BoxscoreReport {
        BoxscoreReport {
            generated_at: "2018-06-08T09:00:00+00:00".to_string(),
            date: NaiveDate::from_ymd_opt(2018, 6, 7),
            boxscores,
        }
    }

    #[test]
    fn test_report_to_markdown_rows() {
        let game = Boxscore::from_html("201806070VEG", BOXSCORE_PAGE).unwrap();
        let md = report_to_markdown(&report(vec![game]));
        assert!(md.starts_with("# Results for 2018-06-07\n"));
        assert!(md.contains("| Washington Capitals | 4-3 | Vegas Golden Knights | WSH |"));
    }

    #[test]
    fn test_unknown_result_row() {
        let game = Boxscore::from_html("201806070VEG", "<html></html>").unwrap();
        let md = report_to_markdown(&report(vec![game]));
        assert!(md.contains("| Unknown | ?-? | Unknown | - |"));
    }

    #[test]
    fn test_empty_report() {
        let md = report_to_markdown(&report(Vec::new()));
        assert!(md.contains("_No games found._"));
        assert!(!md.contains("| Away |"));
    }

    #[tokio::test]
    async fn test_write_report() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        let path = write_report(&report(Vec::new()), dir).await.unwrap();
        assert!(path.ends_with("/2018-06-07.md"));
        assert!(std::path::Path::new(&path).exists());
    }
}
