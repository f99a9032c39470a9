//! Where a boxscore's raw values come from.
//!
//! [`StatSource`] is the seam between page markup and the boxscore logic.
//! [`HtmlStatSource`] reads a hockey-reference style boxscore page; tests
//! plug in their own implementation with fixed values.
//!
//! Sources hand back raw strings. Turning them into numbers, and deciding what
//! happens when that fails, is the boxscore's job.

use crate::models::Side;
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use tracing::debug;

/// Per-player skater columns, keyed by the table's `data-stat` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkaterStat {
    Assists,
    Points,
    PenaltiesInMinutes,
    EvenStrengthGoals,
    PowerPlayGoals,
    ShortHandedGoals,
    GameWinningGoals,
    EvenStrengthAssists,
    PowerPlayAssists,
    ShortHandedAssists,
    Shots,
    ShootingPercentage,
}

impl SkaterStat {
    pub fn data_stat(self) -> &'static str {
        match self {
            SkaterStat::Assists => "assists",
            SkaterStat::Points => "points",
            SkaterStat::PenaltiesInMinutes => "pen_min",
            SkaterStat::EvenStrengthGoals => "goals_ev",
            SkaterStat::PowerPlayGoals => "goals_pp",
            SkaterStat::ShortHandedGoals => "goals_sh",
            SkaterStat::GameWinningGoals => "goals_gw",
            SkaterStat::EvenStrengthAssists => "assists_ev",
            SkaterStat::PowerPlayAssists => "assists_pp",
            SkaterStat::ShortHandedAssists => "assists_sh",
            SkaterStat::Shots => "shots",
            SkaterStat::ShootingPercentage => "shot_pct",
        }
    }
}

/// Per-player goalie columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalieStat {
    ShotsAgainst,
    Saves,
    SavePercentage,
    Shutouts,
}

impl GoalieStat {
    pub fn data_stat(self) -> &'static str {
        match self {
            GoalieStat::ShotsAgainst => "shots_against",
            GoalieStat::Saves => "saves",
            GoalieStat::SavePercentage => "save_pct",
            GoalieStat::Shutouts => "shutouts",
        }
    }
}

/// Raw values for one game.
pub trait StatSource {
    /// Team display name.
    fn team_name(&self, side: Side) -> Option<String>;

    /// Team abbreviation, e.g. `VEG`.
    fn team_abbr(&self, side: Side) -> Option<String>;

    /// Final score as printed.
    fn score(&self, side: Side) -> Option<String>;

    /// Number of skaters listed for the side. Guards the per-player aggregates.
    fn skater_count(&self, side: Side) -> usize;

    /// One raw entry per skater for `stat`, in table order.
    fn skater_column(&self, side: Side, stat: SkaterStat) -> Vec<String>;

    /// The team-total entry for `stat`, if the table has one.
    fn skater_total(&self, side: Side, stat: SkaterStat) -> Option<String>;

    /// One raw entry per goalie for `stat`, in table order.
    fn goalie_column(&self, side: Side, stat: GoalieStat) -> Vec<String>;

    /// Lines of the game information block: date first, then `Key: value` lines.
    fn game_info(&self) -> Vec<String>;
}

struct Selectors {
    team_link: Selector,
    score: Selector,
    meta_line: Selector,
    skater_table: Selector,
    goalie_table: Selector,
    body_row: Selector,
    foot_row: Selector,
    cell: Selector,
}

impl Selectors {
    fn new() -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            team_link: Selector::parse(r#"div.scorebox a[itemprop="name"]"#)?,
            score: Selector::parse("div.scorebox div.score")?,
            meta_line: Selector::parse("div.scorebox_meta > div")?,
            skater_table: Selector::parse(r#"table[id$="_skaters"]"#)?,
            goalie_table: Selector::parse(r#"table[id$="_goalies"]"#)?,
            body_row: Selector::parse("tbody > tr:not(.thead)")?,
            foot_row: Selector::parse("tfoot > tr")?,
            cell: Selector::parse("td")?,
        })
    }
}

/// A [`StatSource`] over a parsed boxscore page.
pub struct HtmlStatSource {
    document: Html,
    selectors: Selectors,
}

impl HtmlStatSource {
    /// Parse a boxscore page.
    ///
    /// Secondary tables on these pages are often shipped inside HTML comments
    /// and revealed by script; comment markers are stripped first so those
    /// tables are visible to the selectors.
    ///
    /// # Errors
    ///
    /// Fails only if a built-in selector does not compile.
    pub fn parse(markup: &str) -> Result<Self, Box<dyn Error>> {
        let uncommented = markup.replace("<!--", "").replace("-->", "");
        let document = Html::parse_document(&uncommented);
        let selectors = Selectors::new()?;
        debug!(bytes = markup.len(), "Parsed boxscore page");
        Ok(Self {
            document,
            selectors,
        })
    }

    fn nth_for_side<'a>(&'a self, selector: &Selector, side: Side) -> Option<ElementRef<'a>> {
        self.document.select(selector).nth(side_index(side))
    }

    fn column(&self, table: Option<ElementRef<'_>>, key: &str) -> Vec<String> {
        let Some(table) = table else {
            return Vec::new();
        };
        table
            .select(&self.selectors.body_row)
            .map(|row| self.cell_text(row, key).unwrap_or_default())
            .collect()
    }

    fn cell_text(&self, row: ElementRef<'_>, key: &str) -> Option<String> {
        row.select(&self.selectors.cell)
            .find(|cell| cell.value().attr("data-stat") == Some(key))
            .map(element_text)
    }
}

impl StatSource for HtmlStatSource {
    fn team_name(&self, side: Side) -> Option<String> {
        self.nth_for_side(&self.selectors.team_link, side)
            .map(element_text)
            .filter(|name| !name.is_empty())
    }

    fn team_abbr(&self, side: Side) -> Option<String> {
        self.nth_for_side(&self.selectors.team_link, side)
            .and_then(|link| link.value().attr("href"))
            .and_then(crate::utils::parse_abbreviation)
    }

    fn score(&self, side: Side) -> Option<String> {
        self.nth_for_side(&self.selectors.score, side)
            .map(element_text)
    }

    fn skater_count(&self, side: Side) -> usize {
        self.nth_for_side(&self.selectors.skater_table, side)
            .map(|table| table.select(&self.selectors.body_row).count())
            .unwrap_or(0)
    }

    fn skater_column(&self, side: Side, stat: SkaterStat) -> Vec<String> {
        self.column(
            self.nth_for_side(&self.selectors.skater_table, side),
            stat.data_stat(),
        )
    }

    fn skater_total(&self, side: Side, stat: SkaterStat) -> Option<String> {
        let table = self.nth_for_side(&self.selectors.skater_table, side)?;
        let footer = table.select(&self.selectors.foot_row).next()?;
        self.cell_text(footer, stat.data_stat())
    }

    fn goalie_column(&self, side: Side, stat: GoalieStat) -> Vec<String> {
        self.column(
            self.nth_for_side(&self.selectors.goalie_table, side),
            stat.data_stat(),
        )
    }

    fn game_info(&self) -> Vec<String> {
        self.document
            .select(&self.selectors.meta_line)
            .map(element_text)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

// Away is listed first on the page, home second.
fn side_index(side: Side) -> usize {
    match side {
        Side::Away => 0,
        Side::Home => 1,
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOXSCORE_PAGE: &str = include_str!("../tests/fixtures/201806070VEG.html");

    fn page() -> HtmlStatSource {
        HtmlStatSource::parse(BOXSCORE_PAGE).unwrap()
    }

    #[test]
    fn test_team_names_and_abbreviations() {
        let source = page();
        assert_eq!(
            source.team_name(Side::Away).as_deref(),
            Some("Washington Capitals")
        );
        assert_eq!(
            source.team_name(Side::Home).as_deref(),
            Some("Vegas Golden Knights")
        );
        assert_eq!(source.team_abbr(Side::Away).as_deref(), Some("WSH"));
        assert_eq!(source.team_abbr(Side::Home).as_deref(), Some("VEG"));
    }

    #[test]
    fn test_scores() {
        let source = page();
        assert_eq!(source.score(Side::Away).as_deref(), Some("4"));
        assert_eq!(source.score(Side::Home).as_deref(), Some("3"));
    }

    #[test]
    fn test_skater_count_skips_repeated_header_rows() {
        let source = page();
        assert_eq!(source.skater_count(Side::Away), 3);
        assert_eq!(source.skater_count(Side::Home), 3);
    }

    #[test]
    fn test_skater_column_keeps_blank_cells() {
        let source = page();
        assert_eq!(
            source.skater_column(Side::Away, SkaterStat::GameWinningGoals),
            vec!["0", "1", "0"]
        );
        assert_eq!(
            source.skater_column(Side::Home, SkaterStat::ShortHandedAssists),
            vec!["0", "0", ""]
        );
    }

    #[test]
    fn test_skater_total_reads_footer() {
        let source = page();
        assert_eq!(
            source.skater_total(Side::Away, SkaterStat::Shots).as_deref(),
            Some("10")
        );
        assert_eq!(
            source
                .skater_total(Side::Home, SkaterStat::PenaltiesInMinutes)
                .as_deref(),
            Some("4")
        );
    }

    #[test]
    fn test_commented_goalie_table_is_visible() {
        let source = page();
        assert_eq!(source.goalie_column(Side::Away, GoalieStat::Saves), vec!["6"]);
        assert_eq!(
            source.goalie_column(Side::Home, GoalieStat::ShotsAgainst),
            vec!["10"]
        );
    }

    #[test]
    fn test_game_info_lines() {
        assert_eq!(
            page().game_info(),
            vec![
                "June 7, 2018, 8:00 PM",
                "Attendance: 18,529",
                "Arena: T-Mobile Arena",
                "Game Duration: 2:39",
            ]
        );
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        let source = HtmlStatSource::parse("").unwrap();
        assert_eq!(source.team_name(Side::Away), None);
        assert_eq!(source.score(Side::Home), None);
        assert_eq!(source.skater_count(Side::Home), 0);
        assert!(source.skater_column(Side::Away, SkaterStat::Assists).is_empty());
        assert!(source.game_info().is_empty());
    }
}
