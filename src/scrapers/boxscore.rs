//! Boxscore page scraper.
//!
//! Builds a [`Boxscore`] from any [`StatSource`]. Every numeric field is
//! read defensively:
//! - team totals parse to `None` when the cell is missing or malformed
//! - game-winning goals and the three assist splits sum the per-player
//!   column, skipping bad entries, and fall back to [`STAT_DEFAULT`] when the
//!   side fielded no skaters or nothing parsed
//!
//! # URL Pattern
//!
//! Boxscores live at `{base_url}/boxscores/{uri}.html`, where `uri` is the
//! game date followed by `0` and the home team abbreviation, e.g.
//! `201806070VEG`.

use crate::fetch::retrieve_html_page;
use crate::models::{Boxscore, Side, TeamBoxscore};
use crate::source::{GoalieStat, HtmlStatSource, SkaterStat, StatSource};
use crate::utils::{STAT_DEFAULT, parse_float, parse_int, sum_or_default};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use reqwest::Client;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Absolute URL of a boxscore page.
pub fn boxscore_url(base_url: &str, uri: &str) -> Result<Url, Box<dyn Error>> {
    let url = Url::parse(base_url)?.join(&format!("/boxscores/{}.html", uri))?;
    Ok(url)
}

impl Boxscore {
    /// Build a boxscore from raw values. Never fails; see the module docs for
    /// how malformed values are handled.
    pub fn from_source(uri: &str, source: &dyn StatSource) -> Boxscore {
        let away = team_from_source(source, Side::Away);
        let home = team_from_source(source, Side::Home);
        let info = GameInfo::parse(&source.game_info());

        Boxscore {
            uri: uri.to_string(),
            date: info.date,
            time: info.time,
            arena: info.arena,
            attendance: info.attendance,
            duration: info.duration,
            away,
            home,
        }
    }

    /// Parse a boxscore page.
    pub fn from_html(uri: &str, markup: &str) -> Result<Boxscore, Box<dyn Error>> {
        let source = HtmlStatSource::parse(markup)?;
        Ok(Boxscore::from_source(uri, &source))
    }
}

fn team_from_source(source: &dyn StatSource, side: Side) -> TeamBoxscore {
    let skaters = source.skater_count(side);
    let total = |stat: SkaterStat| {
        source
            .skater_total(side, stat)
            .as_deref()
            .and_then(parse_int)
    };
    let aggregate = |stat: SkaterStat| {
        sum_or_default(&source.skater_column(side, stat), skaters, STAT_DEFAULT)
    };

    let shots_against = sum_parsed(&source.goalie_column(side, GoalieStat::ShotsAgainst));
    let saves = sum_parsed(&source.goalie_column(side, GoalieStat::Saves));
    let save_percentage = match (saves, shots_against) {
        (Some(saves), Some(against)) if against > 0 => Some(saves as f32 / against as f32),
        _ => printed_save_percentage(&source.goalie_column(side, GoalieStat::SavePercentage)),
    };
    let shutout = source
        .goalie_column(side, GoalieStat::Shutouts)
        .iter()
        .filter_map(|raw| parse_int(raw))
        .any(|count| count > 0);

    TeamBoxscore {
        name: source.team_name(side),
        abbreviation: source.team_abbr(side),
        goals: source.score(side).as_deref().and_then(parse_int),
        skaters,
        assists: total(SkaterStat::Assists),
        points: total(SkaterStat::Points),
        penalties_in_minutes: total(SkaterStat::PenaltiesInMinutes),
        even_strength_goals: total(SkaterStat::EvenStrengthGoals),
        power_play_goals: total(SkaterStat::PowerPlayGoals),
        short_handed_goals: total(SkaterStat::ShortHandedGoals),
        shots_on_goal: total(SkaterStat::Shots),
        shooting_percentage: source
            .skater_total(side, SkaterStat::ShootingPercentage)
            .as_deref()
            .and_then(parse_float),
        game_winning_goals: aggregate(SkaterStat::GameWinningGoals),
        even_strength_assists: aggregate(SkaterStat::EvenStrengthAssists),
        power_play_assists: aggregate(SkaterStat::PowerPlayAssists),
        short_handed_assists: aggregate(SkaterStat::ShortHandedAssists),
        saves,
        save_percentage,
        shutout,
    }
}

// Sum of whatever parses; `None` when nothing does or the sum overflows.
fn sum_parsed(raw: &[String]) -> Option<i32> {
    let mut parsed = raw.iter().filter_map(|entry| parse_int(entry)).peekable();
    parsed.peek()?;
    parsed.try_fold(0i32, |acc, value| acc.checked_add(value))
}

// The page's own save percentage, usable only when a single goalie played.
fn printed_save_percentage(raw: &[String]) -> Option<f32> {
    match raw {
        [only] => parse_float(only),
        _ => None,
    }
}

#[derive(Debug, Default, PartialEq)]
struct GameInfo {
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    arena: Option<String>,
    attendance: Option<i32>,
    duration: Option<String>,
}

impl GameInfo {
    fn parse(lines: &[String]) -> GameInfo {
        let mut info = GameInfo::default();
        let Some((first, rest)) = lines.split_first() else {
            return info;
        };

        if let Ok(dt) = NaiveDateTime::parse_from_str(first, "%B %d, %Y, %I:%M %p") {
            info.date = Some(dt.date());
            info.time = Some(dt.time());
        } else if let Ok(date) = NaiveDate::parse_from_str(first, "%B %d, %Y") {
            info.date = Some(date);
        } else {
            debug!(line = %first, "Unrecognized game date");
        }

        for line in rest {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.trim() {
                "Attendance" => info.attendance = parse_int(value),
                "Arena" => info.arena = Some(value.to_string()),
                "Game Duration" => info.duration = Some(value.to_string()),
                other => debug!(key = other, "Ignoring game info line"),
            }
        }
        info
    }
}

/// Fetch and parse one boxscore.
///
/// Returns `None` when the page cannot be retrieved or parsed; the reason is
/// logged.
#[instrument(level = "info", skip(client, base_url))]
pub async fn fetch_boxscore(client: &Client, base_url: &str, uri: &str) -> Option<Boxscore> {
    let url = match boxscore_url(base_url, uri) {
        Ok(url) => url,
        Err(e) => {
            error!(error = %e, %base_url, "Cannot build boxscore URL");
            return None;
        }
    };

    let Some(markup) = retrieve_html_page(client, url.as_str()).await else {
        warn!(%url, "No boxscore page available");
        return None;
    };

    match Boxscore::from_html(uri, &markup) {
        Ok(boxscore) => {
            info!(
                away = boxscore.away().abbreviation().unwrap_or("?"),
                home = boxscore.home().abbreviation().unwrap_or("?"),
                winner = ?boxscore.winner(),
                "Parsed boxscore"
            );
            Some(boxscore)
        }
        Err(e) => {
            error!(error = %e, "Boxscore parse failed");
            None
        }
    }
}
