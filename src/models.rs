//! Data models for a single hockey game.
//!
//! - [`Side`]: which of the two teams a value belongs to
//! - [`TeamBoxscore`]: one team's half of the game
//! - [`Boxscore`]: the whole game, including the winner/loser view
//! - [`BoxscoreReport`]: everything one run scraped
//!
//! Boxscores are built once by [`crate::scrapers::boxscore`] and are read-only
//! afterwards; every field is private and exposed through accessors.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two competing teams in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Away,
    Home,
}

impl Side {
    /// The side that is not `self`.
    pub fn opponent(self) -> Side {
        match self {
            Side::Away => Side::Home,
            Side::Home => Side::Away,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Away => "away",
            Side::Home => "home",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide which side won from the two final scores.
///
/// Returns the side with the strictly greater score. A tie has no winner and
/// yields `None`; no side is ever picked by default.
pub fn resolve_winner(away_score: i32, home_score: i32) -> Option<Side> {
    if away_score > home_score {
        Some(Side::Away)
    } else if home_score > away_score {
        Some(Side::Home)
    } else {
        None
    }
}

/// One team's statistics for a single game.
///
/// Totals that the page does not carry are `None`. The four per-player
/// aggregates (`game_winning_goals` and the three assist splits) are never
/// missing: they fall back to [`crate::utils::STAT_DEFAULT`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamBoxscore {
    pub(crate) name: Option<String>,
    pub(crate) abbreviation: Option<String>,
    pub(crate) goals: Option<i32>,
    pub(crate) skaters: usize,
    pub(crate) assists: Option<i32>,
    pub(crate) points: Option<i32>,
    pub(crate) penalties_in_minutes: Option<i32>,
    pub(crate) even_strength_goals: Option<i32>,
    pub(crate) power_play_goals: Option<i32>,
    pub(crate) short_handed_goals: Option<i32>,
    pub(crate) shots_on_goal: Option<i32>,
    pub(crate) shooting_percentage: Option<f32>,
    pub(crate) game_winning_goals: i32,
    pub(crate) even_strength_assists: i32,
    pub(crate) power_play_assists: i32,
    pub(crate) short_handed_assists: i32,
    pub(crate) saves: Option<i32>,
    pub(crate) save_percentage: Option<f32>,
    pub(crate) shutout: bool,
}

impl TeamBoxscore {
    /// Full team name, e.g. "Vegas Golden Knights".
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Team abbreviation, e.g. "VEG".
    pub fn abbreviation(&self) -> Option<&str> {
        self.abbreviation.as_deref()
    }

    /// Final score from the scorebox.
    pub fn goals(&self) -> Option<i32> {
        self.goals
    }

    /// Number of skaters the team dressed.
    pub fn skaters(&self) -> usize {
        self.skaters
    }

    pub fn assists(&self) -> Option<i32> {
        self.assists
    }

    pub fn points(&self) -> Option<i32> {
        self.points
    }

    pub fn penalties_in_minutes(&self) -> Option<i32> {
        self.penalties_in_minutes
    }

    pub fn even_strength_goals(&self) -> Option<i32> {
        self.even_strength_goals
    }

    pub fn power_play_goals(&self) -> Option<i32> {
        self.power_play_goals
    }

    pub fn short_handed_goals(&self) -> Option<i32> {
        self.short_handed_goals
    }

    pub fn shots_on_goal(&self) -> Option<i32> {
        self.shots_on_goal
    }

    /// Shooting percentage as printed on the page (0-100).
    pub fn shooting_percentage(&self) -> Option<f32> {
        self.shooting_percentage
    }

    pub fn game_winning_goals(&self) -> i32 {
        self.game_winning_goals
    }

    pub fn even_strength_assists(&self) -> i32 {
        self.even_strength_assists
    }

    pub fn power_play_assists(&self) -> i32 {
        self.power_play_assists
    }

    pub fn short_handed_assists(&self) -> i32 {
        self.short_handed_assists
    }

    /// Saves by all goalies the team used.
    pub fn saves(&self) -> Option<i32> {
        self.saves
    }

    /// Saves divided by shots against, in `0.0..=1.0`. When shots against are
    /// missing, the printed figure of a lone goalie is used.
    pub fn save_percentage(&self) -> Option<f32> {
        self.save_percentage
    }

    /// Whether one of the team's goalies was credited with a shutout.
    pub fn shutout(&self) -> bool {
        self.shutout
    }
}

/// A single game's boxscore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boxscore {
    pub(crate) uri: String,
    pub(crate) date: Option<NaiveDate>,
    pub(crate) time: Option<NaiveTime>,
    pub(crate) arena: Option<String>,
    pub(crate) attendance: Option<i32>,
    pub(crate) duration: Option<String>,
    pub(crate) away: TeamBoxscore,
    pub(crate) home: TeamBoxscore,
}

impl Boxscore {
    /// The boxscore identifier, e.g. `201806070VEG`.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Scheduled start time, when the page lists one.
    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    pub fn arena(&self) -> Option<&str> {
        self.arena.as_deref()
    }

    pub fn attendance(&self) -> Option<i32> {
        self.attendance
    }

    /// Game duration as printed, e.g. `2:39`.
    pub fn duration(&self) -> Option<&str> {
        self.duration.as_deref()
    }

    pub fn away(&self) -> &TeamBoxscore {
        &self.away
    }

    pub fn home(&self) -> &TeamBoxscore {
        &self.home
    }

    pub fn team(&self, side: Side) -> &TeamBoxscore {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }

    /// The side that scored more goals. `None` for a tie or when either score
    /// is missing from the page.
    pub fn winner(&self) -> Option<Side> {
        match (self.away.goals, self.home.goals) {
            (Some(away), Some(home)) => resolve_winner(away, home),
            _ => None,
        }
    }

    pub fn winning_name(&self) -> Option<&str> {
        self.winner().and_then(|side| self.team(side).name())
    }

    pub fn winning_abbr(&self) -> Option<&str> {
        self.winner().and_then(|side| self.team(side).abbreviation())
    }

    pub fn losing_name(&self) -> Option<&str> {
        self.winner().and_then(|side| self.team(side.opponent()).name())
    }

    pub fn losing_abbr(&self) -> Option<&str> {
        self.winner().and_then(|side| self.team(side.opponent()).abbreviation())
    }
}

/// The result of one scraping run: every boxscore fetched, plus when and for
/// which date.
#[derive(Debug, Clone)]
pub struct BoxscoreReport {
    /// Local timestamp of the run, RFC 3339.
    pub generated_at: String,
    /// The scoreboard date, when games were indexed by date.
    pub date: Option<NaiveDate>,
    pub boxscores: Vec<Boxscore>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str, abbr: &str, goals: i32) -> TeamBoxscore {
        TeamBoxscore {
            name: Some(name.to_string()),
            abbreviation: Some(abbr.to_string()),
            goals: Some(goals),
            ..TeamBoxscore::default()
        }
    }

    fn boxscore(winner: Option<Side>) -> Boxscore {
        let (away_goals, home_goals) = match winner {
            Some(Side::Away) => (4, 3),
            Some(Side::Home) => (3, 4),
            None => (2, 2),
        };
        Boxscore {
            uri: "201806070VEG".to_string(),
            date: None,
            time: None,
            arena: None,
            attendance: None,
            duration: None,
            away: team("Away Name", "AWAY", away_goals),
            home: team("Home Name", "HOME", home_goals),
        }
    }

    #[test]
    fn test_resolve_winner_away() {
        assert_eq!(resolve_winner(4, 3), Some(Side::Away));
    }

    #[test]
    fn test_resolve_winner_home() {
        assert_eq!(resolve_winner(3, 4), Some(Side::Home));
    }

    #[test]
    fn test_resolve_winner_tie_has_no_winner() {
        assert_eq!(resolve_winner(2, 2), None);
        assert_eq!(resolve_winner(0, 0), None);
    }

    #[test]
    fn test_side_opponent_and_display() {
        assert_eq!(Side::Away.opponent(), Side::Home);
        assert_eq!(Side::Home.opponent(), Side::Away);
        assert_eq!(Side::Home.to_string(), "home");
        assert_eq!(serde_json::to_string(&Side::Away).unwrap(), "\"away\"");
    }

    #[test]
    fn test_winning_name_is_home() {
        assert_eq!(boxscore(Some(Side::Home)).winning_name(), Some("Home Name"));
    }

    #[test]
    fn test_winning_name_is_away() {
        assert_eq!(boxscore(Some(Side::Away)).winning_name(), Some("Away Name"));
    }

    #[test]
    fn test_winning_abbr_is_home() {
        assert_eq!(boxscore(Some(Side::Home)).winning_abbr(), Some("HOME"));
    }

    #[test]
    fn test_winning_abbr_is_away() {
        assert_eq!(boxscore(Some(Side::Away)).winning_abbr(), Some("AWAY"));
    }

    #[test]
    fn test_losing_name_is_home() {
        assert_eq!(boxscore(Some(Side::Away)).losing_name(), Some("Home Name"));
    }

    #[test]
    fn test_losing_name_is_away() {
        assert_eq!(boxscore(Some(Side::Home)).losing_name(), Some("Away Name"));
    }

    #[test]
    fn test_losing_abbr_is_home() {
        assert_eq!(boxscore(Some(Side::Away)).losing_abbr(), Some("HOME"));
    }

    #[test]
    fn test_losing_abbr_is_away() {
        assert_eq!(boxscore(Some(Side::Home)).losing_abbr(), Some("AWAY"));
    }

    #[test]
    fn test_no_winner_has_no_winning_or_losing_team() {
        let game = boxscore(None);
        assert_eq!(game.winning_name(), None);
        assert_eq!(game.winning_abbr(), None);
        assert_eq!(game.losing_name(), None);
        assert_eq!(game.losing_abbr(), None);
    }

    #[test]
    fn test_boxscore_serialization() {
        let json = serde_json::to_string(&boxscore(Some(Side::Home))).unwrap();
        assert!(json.contains("\"uri\":\"201806070VEG\""));
        assert!(json.contains("Away Name"));
        assert!(!json.contains("\"winner\""));
    }

    #[test]
    fn test_deserialized_winner_follows_goals() {
        let json = serde_json::to_string(&boxscore(Some(Side::Home))).unwrap();
        let flipped = json.replace("\"goals\":3", "\"goals\":9");
        let game: Boxscore = serde_json::from_str(&flipped).unwrap();
        assert_eq!(game.away().goals(), Some(9));
        assert_eq!(game.winner(), Some(Side::Away));
        assert_eq!(game.winning_name(), Some("Away Name"));
    }
}
