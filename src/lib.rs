//! # nhl_boxscore
//!
//! Scrapes hockey-reference style boxscore pages into structured game
//! statistics.
//!
//! ## Architecture
//!
//! 1. **Indexing**: list the boxscores played on a date ([`scrapers::schedule`])
//! 2. **Fetching**: download each page; failures become "no data" ([`fetch`])
//! 3. **Extraction**: read raw values through a [`source::StatSource`] and build
//!    an immutable [`models::Boxscore`] ([`scrapers::boxscore`])
//! 4. **Output**: write JSON and Markdown reports ([`outputs`])
//!
//! ## Example
//!
//! ```ignore
//! let markup = std::fs::read_to_string("201806070VEG.html")?;
//! let game = Boxscore::from_html("201806070VEG", &markup)?;
//! assert_eq!(game.winning_abbr(), Some("WSH"));
//! ```

pub mod cli;
pub mod config;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod scrapers;
pub mod source;
pub mod utils;

pub use models::{Boxscore, BoxscoreReport, Side, TeamBoxscore};
pub use source::{HtmlStatSource, StatSource};
