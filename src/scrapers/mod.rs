//! Scrapers for hockey-reference style pages.
//!
//! Each scraper follows the same two-phase pattern:
//!
//! 1. **Indexing**: discover boxscore identifiers for a date ([`schedule`])
//! 2. **Fetching**: download and parse each boxscore page ([`boxscore`])
//!
//! | Page | Module | URL |
//! |------|--------|-----|
//! | Daily scoreboard | [`schedule`] | `/boxscores/?year=Y&month=M&day=D` |
//! | Single game | [`boxscore`] | `/boxscores/{uri}.html` |
//!
//! Failed fetches are logged and skipped; they never abort a batch.

pub mod boxscore;
pub mod schedule;
