//! Helpers for turning raw page text into numbers, plus small file system checks.
//!
//! Everything that reads a number out of markup goes through this module so
//! the fallback rules live in one place:
//! - single cells parse to `Option` and never fail the caller
//! - per-player columns aggregate through [`sum_or_default`]
//! - team abbreviations come out of `/teams/<ABBR>/` links

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Fallback returned by the per-player aggregates when no usable data exists.
pub const STAT_DEFAULT: i32 = 1;

static TEAM_ABBR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/teams/([A-Z]{2,3})/").expect("team abbreviation pattern"));

/// Sum the parseable entries of a per-player column.
///
/// Entries are trimmed and parsed as integers; anything that does not parse
/// is skipped. When `guard` is zero, nothing in `raw` parses, or the sum
/// overflows `i32`, `default` is returned instead.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(sum_or_default(&["0", "1", "bad"], 3, 1), 1);
/// assert_eq!(sum_or_default(&["2", "3"], 0, 1), 1);
/// ```
pub fn sum_or_default<S: AsRef<str>>(raw: &[S], guard: usize, default: i32) -> i32 {
    if guard == 0 {
        return default;
    }
    let mut parsed = raw
        .iter()
        .filter_map(|entry| entry.as_ref().trim().parse::<i32>().ok())
        .peekable();
    if parsed.peek().is_none() {
        return default;
    }
    parsed
        .try_fold(0i32, |acc, value| acc.checked_add(value))
        .unwrap_or(default)
}

/// Parse a single integer cell, accepting thousands separators (`18,529`).
pub fn parse_int(raw: &str) -> Option<i32> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse().ok()
}

/// Parse a percentage or decimal cell. Leading-dot values like `.917` are accepted.
pub fn parse_float(raw: &str) -> Option<f32> {
    let cleaned = raw.trim().trim_end_matches('%');
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Pull the team abbreviation out of a team link such as `/teams/VEG/2018.html`.
pub fn parse_abbreviation(href: &str) -> Option<String> {
    TEAM_ABBR
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` characters are cut and suffixed with the number
/// of bytes dropped. The cut always lands on a character boundary.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((idx, _)) => format!("{}…(+{} bytes)", &s[..idx], s.len() - idx),
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and removes a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
