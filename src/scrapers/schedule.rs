//! Daily scoreboard scraper.
//!
//! Lists every boxscore played on a date from the scoreboard page at
//! `{base_url}/boxscores/?year=Y&month=M&day=D`, then fetches the boxscores
//! with bounded concurrency.

use crate::fetch::retrieve_html_page;
use crate::models::Boxscore;
use crate::scrapers::boxscore::fetch_boxscore;
use chrono::{Datelike, NaiveDate};
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

static BOXSCORE_HREF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/boxscores/([0-9]{9}[A-Z]{2,3})\.html$").expect("boxscore link pattern")
});

/// URL of the scoreboard page for `date`.
pub fn schedule_url(base_url: &str, date: NaiveDate) -> Result<Url, Box<dyn Error>> {
    let mut url = Url::parse(base_url)?.join("/boxscores/")?;
    url.query_pairs_mut()
        .append_pair("year", &date.year().to_string())
        .append_pair("month", &date.month().to_string())
        .append_pair("day", &date.day().to_string());
    Ok(url)
}

/// Extract boxscore identifiers from a scoreboard page, deduplicated, in page order.
pub fn parse_boxscore_index(markup: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let document = Html::parse_document(markup);
    let link_selector = Selector::parse("td.gamelink a[href]")?;

    let uris = document
        .select(&link_selector)
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| BOXSCORE_HREF.captures(href))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .unique()
        .collect::<Vec<_>>();
    Ok(uris)
}

/// Index the boxscores played on `date`.
///
/// A missing scoreboard page is not an error: it yields an empty list.
#[instrument(level = "info", skip(client, base_url))]
pub async fn index_boxscores(
    client: &Client,
    base_url: &str,
    date: NaiveDate,
) -> Result<Vec<String>, Box<dyn Error>> {
    let url = schedule_url(base_url, date)?;
    let Some(markup) = retrieve_html_page(client, url.as_str()).await else {
        warn!(%url, "No scoreboard page available");
        return Ok(Vec::new());
    };

    let uris = parse_boxscore_index(&markup)?;
    info!(count = uris.len(), %date, "Indexed boxscores");
    debug!(uris = ?uris, "Boxscore identifiers");
    Ok(uris)
}

/// Fetch many boxscores, at most `concurrency` at a time.
///
/// Results keep the order of `uris`. Games that cannot be fetched or parsed
/// are logged and left out.
#[instrument(level = "info", skip_all, fields(requested = uris.len()))]
pub async fn fetch_boxscores(
    client: &Client,
    base_url: &str,
    uris: Vec<String>,
    concurrency: usize,
) -> Vec<Boxscore> {
    let requested = uris.len();
    let boxscores: Vec<Boxscore> = stream::iter(uris)
        .map(|uri| async move { fetch_boxscore(client, base_url, &uri).await })
        .buffered(concurrency.max(1))
        .filter_map(std::future::ready)
        .collect()
        .await;

    info!(
        requested,
        fetched = boxscores.len(),
        failed = requested - boxscores.len(),
        "Fetched boxscores"
    );
    boxscores
}
