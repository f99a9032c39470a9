//! Page retrieval.
//!
//! [`retrieve_html_page`] never fails the caller: a malformed URL, a transport
//! error, a non-200 status, or an unreadable body all come back as `None` and
//! are logged.

use crate::config::ScraperConfig;
use crate::utils::truncate_for_log;
use reqwest::{Client, StatusCode};
use std::error::Error;
use tracing::{debug, instrument, warn};
use url::Url;

/// Build the shared HTTP client from the configured user agent and timeout.
pub fn build_client(config: &ScraperConfig) -> Result<Client, Box<dyn Error>> {
    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .build()?;
    Ok(client)
}

/// Fetch `url` and return its body, or `None` if there is no page to read.
#[instrument(level = "info", skip(client))]
pub async fn retrieve_html_page(client: &Client, url: &str) -> Option<String> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "Refusing to fetch malformed URL");
            return None;
        }
    };

    let response = match client.get(parsed).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "Request failed");
            return None;
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        let preview = response.text().await.unwrap_or_default();
        warn!(%status, "Page unavailable");
        debug!(body = %truncate_for_log(&preview, 200), "Non-200 body");
        return None;
    }

    match response.text().await {
        Ok(body) => {
            debug!(bytes = body.len(), "Fetched page");
            Some(body)
        }
        Err(e) => {
            warn!(error = %e, "Failed to read response body");
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        test_server::client()
    }

    #[test]
    fn test_build_client_from_default_config() {
        assert!(build_client(&ScraperConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_returns_none() {
        assert_eq!(retrieve_html_page(&client(), "").await, None);
    }

    #[tokio::test]
    async fn test_relative_url_returns_none() {
        assert_eq!(
            retrieve_html_page(&client(), "/boxscores/201806070VEG.html").await,
            None
        );
    }

    #[tokio::test]
    async fn test_not_found_returns_none() {
        let base = test_server::serve(vec![("404 Not Found", "missing".to_string())]).await;
        let url = format!("{}/boxscores/000000000XXX.html", base);
        assert_eq!(retrieve_html_page(&client(), &url).await, None);
    }

    #[tokio::test]
    async fn test_ok_returns_body() {
        let base = test_server::serve(vec![("200 OK", "<html>game</html>".to_string())]).await;
        let url = format!("{}/boxscores/201806070VEG.html", base);
        assert_eq!(
            retrieve_html_page(&client(), &url).await.as_deref(),
            Some("<html>game</html>")
        );
    }

    #[tokio::test]
    async fn test_connection_refused_returns_none() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = format!("http://{}/", addr);
        assert_eq!(retrieve_html_page(&client(), &url).await, None);
    }
}
