//! Scraper configuration loaded from an optional YAML file.
//!
//! Every key is optional; anything left out keeps its default.
//!
//! ```yaml
//! base_url: https://www.hockey-reference.com
//! user_agent: nhl_boxscore/0.1
//! timeout_secs: 30
//! concurrency: 4
//! ```

use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tracing::{info, instrument};

pub const DEFAULT_BASE_URL: &str = "https://www.hockey-reference.com";

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScraperConfig {
    /// Site root that boxscore and schedule paths are joined onto.
    pub base_url: String,
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Maximum boxscore pages in flight at once.
    pub concurrency: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            concurrency: 4,
        }
    }
}

impl ScraperConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parse a YAML document. An empty document gives the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, Box<dyn Error>> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: ScraperConfig = serde_yaml::from_str(yaml)?;
        if config.concurrency == 0 {
            config.concurrency = 1;
        }
        Ok(config)
    }
}

/// Load the configuration from `path`, or the defaults when no path is given.
#[instrument(level = "info")]
pub async fn load_config(path: Option<&str>) -> Result<ScraperConfig, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(ScraperConfig::default());
    };
    let yaml = tokio::fs::read_to_string(path).await?;
    let config = ScraperConfig::from_yaml(&yaml)?;
    info!(config_path = path, base_url = %config.base_url, "Loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ScraperConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.user_agent.starts_with("nhl_boxscore/"));
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.concurrency, 4);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "base_url: http://127.0.0.1:8080\nconcurrency: 8\n";
        let config = ScraperConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(ScraperConfig::from_yaml("  \n").unwrap(), ScraperConfig::default());
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        let config = ScraperConfig::from_yaml("concurrency: 0").unwrap();
        assert_eq!(config.concurrency, 1);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(ScraperConfig::from_yaml("timeout_secs: soon").is_err());
        assert!(ScraperConfig::from_yaml("retries: 3").is_err());
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "user_agent: test-agent").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = load_config(Some(&path)).await.unwrap();
        assert_eq!(config.user_agent, "test-agent");
    }

    #[tokio::test]
    async fn test_load_config_without_path() {
        assert_eq!(load_config(None).await.unwrap(), ScraperConfig::default());
    }

    #[tokio::test]
    async fn test_load_config_missing_file() {
        assert!(load_config(Some("/nonexistent/config.yaml")).await.is_err());
    }
}
