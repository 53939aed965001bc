use std::time::Duration;

use serde::Deserialize;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Remote search endpoint settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the search host (e.g., "https://api.github.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Optional bearer token for authenticated (higher rate limit) search.
    #[serde(default)]
    pub token: Option<String>,
}

/// Console rendering settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DisplayConfig {
    /// Maximum number of results printed per state render (default: 30).
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_seconds))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.connect_timeout_seconds))
    }
}

fn default_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_user_agent() -> String {
    format!("repo-search/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_results() -> usize {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            user_agent: default_user_agent(),
            token: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}
