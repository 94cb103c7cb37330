//! Configuration loading for free-search-mcp
//!
//! Configuration is loaded from (first match wins):
//! 1. `--config` / `FREE_SEARCH_CONFIG_PATH`
//! 2. `./free-search-mcp.toml`
//! 3. `$XDG_CONFIG_HOME/free-search-mcp/config.toml`
//! 4. Default values
//!
//! `SEARXNG_*` environment variables are applied last and override the file.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// SearXNG instance configuration
    #[serde(default)]
    pub searxng: SearXNGConfig,
    /// Search defaults
    #[serde(default)]
    pub search: SearchConfig,
    /// Outbound rate limits
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Log file settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// File the configuration was read from; `None` when running on defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Body format requested from SearXNG
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    Json,
    Html,
}

impl ResponseFormat {
    pub fn as_param(self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Html => "html",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(ResponseFormat::Json),
            "html" => Some(ResponseFormat::Html),
            _ => None,
        }
    }
}

/// SearXNG configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearXNGConfig {
    /// SearXNG instance URL
    #[serde(default = "default_searxng_url")]
    pub url: String,
    /// Cookie header sent with every request (instance preferences)
    #[serde(default)]
    pub cookie: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_response_format")]
    pub response_format: ResponseFormat,
    /// Hosts that only serve the HTML results page, never JSON
    #[serde(default = "default_html_only_hosts")]
    pub html_only_hosts: Vec<String>,
    /// Engines to use (comma-separated, empty = use instance defaults)
    #[serde(default)]
    pub engines: String,
}

/// General search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of results to return
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Language sent when the caller does not pick one
    #[serde(default = "default_language")]
    pub default_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests per second (0 = unlimited)
    #[serde(default = "default_per_second")]
    pub per_second: u32,
    /// Requests per calendar month (0 = unlimited)
    #[serde(default = "default_per_month")]
    pub per_month: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for daily `<YYYY-MM-DD>.log` files; stderr only when unset
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

// Default value functions
fn default_searxng_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_response_format() -> ResponseFormat {
    ResponseFormat::Json
}

fn default_html_only_hosts() -> Vec<String> {
    vec!["searx.bndkt.io".to_string()]
}

fn default_max_results() -> usize {
    10
}

fn default_language() -> String {
    "auto".to_string()
}

fn default_per_second() -> u32 {
    1
}

fn default_per_month() -> u32 {
    15_000
}

impl Default for SearXNGConfig {
    fn default() -> Self {
        Self {
            url: default_searxng_url(),
            cookie: String::new(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
            response_format: default_response_format(),
            html_only_hosts: default_html_only_hosts(),
            engines: String::new(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            default_language: default_language(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: default_per_second(),
            per_month: default_per_month(),
        }
    }
}

impl SearXNGConfig {
    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// The body format to request from this instance
    pub fn effective_response_format(&self) -> ResponseFormat {
        let host = url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string));

        match host {
            Some(host) if self.html_only_hosts.iter().any(|h| h.eq_ignore_ascii_case(&host)) => {
                ResponseFormat::Html
            }
            _ => self.response_format,
        }
    }
}

impl Config {
    /// Load configuration from file (if any), then apply environment overrides
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // Runs before tracing is initialized; callers log `source` afterwards
        let mut config = match Self::find_config_path(explicit_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Find the configuration file path
    fn find_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
        // An explicit path is returned even when it does not exist
        if let Some(path) = explicit_path {
            return Some(path.to_path_buf());
        }

        let mut candidates = vec![PathBuf::from("free-search-mcp.toml")];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("free-search-mcp").join("config.toml"));
        }

        candidates.into_iter().find(|p| p.exists())
    }

    /// Apply `SEARXNG_*` overrides. `lookup` abstracts the environment for tests.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("SEARXNG_API_URL").or_else(|| non_empty("SEARXNG_URL")) {
            self.searxng.url = url;
        }
        if let Some(cookie) = lookup("SEARXNG_COOKIE") {
            self.searxng.cookie = cookie;
        }
        if let Some(agent) = non_empty("SEARXNG_USER_AGENT") {
            self.searxng.user_agent = agent;
        }
        if let Some(timeout) = non_empty("SEARXNG_REQUEST_TIMEOUT") {
            self.searxng.timeout_seconds = timeout
                .trim()
                .parse()
                .with_context(|| format!("SEARXNG_REQUEST_TIMEOUT must be an integer, got '{}'", timeout))?;
        }
        if let Some(format) = non_empty("SEARXNG_RESPONSE_FORMAT") {
            self.searxng.response_format = ResponseFormat::parse(&format).with_context(|| {
                format!("SEARXNG_RESPONSE_FORMAT must be 'json' or 'html', got '{}'", format)
            })?;
        }
        if let Some(engines) = lookup("SEARXNG_ENGINES") {
            self.searxng.engines = engines;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.searxng.url)
            .with_context(|| format!("invalid SearXNG URL '{}'", self.searxng.url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("SearXNG URL must use http or https, got '{}'", parsed.scheme());
        }
        if self.searxng.timeout_seconds == 0 {
            bail!("searxng.timeout_seconds must be greater than 0");
        }
        Ok(())
    }
}
