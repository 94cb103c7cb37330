//! SearXNG backend
//!
//! Implements the SearchBackend trait using a SearXNG instance.
//! See: https://docs.searxng.org/dev/search_api.html

use async_trait::async_trait;
use reqwest::header::{ACCEPT, COOKIE};
use reqwest::Client;
use std::time::Duration;

use super::SearchBackend;
use crate::config::{ResponseFormat, SearXNGConfig};
use crate::error::SearchError;
use crate::extract;
use crate::request::SearchRequest;
use crate::types::SearchOutcome;

/// Error bodies are cut to this many characters before they reach the caller
const MAX_ERROR_BODY_CHARS: usize = 200;

/// SearXNG backend
pub struct SearXNGBackend {
    client: Client,
    config: SearXNGConfig,
    response_format: ResponseFormat,
}

impl SearXNGBackend {
    pub fn new(config: SearXNGConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let response_format = config.effective_response_format();
        tracing::debug!(
            url = %config.base_url(),
            format = response_format.as_param(),
            "SearXNG backend ready"
        );

        Ok(Self {
            client,
            config,
            response_format,
        })
    }

    pub fn response_format(&self) -> ResponseFormat {
        self.response_format
    }

    fn accept_header(&self) -> &'static str {
        match self.response_format {
            ResponseFormat::Json => "application/json",
            ResponseFormat::Html => "text/html,application/xhtml+xml",
        }
    }
}

#[async_trait]
impl SearchBackend for SearXNGBackend {
    fn name(&self) -> &str {
        "searxng"
    }

    fn is_available(&self) -> bool {
        !self.config.url.trim().is_empty()
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        if !self.is_available() {
            return Err(SearchError::NotConfigured);
        }

        let url = format!("{}/search", self.config.base_url());
        let form = request.form_params(self.response_format, &self.config.engines);

        let mut builder = self
            .client
            .post(&url)
            .header(ACCEPT, self.accept_header())
            .form(&form);
        if !self.config.cookie.is_empty() {
            builder = builder.header(COOKIE, self.config.cookie.as_str());
        }

        tracing::debug!(%url, category = %request.category, "Sending SearXNG request");
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body = response.text().await?;
        let outcome = extract::parse_body(&body, self.response_format, request.category)?;
        Ok(outcome.truncate(request.limit))
    }
}
