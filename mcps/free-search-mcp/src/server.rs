//! MCP Server implementation for category search
//!
//! One tool per SearXNG category, all sharing [`SearchParams`], plus a
//! `get_config` status tool. Tools can also be called in-process through
//! [`FreeSearchMcpServer::call_tool`].

use anyhow::Result;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::backends::{searxng::SearXNGBackend, SearchBackend};
use crate::category::Category;
use crate::config::Config;
use crate::error::{DispatchError, ResultExt};
use crate::handlers;
use crate::params::SearchParams;
use crate::rate_limit::{RateLimitSnapshot, RateLimiter};

/// The main Free Search MCP Server
#[derive(Clone)]
pub struct FreeSearchMcpServer {
    backend: Arc<dyn SearchBackend>,
    limiter: Arc<RateLimiter>,
    config: Config,
    tool_router: ToolRouter<Self>,
}

#[derive(Debug, Serialize)]
struct ConfigStatus {
    backend: String,
    available: bool,
    url: String,
    response_format: &'static str,
    max_results: usize,
    default_language: String,
    rate_limit: RateLimitSnapshot,
}

impl FreeSearchMcpServer {
    /// Server backed by the configured SearXNG instance
    pub fn new(config: Config) -> Result<Self> {
        tracing::info!("Using SearXNG backend at {}", config.searxng.base_url());
        let backend = SearXNGBackend::new(config.searxng.clone())?;
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    pub fn with_backend(config: Config, backend: Arc<dyn SearchBackend>) -> Self {
        if !backend.is_available() {
            tracing::warn!(
                "Backend '{}' is not available (check SearXNG URL)",
                backend.name()
            );
        }

        Self {
            backend,
            limiter: Arc::new(RateLimiter::new(&config.rate_limit)),
            config,
            tool_router: Self::tool_router(),
        }
    }

    pub fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    /// Call a tool by name with JSON arguments
    pub async fn call_tool(&self, name: &str, params: Value) -> Result<CallToolResult, DispatchError> {
        if name == "get_config" {
            return self.get_config().await.map_err(Into::into);
        }

        let category = Category::from_tool_name(name)
            .ok_or_else(|| DispatchError::ToolNotFound(name.to_string()))?;
        let params: SearchParams = serde_json::from_value(params)?;
        self.search(category, params).await.map_err(Into::into)
    }

    async fn search(
        &self,
        category: Category,
        params: SearchParams,
    ) -> Result<CallToolResult, McpError> {
        handlers::perform_search(
            self.backend.as_ref(),
            &self.limiter,
            &self.config.search,
            category,
            params,
        )
        .await
    }
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl FreeSearchMcpServer {
    #[tool(description = "General web search. Returns titles, URLs, snippets and the engines that found each result.")]
    async fn free_general_search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.search(Category::General, params).await
    }

    #[tool(description = "News search. Returns headlines, URLs, summaries and publication dates.")]
    async fn free_news_search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.search(Category::News, params).await
    }

    #[tool(description = "Image search. Returns page URLs, image and thumbnail URLs, source and resolution.")]
    async fn free_image_search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.search(Category::Images, params).await
    }

    #[tool(description = "Video search. Returns video URLs, length, author, publication date and thumbnail.")]
    async fn free_video_search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.search(Category::Videos, params).await
    }

    #[tool(description = "Map search. Returns places with address, coordinates and extra details when known.")]
    async fn free_map_search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.search(Category::Map, params).await
    }

    #[tool(description = "Music search. Returns tracks and albums with URLs, publication date and cover thumbnail.")]
    async fn free_music_search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.search(Category::Music, params).await
    }

    #[tool(description = "IT search for code, packages and technical Q&A. Returns URLs plus package, maintainer and version when available.")]
    async fn free_it_search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.search(Category::It, params).await
    }

    #[tool(description = "Science search for papers and academic sources. Returns titles, URLs and abstracts.")]
    async fn free_science_search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.search(Category::Science, params).await
    }

    #[tool(description = "File search, including torrents. Returns URLs, file size, seeders, leechers and magnet link availability.")]
    async fn free_file_search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.search(Category::Files, params).await
    }

    #[tool(description = "Social media search. Returns posts with URLs, text and hashtags.")]
    async fn free_social_media_search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.search(Category::SocialMedia, params).await
    }

    #[tool(description = "Get the current search backend configuration, rate limits and usage.")]
    async fn get_config(&self) -> Result<CallToolResult, McpError> {
        let status = ConfigStatus {
            backend: self.backend.name().to_string(),
            available: self.backend.is_available(),
            url: self.config.searxng.base_url().to_string(),
            response_format: self.config.searxng.effective_response_format().as_param(),
            max_results: self.config.search.max_results,
            default_language: self.config.search.default_language.clone(),
            rate_limit: self.limiter.snapshot(),
        };

        let json = serde_json::to_string_pretty(&status).to_mcp_err()?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for FreeSearchMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Free Search MCP Server - searches a SearXNG meta-search instance by category: \
                 free_general_search, free_news_search, free_image_search, free_video_search, \
                 free_map_search, free_music_search, free_it_search, free_science_search, \
                 free_file_search and free_social_media_search. Every tool takes a query plus \
                 optional language, safe_search (0-2), time_range (day, week, month, year), \
                 limit and output_format ('text' by default, 'html' or 'json'). \
                 Requests are rate limited; get_config shows the current usage."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RateLimitConfig;
    use crate::error::SearchError;
    use crate::request::SearchRequest;
    use crate::types::{RecordKind, SearchOutcome, SearchRecord};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every request and answers with one record per call
    #[derive(Default)]
    struct RecordingBackend {
        requests: Mutex<Vec<SearchRequest>>,
    }

    #[async_trait]
    impl SearchBackend for RecordingBackend {
        fn name(&self) -> &str {
            "recording"
        }

        fn is_available(&self) -> bool {
            true
        }

        async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(SearchOutcome::from_records(vec![SearchRecord::new(
                format!("{} result", request.category),
                "https://example.org/1",
                RecordKind::General,
            )
            .with_content("snippet")]))
        }
    }

    fn server() -> (FreeSearchMcpServer, Arc<RecordingBackend>) {
        let mut config = Config::default();
        config.rate_limit = RateLimitConfig {
            per_second: 0,
            per_month: 0,
        };
        let backend = Arc::new(RecordingBackend::default());
        let server = FreeSearchMcpServer::with_backend(config, backend.clone());
        (server, backend)
    }

    fn text_of(result: &CallToolResult) -> String {
        let value = serde_json::to_value(result).unwrap();
        value["content"][0]["text"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_list_tools() {
        let (server, _) = server();
        let tools = server.list_tools();
        assert_eq!(tools.len(), 11);

        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        for category in Category::ALL {
            assert!(names.contains(&category.tool_name()), "missing {}", category.tool_name());
        }
        assert!(names.contains(&"get_config"));
    }

    #[tokio::test]
    async fn test_call_each_category_tool() {
        let (server, backend) = server();

        for category in Category::ALL {
            let result = server
                .call_tool(category.tool_name(), json!({"query": "rust"}))
                .await
                .unwrap();
            assert!(result.is_error.is_none() || !result.is_error.unwrap());
            assert!(text_of(&result).contains("result"));
        }

        let requests = backend.requests.lock().unwrap();
        let categories: Vec<Category> = requests.iter().map(|r| r.category).collect();
        assert_eq!(categories, Category::ALL.to_vec());
        assert_eq!(requests[0].safe_search, 1);
        assert_eq!(requests[2].safe_search, 0);
    }

    #[tokio::test]
    async fn test_call_with_options() {
        let (server, backend) = server();

        let result = server
            .call_tool(
                "free_news_search",
                json!({
                    "query": "elections",
                    "language": "de",
                    "time_range": "week",
                    "output_format": "json",
                    "limit": 5
                }),
            )
            .await
            .unwrap();

        let rendered: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(rendered[0]["url"], "https://example.org/1");

        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests[0].language, "de");
        assert_eq!(requests[0].limit, 5);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let (server, _) = server();
        let result = server.call_tool("free_web_search", json!({"query": "x"})).await;
        assert!(matches!(result, Err(DispatchError::ToolNotFound(_))));
    }

    #[tokio::test]
    async fn test_missing_query_is_serde_error() {
        let (server, _) = server();
        let result = server.call_tool("free_general_search", json!({})).await;
        assert!(matches!(result, Err(DispatchError::Serde(_))));
    }

    #[tokio::test]
    async fn test_blank_query_is_invalid_params() {
        let (server, backend) = server();
        let result = server
            .call_tool("free_general_search", json!({"query": "  "}))
            .await;
        assert!(matches!(result, Err(DispatchError::InvalidParams(_))));
        assert!(backend.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_config_reports_usage() {
        let (server, _) = server();
        server
            .call_tool("free_it_search", json!({"query": "tokio"}))
            .await
            .unwrap();

        let result = server.call_tool("get_config", json!({})).await.unwrap();
        let status: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(status["backend"], "recording");
        assert_eq!(status["available"], true);
        assert_eq!(status["url"], "http://localhost:8080");
        assert_eq!(status["response_format"], "json");
        assert_eq!(status["rate_limit"]["used_this_month"], 1);
    }

    #[test]
    fn test_get_info_enables_tools() {
        use rmcp::ServerHandler;

        let (server, _) = server();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("free_social_media_search"));
    }
}
