//! Search tool handlers
//!
//! Every category tool runs the same pipeline: validate the parameters,
//! take a rate limit slot, query the backend, render the outcome.

use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;

use crate::backends::SearchBackend;
use crate::category::Category;
use crate::config::SearchConfig;
use crate::error::{ResultExt, SearchError};
use crate::format;
use crate::params::SearchParams;
use crate::rate_limit::RateLimiter;
use crate::request::SearchRequest;

/// Validate, rate limit, search and render one category search
pub async fn run_search(
    backend: &dyn SearchBackend,
    limiter: &RateLimiter,
    defaults: &SearchConfig,
    category: Category,
    params: SearchParams,
) -> Result<String, SearchError> {
    // Invalid input never spends quota
    let request = SearchRequest::from_params(category, params, defaults)?;
    limiter.try_acquire()?;

    tracing::info!(
        category = %category,
        query = %request.query,
        limit = request.limit,
        "Searching"
    );

    let outcome = backend.search(&request).await?;
    tracing::info!(category = %category, results = outcome.len(), "Search finished");

    format::render(&outcome, request.output_format)
}

/// [`run_search`] wrapped as an MCP tool result
pub async fn perform_search(
    backend: &dyn SearchBackend,
    limiter: &RateLimiter,
    defaults: &SearchConfig,
    category: Category,
    params: SearchParams,
) -> Result<CallToolResult, McpError> {
    let text = run_search(backend, limiter, defaults, category, params)
        .await
        .inspect_err(|e| tracing::warn!(category = %category, error = %e, "Search failed"))
        .to_mcp_err()?;

    Ok(CallToolResult::success(vec![Content::text(text)]))
}
