//! Error types for search tools and their mapping onto MCP errors

use rmcp::ErrorData as McpError;
use thiserror::Error;

use crate::rate_limit::RateLimitError;

/// Errors raised while validating, sending or decoding a search
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Query parameter is required and must be a non-empty string")]
    InvalidQuery,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("SearXNG URL is not configured")]
    NotConfigured,

    #[error(transparent)]
    RateLimited(#[from] RateLimitError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("SearXNG error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTML parse failed: {0}")]
    Parse(String),
}

impl SearchError {
    /// True when the caller sent something unusable, as opposed to a failure downstream
    pub fn is_client_error(&self) -> bool {
        matches!(self, SearchError::InvalidQuery | SearchError::InvalidParameter(_))
    }
}

/// Errors from calling a tool by name, outside an MCP transport
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("mcp error: {0}")]
    Mcp(String),
}

impl From<McpError> for DispatchError {
    fn from(err: McpError) -> Self {
        if err.code == rmcp::model::ErrorCode::INVALID_PARAMS {
            DispatchError::InvalidParams(err.message.to_string())
        } else {
            DispatchError::Mcp(err.message.to_string())
        }
    }
}

/// Conversion into an MCP protocol error
pub trait IntoMcpError {
    fn into_mcp_error(self) -> McpError;
}

impl IntoMcpError for SearchError {
    fn into_mcp_error(self) -> McpError {
        if self.is_client_error() {
            McpError::invalid_params(self.to_string(), None)
        } else {
            McpError::internal_error(self.to_string(), None)
        }
    }
}

impl IntoMcpError for serde_json::Error {
    fn into_mcp_error(self) -> McpError {
        McpError::internal_error(format!("JSON error: {}", self), None)
    }
}

impl From<SearchError> for McpError {
    fn from(err: SearchError) -> Self {
        err.into_mcp_error()
    }
}

/// Adds `to_mcp_err()` to any result whose error converts into an MCP error
pub trait ResultExt<T> {
    fn to_mcp_err(self) -> Result<T, McpError>;
}

impl<T, E: IntoMcpError> ResultExt<T> for Result<T, E> {
    fn to_mcp_err(self) -> Result<T, McpError> {
        self.map_err(|e| e.into_mcp_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    #[test]
    fn test_invalid_query_maps_to_invalid_params() {
        let err = SearchError::InvalidQuery.into_mcp_error();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("Query parameter"));
    }

    #[test]
    fn test_rate_limited_maps_to_internal_error() {
        let err: McpError = SearchError::from(RateLimitError::PerSecond { limit: 1 }).into();
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert!(err.message.contains("Rate limit exceeded"));
    }

    #[test]
    fn test_status_error_message() {
        let err = SearchError::Status {
            status: 429,
            body: "Too Many Requests".to_string(),
        };
        assert_eq!(err.to_string(), "SearXNG error 429: Too Many Requests");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_dispatch_error_from_mcp() {
        let err: DispatchError = SearchError::InvalidQuery.into_mcp_error().into();
        assert!(matches!(err, DispatchError::InvalidParams(_)));

        let err: DispatchError = McpError::internal_error("boom", None).into();
        assert_eq!(err.to_string(), "mcp error: boom");
    }

    #[test]
    fn test_result_ext() {
        let result: Result<(), SearchError> =
            Err(SearchError::InvalidParameter("limit must be at least 1".into()));
        let mcp_result = result.to_mcp_err();
        assert!(mcp_result.is_err());
    }
}
