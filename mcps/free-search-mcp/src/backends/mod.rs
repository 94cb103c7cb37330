//! Search backend implementations
//!
//! Tools talk to a [`SearchBackend`] rather than to SearXNG directly, so the
//! server can be exercised against an in-process backend in tests.

use async_trait::async_trait;

use crate::error::SearchError;
use crate::request::SearchRequest;
use crate::types::SearchOutcome;

pub mod searxng;

/// Trait for search backends
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Get the name of this backend
    fn name(&self) -> &str;

    /// Check if this backend is configured and available
    fn is_available(&self) -> bool;

    /// Run one category search, returning at most `request.limit` records
    async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError>;
}
