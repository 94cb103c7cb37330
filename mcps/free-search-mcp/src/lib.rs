//! Free Search MCP Library
//!
//! Category search (general, news, images, videos, map, music, IT, science,
//! files, social media) over a SearXNG instance, exposed as MCP tools.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use free_search_mcp::{Config, FreeSearchMcpServer};
//!
//! let server = FreeSearchMcpServer::new(Config::load(None)?)?;
//! let result = server
//!     .call_tool("free_news_search", serde_json::json!({"query": "rust 2024"}))
//!     .await?;
//! ```
//!
//! # Configuration
//! Set `SEARXNG_API_URL` or configure `free-search-mcp.toml`; see [`config`].

pub mod backends;
pub mod category;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod handlers;
pub mod params;
pub mod rate_limit;
pub mod request;
pub mod server;
pub mod telemetry;
pub mod types;

pub use category::Category;
pub use config::Config;
pub use error::{DispatchError, SearchError};
pub use format::OutputFormat;
pub use params::SearchParams;
pub use server::FreeSearchMcpServer;
