//! Free Search MCP Server
//!
//! Category search tools over a SearXNG instance, served on stdio.
//!
//! # Configuration
//! Set `SEARXNG_API_URL` (and optionally `SEARXNG_COOKIE`, `SEARXNG_USER_AGENT`,
//! `SEARXNG_REQUEST_TIMEOUT`) or pass `--config <file>`.

use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};
use std::path::PathBuf;

use free_search_mcp::{telemetry, Config, FreeSearchMcpServer};

#[derive(Parser, Debug)]
#[command(name = "free-search-mcp", version, about = "SearXNG category search MCP server")]
struct Args {
    /// Path to a TOML config file
    #[arg(long, env = "FREE_SEARCH_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Directory for daily log files (overrides `logging.dir`)
    #[arg(long, env = "FREE_SEARCH_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    let log_dir = args.log_dir.or_else(|| config.logging.dir.clone());
    telemetry::init_tracing("free_search_mcp", log_dir.as_deref())?;

    tracing::info!("Starting Free Search MCP Server");
    match &config.source {
        Some(path) => tracing::info!("Loaded config from: {}", path.display()),
        None => tracing::info!("No config file found, using defaults"),
    }
    tracing::info!("SearXNG URL: {}", config.searxng.base_url());

    let server = FreeSearchMcpServer::new(config)?;
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
