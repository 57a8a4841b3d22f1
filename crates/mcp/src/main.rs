//! esign-mcp binary: transport selection and process wiring.

use anyhow::Context as _;
use axum::Router;
use axum::routing::get;
use clap::Parser as _;
use esign_mcp::config::{Cli, ServerConfig};
use esign_mcp::server::EsignService;
use rmcp::ServiceExt as _;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::StreamableHttpServerConfig;
use rmcp::transport::streamable_http_server::StreamableHttpService;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Arc::new(ServerConfig::from_cli(&cli));
    init_tracing(&cli.log_level, config.http);

    if config.http {
        serve_http(config).await
    } else {
        serve_stdio(config).await
    }
}

// Logs always go to stderr: in stdio mode stdout carries the MCP framing.
fn init_tracing(log_level: &str, http: bool) {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(http)
        .init();
}

async fn serve_http(config: Arc<ServerConfig>) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let service = StreamableHttpService::new(
        {
            let config = Arc::clone(&config);
            move || EsignService::new(Arc::clone(&config)).map_err(std::io::Error::other)
        },
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig::default(),
    );

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!(%addr, backend = %config.api_url, "streamable HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server")?;
    Ok(())
}

async fn serve_stdio(config: Arc<ServerConfig>) -> anyhow::Result<()> {
    tracing::info!(backend = %config.api_url, "stdio server starting");

    let service = EsignService::new(config)
        .context("backend client")?
        .serve(stdio())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "stdio serve failed"))?;

    service.waiting().await.context("stdio transport")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
    }
}
