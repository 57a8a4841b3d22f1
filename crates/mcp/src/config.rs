//! Process configuration.
//!
//! All environment access happens here, once, at startup. Request handling
//! only ever sees the resulting [`ServerConfig`] value.

use crate::credentials::CredentialSources;
use clap::Parser;
use std::time::Duration;

/// Default backend base URL (overridable for tests and self-hosted
/// deployments).
pub const DEFAULT_API_URL: &str = "https://api.esignatures.dev/v1";

#[derive(Debug, Parser)]
#[command(
    name = "esign-mcp",
    version,
    about = "MCP server for the e-signature document API"
)]
pub struct Cli {
    /// Serve the streamable HTTP transport instead of stdio.
    #[arg(long, env = "ESIGN_HTTP_SERVER")]
    pub http: bool,

    /// Listen host for HTTP mode. Ignored when --http is set: the HTTP
    /// transport always binds all interfaces.
    #[arg(long, env = "HOST", default_value = "localhost")]
    pub host: String,

    /// Listen port for HTTP mode.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Backend API base URL.
    #[arg(long, env = "ESIGN_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Fallback API key, used when no inbound header carries one.
    #[arg(long, env = "ESIGN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Fallback client key, used when neither a header nor a tool argument
    /// carries one.
    #[arg(long, env = "ESIGN_CLIENT_KEY", hide_env_values = true)]
    pub client_key: Option<String>,

    /// Timeout applied to every backend call, in seconds.
    #[arg(long, env = "ESIGN_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log level filter (overridden by RUST_LOG when set).
    #[arg(long, env = "ESIGN_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Immutable runtime configuration derived from [`Cli`], passed explicitly
/// into the resolver and the transport selection.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub http: bool,
    pub host: String,
    pub port: u16,
    pub api_url: String,
    pub timeout: Duration,
    pub credentials: CredentialSources,
}

impl ServerConfig {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            http: cli.http,
            host: cli.host.clone(),
            port: cli.port,
            api_url: cli.api_url.clone(),
            timeout: Duration::from_secs(cli.timeout_secs),
            credentials: CredentialSources {
                api_key: cli.api_key.as_deref().and_then(crate::credentials::non_blank),
                client_key: cli
                    .client_key
                    .as_deref()
                    .and_then(crate::credentials::non_blank),
            },
        }
    }

    /// Address the HTTP listener binds. The HTTP flag targets container
    /// deployments, so it forces an all-interfaces bind.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        if self.http {
            format!("0.0.0.0:{}", self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}
