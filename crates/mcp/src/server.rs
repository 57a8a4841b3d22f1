//! rmcp server handler.
//!
//! The same handler serves both transports. In streamable HTTP mode the
//! transport injects the inbound request head (`http::request::Parts`)
//! into the request context, which is where session credentials come
//! from; on stdio there are no headers and resolution falls back to the
//! environment.

use crate::config::ServerConfig;
use crate::tools::{self, ToolRequest};
use esign_backend::{BackendError, SigningClient};
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, ListToolsResult, PaginatedRequestParams,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};
use serde_json::Value;
use std::sync::Arc;

/// The MCP-facing service. Cloned per session by the HTTP transport; all
/// state is shared and read-only.
#[derive(Clone)]
pub struct EsignService {
    config: Arc<ServerConfig>,
    client: SigningClient,
}

impl EsignService {
    /// # Errors
    ///
    /// Fails when the backend client rejects the configured base URL.
    pub fn new(config: Arc<ServerConfig>) -> Result<Self, BackendError> {
        let client = SigningClient::new(config.api_url.clone(), config.timeout)?;
        Ok(Self { config, client })
    }

    async fn handle_call(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let arguments = request
            .arguments
            .map(Value::Object)
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
        let parsed = ToolRequest::parse(&request.name, &arguments).map_err(ErrorData::from)?;

        let parts = context
            .extensions
            .get::<axum::http::request::Parts>();
        let headers = parts.map(|p| &p.headers);

        let text = tools::dispatch(&self.client, &self.config.credentials, headers, &parsed)
            .await
            .map_err(ErrorData::from)?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

impl ServerHandler for EsignService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation {
                name: "esign-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                description: None,
                website_url: None,
                icons: None,
            },
            instructions: Some(
                "Tools for the e-signature document API. Credentials come from inbound \
                 headers (Authorization bearer / x-api-key / x-client-key) or from the \
                 ESIGN_API_KEY and ESIGN_CLIENT_KEY environment variables."
                    .into(),
            ),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult {
            tools: tools::tool_definitions(),
            ..Default::default()
        }))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        self.handle_call(request, context)
    }
}
