//! The fixed tool surface: argument validation, payload assembly, and
//! dispatch to the backend.
//!
//! Each operation is a pure request/response mapping: validate arguments,
//! resolve credentials, build the `data` payload, issue one POST, relay
//! the JSON response pretty-printed. No retries, no caching, no state
//! between calls.

use crate::credentials::{self, CredentialSources, Credentials};
use crate::error::ToolError;
use axum::http::HeaderMap;
use esign_backend::{Action, PayloadBuilder, Resource, SigningClient};
use rmcp::model::{JsonObject, Tool, ToolAnnotations};
use serde_json::{Value, json};
use std::borrow::Cow;
use std::sync::Arc;

pub const LIST_TEMPLATES: &str = "list_templates";
pub const READ_TEMPLATE: &str = "read_template";
pub const LIST_PLACEHOLDERS: &str = "list_placeholders";
pub const CREATE_CONTRACT: &str = "create_contract";

/// A validated tool invocation.
///
/// Parsing happens at the dispatcher boundary, so operation logic only
/// ever sees well-formed arguments, and the four operations are covered
/// exhaustively by the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    ListTemplates {
        client_key: Option<String>,
    },
    ReadTemplate {
        template_key: String,
        client_key: Option<String>,
    },
    ListPlaceholders {
        template_key: String,
        client_key: Option<String>,
    },
    CreateContract {
        name: String,
        value: String,
        client_key: Option<String>,
    },
}

impl ToolRequest {
    /// Parse and validate the arguments for tool `name`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the tool is unknown or a required
    /// field is missing, blank, or not a string.
    pub fn parse(name: &str, arguments: &Value) -> Result<Self, ToolError> {
        match name {
            LIST_TEMPLATES => Ok(Self::ListTemplates {
                client_key: optional(arguments, "client_key"),
            }),
            READ_TEMPLATE => Ok(Self::ReadTemplate {
                template_key: required(arguments, "template_key")?,
                client_key: optional(arguments, "client_key"),
            }),
            LIST_PLACEHOLDERS => Ok(Self::ListPlaceholders {
                template_key: required(arguments, "template_key")?,
                client_key: optional(arguments, "client_key"),
            }),
            CREATE_CONTRACT => Ok(Self::CreateContract {
                name: required(arguments, "name")?,
                value: required(arguments, "value")?,
                client_key: optional(arguments, "client_key"),
            }),
            other => Err(ToolError::InvalidArgument(format!("unknown tool: {other}"))),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListTemplates { .. } => LIST_TEMPLATES,
            Self::ReadTemplate { .. } => READ_TEMPLATE,
            Self::ListPlaceholders { .. } => LIST_PLACEHOLDERS,
            Self::CreateContract { .. } => CREATE_CONTRACT,
        }
    }

    #[must_use]
    pub fn resource(&self) -> Resource {
        match self {
            Self::ListTemplates { .. } | Self::ReadTemplate { .. } => Resource::Template,
            Self::ListPlaceholders { .. } => Resource::Placeholder,
            Self::CreateContract { .. } => Resource::Contract,
        }
    }

    #[must_use]
    pub fn client_key_override(&self) -> Option<&str> {
        match self {
            Self::ListTemplates { client_key }
            | Self::ReadTemplate { client_key, .. }
            | Self::ListPlaceholders { client_key, .. }
            | Self::CreateContract { client_key, .. } => client_key.as_deref(),
        }
    }

    /// Build the outbound `{ "data": ... }` body for this call.
    #[must_use]
    pub fn payload(&self, creds: &Credentials) -> Value {
        let client_key = creds.client_key.as_str();
        match self {
            Self::ListTemplates { .. } => PayloadBuilder::new(Action::List, client_key).build(),
            Self::ReadTemplate { template_key, .. } => {
                PayloadBuilder::new(Action::Read, client_key)
                    .field("template", json!({ "template_key": template_key }))
                    .build()
            }
            Self::ListPlaceholders { template_key, .. } => {
                PayloadBuilder::new(Action::List, client_key)
                    .field("templateKey", json!(template_key))
                    .build()
            }
            Self::CreateContract { name, value, .. } => {
                PayloadBuilder::new(Action::Create, client_key)
                    .field("contract", json!({ "name": name, "value": value }))
                    .build()
            }
        }
    }
}

/// Execute one validated tool call end to end.
///
/// Credentials resolve before any network activity; the single backend
/// POST is awaited and its outcome logged before this function returns.
///
/// # Errors
///
/// `Unauthorized` when credentials cannot be resolved (no HTTP call is
/// made), `Backend` when the call fails or returns a non-2xx status.
pub async fn dispatch(
    client: &SigningClient,
    sources: &CredentialSources,
    headers: Option<&HeaderMap>,
    request: &ToolRequest,
) -> Result<String, ToolError> {
    let creds = credentials::resolve(sources, headers, request.client_key_override())?;
    let payload = request.payload(&creds);

    let result = client
        .post(request.resource(), &creds.api_key, &payload)
        .await;

    match &result {
        Ok(_) => tracing::info!(tool = request.name(), "backend call succeeded"),
        Err(e) => tracing::warn!(tool = request.name(), error = %e, "backend call failed"),
    }

    let body = result?;
    Ok(serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string()))
}

/// The static tool list advertised via `tools/list`.
#[must_use]
pub fn tool_definitions() -> Vec<Tool> {
    vec![
        tool(
            LIST_TEMPLATES,
            "List the document templates available to the client account",
            json!({
                "type": "object",
                "properties": {
                    "client_key": { "type": "string", "description": "Override the client key for this call" }
                }
            }),
            read_annotations(),
        ),
        tool(
            READ_TEMPLATE,
            "Read a single document template by its template key",
            json!({
                "type": "object",
                "properties": {
                    "template_key": { "type": "string", "description": "Key of the template to read" },
                    "client_key": { "type": "string", "description": "Override the client key for this call" }
                },
                "required": ["template_key"]
            }),
            read_annotations(),
        ),
        tool(
            LIST_PLACEHOLDERS,
            "List the placeholders defined by a document template",
            json!({
                "type": "object",
                "properties": {
                    "template_key": { "type": "string", "description": "Key of the template whose placeholders to list" },
                    "client_key": { "type": "string", "description": "Override the client key for this call" }
                },
                "required": ["template_key"]
            }),
            read_annotations(),
        ),
        tool(
            CREATE_CONTRACT,
            "Create a contract document from a name and content value",
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Contract name" },
                    "value": { "type": "string", "description": "Contract content" },
                    "client_key": { "type": "string", "description": "Override the client key for this call" }
                },
                "required": ["name", "value"]
            }),
            create_annotations(),
        ),
    ]
}

fn tool(
    name: &'static str,
    description: &'static str,
    input_schema: Value,
    annotations: ToolAnnotations,
) -> Tool {
    let schema = match input_schema {
        Value::Object(m) => m,
        _ => JsonObject::new(),
    };
    Tool {
        name: Cow::Borrowed(name),
        title: None,
        description: Some(Cow::Borrowed(description)),
        input_schema: Arc::new(schema),
        output_schema: None,
        annotations: Some(annotations),
        execution: None,
        icons: None,
        meta: None,
    }
}

fn read_annotations() -> ToolAnnotations {
    ToolAnnotations {
        title: None,
        read_only_hint: Some(true),
        destructive_hint: Some(false),
        idempotent_hint: Some(true),
        open_world_hint: Some(true),
    }
}

fn create_annotations() -> ToolAnnotations {
    ToolAnnotations {
        title: None,
        read_only_hint: Some(false),
        destructive_hint: Some(false),
        idempotent_hint: Some(false),
        open_world_hint: Some(true),
    }
}

fn required(arguments: &Value, field: &'static str) -> Result<String, ToolError> {
    match arguments.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) | Some(Value::Null) | None => Err(ToolError::InvalidArgument(
            format!("required argument '{field}' is missing or blank"),
        )),
        Some(_) => Err(ToolError::InvalidArgument(format!(
            "argument '{field}' must be a string"
        ))),
    }
}

fn optional(arguments: &Value, field: &str) -> Option<String> {
    arguments
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
}
