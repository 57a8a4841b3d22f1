//! Credential resolution for backend calls.
//!
//! Precedence per call: inbound header > per-call `client_key` argument
//! (client key only) > environment fallback. The API key is never
//! overridable per call. On the stdio transport there are no inbound
//! headers, so resolution degrades to argument + environment.

use crate::error::ToolError;
use axum::http::{HeaderMap, header};

/// Dedicated API key headers, checked after `Authorization: Bearer`.
pub const API_KEY_HEADERS: [&str; 2] = ["x-api-key", "esign-api-key"];

/// Dedicated client key header.
pub const CLIENT_KEY_HEADER: &str = "x-client-key";

/// Fallback credentials captured from the environment at process start and
/// injected into the resolver, so request handling never reads the
/// environment directly.
#[derive(Debug, Clone, Default)]
pub struct CredentialSources {
    pub api_key: Option<String>,
    pub client_key: Option<String>,
}

/// Effective credential pair for one backend call. Both keys are required
/// before any network activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub client_key: String,
}

/// Resolve the effective credentials for one tool call.
///
/// `headers` is `None` on the stdio transport (no inbound HTTP request).
/// Header lookup is case-insensitive per `HeaderMap` semantics; blank
/// values are treated as absent at every level.
///
/// # Errors
///
/// Returns `ToolError::Unauthorized` if either key cannot be resolved.
pub fn resolve(
    sources: &CredentialSources,
    headers: Option<&HeaderMap>,
    client_key_override: Option<&str>,
) -> Result<Credentials, ToolError> {
    let api_key = headers
        .and_then(api_key_from_headers)
        .or_else(|| sources.api_key.clone())
        .ok_or_else(|| {
            ToolError::Unauthorized(
                "API key not found; send an Authorization bearer token or x-api-key header, \
                 or set ESIGN_API_KEY"
                    .to_string(),
            )
        })?;

    let client_key = headers
        .and_then(|h| header_value(h, CLIENT_KEY_HEADER))
        .or_else(|| client_key_override.and_then(non_blank))
        .or_else(|| sources.client_key.clone())
        .ok_or_else(|| {
            ToolError::Unauthorized(
                "Client key not found; send an x-client-key header, pass the client_key \
                 argument, or set ESIGN_CLIENT_KEY"
                    .to_string(),
            )
        })?;

    Ok(Credentials {
        api_key,
        client_key,
    })
}

fn api_key_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = bearer_token(headers) {
        return Some(token);
    }
    API_KEY_HEADERS
        .iter()
        .find_map(|name| header_value(headers, name))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let authz = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;
    let token = authz.strip_prefix("Bearer ").map(str::trim)?;
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let v = headers.get(name).and_then(|h| h.to_str().ok())?;
    non_blank(v)
}

pub(crate) fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Some(s.to_string())
}
