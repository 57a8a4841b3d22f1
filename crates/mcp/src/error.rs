//! Error types surfaced to MCP tool callers.

use esign_backend::BackendError;
use rmcp::ErrorData;
use thiserror::Error;

/// Everything a tool call can fail with. All variants render to a
/// human-readable message; the hosting transport wraps them in JSON-RPC
/// errors. None of them is ever retried.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A required argument is missing or blank. Detected before any
    /// network activity.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The API key or client key could not be resolved from any source.
    /// Detected before any network activity.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The outbound backend call failed (non-2xx status, transport error,
    /// or malformed response).
    #[error("{0}")]
    Backend(#[from] BackendError),
}

impl From<ToolError> for ErrorData {
    fn from(e: ToolError) -> Self {
        match &e {
            ToolError::InvalidArgument(_) => ErrorData::invalid_params(e.to_string(), None),
            ToolError::Unauthorized(_) => ErrorData::invalid_request(e.to_string(), None),
            ToolError::Backend(_) => ErrorData::internal_error(e.to_string(), None),
        }
    }
}
