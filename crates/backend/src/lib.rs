//! Client for the e-signature document API.
//!
//! This crate owns everything that touches the backend wire format:
//! resource endpoints, the `{ "data": { ... } }` payload envelope, and the
//! translation of HTTP outcomes into [`BackendError`]. It knows nothing
//! about MCP; the `esign-mcp` crate layers the tool surface on top.

pub mod client;
pub mod error;
pub mod payload;

pub use client::{API_KEY_HEADER, Resource, SigningClient};
pub use error::{BackendError, Result};
pub use payload::{Action, PayloadBuilder};
