//! MCP server for the e-signature document API.
//!
//! Exposes four tools (`list_templates`, `read_template`,
//! `list_placeholders`, `create_contract`) over either a stdio transport
//! (single peer) or rmcp's streamable HTTP transport (one session per
//! client connection). Each tool call resolves a credential pair, issues
//! exactly one backend POST, and relays the JSON response verbatim as
//! pretty-printed text.

pub mod config;
pub mod credentials;
pub mod error;
pub mod server;
pub mod tools;
