//! Construction of the `{ "data": { ... } }` request envelope.
//!
//! Every backend call carries a `data` object with an `action`, the
//! resolved `clientKey`, and operation-specific fields. Empty fields are
//! dropped from the top level of `data` before serialization; nested
//! objects are sent as-is.

use serde_json::{Map, Value, json};

/// Backend verb carried inside the `data` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Read,
    Create,
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Read => "read",
            Self::Create => "create",
        }
    }
}

/// Builder for one request body.
#[derive(Debug)]
pub struct PayloadBuilder {
    data: Map<String, Value>,
}

impl PayloadBuilder {
    #[must_use]
    pub fn new(action: Action, client_key: &str) -> Self {
        let mut data = Map::new();
        data.insert(
            "clientKey".to_string(),
            Value::String(client_key.to_string()),
        );
        data.insert(
            "action".to_string(),
            Value::String(action.as_str().to_string()),
        );
        Self { data }
    }

    /// Add a field to the top level of `data`.
    #[must_use]
    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }

    /// Prune empty top-level fields and wrap in the `data` envelope.
    #[must_use]
    pub fn build(mut self) -> Value {
        self.data.retain(|_, v| !is_empty_field(v));
        json!({ "data": self.data })
    }
}

/// A field is dropped when it is null, a blank string (after trimming), an
/// empty array, or an empty object. Numbers and booleans always survive.
fn is_empty_field(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
