use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, SessionError};

/// Parsed response body: `module → method → result`, with optional
/// `err_code` fields at any level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Response(Map<String, Value>);

impl Response {
    /// Parse a deciphered body. Anything but a JSON object is malformed.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(SessionError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
            Err(err) => Err(SessionError::MalformedResponse(err.to_string())),
        }
    }

    /// Top-level `err_code` field, if present. Not necessarily an integer.
    pub fn err_code(&self) -> Option<&Value> {
        self.0.get("err_code")
    }

    /// Sub-tree for `module`.
    pub fn module(&self, module: &str) -> Option<&Value> {
        self.0.get(module)
    }

    /// Sub-tree for `module.method`.
    pub fn method(&self, module: &str, method: &str) -> Option<&Value> {
        self.0.get(module)?.get(method)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Response {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
