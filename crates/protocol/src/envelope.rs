//! The command envelope: the single record type carried by every frame.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ProtocolError;

/// Outbound command sent on login and replayed after a reconnect.
pub const AUTHENTICATE_COMMAND: &str = "authenticate";

/// One command exchanged over the connection, in either direction.
///
/// Server-pushed envelopes carry positional `args` (a JSON array); envelopes
/// the client sends carry named `args` (a JSON object).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEnvelope {
    command: String,
    #[serde(default = "empty_args")]
    args: Value,
}

/// The `{}` payload used when a command is sent without arguments.
pub fn empty_args() -> Value {
    Value::Object(Map::new())
}

impl CommandEnvelope {
    /// Build an envelope; omitted `args` become `{}`.
    pub fn new(command: impl Into<String>, args: Option<Value>) -> Self {
        Self {
            command: command.into(),
            args: match args {
                None | Some(Value::Null) => empty_args(),
                Some(args) => args,
            },
        }
    }

    /// Build a server-style envelope with positional arguments.
    pub fn positional(command: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            command: command.into(),
            args: Value::Array(args),
        }
    }

    /// The `authenticate` envelope for the given credentials.
    pub fn authenticate(username: &str, password: &str) -> Self {
        Self::new(
            AUTHENTICATE_COMMAND,
            Some(serde_json::json!({ "username": username, "password": password })),
        )
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &Value {
        &self.args
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.command, self.args)
    }

    /// Parse one inbound frame.
    pub fn from_frame(frame: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(frame)?)
    }

    /// Serialize for the wire.
    pub fn to_frame(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}
