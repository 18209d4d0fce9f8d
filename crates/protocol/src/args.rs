//! Positional argument access for server-pushed commands.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ProtocolError;

pub(crate) struct Positional<'a> {
    command: &'a str,
    values: &'a [Value],
}

impl<'a> Positional<'a> {
    pub(crate) fn new(command: &'a str, args: &'a Value) -> Result<Self, ProtocolError> {
        match args {
            Value::Array(values) => Ok(Self { command, values }),
            other => Err(ProtocolError::NotPositional {
                command: command.to_string(),
                found: kind(other),
            }),
        }
    }

    pub(crate) fn required<T: DeserializeOwned>(&self, index: usize) -> Result<T, ProtocolError> {
        let value = self
            .values
            .get(index)
            .ok_or_else(|| ProtocolError::MissingArgument {
                command: self.command.to_string(),
                index,
            })?;
        self.decode(index, value)
    }

    /// Missing and `null` arguments fall back to `T::default()`.
    pub(crate) fn optional<T: DeserializeOwned + Default>(
        &self,
        index: usize,
    ) -> Result<T, ProtocolError> {
        match self.values.get(index) {
            None | Some(Value::Null) => Ok(T::default()),
            Some(value) => self.decode(index, value),
        }
    }

    fn decode<T: DeserializeOwned>(&self, index: usize, value: &Value) -> Result<T, ProtocolError> {
        T::deserialize(value).map_err(|source| ProtocolError::InvalidArgument {
            command: self.command.to_string(),
            index,
            source,
        })
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
