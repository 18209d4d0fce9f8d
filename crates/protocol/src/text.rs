//! Freeform text requests (`text` command).

use serde_json::{Map, Value};

use crate::envelope::CommandEnvelope;

/// The server asking for a line of text, to be sent back as
/// `command` with `args[arg_name] = <entered text>`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub label: String,
    pub command: String,
    pub arg_name: String,
    pub initial_value: String,
    pub args: Map<String, Value>,
}

impl TextRequest {
    /// Fill in the entered text, producing the reply envelope.
    pub fn complete(self, text: impl Into<String>) -> CommandEnvelope {
        let mut args = self.args;
        args.insert(self.arg_name, Value::String(text.into()));
        CommandEnvelope::new(self.command, Some(Value::Object(args)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn complete_merges_text_into_template() {
        let mut args = Map::new();
        args.insert("id".to_string(), json!(7));
        let request = TextRequest {
            label: "Rename".to_string(),
            command: "rename".to_string(),
            arg_name: "name".to_string(),
            initial_value: "Old".to_string(),
            args,
        };

        let envelope = request.complete("New");
        assert_eq!(envelope.command(), "rename");
        assert_eq!(envelope.args(), &json!({"id": 7, "name": "New"}));
    }
}
