//! Errors raised while decoding frames and server payloads.

/// A frame or payload the client cannot accept.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Command {command} expects positional arguments, got {found}")]
    NotPositional { command: String, found: &'static str },

    #[error("Command {command} is missing argument {index}")]
    MissingArgument { command: String, index: usize },

    #[error("Command {command} has an invalid argument {index}: {source}")]
    InvalidArgument {
        command: String,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Command {command} argument {value} is outside {min}..={max}")]
    OutOfRange {
        command: String,
        value: f64,
        min: f64,
        max: f64,
    },
}
