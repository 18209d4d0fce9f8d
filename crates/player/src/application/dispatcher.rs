//! Inbound command dispatch.
//!
//! Frames are parsed into envelopes and routed by command name to registered
//! handlers. Nothing a frame contains can take the connection down: malformed
//! frames, unknown names and handler failures all come back as a
//! [`DispatchError`] for the caller to report.

use std::collections::HashMap;

use serde_json::Value;
use skirmish_protocol::{CommandEnvelope, ProtocolError};

/// Error returned by a handler.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Payload(#[from] ProtocolError),
    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{0}")]
    Malformed(ProtocolError),
    #[error("Unknown command: {0}.")]
    UnknownCommand(String),
    #[error("Handler for {command} failed: {source}")]
    Handler {
        command: String,
        #[source]
        source: HandlerError,
    },
}

/// A handler receives the shared context and the raw `args` of its command.
pub type Handler<C> = Box<dyn FnMut(&mut C, &Value) -> Result<(), HandlerError> + Send>;

/// Routes inbound envelopes to handlers over a context of type `C`.
pub struct CommandDispatcher<C> {
    handlers: HashMap<String, Handler<C>>,
}

impl<C> Default for CommandDispatcher<C> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<C> CommandDispatcher<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the handler for `name`.
    ///
    /// Returns true if an earlier handler was replaced.
    pub fn register_handler<F>(&mut self, name: impl Into<String>, handler: F) -> bool
    where
        F: FnMut(&mut C, &Value) -> Result<(), HandlerError> + Send + 'static,
    {
        self.handlers
            .insert(name.into(), Box::new(handler))
            .is_some()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Parse one frame and run its handler synchronously.
    ///
    /// Returns the name of the command that was handled.
    pub fn dispatch(&mut self, context: &mut C, frame: &str) -> Result<String, DispatchError> {
        let envelope = CommandEnvelope::from_frame(frame).map_err(DispatchError::Malformed)?;
        self.dispatch_envelope(context, envelope)
    }

    pub fn dispatch_envelope(
        &mut self,
        context: &mut C,
        envelope: CommandEnvelope,
    ) -> Result<String, DispatchError> {
        let (command, args) = envelope.into_parts();
        let Some(handler) = self.handlers.get_mut(&command) else {
            return Err(DispatchError::UnknownCommand(command));
        };

        tracing::debug!(command = %command, "Dispatching server command");
        match handler(context, &args) {
            Ok(()) => Ok(command),
            Err(source) => Err(DispatchError::Handler { command, source }),
        }
    }
}
