//! The single outstanding request for freeform text.

use skirmish_protocol::{CommandEnvelope, TextRequest};

#[derive(Debug, Default)]
pub struct TextPrompt {
    pending: Option<TextRequest>,
    /// Bumped on every open so a replaced request can be told apart.
    generation: u64,
}

impl TextPrompt {
    /// Open a prompt, replacing any earlier unanswered one.
    pub fn open(&mut self, request: TextRequest) {
        self.generation += 1;
        if let Some(previous) = self.pending.replace(request) {
            tracing::debug!(command = %previous.command, "Replacing unanswered text request");
        }
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn request(&self) -> Option<&TextRequest> {
        self.pending.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Consume the request with the entered text.
    pub fn submit(&mut self, text: &str) -> Option<CommandEnvelope> {
        self.pending.take().map(|request| request.complete(text))
    }

    /// Drop the request unanswered. Returns whether one was open.
    pub fn abandon(&mut self) -> bool {
        self.pending.take().is_some()
    }
}
