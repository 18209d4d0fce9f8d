//! Terminal front end: renderer, key input and the shell that routes keys.

pub mod guard;
pub mod input;
pub mod renderer;
pub mod shell;

pub use guard::RawModeGuard;
pub use input::{event_to_client_event, EditOutcome, LineEditor};
pub use renderer::TerminalRenderer;
pub use shell::Shell;
