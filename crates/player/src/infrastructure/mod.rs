//! Adapters implementing the outbound ports for the desktop terminal.

pub mod clock;
pub mod scheduler;
pub mod sound;
pub mod terminal;
pub mod websocket;
