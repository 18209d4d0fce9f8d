//! Skirmish Protocol - wire types shared by the game server and the client
//!
//! Every frame on the socket is one JSON record `{"command": ..., "args": ...}`.
//! This crate owns that record ([`CommandEnvelope`]) and the typed view of the
//! commands the server pushes to the client ([`ServerCommand`]).
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json and thiserror
//! 2. **No client state** - Pure data types, decoding and validation
//! 3. **Validate at the boundary** - Server payloads are checked once, when an
//!    envelope is decoded into a [`ServerCommand`]

mod args;
pub mod commands;
pub mod envelope;
pub mod error;
pub mod hotkeys;
pub mod menu;
pub mod text;

pub use commands::ServerCommand;
pub use envelope::{empty_args, CommandEnvelope, AUTHENTICATE_COMMAND};
pub use error::ProtocolError;
pub use hotkeys::HotkeyTable;
pub use menu::{MenuItem, MenuModel};
pub use text::TextRequest;
