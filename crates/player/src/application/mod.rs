//! Application core: runtime-agnostic client logic driven by [`ClientEvent`]s.

pub mod client;
pub mod dispatcher;
pub mod events;
pub mod handlers;
pub mod hotkeys;
pub mod keys;
pub mod menu;
pub mod session;
pub mod sound_board;
pub mod text_prompt;

pub use client::{ClientPorts, GameClient, LoginError};
pub use dispatcher::{CommandDispatcher, DispatchError, HandlerError};
pub use events::ClientEvent;
pub use handlers::ClientContext;
pub use keys::KeyEvent;
pub use session::{ConnectionState, SessionConfig, SubmitError};
