//! Typed view of the commands the server pushes to the client.
//!
//! The wire form is untyped (`args` is whatever JSON the server sent), so
//! each command name maps to one variant here and its positional arguments
//! are decoded and checked in [`ServerCommand::decode`]. Handlers only ever
//! see a payload that already has the right shape.

use serde_json::{json, Map, Value};

use crate::args::Positional;
use crate::{CommandEnvelope, HotkeyTable, MenuModel, ProtocolError, TextRequest};

pub const TITLE: &str = "title";
pub const DISCONNECTING: &str = "disconnecting";
pub const HOTKEYS: &str = "hotkeys";
pub const MESSAGE: &str = "message";
pub const MENU: &str = "menu";
pub const AUTHENTICATED: &str = "authenticated";
pub const TEXT: &str = "text";
pub const START_LOOP: &str = "start_loop";
pub const STOP_LOOPS: &str = "stop_loops";
pub const SOUND: &str = "sound";
pub const VOLUME: &str = "volume";

/// A validated server command.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerCommand {
    /// Set the window title.
    Title(String),
    /// The server is about to close the socket; do not reconnect.
    Disconnecting,
    /// Replace the hotkey table.
    Hotkeys(HotkeyTable),
    /// Append a line to the message log.
    Message(String),
    /// Install and show a menu.
    Menu(MenuModel),
    /// Login succeeded.
    Authenticated,
    /// Ask for a line of text.
    Text(TextRequest),
    /// Start a looping sound.
    StartLoop(String),
    /// Stop every looping sound.
    StopLoops,
    /// Play a sound once.
    Sound(String),
    /// Set the output gain (0.0 to 1.0).
    Volume(f32),
}

impl ServerCommand {
    /// Every command name this client understands.
    pub const NAMES: [&'static str; 11] = [
        TITLE,
        DISCONNECTING,
        HOTKEYS,
        MESSAGE,
        MENU,
        AUTHENTICATED,
        TEXT,
        START_LOOP,
        STOP_LOOPS,
        SOUND,
        VOLUME,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ServerCommand::Title(_) => TITLE,
            ServerCommand::Disconnecting => DISCONNECTING,
            ServerCommand::Hotkeys(_) => HOTKEYS,
            ServerCommand::Message(_) => MESSAGE,
            ServerCommand::Menu(_) => MENU,
            ServerCommand::Authenticated => AUTHENTICATED,
            ServerCommand::Text(_) => TEXT,
            ServerCommand::StartLoop(_) => START_LOOP,
            ServerCommand::StopLoops => STOP_LOOPS,
            ServerCommand::Sound(_) => SOUND,
            ServerCommand::Volume(_) => VOLUME,
        }
    }

    /// Decode the arguments of `command` into its variant.
    ///
    /// Commands without arguments ignore whatever `args` holds.
    pub fn decode(command: &str, args: &Value) -> Result<Self, ProtocolError> {
        match command {
            DISCONNECTING => return Ok(ServerCommand::Disconnecting),
            AUTHENTICATED => return Ok(ServerCommand::Authenticated),
            STOP_LOOPS => return Ok(ServerCommand::StopLoops),
            _ => {}
        }

        let args = Positional::new(command, args)?;
        let decoded = match command {
            TITLE => ServerCommand::Title(args.required(0)?),
            HOTKEYS => ServerCommand::Hotkeys(args.required(0)?),
            MESSAGE => ServerCommand::Message(args.required(0)?),
            MENU => ServerCommand::Menu(args.required(0)?),
            TEXT => ServerCommand::Text(TextRequest {
                label: args.required(0)?,
                command: args.required(1)?,
                arg_name: args.required(2)?,
                initial_value: args.optional(3)?,
                args: args.optional::<Map<String, Value>>(4)?,
            }),
            START_LOOP => ServerCommand::StartLoop(args.required(0)?),
            SOUND => ServerCommand::Sound(args.required(0)?),
            VOLUME => {
                let value: f64 = args.required(0)?;
                if !(0.0..=1.0).contains(&value) {
                    return Err(ProtocolError::OutOfRange {
                        command: command.to_string(),
                        value,
                        min: 0.0,
                        max: 1.0,
                    });
                }
                ServerCommand::Volume(value as f32)
            }
            other => return Err(ProtocolError::UnknownCommand(other.to_string())),
        };
        Ok(decoded)
    }

    pub fn from_envelope(envelope: &CommandEnvelope) -> Result<Self, ProtocolError> {
        Self::decode(envelope.command(), envelope.args())
    }

    /// Encode as the server would send it.
    pub fn to_envelope(&self) -> CommandEnvelope {
        let args = match self {
            ServerCommand::Title(text) | ServerCommand::Message(text) => vec![json!(text)],
            ServerCommand::StartLoop(url) | ServerCommand::Sound(url) => vec![json!(url)],
            ServerCommand::Hotkeys(table) => vec![json!(table)],
            ServerCommand::Menu(menu) => vec![json!(menu)],
            ServerCommand::Text(request) => vec![
                json!(request.label),
                json!(request.command),
                json!(request.arg_name),
                json!(request.initial_value),
                Value::Object(request.args.clone()),
            ],
            ServerCommand::Volume(level) => vec![json!(level)],
            ServerCommand::Disconnecting
            | ServerCommand::Authenticated
            | ServerCommand::StopLoops => Vec::new(),
        };
        CommandEnvelope::positional(self.name(), args)
    }
}
