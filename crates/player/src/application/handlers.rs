//! Built-in server command handlers.
//!
//! Every handler decodes its payload into a [`ServerCommand`] first, so a
//! shape mismatch is reported by the dispatcher and nothing is applied.

use std::sync::Arc;

use serde_json::Value;
use skirmish_protocol::{CommandEnvelope, ServerCommand};

use crate::application::dispatcher::{CommandDispatcher, HandlerError};
use crate::application::hotkeys::HotkeyRouter;
use crate::application::menu::MenuNavigator;
use crate::application::session::{SessionController, SubmitError};
use crate::application::sound_board::SoundBoard;
use crate::application::text_prompt::TextPrompt;
use crate::ports::outbound::RendererPort;

/// Everything a handler may touch, owned by one client session.
pub struct ClientContext {
    pub session: SessionController,
    pub menu: MenuNavigator,
    pub hotkeys: HotkeyRouter,
    pub sounds: SoundBoard,
    pub text_prompt: TextPrompt,
    pub renderer: Arc<dyn RendererPort>,
    /// Surface unmatched hotkey signatures in the message log.
    pub debug: bool,
}

impl ClientContext {
    /// Apply a decoded server command.
    pub fn apply(&mut self, command: ServerCommand) {
        match command {
            ServerCommand::Title(title) => self.renderer.set_title(&title),
            ServerCommand::Disconnecting => self.session.suppress_reconnect(),
            ServerCommand::Hotkeys(table) => self.hotkeys.replace_table(table),
            ServerCommand::Message(text) => self.renderer.write_message(&text),
            ServerCommand::Menu(model) => {
                self.menu.install(model);
                self.renderer.show_menu(
                    self.menu.title(),
                    self.menu.is_dismissable(),
                    &self.menu.entry_texts(),
                );
                if let Some(index) = self.menu.focused() {
                    self.renderer.focus_menu_entry(index);
                }
            }
            ServerCommand::Authenticated => {
                self.session.mark_authenticated();
                self.renderer.show_main_input();
            }
            ServerCommand::Text(request) => {
                self.renderer
                    .show_text_prompt(&request.label, &request.initial_value);
                self.text_prompt.open(request);
            }
            ServerCommand::StartLoop(url) => {
                self.sounds.start_loop(&url);
            }
            ServerCommand::StopLoops => self.sounds.stop_loops(),
            ServerCommand::Sound(url) => {
                self.sounds.play_once(&url);
            }
            ServerCommand::Volume(gain) => self.sounds.set_volume(gain),
        }
    }

    /// Send `name` with `args` (an empty object when `None`).
    pub fn send(&mut self, name: &str, args: Option<Value>) -> Result<(), SubmitError> {
        self.submit(&CommandEnvelope::new(name, args))
    }

    pub fn submit(&mut self, envelope: &CommandEnvelope) -> Result<(), SubmitError> {
        self.session.submit(envelope)
    }

    /// Close the menu and any text prompt, returning focus to the main input.
    pub fn reset_screen(&mut self) {
        if self.text_prompt.abandon() {
            tracing::debug!("Abandoned pending text request");
        }
        self.renderer.hide_text_prompt();
        self.menu.dismiss();
        self.renderer.hide_menu();
    }
}

/// Register a handler for every command in [`ServerCommand::NAMES`].
pub fn register_builtin_handlers(dispatcher: &mut CommandDispatcher<ClientContext>) {
    for name in ServerCommand::NAMES {
        dispatcher.register_handler(name, move |ctx: &mut ClientContext, args: &Value| {
            let command = ServerCommand::decode(name, args)?;
            ctx.apply(command);
            Ok::<(), HandlerError>(())
        });
    }
}
