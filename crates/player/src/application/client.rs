//! Game client - the composition root for one client session.
//!
//! Owns the dispatcher and the handler context, and exposes the entry points
//! runtime adapters call. All calls are synchronous and run to completion.

use std::sync::Arc;

use serde_json::Value;
use skirmish_protocol::CommandEnvelope;

use crate::application::dispatcher::{CommandDispatcher, DispatchError, HandlerError};
use crate::application::events::ClientEvent;
use crate::application::handlers::{register_builtin_handlers, ClientContext};
use crate::application::hotkeys::{HotkeyOutcome, HotkeyRouter};
use crate::application::keys::KeyEvent;
use crate::application::menu::{MenuNavigator, MenuOutcome};
use crate::application::session::{ConnectionState, SessionController, SubmitError};
use crate::application::sound_board::SoundBoard;
use crate::application::text_prompt::TextPrompt;
use crate::config::{ClientConfig, Credentials};
use crate::ports::outbound::{
    ClockPort, PlaybackHandle, RendererPort, SchedulerPort, SoundId, SoundPort, Timer,
    TransportPort,
};

/// Adapters the client talks to.
#[derive(Clone)]
pub struct ClientPorts {
    pub transport: Arc<dyn TransportPort>,
    pub scheduler: Arc<dyn SchedulerPort>,
    pub renderer: Arc<dyn RendererPort>,
    pub sound: Arc<dyn SoundPort>,
    pub clock: Arc<dyn ClockPort>,
}

/// Local validation failures on the login form.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Username cannot be blank.")]
    EmptyUsername,
    #[error("Password cannot be blank.")]
    EmptyPassword,
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

pub struct GameClient {
    dispatcher: CommandDispatcher<ClientContext>,
    ctx: ClientContext,
    auto_login: Option<Credentials>,
}

impl GameClient {
    pub fn new(ports: ClientPorts, config: &ClientConfig) -> Self {
        let session = SessionController::new(
            ports.transport,
            ports.scheduler,
            Arc::clone(&ports.renderer),
            config.session_config(),
        );
        let ctx = ClientContext {
            session,
            menu: MenuNavigator::new(ports.clock, config.search_timeout),
            hotkeys: HotkeyRouter::new(),
            sounds: SoundBoard::new(ports.sound),
            text_prompt: TextPrompt::default(),
            renderer: ports.renderer,
            debug: config.debug,
        };

        let mut dispatcher = CommandDispatcher::new();
        register_builtin_handlers(&mut dispatcher);

        Self {
            dispatcher,
            ctx,
            auto_login: config.credentials.clone(),
        }
    }

    pub fn connect(&mut self) {
        self.ctx.session.connect();
    }

    pub fn disconnect(&mut self) {
        self.ctx.session.disconnect();
    }

    pub fn state(&self) -> ConnectionState {
        self.ctx.session.state()
    }

    pub fn context(&self) -> &ClientContext {
        &self.ctx
    }

    pub fn on_state_change<F>(&mut self, listener: F)
    where
        F: FnMut(ConnectionState) + Send + 'static,
    {
        self.ctx.session.on_state_change(listener);
    }

    /// Add or replace a command handler.
    pub fn register_handler<F>(&mut self, name: impl Into<String>, handler: F) -> bool
    where
        F: FnMut(&mut ClientContext, &Value) -> Result<(), HandlerError> + Send + 'static,
    {
        self.dispatcher.register_handler(name, handler)
    }

    /// Apply one runtime event. Returns false once the client should stop.
    pub fn handle_event(&mut self, event: ClientEvent) -> bool {
        match event {
            ClientEvent::Opened => self.handle_open(),
            ClientEvent::Frame(frame) => self.handle_frame(&frame),
            ClientEvent::Closed => self.handle_close(),
            ClientEvent::Errored(reason) => self.handle_error(&reason),
            ClientEvent::Timer(timer) => self.handle_timer(timer),
            ClientEvent::SoundReady { sound, playback } => {
                self.handle_sound_ready(sound, playback)
            }
            ClientEvent::Key(key) => {
                self.handle_key(&key);
            }
            ClientEvent::Quit => {
                self.disconnect();
                return false;
            }
        }
        true
    }

    pub fn handle_open(&mut self) {
        self.ctx.session.handle_open();

        if self.ctx.session.has_authenticated() {
            return;
        }
        if let Some(credentials) = self.auto_login.clone() {
            tracing::info!(username = %credentials.username, "Logging in automatically");
            if let Err(e) = self.submit_login(&credentials.username, &credentials.password) {
                tracing::warn!("Automatic login failed: {}", e);
            }
        }
    }

    pub fn handle_close(&mut self) {
        if self.ctx.session.handle_close() {
            self.ctx.sounds.stop_loops();
        }
    }

    pub fn handle_error(&mut self, reason: &str) {
        self.ctx.session.handle_error(reason);
    }

    /// Dispatch one inbound frame. Nothing here closes the connection.
    pub fn handle_frame(&mut self, frame: &str) {
        match self.dispatcher.dispatch(&mut self.ctx, frame) {
            Ok(_) => {}
            Err(e @ DispatchError::UnknownCommand(_)) => {
                tracing::warn!("{}", e);
                self.ctx.renderer.write_message(&e.to_string());
            }
            Err(e) => {
                tracing::warn!(frame_len = frame.len(), "Dropped server frame: {}", e);
            }
        }
    }

    pub fn handle_timer(&mut self, timer: Timer) {
        self.ctx.session.handle_timer(timer);
    }

    pub fn handle_sound_ready(&mut self, sound: SoundId, playback: PlaybackHandle) {
        self.ctx.sounds.handle_ready(sound, playback);
    }

    /// Route a keydown. Returns true when the key was consumed.
    ///
    /// An open menu owns the keyboard. With a text prompt open the key
    /// belongs to the prompt's editor. Otherwise it is a hotkey candidate.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if self.ctx.menu.is_open() {
            let outcome = self.ctx.menu.handle_key(event);
            let consumed = outcome.suppresses_default();
            match outcome {
                MenuOutcome::Ignored => {}
                MenuOutcome::Handled => {
                    if let Some(index) = self.ctx.menu.focused() {
                        self.ctx.renderer.focus_menu_entry(index);
                    }
                }
                MenuOutcome::Dismissed => self.reset_screen(),
                MenuOutcome::Activated(envelope) => {
                    self.submit_reporting(&envelope);
                    self.reset_screen();
                }
            }
            return consumed;
        }

        if self.ctx.text_prompt.is_open() {
            return false;
        }

        match self.ctx.hotkeys.route(event, self.ctx.session.state().is_live()) {
            HotkeyOutcome::Matched(command) => {
                tracing::debug!(command = %command, "Hotkey matched");
                self.submit_reporting(&CommandEnvelope::new(command, None));
                true
            }
            HotkeyOutcome::Unmatched(signature) => {
                if self.ctx.debug {
                    self.ctx.renderer.write_message(&signature);
                }
                false
            }
            HotkeyOutcome::Inactive => false,
        }
    }

    /// Send a user command; `None` args become `{}`.
    pub fn send(&mut self, name: &str, args: Option<Value>) -> Result<(), SubmitError> {
        self.ctx.send(name, args)
    }

    /// Validate and submit the login form.
    ///
    /// The credentials are kept for replay whether or not this attempt
    /// succeeds; they are only replayed once the server has accepted a login.
    pub fn submit_login(&mut self, username: &str, password: &str) -> Result<(), LoginError> {
        if username.is_empty() {
            return Err(LoginError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginError::EmptyPassword);
        }

        let envelope = CommandEnvelope::authenticate(username, password);
        self.ctx.session.remember_credentials(envelope.clone());
        self.ctx.submit(&envelope)?;
        Ok(())
    }

    /// Submit the text prompt. Returns false if no request was pending.
    pub fn submit_text(&mut self, text: &str) -> Result<bool, SubmitError> {
        let Some(envelope) = self.ctx.text_prompt.submit(text) else {
            tracing::debug!("Text submitted with no pending request");
            return Ok(false);
        };
        self.reset_screen();
        self.ctx.submit(&envelope)?;
        Ok(true)
    }

    /// A toolbar button: its id is the command, sent with empty args.
    pub fn press_button(&mut self, command: &str) -> Result<(), SubmitError> {
        self.ctx.send(command, None)
    }

    pub fn reset_screen(&mut self) {
        self.ctx.reset_screen();
    }

    fn submit_reporting(&mut self, envelope: &CommandEnvelope) {
        match self.ctx.submit(envelope) {
            Ok(()) | Err(SubmitError::NotConnected) => {}
            Err(e) => tracing::error!(command = %envelope.command(), "Failed to send: {}", e),
        }
    }
}
