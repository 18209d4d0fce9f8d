//! Terminal shell: decides who gets each keypress.
//!
//! Precedence follows what would hold focus on a page: an open text prompt,
//! then an open menu, then the login form until the server accepts a login,
//! then the main input where hotkeys live.

use std::io::{Stdout, Write};
use std::sync::Arc;

use crate::application::{GameClient, KeyEvent, LoginError};
use crate::infrastructure::terminal::input::{EditOutcome, LineEditor};
use crate::infrastructure::terminal::renderer::TerminalRenderer;
use crate::ports::outbound::RendererPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    TextPrompt,
    Menu,
    Login,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginField {
    Username,
    Password,
}

pub struct Shell<W: Write + Send = Stdout> {
    renderer: Arc<TerminalRenderer<W>>,
    editor: LineEditor,
    login_field: LoginField,
    username: String,
    /// Generation of the text request the editor was seeded from.
    prompt_generation: Option<u64>,
    input_line: Option<String>,
}

impl<W: Write + Send> Shell<W> {
    pub fn new(renderer: Arc<TerminalRenderer<W>>) -> Self {
        Self {
            renderer,
            editor: LineEditor::default(),
            login_field: LoginField::Username,
            username: String::new(),
            prompt_generation: None,
            input_line: None,
        }
    }

    fn focus(&self, client: &GameClient) -> Focus {
        let ctx = client.context();
        if ctx.text_prompt.is_open() {
            Focus::TextPrompt
        } else if ctx.menu.is_open() {
            Focus::Menu
        } else if !ctx.session.has_authenticated() {
            Focus::Login
        } else {
            Focus::Main
        }
    }

    pub fn handle_key(&mut self, client: &mut GameClient, key: &KeyEvent) {
        match self.focus(client) {
            Focus::TextPrompt => match self.editor.handle_key(key) {
                EditOutcome::Submitted(text) => {
                    if let Err(e) = client.submit_text(&text) {
                        tracing::debug!("Text not sent: {}", e);
                    }
                }
                EditOutcome::Cancelled => client.reset_screen(),
                EditOutcome::Editing => {}
            },
            Focus::Menu | Focus::Main => {
                client.handle_key(key);
            }
            Focus::Login => self.handle_login_key(client, key),
        }
        self.refresh(client);
    }

    fn handle_login_key(&mut self, client: &mut GameClient, key: &KeyEvent) {
        match (self.editor.handle_key(key), self.login_field) {
            (EditOutcome::Submitted(username), LoginField::Username) => {
                self.username = username;
                self.login_field = LoginField::Password;
            }
            (EditOutcome::Submitted(password), LoginField::Password) => {
                match client.submit_login(&self.username, &password) {
                    Err(e @ LoginError::EmptyPassword) => {
                        self.renderer.write_message(&e.to_string());
                        return;
                    }
                    Err(e @ LoginError::EmptyUsername) => {
                        self.renderer.write_message(&e.to_string());
                    }
                    Err(LoginError::Submit(e)) => {
                        tracing::debug!("Login not sent: {}", e);
                    }
                    Ok(()) => {}
                }
                self.login_field = LoginField::Username;
                self.editor.set(self.username.clone());
            }
            (EditOutcome::Cancelled, _) => {
                self.login_field = LoginField::Username;
                self.editor.set("");
            }
            (EditOutcome::Editing, _) => {}
        }
    }

    /// Bring the input line in line with the client. Call after every event.
    pub fn refresh(&mut self, client: &GameClient) {
        let focus = self.focus(client);

        let line = match focus {
            Focus::TextPrompt => {
                let prompt = &client.context().text_prompt;
                let generation = prompt.generation();
                if self.prompt_generation != Some(generation) {
                    let initial = prompt
                        .request()
                        .map(|request| request.initial_value.clone())
                        .unwrap_or_default();
                    self.editor = LineEditor::with_text(initial);
                    self.prompt_generation = Some(generation);
                }
                let label = prompt
                    .request()
                    .map(|request| request.label.as_str())
                    .unwrap_or_default();
                Some(format!("{}: {}", label, self.editor.text()))
            }
            Focus::Login => {
                self.prompt_generation = None;
                Some(match self.login_field {
                    LoginField::Username => format!("Username: {}", self.editor.text()),
                    LoginField::Password => {
                        format!("Password: {}", "*".repeat(self.editor.text().chars().count()))
                    }
                })
            }
            Focus::Menu | Focus::Main => {
                if self.prompt_generation.take().is_some() {
                    self.editor.set("");
                }
                None
            }
        };

        if line != self.input_line {
            self.input_line = line.clone();
            self.renderer.set_input_line(line);
        }
    }
}
