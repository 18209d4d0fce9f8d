//! Accessible menu navigation.
//!
//! The server describes a menu; this engine owns what the keyboard does with
//! it: focus traversal, dismissal, activation and incremental type-ahead
//! search. Every install starts from scratch, because the server can change
//! the menu's shape on any push.
//!
//! Search compares timestamps rather than running a timer: a keystroke that
//! arrives after the search window has lapsed starts a fresh search from the
//! top of the menu.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use skirmish_protocol::{CommandEnvelope, MenuModel};

use crate::application::keys::KeyEvent;
use crate::ports::outbound::ClockPort;

/// Default type-ahead window.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_millis(1_000);

/// Characters that feed the type-ahead search (after case folding).
pub const SEARCH_CHARS: &str = "abcdefghijklmnopqrstuvwxyz1234567890 -='#/\\`[],.";

/// What a keydown did to the menu.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuOutcome {
    /// Not a menu key; nothing changed.
    Ignored,
    /// Focus moved or the search advanced.
    Handled,
    /// The menu was closed.
    Dismissed,
    /// An item was chosen; the menu is closed and this should be sent.
    Activated(CommandEnvelope),
}

impl MenuOutcome {
    /// Matched keys suppress the front end's default behavior for that key.
    pub fn suppresses_default(&self) -> bool {
        !matches!(self, MenuOutcome::Ignored)
    }
}

#[derive(Debug)]
struct MenuEntry {
    text: String,
    folded: String,
    action: Option<CommandEnvelope>,
}

#[derive(Debug, Default)]
struct SearchBuffer {
    text: String,
    last_key_at: Option<DateTime<Utc>>,
    position: usize,
}

pub struct MenuNavigator {
    clock: Arc<dyn ClockPort>,
    search_timeout: Duration,
    title: String,
    dismissable: bool,
    entries: Vec<MenuEntry>,
    focused: Option<usize>,
    search: SearchBuffer,
}

impl MenuNavigator {
    pub fn new(clock: Arc<dyn ClockPort>, search_timeout: Duration) -> Self {
        Self {
            clock,
            search_timeout,
            title: String::new(),
            dismissable: false,
            entries: Vec::new(),
            focused: None,
            search: SearchBuffer::default(),
        }
    }

    /// Replace the current menu.
    ///
    /// Focus lands on the first item. A menu made only of labels focuses its
    /// first label so the focused index always points at an entry.
    pub fn install(&mut self, model: MenuModel) {
        self.title = model.title;
        self.dismissable = model.dismissable;
        self.entries = model
            .items
            .iter()
            .map(|item| {
                let text = item.display_text();
                MenuEntry {
                    folded: text.to_lowercase(),
                    text,
                    action: item.activation(),
                }
            })
            .collect();
        self.search = SearchBuffer::default();
        self.focused = self
            .entries
            .iter()
            .position(|entry| entry.action.is_some())
            .or(if self.entries.is_empty() { None } else { Some(0) });
        tracing::debug!(
            title = %self.title,
            entries = self.entries.len(),
            focused = ?self.focused,
            "Installed menu"
        );
    }

    /// Drop the current menu.
    pub fn dismiss(&mut self) {
        self.entries.clear();
        self.focused = None;
        self.search = SearchBuffer::default();
    }

    pub fn is_open(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_dismissable(&self) -> bool {
        self.dismissable
    }

    pub fn entry_texts(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.text.clone()).collect()
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn focused_text(&self) -> Option<&str> {
        self.focused
            .and_then(|index| self.entries.get(index))
            .map(|entry| entry.text.as_str())
    }

    pub fn search_text(&self) -> &str {
        &self.search.text
    }

    /// Apply one keydown on the focused entry.
    pub fn handle_key(&mut self, event: &KeyEvent) -> MenuOutcome {
        let Some(focused) = self.focused else {
            return MenuOutcome::Ignored;
        };
        let last = self.entries.len() - 1;

        match event.folded().as_str() {
            "arrowleft" | "arrowup" => {
                self.focused = Some(focused.saturating_sub(1));
                MenuOutcome::Handled
            }
            "arrowdown" | "arrowright" => {
                self.focused = Some((focused + 1).min(last));
                MenuOutcome::Handled
            }
            "home" => {
                self.focused = Some(0);
                MenuOutcome::Handled
            }
            "end" => {
                self.focused = Some(last);
                MenuOutcome::Handled
            }
            "escape" if self.dismissable => {
                self.dismiss();
                MenuOutcome::Dismissed
            }
            "enter" => match self.entries[focused].action.clone() {
                Some(envelope) => {
                    self.dismiss();
                    MenuOutcome::Activated(envelope)
                }
                None => MenuOutcome::Ignored,
            },
            folded => match single_search_char(folded) {
                Some(c) => {
                    self.search(c);
                    MenuOutcome::Handled
                }
                None => MenuOutcome::Ignored,
            },
        }
    }

    fn search(&mut self, c: char) {
        let now = self.clock.now();
        let lapsed = self.search.last_key_at.map_or(true, |last| {
            (now - last).num_milliseconds() >= self.search_timeout.as_millis() as i64
        });
        if lapsed {
            self.search.text.clear();
            self.search.position = 0;
        }
        self.search.last_key_at = Some(now);
        self.search.text.push(c);

        let found = self.entries[self.search.position..]
            .iter()
            .position(|entry| entry.folded.starts_with(&self.search.text))
            .map(|offset| self.search.position + offset);
        match found {
            Some(index) => {
                self.focused = Some(index);
                self.search.position = index;
            }
            None => {
                tracing::debug!(search = %self.search.text, "No menu entry matches");
            }
        }
    }
}

fn single_search_char(folded: &str) -> Option<char> {
    let mut chars = folded.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if SEARCH_CHARS.contains(c) => Some(c),
        _ => None,
    }
}
