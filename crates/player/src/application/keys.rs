//! Keyboard input as the core sees it.
//!
//! `key` follows the DOM `KeyboardEvent.key` naming (`"a"`, `"Enter"`,
//! `"ArrowUp"`, `"Escape"`, `"F1"`) so server-authored hotkey tables match on
//! every front end.

/// A single keydown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            alt: false,
            ctrl: false,
            shift: false,
        }
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// The key name, case-folded.
    pub fn folded(&self) -> String {
        self.key.to_lowercase()
    }

    /// The key as a single character, if it is one.
    pub fn as_char(&self) -> Option<char> {
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}
