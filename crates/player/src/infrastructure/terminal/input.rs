//! Terminal key input.
//!
//! Converts crossterm key events into the DOM-style [`KeyEvent`] the core
//! understands, and provides the single-line editor used by the login form
//! and text prompts.

use crossterm::event::{
    Event, KeyCode, KeyEvent as TermKeyEvent, KeyEventKind, KeyModifiers,
};

use crate::application::{ClientEvent, KeyEvent};

/// Map one terminal event to a client event.
///
/// Returns `None` for releases, mouse, resize and keys with no DOM name.
/// Ctrl+Q is the quit chord.
pub fn event_to_client_event(event: &Event) -> Option<ClientEvent> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
    {
        return Some(ClientEvent::Quit);
    }
    key_event(key).map(ClientEvent::Key)
}

/// Convert a terminal key to its DOM `KeyboardEvent.key` name and modifiers.
pub fn key_event(key: &TermKeyEvent) -> Option<KeyEvent> {
    let name = match key.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Tab | KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Insert => "Insert".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => return None,
    };

    Some(KeyEvent {
        key: name,
        alt: key.modifiers.contains(KeyModifiers::ALT),
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        shift: key.modifiers.contains(KeyModifiers::SHIFT) || key.code == KeyCode::BackTab,
    })
}

/// What a key did to the line being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The buffer changed, or the key was not an editing key.
    Editing,
    /// Enter: the buffer is handed over and cleared.
    Submitted(String),
    /// Escape.
    Cancelled,
}

/// A single line of text input.
#[derive(Debug, Default, Clone)]
pub struct LineEditor {
    buffer: String,
}

impl LineEditor {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            buffer: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replace the contents.
    pub fn set(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    pub fn handle_key(&mut self, event: &KeyEvent) -> EditOutcome {
        match event.key.as_str() {
            "Enter" => EditOutcome::Submitted(std::mem::take(&mut self.buffer)),
            "Escape" => EditOutcome::Cancelled,
            "Backspace" => {
                self.buffer.pop();
                EditOutcome::Editing
            }
            _ => {
                if let Some(c) = event.as_char() {
                    if !event.ctrl && !event.alt {
                        self.buffer.push(c);
                    }
                }
                EditOutcome::Editing
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(TermKeyEvent::new(code, modifiers))
    }

    #[test]
    fn named_keys_use_dom_names() {
        let cases = [
            (KeyCode::Up, "ArrowUp"),
            (KeyCode::Enter, "Enter"),
            (KeyCode::Esc, "Escape"),
            (KeyCode::F(1), "F1"),
            (KeyCode::Char('b'), "b"),
        ];
        for (code, name) in cases {
            match event_to_client_event(&press(code, KeyModifiers::NONE)) {
                Some(ClientEvent::Key(key)) => assert_eq!(key.key, name),
                other => panic!("{code:?} mapped to {other:?}"),
            }
        }
    }

    #[test]
    fn modifiers_carry_over() {
        let event = press(
            KeyCode::Char('B'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        assert_eq!(
            event_to_client_event(&event),
            Some(ClientEvent::Key(KeyEvent::new("B").with_ctrl().with_shift()))
        );
    }

    #[test]
    fn ctrl_q_quits() {
        assert_eq!(
            event_to_client_event(&press(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(ClientEvent::Quit)
        );
    }

    #[test]
    fn non_key_events_are_ignored() {
        assert_eq!(event_to_client_event(&Event::Resize(80, 24)), None);
        assert_eq!(event_to_client_event(&Event::FocusGained), None);
    }

    #[test]
    fn editor_builds_and_submits_a_line() {
        let mut editor = LineEditor::with_text("ab");
        editor.handle_key(&KeyEvent::new("Backspace"));
        editor.handle_key(&KeyEvent::new("c"));
        editor.handle_key(&KeyEvent::new("x").with_ctrl());
        editor.handle_key(&KeyEvent::new("F2"));
        assert_eq!(editor.text(), "ac");

        assert_eq!(
            editor.handle_key(&KeyEvent::new("Enter")),
            EditOutcome::Submitted("ac".into())
        );
        assert_eq!(editor.text(), "");
        assert_eq!(editor.handle_key(&KeyEvent::new("Escape")), EditOutcome::Cancelled);
    }
}
