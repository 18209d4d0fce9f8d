//! Hotkey routing over the server-supplied table.

use skirmish_protocol::HotkeyTable;

use crate::application::keys::KeyEvent;

/// Keys normalized to a fixed signature regardless of reported modifiers.
///
/// Some keyboard layouts deliver `é` for AltGr+E without reliable modifier
/// flags; servers bind that chord as `alt+ctrl+e`.
pub const LAYOUT_SHIMS: &[(&str, &str)] = &[("é", "alt+ctrl+e")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotkeyOutcome {
    /// The signature is bound to this command.
    Matched(String),
    /// Nothing is bound to this signature.
    Unmatched(String),
    /// Hotkeys are off while disconnected.
    Inactive,
}

#[derive(Debug, Default)]
pub struct HotkeyRouter {
    table: Option<HotkeyTable>,
}

impl HotkeyRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole table.
    pub fn replace_table(&mut self, table: HotkeyTable) {
        tracing::debug!(bindings = table.len(), "Hotkey table replaced");
        self.table = Some(table);
    }

    /// Canonical signature: `alt`, `ctrl`, `shift` (those held), then the key,
    /// joined with `+` and lower-cased.
    pub fn signature(event: &KeyEvent) -> String {
        if let Some((_, shim)) = LAYOUT_SHIMS.iter().find(|(key, _)| *key == event.key) {
            return (*shim).to_string();
        }

        let mut parts: Vec<&str> = Vec::with_capacity(4);
        if event.alt {
            parts.push("alt");
        }
        if event.ctrl {
            parts.push("ctrl");
        }
        if event.shift {
            parts.push("shift");
        }
        parts.push(&event.key);
        parts.join("+").to_lowercase()
    }

    pub fn route(&self, event: &KeyEvent, connected: bool) -> HotkeyOutcome {
        if !connected {
            return HotkeyOutcome::Inactive;
        }
        let signature = Self::signature(event);
        match self
            .table
            .as_ref()
            .and_then(|table| table.command_for(&signature))
        {
            Some(command) => HotkeyOutcome::Matched(command.to_string()),
            None => HotkeyOutcome::Unmatched(signature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> HotkeyRouter {
        let mut router = HotkeyRouter::new();
        router.replace_table(
            [
                ("ctrl+shift+b", "build_menu"),
                ("f1", "help"),
                ("alt+ctrl+e", "economy"),
                ("shift+?", "commands"),
            ]
            .into_iter()
            .collect(),
        );
        router
    }

    #[test]
    fn modifiers_render_in_canonical_order() {
        let event = KeyEvent::new("B").with_shift().with_ctrl();
        assert_eq!(HotkeyRouter::signature(&event), "ctrl+shift+b");

        let event = KeyEvent::new("x").with_shift().with_alt().with_ctrl();
        assert_eq!(HotkeyRouter::signature(&event), "alt+ctrl+shift+x");
    }

    #[test]
    fn matched_signature_yields_command() {
        let router = router();
        assert_eq!(
            router.route(&KeyEvent::new("F1"), true),
            HotkeyOutcome::Matched("help".into())
        );
        assert_eq!(
            router.route(&KeyEvent::new("?").with_shift(), true),
            HotkeyOutcome::Matched("commands".into())
        );
    }

    #[test]
    fn accented_e_is_normalized_whatever_the_modifiers() {
        let router = router();
        for event in [
            KeyEvent::new("é"),
            KeyEvent::new("é").with_alt(),
            KeyEvent::new("é").with_shift().with_ctrl(),
        ] {
            assert_eq!(router.route(&event, true), HotkeyOutcome::Matched("economy".into()));
        }
    }

    #[test]
    fn unmatched_reports_signature() {
        assert_eq!(
            router().route(&KeyEvent::new("q").with_ctrl(), true),
            HotkeyOutcome::Unmatched("ctrl+q".into())
        );
    }

    #[test]
    fn missing_table_never_matches() {
        assert_eq!(
            HotkeyRouter::new().route(&KeyEvent::new("F1"), true),
            HotkeyOutcome::Unmatched("f1".into())
        );
    }

    #[test]
    fn inactive_while_disconnected() {
        assert_eq!(router().route(&KeyEvent::new("F1"), false), HotkeyOutcome::Inactive);
    }
}
