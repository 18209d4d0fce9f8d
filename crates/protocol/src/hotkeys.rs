//! Server-supplied hotkey table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Maps a key signature such as `ctrl+shift+b` to a command name.
///
/// Signatures are case-folded on the way in so lookups with a normalized
/// signature never miss on case alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, String>", into = "HashMap<String, String>")]
pub struct HotkeyTable {
    bindings: HashMap<String, String>,
}

impl HotkeyTable {
    pub fn command_for(&self, signature: &str) -> Option<&str> {
        self.bindings.get(signature).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl From<HashMap<String, String>> for HotkeyTable {
    fn from(raw: HashMap<String, String>) -> Self {
        Self {
            bindings: raw
                .into_iter()
                .map(|(signature, command)| (signature.to_lowercase(), command))
                .collect(),
        }
    }
}

impl From<HotkeyTable> for HashMap<String, String> {
    fn from(table: HotkeyTable) -> Self {
        table.bindings
    }
}

impl<S: Into<String>, C: Into<String>> FromIterator<(S, C)> for HotkeyTable {
    fn from_iter<I: IntoIterator<Item = (S, C)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(signature, command)| (signature.into(), command.into()))
            .collect::<HashMap<String, String>>()
            .into()
    }
}
