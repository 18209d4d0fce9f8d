//! Menus pushed by the server.
//!
//! A menu is replaced wholesale on every push; nothing here is patched
//! incrementally.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::{empty_args, CommandEnvelope};

fn default_dismissable() -> bool {
    true
}

/// A complete menu as described by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuModel {
    pub title: String,
    #[serde(default = "default_dismissable")]
    pub dismissable: bool,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// One line of a menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuItem {
    /// Activatable entry that sends `command` with `args`.
    Item {
        title: String,
        command: String,
        #[serde(default = "empty_args")]
        args: Value,
    },
    /// Heading; focusable but never activatable.
    Label { title: String },
}

impl MenuModel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            dismissable: true,
            items: Vec::new(),
        }
    }

    pub fn dismissable(mut self, dismissable: bool) -> Self {
        self.dismissable = dismissable;
        self
    }

    pub fn with_item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }
}

impl MenuItem {
    pub fn item(title: impl Into<String>, command: impl Into<String>, args: Value) -> Self {
        MenuItem::Item {
            title: title.into(),
            command: command.into(),
            args,
        }
    }

    pub fn label(title: impl Into<String>) -> Self {
        MenuItem::Label {
            title: title.into(),
        }
    }

    /// Text shown (and searched) for this entry. Labels are set off with dashes.
    pub fn display_text(&self) -> String {
        match self {
            MenuItem::Item { title, .. } => title.clone(),
            MenuItem::Label { title } => format!("- {title} -"),
        }
    }

    /// The envelope sent when this entry is activated, if it can be.
    pub fn activation(&self) -> Option<CommandEnvelope> {
        match self {
            MenuItem::Item { command, args, .. } => {
                Some(CommandEnvelope::new(command.clone(), Some(args.clone())))
            }
            MenuItem::Label { .. } => None,
        }
    }
}
