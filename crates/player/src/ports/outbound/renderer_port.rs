//! Renderer Port - the accessible page the player reads and navigates
//!
//! Element creation, styling and live-region announcements belong to the
//! adapter. The core only says what is on screen.

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait RendererPort: Send + Sync {
    fn set_title(&self, title: &str);

    /// Append one line to the message log.
    fn write_message(&self, text: &str);

    fn clear_messages(&self);

    /// Replace the visible menu. `entries` are display texts in order.
    fn show_menu(&self, title: &str, dismissable: bool, entries: &[String]);

    /// Move keyboard focus to a menu entry.
    fn focus_menu_entry(&self, index: usize);

    fn hide_menu(&self);

    /// Show the single-field text form, pre-filled and selected.
    fn show_text_prompt(&self, label: &str, value: &str);

    fn hide_text_prompt(&self);

    /// Reveal the main input surface (hiding the login form) and focus it.
    fn show_main_input(&self);
}
