//! Raw mode for the lifetime of the client.

use crossterm::{cursor, execute, terminal};

/// Enables raw mode on creation and restores the terminal on drop,
/// including when unwinding from a panic.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enable() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!("Failed to leave raw mode: {}", e);
        }
        let _ = execute!(std::io::stdout(), cursor::Show);
    }
}
