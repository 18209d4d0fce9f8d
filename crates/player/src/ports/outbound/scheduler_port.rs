//! Scheduler Port - delayed callbacks
//!
//! A scheduled timer comes back as `ClientEvent::Timer`. Timers are never
//! cancelled; whoever handles a fired timer decides whether it still applies.

use std::time::Duration;

/// What a fired timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Try to open a new transport channel.
    Reconnect,
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait SchedulerPort: Send + Sync {
    fn schedule(&self, delay: Duration, timer: Timer);
}
