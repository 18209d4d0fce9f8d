//! Timers on the tokio runtime.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::application::ClientEvent;
use crate::ports::outbound::{SchedulerPort, Timer};

/// Sleeps on a spawned task, then posts `ClientEvent::Timer`.
pub struct TokioScheduler {
    events: mpsc::UnboundedSender<ClientEvent>,
}

impl TokioScheduler {
    pub fn new(events: mpsc::UnboundedSender<ClientEvent>) -> Self {
        Self { events }
    }
}

impl SchedulerPort for TokioScheduler {
    fn schedule(&self, delay: Duration, timer: Timer) {
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if events.send(ClientEvent::Timer(timer)).is_err() {
                tracing::debug!(?timer, "Event loop has stopped; timer dropped");
            }
        });
    }
}
