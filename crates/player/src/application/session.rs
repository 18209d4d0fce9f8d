//! Session controller: connection lifecycle, retry policy and re-authentication.
//!
//! Runtime-agnostic. The controller never waits; it reacts to transport events
//! and fired timers, and asks the scheduler for the next reconnect attempt.
//!
//! ```text
//! Disconnected --connect--> Connecting --open--> Connected --authenticated--> Authenticated
//!       ^                        |                   |                              |
//!       +--------close-----------+-------close-------+-------------close------------+
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use skirmish_protocol::{CommandEnvelope, ProtocolError};

use crate::ports::outbound::{RendererPort, SchedulerPort, Timer, TransportError, TransportPort};

/// Delay before retrying after the transport could not even be created.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1_000);

/// Delay before reconnecting after an unexpected close.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::ZERO;

/// Connection state for the game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No channel is open.
    Disconnected,
    /// A channel is being opened.
    Connecting,
    /// The channel is open; not logged in.
    Connected,
    /// The channel is open and the server accepted our credentials.
    Authenticated,
}

impl ConnectionState {
    /// Whether user-initiated commands may be sent.
    pub fn is_live(self) -> bool {
        matches!(
            self,
            ConnectionState::Connected | ConnectionState::Authenticated
        )
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Authenticated => "authenticated",
        };
        f.write_str(name)
    }
}

/// Lines the session writes to the message log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Connected,
    Disconnected,
    ConnectionFailed,
    RetryingConnection,
    NotConnected,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Notice::Connected => "*** Connected ***",
            Notice::Disconnected => "*** Disconnected ***",
            Notice::ConnectionFailed => "*** Connection failed. ***",
            Notice::RetryingConnection => "*** Retrying failed connection. ***",
            Notice::NotConnected => "You are not connected.",
        };
        f.write_str(text)
    }
}

/// Why an outbound command was not sent.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Not connected")]
    NotConnected,
    #[error("Failed to encode command: {0}")]
    Encode(#[from] ProtocolError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Retry timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub retry_delay: Duration,
    pub reconnect_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            retry_delay: DEFAULT_RETRY_DELAY,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }
}

type StateListener = Box<dyn FnMut(ConnectionState) + Send>;

/// Owns the connection state and the only path to the transport.
pub struct SessionController {
    state: ConnectionState,
    transport: Arc<dyn TransportPort>,
    scheduler: Arc<dyn SchedulerPort>,
    renderer: Arc<dyn RendererPort>,
    config: SessionConfig,
    listeners: Vec<StateListener>,
    /// Last submitted `authenticate` envelope.
    credentials: Option<CommandEnvelope>,
    /// Set once the server has accepted credentials in this client lifetime.
    authenticated_once: bool,
    /// Set by a user disconnect or a server `disconnecting` notice.
    reconnect_suppressed: bool,
    /// Inside a close-triggered reconnect sequence; error notices are muted.
    reconnecting: bool,
    /// A channel is open or being opened.
    channel_live: bool,
    /// A reconnect timer is outstanding.
    retry_pending: bool,
}

impl SessionController {
    pub fn new(
        transport: Arc<dyn TransportPort>,
        scheduler: Arc<dyn SchedulerPort>,
        renderer: Arc<dyn RendererPort>,
        config: SessionConfig,
    ) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            transport,
            scheduler,
            renderer,
            config,
            listeners: Vec::new(),
            credentials: None,
            authenticated_once: false,
            reconnect_suppressed: false,
            reconnecting: false,
            channel_live: false,
            retry_pending: false,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_submittable(&self) -> bool {
        self.state.is_live()
    }

    pub fn has_authenticated(&self) -> bool {
        self.authenticated_once
    }

    pub fn is_reconnect_suppressed(&self) -> bool {
        self.reconnect_suppressed
    }

    /// Register a callback invoked on every state transition.
    pub fn on_state_change<F>(&mut self, listener: F)
    where
        F: FnMut(ConnectionState) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn set_state(&mut self, new_state: ConnectionState) {
        if self.state == new_state {
            return;
        }
        tracing::debug!(from = %self.state, to = %new_state, "Connection state changed");
        self.state = new_state;
        for listener in self.listeners.iter_mut() {
            listener(new_state);
        }
    }

    fn notify(&self, notice: Notice) {
        self.renderer.write_message(&notice.to_string());
    }

    /// Start connecting. Clears any earlier user disconnect.
    pub fn connect(&mut self) {
        self.reconnect_suppressed = false;
        self.open_channel();
    }

    /// User-initiated teardown. No reconnect follows the resulting close.
    pub fn disconnect(&mut self) {
        tracing::info!("Disconnect requested");
        self.reconnect_suppressed = true;
        if self.channel_live {
            self.transport.close();
        }
    }

    /// The server announced it is about to close the connection.
    pub fn suppress_reconnect(&mut self) {
        tracing::info!("Server is disconnecting; reconnect suppressed");
        self.reconnect_suppressed = true;
    }

    fn open_channel(&mut self) {
        if self.channel_live {
            tracing::debug!("Channel already open or pending; not opening another");
            return;
        }

        match self.transport.open() {
            Ok(()) => {
                self.channel_live = true;
                self.set_state(ConnectionState::Connecting);
            }
            Err(e) => {
                tracing::warn!("Failed to create transport channel: {}", e);
                self.notify(Notice::RetryingConnection);
                self.schedule_reconnect(self.config.retry_delay);
            }
        }
    }

    fn schedule_reconnect(&mut self, delay: Duration) {
        if self.retry_pending {
            tracing::debug!("Reconnect already scheduled");
            return;
        }
        self.retry_pending = true;
        tracing::info!("Reconnecting in {}ms", delay.as_millis());
        self.scheduler.schedule(delay, Timer::Reconnect);
    }

    /// A scheduled timer fired.
    pub fn handle_timer(&mut self, timer: Timer) {
        match timer {
            Timer::Reconnect => {
                self.retry_pending = false;
                if self.reconnect_suppressed {
                    tracing::info!("Reconnection cancelled - intentional disconnect");
                    return;
                }
                self.open_channel();
            }
        }
    }

    /// The transport channel opened.
    pub fn handle_open(&mut self) {
        tracing::info!("Connected to server");
        self.channel_live = true;
        self.reconnecting = false;
        self.set_state(ConnectionState::Connected);
        self.renderer.clear_messages();
        self.notify(Notice::Connected);

        if self.authenticated_once {
            if let Some(credentials) = self.credentials.clone() {
                tracing::info!("Replaying authentication after reconnect");
                if let Err(e) = self.write(&credentials) {
                    tracing::error!("Failed to replay authentication: {}", e);
                }
            }
        }
    }

    /// The transport channel closed. Returns whether a live session was lost.
    pub fn handle_close(&mut self) -> bool {
        let was_live = self.state.is_live();
        self.channel_live = false;

        if was_live {
            tracing::info!("Connection lost");
            self.renderer.clear_messages();
            self.notify(Notice::Disconnected);
        }
        self.set_state(ConnectionState::Disconnected);

        if !self.reconnect_suppressed {
            self.reconnecting = true;
            self.schedule_reconnect(self.config.reconnect_delay);
        }
        was_live
    }

    /// The transport reported an error. State is left to the close event.
    pub fn handle_error(&mut self, reason: &str) {
        tracing::warn!("Transport error: {}", reason);
        if !self.reconnecting {
            self.notify(Notice::ConnectionFailed);
        }
    }

    /// The server accepted our credentials.
    pub fn mark_authenticated(&mut self) {
        match self.state {
            ConnectionState::Connected | ConnectionState::Authenticated => {
                self.authenticated_once = true;
                self.set_state(ConnectionState::Authenticated);
            }
            other => {
                tracing::warn!(state = %other, "Ignoring authentication outside a live connection");
            }
        }
    }

    /// Keep credentials for replay after a reconnect.
    pub fn remember_credentials(&mut self, envelope: CommandEnvelope) {
        self.credentials = Some(envelope);
    }

    /// Send a command if the session is live; otherwise tell the player.
    pub fn submit(&mut self, envelope: &CommandEnvelope) -> Result<(), SubmitError> {
        if !self.is_submittable() {
            tracing::debug!(command = %envelope.command(), "Dropping command while disconnected");
            self.notify(Notice::NotConnected);
            return Err(SubmitError::NotConnected);
        }
        self.write(envelope)
    }

    fn write(&self, envelope: &CommandEnvelope) -> Result<(), SubmitError> {
        let frame = envelope.to_frame()?;
        self.transport.send(frame)?;
        tracing::debug!(command = %envelope.command(), "Sent command");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{MockRendererPort, MockSchedulerPort, MockTransportPort};
    use mockall::predicate::eq;
    use std::sync::Mutex;

    fn quiet_renderer() -> MockRendererPort {
        let mut renderer = MockRendererPort::new();
        renderer.expect_write_message().return_const(());
        renderer.expect_clear_messages().return_const(());
        renderer
    }

    fn controller(
        transport: MockTransportPort,
        scheduler: MockSchedulerPort,
        renderer: MockRendererPort,
    ) -> SessionController {
        SessionController::new(
            Arc::new(transport),
            Arc::new(scheduler),
            Arc::new(renderer),
            SessionConfig::default(),
        )
    }

    #[test]
    fn starts_disconnected_and_not_submittable() {
        let session = controller(
            MockTransportPort::new(),
            MockSchedulerPort::new(),
            MockRendererPort::new(),
        );
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert!(!session.is_submittable());
    }

    #[test]
    fn creation_failure_schedules_fixed_delay_retry() {
        let mut transport = MockTransportPort::new();
        transport.expect_open().times(1).returning(|| {
            Err(TransportError::InvalidUrl {
                url: "nope".into(),
                reason: "relative URL without a base".into(),
            })
        });
        let mut scheduler = MockSchedulerPort::new();
        scheduler
            .expect_schedule()
            .with(eq(Duration::from_millis(1_000)), eq(Timer::Reconnect))
            .times(1)
            .return_const(());
        let mut renderer = MockRendererPort::new();
        renderer
            .expect_write_message()
            .with(eq("*** Retrying failed connection. ***"))
            .times(1)
            .return_const(());

        let mut session = controller(transport, scheduler, renderer);
        session.connect();

        assert_eq!(session.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn open_then_authenticated_walks_the_state_edges() {
        let mut transport = MockTransportPort::new();
        transport.expect_open().times(1).returning(|| Ok(()));
        let mut session = controller(transport, MockSchedulerPort::new(), quiet_renderer());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        session.on_state_change(move |state| sink.lock().expect("lock").push(state));

        session.connect();
        session.handle_open();
        session.mark_authenticated();

        assert_eq!(
            *seen.lock().expect("lock"),
            vec![
                ConnectionState::Connecting,
                ConnectionState::Connected,
                ConnectionState::Authenticated,
            ]
        );
        assert!(session.is_submittable());
    }

    #[test]
    fn authentication_is_ignored_when_not_connected() {
        let mut session = controller(
            MockTransportPort::new(),
            MockSchedulerPort::new(),
            MockRendererPort::new(),
        );
        session.mark_authenticated();
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert!(!session.has_authenticated());
    }

    #[test]
    fn unexpected_close_schedules_immediate_reconnect() {
        let mut transport = MockTransportPort::new();
        transport.expect_open().times(1).returning(|| Ok(()));
        let mut scheduler = MockSchedulerPort::new();
        scheduler
            .expect_schedule()
            .with(eq(Duration::ZERO), eq(Timer::Reconnect))
            .times(1)
            .return_const(());
        let mut renderer = MockRendererPort::new();
        renderer.expect_clear_messages().times(2).return_const(());
        renderer
            .expect_write_message()
            .with(eq("*** Connected ***"))
            .times(1)
            .return_const(());
        renderer
            .expect_write_message()
            .with(eq("*** Disconnected ***"))
            .times(1)
            .return_const(());

        let mut session = controller(transport, scheduler, renderer);
        session.connect();
        session.handle_open();

        assert!(session.handle_close());
        assert_eq!(session.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn close_after_disconnect_does_not_reconnect() {
        let mut transport = MockTransportPort::new();
        transport.expect_open().times(1).returning(|| Ok(()));
        transport.expect_close().times(1).return_const(());
        let mut scheduler = MockSchedulerPort::new();
        scheduler.expect_schedule().never();

        let mut session = controller(transport, scheduler, quiet_renderer());
        session.connect();
        session.handle_open();
        session.disconnect();
        session.handle_close();
        session.handle_close();

        assert_eq!(session.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn fired_timer_declines_after_disconnect() {
        let mut transport = MockTransportPort::new();
        transport.expect_open().times(1).returning(|| Ok(()));
        let mut scheduler = MockSchedulerPort::new();
        scheduler.expect_schedule().times(1).return_const(());

        let mut session = controller(transport, scheduler, quiet_renderer());
        session.connect();
        session.handle_close();
        session.disconnect();
        session.handle_timer(Timer::Reconnect);

        assert_eq!(session.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn only_one_channel_is_live_at_a_time() {
        let mut transport = MockTransportPort::new();
        transport.expect_open().times(1).returning(|| Ok(()));
        let mut session = controller(transport, MockSchedulerPort::new(), quiet_renderer());

        session.connect();
        session.connect();
        session.handle_timer(Timer::Reconnect);

        assert_eq!(session.state(), ConnectionState::Connecting);
    }

    #[test]
    fn error_notice_is_muted_while_reconnecting() {
        let mut transport = MockTransportPort::new();
        transport.expect_open().returning(|| Ok(()));
        let mut scheduler = MockSchedulerPort::new();
        scheduler.expect_schedule().return_const(());
        let mut renderer = MockRendererPort::new();
        renderer
            .expect_write_message()
            .with(eq("*** Connection failed. ***"))
            .times(1)
            .return_const(());

        let mut session = controller(transport, scheduler, renderer);
        session.connect();
        session.handle_error("connection refused");
        session.handle_close();
        session.handle_timer(Timer::Reconnect);
        session.handle_error("connection refused");

        assert_eq!(session.state(), ConnectionState::Connecting);
    }

    #[test]
    fn submit_while_disconnected_writes_notice_and_nothing_else() {
        let mut transport = MockTransportPort::new();
        transport.expect_send().never();
        let mut renderer = MockRendererPort::new();
        renderer
            .expect_write_message()
            .with(eq("You are not connected."))
            .times(1)
            .return_const(());

        let mut session = controller(transport, MockSchedulerPort::new(), renderer);
        let result = session.submit(&CommandEnvelope::new("foo", None));

        assert!(matches!(result, Err(SubmitError::NotConnected)));
    }

    #[test]
    fn reopen_replays_credentials_only_after_success() {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&frames);
        let mut transport = MockTransportPort::new();
        transport.expect_open().returning(|| Ok(()));
        transport.expect_send().returning(move |frame| {
            sink.lock().expect("lock").push(frame);
            Ok(())
        });
        let mut scheduler = MockSchedulerPort::new();
        scheduler.expect_schedule().return_const(());

        let mut session = controller(transport, scheduler, quiet_renderer());
        let credentials = CommandEnvelope::authenticate("alice", "secret");
        session.remember_credentials(credentials.clone());

        // Never authenticated: reopening sends nothing.
        session.connect();
        session.handle_open();
        session.handle_close();
        session.handle_timer(Timer::Reconnect);
        session.handle_open();
        assert!(frames.lock().expect("lock").is_empty());

        session.mark_authenticated();
        session.handle_close();
        session.handle_timer(Timer::Reconnect);
        session.handle_open();

        let expected = credentials.to_frame().expect("encodes");
        assert_eq!(*frames.lock().expect("lock"), vec![expected]);
        assert_eq!(session.state(), ConnectionState::Connected);
    }
}
