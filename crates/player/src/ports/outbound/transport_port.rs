//! Transport Port - the single socket-like channel to the game server
//!
//! Opening is split in two: `open()` either fails synchronously (bad address,
//! nothing to retry against yet) or starts an attempt whose outcome arrives
//! later as `ClientEvent::Opened` / `Errored` / `Closed`. Inbound frames arrive
//! as `ClientEvent::Frame`.

/// Errors surfaced by a transport implementation.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid server address {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("No channel is open")]
    NotOpen,
    #[error("Channel closed while sending")]
    ChannelClosed,
    #[error("Transport state lock poisoned")]
    Poisoned,
}

/// Port for the message-oriented duplex connection.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TransportPort: Send + Sync {
    /// Begin opening a new channel.
    fn open(&self) -> Result<(), TransportError>;

    /// Write one frame on the open channel.
    fn send(&self, frame: String) -> Result<(), TransportError>;

    /// Close the open channel, if any. The close event still arrives later.
    fn close(&self);
}
