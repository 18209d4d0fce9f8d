//! WebSocket transport
//!
//! `desktop` holds the tokio-tungstenite channel. Address validation lives
//! here because it is the synchronous half of `TransportPort::open`.

mod desktop;

pub use desktop::WsTransport;

use url::Url;

use crate::ports::outbound::TransportError;

/// Parse and check a server address. Only `ws` and `wss` are accepted.
pub fn validate_url(raw: &str) -> Result<Url, TransportError> {
    let url = Url::parse(raw).map_err(|e| TransportError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "ws" | "wss" => Ok(url),
        other => Err(TransportError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}
