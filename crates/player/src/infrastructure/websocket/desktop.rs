//! Desktop WebSocket channel using tokio-tungstenite

use std::sync::Mutex;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::validate_url;
use crate::application::ClientEvent;
use crate::ports::outbound::{TransportError, TransportPort};

enum Outbound {
    Frame(String),
    Close,
}

/// One WebSocket channel at a time, reporting through the event queue.
pub struct WsTransport {
    url: String,
    events: mpsc::UnboundedSender<ClientEvent>,
    outbound: Mutex<Option<mpsc::UnboundedSender<Outbound>>>,
}

impl WsTransport {
    pub fn new(url: impl Into<String>, events: mpsc::UnboundedSender<ClientEvent>) -> Self {
        Self {
            url: url.into(),
            events,
            outbound: Mutex::new(None),
        }
    }
}

impl TransportPort for WsTransport {
    fn open(&self) -> Result<(), TransportError> {
        let url = validate_url(&self.url)?;
        let (tx, rx) = mpsc::unbounded_channel();
        {
            let mut slot = self.outbound.lock().map_err(|_| TransportError::Poisoned)?;
            *slot = Some(tx);
        }

        tracing::info!("Connecting to {}", url);
        tokio::spawn(run_channel(url.to_string(), rx, self.events.clone()));
        Ok(())
    }

    fn send(&self, frame: String) -> Result<(), TransportError> {
        // Clone the sender so the lock is not held while sending
        let tx = {
            let slot = self.outbound.lock().map_err(|_| TransportError::Poisoned)?;
            slot.clone()
        };
        match tx {
            Some(tx) => tx
                .send(Outbound::Frame(frame))
                .map_err(|_| TransportError::ChannelClosed),
            None => Err(TransportError::NotOpen),
        }
    }

    fn close(&self) {
        let tx = match self.outbound.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => {
                tracing::error!("Transport state lock poisoned; cannot close");
                return;
            }
        };
        if let Some(tx) = tx {
            if tx.send(Outbound::Close).is_err() {
                tracing::debug!("Channel already finished");
            }
        }
    }
}

fn post(events: &mpsc::UnboundedSender<ClientEvent>, event: ClientEvent) {
    if events.send(event).is_err() {
        tracing::debug!("Event loop has stopped; dropping transport event");
    }
}

/// Waits until the channel is asked to close. Frames queued before the
/// socket opens are dropped; nothing is submittable until then.
async fn close_requested(outbound: &mut mpsc::UnboundedReceiver<Outbound>) {
    while let Some(command) = outbound.recv().await {
        match command {
            Outbound::Close => return,
            Outbound::Frame(_) => tracing::warn!("Dropping frame queued before open"),
        }
    }
}

async fn run_channel(
    url: String,
    mut outbound: mpsc::UnboundedReceiver<Outbound>,
    events: mpsc::UnboundedSender<ClientEvent>,
) {
    let stream = tokio::select! {
        result = connect_async(url.as_str()) => match result {
            Ok((stream, _)) => stream,
            Err(e) => {
                tracing::error!("Failed to connect to {}: {}", url, e);
                post(&events, ClientEvent::Errored(e.to_string()));
                post(&events, ClientEvent::Closed);
                return;
            }
        },
        _ = close_requested(&mut outbound) => {
            tracing::info!("Connection attempt abandoned");
            post(&events, ClientEvent::Closed);
            return;
        }
    };

    tracing::info!("Connected to {}", url);
    post(&events, ClientEvent::Opened);

    let (mut write, mut read) = stream.split();
    loop {
        tokio::select! {
            command = outbound.recv() => match command {
                Some(Outbound::Frame(frame)) => {
                    if let Err(e) = write.send(Message::Text(frame)).await {
                        tracing::error!("Failed to send message: {}", e);
                        post(&events, ClientEvent::Errored(e.to_string()));
                        break;
                    }
                }
                Some(Outbound::Close) | None => {
                    tracing::info!("Closing connection");
                    if let Err(e) = write.send(Message::Close(None)).await {
                        tracing::debug!("Close frame not sent: {}", e);
                    }
                    break;
                }
            },
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => post(&events, ClientEvent::Frame(text)),
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed connection");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::error!("WebSocket error: {}", e);
                    post(&events, ClientEvent::Errored(e.to_string()));
                    break;
                }
            },
        }
    }

    post(&events, ClientEvent::Closed);
}
