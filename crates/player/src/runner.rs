//! Desktop runtime: wires the adapters to a [`GameClient`] and runs the
//! event loop.
//!
//! One task owns the client. Transport, timers, sounds and the keyboard all
//! post [`ClientEvent`]s into a single queue, applied in arrival order.

use std::sync::Arc;

use anyhow::Context;
use crossterm::event::EventStream;
use futures_util::StreamExt;
use tokio::sync::mpsc;

use crate::application::{ClientEvent, ClientPorts, GameClient};
use crate::config::ClientConfig;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::scheduler::TokioScheduler;
use crate::infrastructure::sound::SilentSoundPort;
use crate::infrastructure::terminal::{event_to_client_event, RawModeGuard, Shell, TerminalRenderer};
use crate::infrastructure::websocket::WsTransport;

/// Run the client until the player quits or the terminal input ends.
pub async fn run(config: ClientConfig) -> anyhow::Result<()> {
    let (events_tx, mut events) = mpsc::unbounded_channel();

    let renderer = Arc::new(TerminalRenderer::stdout());
    let ports = ClientPorts {
        transport: Arc::new(WsTransport::new(config.ws_url.clone(), events_tx.clone())),
        scheduler: Arc::new(TokioScheduler::new(events_tx.clone())),
        renderer: renderer.clone(),
        sound: Arc::new(SilentSoundPort::new(events_tx.clone())),
        clock: Arc::new(SystemClock::new()),
    };

    let mut client = GameClient::new(ports, &config);
    client.on_state_change(|state| tracing::info!(%state, "Connection state"));

    let _raw_mode = RawModeGuard::enable().context("Failed to enable raw terminal mode")?;
    tokio::spawn(forward_terminal_input(events_tx));

    let mut shell = Shell::new(renderer);
    tracing::info!("Starting Skirmish client for {}", config.ws_url);
    client.connect();
    shell.refresh(&client);

    while let Some(event) = events.recv().await {
        let keep_running = match event {
            ClientEvent::Key(key) => {
                shell.handle_key(&mut client, &key);
                true
            }
            other => client.handle_event(other),
        };
        if !keep_running {
            break;
        }
        shell.refresh(&client);
    }

    tracing::info!("Client stopped");
    Ok(())
}

async fn forward_terminal_input(events: mpsc::UnboundedSender<ClientEvent>) {
    let mut input = EventStream::new();
    while let Some(event) = input.next().await {
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                tracing::error!("Terminal input failed: {}", e);
                break;
            }
        };
        if let Some(client_event) = event_to_client_event(&event) {
            if events.send(client_event).is_err() {
                return;
            }
        }
    }
    // Input is gone; nothing more can be typed.
    let _ = events.send(ClientEvent::Quit);
}
