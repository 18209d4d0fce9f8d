//! Sound facility for the terminal build.
//!
//! Audio output is not wired up on the desktop shell. This adapter keeps the
//! load/ready/start contract so the sound board behaves exactly as it would
//! with real playback: every load resolves to a handle on a later turn of the
//! event loop.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;

use crate::application::ClientEvent;
use crate::ports::outbound::{PlaybackHandle, SoundId, SoundPort};

pub struct SilentSoundPort {
    next_id: AtomicU64,
    events: mpsc::UnboundedSender<ClientEvent>,
}

impl SilentSoundPort {
    pub fn new(events: mpsc::UnboundedSender<ClientEvent>) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            events,
        }
    }
}

impl SoundPort for SilentSoundPort {
    fn load(&self, url: &str, looping: bool) -> SoundId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let sound = SoundId(id);
        tracing::debug!(%sound, url, looping, "Loading sound");

        let events = self.events.clone();
        tokio::spawn(async move {
            let ready = ClientEvent::SoundReady {
                sound,
                playback: PlaybackHandle(id),
            };
            if events.send(ready).is_err() {
                tracing::debug!(%sound, "Event loop has stopped; sound dropped");
            }
        });
        sound
    }

    fn start(&self, handle: PlaybackHandle) {
        tracing::debug!(handle = handle.0, "Start playback");
    }

    fn stop(&self, handle: PlaybackHandle) {
        tracing::debug!(handle = handle.0, "Stop playback");
    }

    fn set_gain(&self, gain: f32) {
        tracing::debug!(gain, "Set output gain");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_load_is_reported_ready() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let port = SilentSoundPort::new(tx);

        let first = port.load("a.ogg", true);
        let second = port.load("b.ogg", false);
        assert_ne!(first, second);

        let mut ready = vec![rx.recv().await, rx.recv().await];
        ready.sort_by_key(|event| match event {
            Some(ClientEvent::SoundReady { sound, .. }) => sound.0,
            _ => u64::MAX,
        });
        assert_eq!(
            ready,
            vec![
                Some(ClientEvent::SoundReady {
                    sound: first,
                    playback: PlaybackHandle(first.0),
                }),
                Some(ClientEvent::SoundReady {
                    sound: second,
                    playback: PlaybackHandle(second.0),
                }),
            ]
        );
    }
}
