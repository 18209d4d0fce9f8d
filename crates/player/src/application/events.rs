//! Events fed into the client by runtime adapters.
//!
//! Every piece of core work starts from one of these. Adapters post them in
//! delivery order and the runtime applies them one at a time.

use crate::application::keys::KeyEvent;
use crate::ports::outbound::{PlaybackHandle, SoundId, Timer};

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// The pending transport channel opened.
    Opened,
    /// One inbound frame on the open channel.
    Frame(String),
    /// The channel closed (or failed to open).
    Closed,
    /// The transport reported an error. A `Closed` usually follows.
    Errored(String),
    /// A scheduled timer fired.
    Timer(Timer),
    /// A sound finished loading.
    SoundReady {
        sound: SoundId,
        playback: PlaybackHandle,
    },
    /// A keydown from the player.
    Key(KeyEvent),
    /// The player asked to leave.
    Quit,
}
