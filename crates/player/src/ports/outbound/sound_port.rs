//! Sound Port - playback facility
//!
//! Loading is asynchronous: `load` hands back an id at once, and the playback
//! handle for that id is reported later through `ClientEvent::SoundReady`.
//! Nothing plays until `start` is called with that handle.

use std::fmt;

/// Identifies a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(pub u64);

/// A loaded, startable sound source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackHandle(pub u64);

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sound#{}", self.0)
    }
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait SoundPort: Send + Sync {
    /// Start loading `url`; `looping` sources repeat until stopped.
    fn load(&self, url: &str, looping: bool) -> SoundId;

    fn start(&self, handle: PlaybackHandle);

    /// Stop (or release, if never started) a source.
    fn stop(&self, handle: PlaybackHandle);

    /// Set the output gain immediately.
    fn set_gain(&self, gain: f32);
}
