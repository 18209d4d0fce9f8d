//! Tracks sounds between load and playback.
//!
//! A loop can be told to stop before its playback handle exists. It is then
//! parked as pending-stop and released, without ever starting, the moment the
//! handle arrives.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::ports::outbound::{PlaybackHandle, SoundId, SoundPort};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Loading,
    Playing(PlaybackHandle),
    PendingStop,
}

pub struct SoundBoard {
    port: Arc<dyn SoundPort>,
    loops: HashMap<SoundId, LoopState>,
    one_shots: HashSet<SoundId>,
}

impl SoundBoard {
    pub fn new(port: Arc<dyn SoundPort>) -> Self {
        Self {
            port,
            loops: HashMap::new(),
            one_shots: HashSet::new(),
        }
    }

    pub fn start_loop(&mut self, url: &str) -> SoundId {
        let id = self.port.load(url, true);
        tracing::debug!(sound = %id, url, "Loading loop");
        self.loops.insert(id, LoopState::Loading);
        id
    }

    pub fn play_once(&mut self, url: &str) -> SoundId {
        let id = self.port.load(url, false);
        tracing::debug!(sound = %id, url, "Loading sound");
        self.one_shots.insert(id);
        id
    }

    /// Stop every loop. Loops still loading stop once their handle arrives.
    pub fn stop_loops(&mut self) {
        let port = Arc::clone(&self.port);
        self.loops.retain(|_, state| match *state {
            LoopState::Playing(handle) => {
                port.stop(handle);
                false
            }
            LoopState::Loading => {
                *state = LoopState::PendingStop;
                true
            }
            LoopState::PendingStop => true,
        });
    }

    /// The playback handle for `id` became available.
    pub fn handle_ready(&mut self, id: SoundId, handle: PlaybackHandle) {
        if self.one_shots.remove(&id) {
            self.port.start(handle);
            return;
        }

        match self.loops.get(&id).copied() {
            Some(LoopState::Loading) => {
                self.port.start(handle);
                self.loops.insert(id, LoopState::Playing(handle));
            }
            Some(LoopState::PendingStop) => {
                tracing::debug!(sound = %id, "Loop stopped before it was ready");
                self.loops.remove(&id);
                self.port.stop(handle);
            }
            Some(LoopState::Playing(_)) => {
                tracing::warn!(sound = %id, "Duplicate ready notification for a playing loop");
            }
            None => {
                tracing::debug!(sound = %id, "Ready notification for an untracked sound");
            }
        }
    }

    pub fn set_volume(&self, gain: f32) {
        self.port.set_gain(gain);
    }

    /// Loops not yet stopped (loading or playing).
    pub fn active_loops(&self) -> usize {
        self.loops
            .values()
            .filter(|state| !matches!(state, LoopState::PendingStop))
            .count()
    }

    pub fn pending_stops(&self) -> usize {
        self.loops
            .values()
            .filter(|state| matches!(state, LoopState::PendingStop))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::MockSoundPort;
    use mockall::predicate::eq;
    use mockall::Sequence;

    #[test]
    fn loop_starts_when_ready_and_stops_on_request() {
        let mut port = MockSoundPort::new();
        let mut seq = Sequence::new();
        port.expect_load()
            .with(eq("wind.wav"), eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(SoundId(1));
        port.expect_start()
            .with(eq(PlaybackHandle(10)))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        port.expect_stop()
            .with(eq(PlaybackHandle(10)))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut board = SoundBoard::new(Arc::new(port));
        let id = board.start_loop("wind.wav");
        board.handle_ready(id, PlaybackHandle(10));
        assert_eq!(board.active_loops(), 1);

        board.stop_loops();
        assert_eq!(board.active_loops(), 0);
    }

    #[test]
    fn stop_before_ready_never_starts() {
        let mut port = MockSoundPort::new();
        port.expect_load().return_const(SoundId(2));
        port.expect_start().never();
        port.expect_stop()
            .with(eq(PlaybackHandle(20)))
            .times(1)
            .return_const(());

        let mut board = SoundBoard::new(Arc::new(port));
        let id = board.start_loop("rain.wav");
        board.stop_loops();
        assert_eq!(board.pending_stops(), 1);

        board.handle_ready(id, PlaybackHandle(20));
        assert_eq!(board.pending_stops(), 0);

        // A repeated notification is not a second transition.
        board.handle_ready(id, PlaybackHandle(20));
    }

    #[test]
    fn one_shot_plays_once_ready_and_is_not_a_loop() {
        let mut port = MockSoundPort::new();
        port.expect_load()
            .with(eq("click.wav"), eq(false))
            .return_const(SoundId(3));
        port.expect_start()
            .with(eq(PlaybackHandle(30)))
            .times(1)
            .return_const(());
        port.expect_stop().never();

        let mut board = SoundBoard::new(Arc::new(port));
        let id = board.play_once("click.wav");
        board.stop_loops();
        board.handle_ready(id, PlaybackHandle(30));
        assert_eq!(board.active_loops(), 0);
    }

    #[test]
    fn volume_goes_straight_to_the_gain() {
        let mut port = MockSoundPort::new();
        port.expect_set_gain().with(eq(0.5)).times(1).return_const(());
        SoundBoard::new(Arc::new(port)).set_volume(0.5);
    }
}
