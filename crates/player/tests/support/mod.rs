//! Recording fakes for driving a `GameClient` through whole scenarios.
//!
//! Every adapter appends to one shared journal so tests can assert the
//! relative order of effects across ports.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use skirmish_player::application::{ClientPorts, GameClient};
use skirmish_player::config::ClientConfig;
use skirmish_player::ports::outbound::{
    ClockPort, PlaybackHandle, RendererPort, SchedulerPort, SoundId, SoundPort, Timer,
    TransportError, TransportPort,
};
use skirmish_protocol::ServerCommand;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Open,
    Send(String),
    Close,
    Schedule(Duration, Timer),
    Title(String),
    Message(String),
    ClearMessages,
    ShowMenu(String, Vec<String>),
    FocusMenu(usize),
    HideMenu,
    ShowTextPrompt(String, String),
    HideTextPrompt,
    ShowMainInput,
    Load(String, bool),
    Start(PlaybackHandle),
    Stop(PlaybackHandle),
    Gain(f32),
}

#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Effect>>>);

impl Journal {
    fn push(&self, effect: Effect) {
        self.0.lock().expect("journal lock").push(effect);
    }

    pub fn effects(&self) -> Vec<Effect> {
        self.0.lock().expect("journal lock").clone()
    }

    pub fn clear(&self) {
        self.0.lock().expect("journal lock").clear();
    }

    pub fn sent(&self) -> Vec<String> {
        self.effects()
            .into_iter()
            .filter_map(|effect| match effect {
                Effect::Send(frame) => Some(frame),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.effects()
            .into_iter()
            .filter_map(|effect| match effect {
                Effect::Message(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn scheduled(&self) -> Vec<Duration> {
        self.effects()
            .into_iter()
            .filter_map(|effect| match effect {
                Effect::Schedule(delay, _) => Some(delay),
                _ => None,
            })
            .collect()
    }
}

pub struct FakeTransport {
    journal: Journal,
    fail_open: Mutex<bool>,
}

impl FakeTransport {
    pub fn fail_next_open(&self) {
        *self.fail_open.lock().expect("lock") = true;
    }
}

impl TransportPort for FakeTransport {
    fn open(&self) -> Result<(), TransportError> {
        let mut fail = self.fail_open.lock().expect("lock");
        if std::mem::take(&mut *fail) {
            return Err(TransportError::InvalidUrl {
                url: "ws://".into(),
                reason: "empty host".into(),
            });
        }
        self.journal.push(Effect::Open);
        Ok(())
    }

    fn send(&self, frame: String) -> Result<(), TransportError> {
        self.journal.push(Effect::Send(frame));
        Ok(())
    }

    fn close(&self) {
        self.journal.push(Effect::Close);
    }
}

pub struct FakeScheduler(Journal);

impl SchedulerPort for FakeScheduler {
    fn schedule(&self, delay: Duration, timer: Timer) {
        self.0.push(Effect::Schedule(delay, timer));
    }
}

pub struct FakeRenderer(Journal);

impl RendererPort for FakeRenderer {
    fn set_title(&self, title: &str) {
        self.0.push(Effect::Title(title.into()));
    }
    fn write_message(&self, text: &str) {
        self.0.push(Effect::Message(text.into()));
    }
    fn clear_messages(&self) {
        self.0.push(Effect::ClearMessages);
    }
    fn show_menu(&self, title: &str, _dismissable: bool, entries: &[String]) {
        self.0.push(Effect::ShowMenu(title.into(), entries.to_vec()));
    }
    fn focus_menu_entry(&self, index: usize) {
        self.0.push(Effect::FocusMenu(index));
    }
    fn hide_menu(&self) {
        self.0.push(Effect::HideMenu);
    }
    fn show_text_prompt(&self, label: &str, value: &str) {
        self.0.push(Effect::ShowTextPrompt(label.into(), value.into()));
    }
    fn hide_text_prompt(&self) {
        self.0.push(Effect::HideTextPrompt);
    }
    fn show_main_input(&self) {
        self.0.push(Effect::ShowMainInput);
    }
}

pub struct FakeSound {
    journal: Journal,
    next: Mutex<u64>,
}

impl SoundPort for FakeSound {
    fn load(&self, url: &str, looping: bool) -> SoundId {
        self.journal.push(Effect::Load(url.into(), looping));
        let mut next = self.next.lock().expect("lock");
        *next += 1;
        SoundId(*next)
    }
    fn start(&self, handle: PlaybackHandle) {
        self.journal.push(Effect::Start(handle));
    }
    fn stop(&self, handle: PlaybackHandle) {
        self.journal.push(Effect::Stop(handle));
    }
    fn set_gain(&self, gain: f32) {
        self.journal.push(Effect::Gain(gain));
    }
}

/// A clock the test moves by hand.
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock().expect("lock");
        *now += chrono::Duration::from_std(by).expect("in range");
    }
}

impl ClockPort for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().expect("lock")
    }
}

pub struct Harness {
    pub client: GameClient,
    pub journal: Journal,
    pub transport: Arc<FakeTransport>,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(config: &ClientConfig) -> Self {
        let journal = Journal::default();
        let transport = Arc::new(FakeTransport {
            journal: journal.clone(),
            fail_open: Mutex::new(false),
        });
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
            .single()
            .expect("valid date");
        let clock = Arc::new(ManualClock(Mutex::new(start)));

        let ports = ClientPorts {
            transport: transport.clone(),
            scheduler: Arc::new(FakeScheduler(journal.clone())),
            renderer: Arc::new(FakeRenderer(journal.clone())),
            sound: Arc::new(FakeSound {
                journal: journal.clone(),
                next: Mutex::new(0),
            }),
            clock: clock.clone(),
        };

        Self {
            client: GameClient::new(ports, config),
            journal,
            transport,
            clock,
        }
    }

    /// Connect and deliver the open event.
    pub fn connected() -> Self {
        let mut harness = Self::new();
        harness.client.connect();
        harness.client.handle_open();
        harness
    }

    /// Deliver a server frame built from a JSON value.
    pub fn server(&mut self, frame: serde_json::Value) {
        self.client.handle_frame(&frame.to_string());
    }

    /// Deliver a typed server command.
    pub fn push(&mut self, command: ServerCommand) {
        let frame = command.to_envelope().to_frame().expect("encodes");
        self.client.handle_frame(&frame);
    }
}
