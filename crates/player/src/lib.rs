//! Skirmish Player - client runtime for the Skirmish game server.
//!
//! - `ports`: traits for everything outside the process (socket, screen,
//!   audio, timers, clock)
//! - `application`: the sans-IO client core (session, dispatch, menus,
//!   hotkeys, sounds, text prompts) driven by [`application::ClientEvent`]s
//! - `infrastructure`: tokio/crossterm adapters for the desktop terminal
//! - `runner`: the event loop wiring them together

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod runner;
