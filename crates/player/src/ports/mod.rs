//! Player port definitions.
//!
//! The application core never touches a socket, a timer, a speaker or a
//! screen directly; everything leaves through these traits.

pub mod outbound;
