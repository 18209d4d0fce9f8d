//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing the session, dispatch and menu logic to run without depending on
//! concrete implementations.

pub mod clock_port;
pub mod renderer_port;
pub mod scheduler_port;
pub mod sound_port;
pub mod transport_port;

pub use clock_port::ClockPort;
pub use renderer_port::RendererPort;
pub use scheduler_port::{SchedulerPort, Timer};
pub use sound_port::{PlaybackHandle, SoundId, SoundPort};
pub use transport_port::{TransportError, TransportPort};

#[cfg(any(test, feature = "testing"))]
pub use clock_port::MockClockPort;
#[cfg(any(test, feature = "testing"))]
pub use renderer_port::MockRendererPort;
#[cfg(any(test, feature = "testing"))]
pub use scheduler_port::MockSchedulerPort;
#[cfg(any(test, feature = "testing"))]
pub use sound_port::MockSoundPort;
#[cfg(any(test, feature = "testing"))]
pub use transport_port::MockTransportPort;
