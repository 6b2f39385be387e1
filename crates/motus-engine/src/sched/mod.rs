//! Frame scheduling subsystem.
//!
//! A [`FrameScheduler`] drives every active animation callback from one
//! timing pulse so concurrently running animations observe the same frame
//! times. The pulse itself comes from a pluggable [`PulseSource`]:
//! a real-time clock ([`ClockPulse`]), a virtual clock for tests
//! ([`ManualPulse`]), or whatever frame signal the host platform exposes.
//!
//! The scheduler is single-threaded by construction: it is owned by the
//! host event loop, and its shared callback handles are `Rc`-based, so the
//! compiler rejects cross-thread use. Callers on other threads must hand
//! work off to the owning loop.

mod clock;
mod pulse;
mod scheduler;

pub use clock::ClockPulse;
pub use pulse::{ManualPulse, PulseSource};
pub use scheduler::{FrameAction, FrameCallback, FrameScheduler, SharedCallback};
