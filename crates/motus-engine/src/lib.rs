//! Motus engine crate.
//!
//! This crate owns the timing and synthetic-input pieces used by host
//! event loops: a shared frame scheduler, time-driven animators, and a
//! gesture-to-touch-sample converter.

pub mod animate;
pub mod gesture;
pub mod logging;
pub mod sched;
