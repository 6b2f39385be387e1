//! Time-driven animators.
//!
//! Animators here carry no duration curves or value interpolation; they
//! deliver raw frame timing to application code, synchronized with every
//! other animation on the same [`FrameScheduler`](crate::sched::FrameScheduler).

mod ticker;

pub use ticker::{TickAnimator, TickUpdate};
