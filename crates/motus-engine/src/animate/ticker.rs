use crate::sched::{FrameAction, FrameCallback};

/// Timing snapshot delivered once per frame by a [`TickAnimator`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TickUpdate {
    /// Time elapsed since the animator's first frame, in milliseconds.
    pub total_ms: u64,
    /// Time elapsed since the previous frame, in milliseconds.
    /// Zero on the first frame.
    pub delta_ms: u64,
}

/// Frame callback that reports elapsed and delta time to a closure.
///
/// There is no duration curve or value interpolation; the animator simply
/// forwards the shared frame timing. The first delivered update has
/// `total_ms == 0` and `delta_ms == 0`.
///
/// An optional run length turns the animator into a finite one: once
/// `total_ms` reaches it, `on_frame` returns [`FrameAction::Finished`] and
/// the scheduler drops the registration.
pub struct TickAnimator<F: FnMut(TickUpdate)> {
    on_tick: F,
    started_at_ms: Option<u64>,
    previous_ms: Option<u64>,
    run_for_ms: Option<u64>,
    conflict_token: Option<u64>,
}

impl<F: FnMut(TickUpdate)> TickAnimator<F> {
    pub fn new(on_tick: F) -> Self {
        Self {
            on_tick,
            started_at_ms: None,
            previous_ms: None,
            run_for_ms: None,
            conflict_token: None,
        }
    }

    /// Finishes once the animator has run for `duration_ms`.
    pub fn run_for(mut self, duration_ms: u64) -> Self {
        self.run_for_ms = Some(duration_ms);
        self
    }

    /// Token compared by [`cancel_conflicting`](crate::sched::FrameScheduler::cancel_conflicting)
    /// sweeps; animators driving the same target should share one.
    pub fn with_conflict_token(mut self, token: u64) -> Self {
        self.conflict_token = Some(token);
        self
    }

    /// Re-arms the start time so the animator can be registered again.
    pub fn reset(&mut self) {
        self.started_at_ms = None;
        self.previous_ms = None;
    }
}

impl<F: FnMut(TickUpdate)> FrameCallback for TickAnimator<F> {
    fn on_frame(&mut self, frame_time_ms: u64) -> FrameAction {
        let started_at = *self.started_at_ms.get_or_insert(frame_time_ms);
        let total_ms = frame_time_ms - started_at;
        let delta_ms = self
            .previous_ms
            .map_or(0, |previous| frame_time_ms - previous);
        self.previous_ms = Some(frame_time_ms);

        (self.on_tick)(TickUpdate { total_ms, delta_ms });

        match self.run_for_ms {
            Some(duration) if total_ms >= duration => FrameAction::Finished,
            _ => FrameAction::Continue,
        }
    }

    fn conflict_token(&self) -> Option<u64> {
        self.conflict_token
    }
}
