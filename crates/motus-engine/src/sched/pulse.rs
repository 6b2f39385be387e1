/// Pluggable timing-pulse source for a [`FrameScheduler`](super::FrameScheduler).
///
/// The source never calls back into the scheduler; it only records what the
/// scheduler asked for, and the host that owns both decides when to deliver:
///
/// - a requested pulse becomes one call to `FrameScheduler::on_pulse` at the
///   next frame boundary
/// - a requested commit pass becomes one call to `FrameScheduler::run_commits`
///   strictly after the frame's traversal work has finished
///
/// All timestamps are milliseconds on a single monotonic timebase chosen by
/// the source. Delay eligibility and frame times both read from it, so a
/// virtual-time source makes the whole scheduler deterministic under test.
pub trait PulseSource {
    /// Ask the host to deliver one `on_pulse` at the next frame boundary.
    ///
    /// Must be idempotent: requesting an already-pending pulse is a no-op.
    fn request_pulse(&mut self);

    /// Ask the host to call `run_commits` after the current traversal.
    fn request_commit_pass(&mut self);

    /// Timestamp of the current frame, in milliseconds.
    fn frame_time(&self) -> u64;

    /// Nominal interval between pulses, in milliseconds.
    fn pulse_interval(&self) -> u64;

    fn set_pulse_interval(&mut self, interval_ms: u64);
}

/// Virtual-clock pulse source for tests and offline drivers.
///
/// Time only moves when [`advance`](ManualPulse::advance) is called. Drivers
/// poll `take_pulse_request` / `take_commit_request` and call back into the
/// scheduler themselves.
#[derive(Debug)]
pub struct ManualPulse {
    now_ms: u64,
    interval_ms: u64,
    pulse_requested: bool,
    commit_requested: bool,
}

impl ManualPulse {
    pub fn new() -> Self {
        Self::with_interval(16)
    }

    pub fn with_interval(interval_ms: u64) -> Self {
        Self {
            now_ms: 0,
            interval_ms,
            pulse_requested: false,
            commit_requested: false,
        }
    }

    /// Moves the virtual clock forward.
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    pub fn pulse_requested(&self) -> bool {
        self.pulse_requested
    }

    pub fn commit_requested(&self) -> bool {
        self.commit_requested
    }

    /// Consumes a pending pulse request, returning whether one was pending.
    pub fn take_pulse_request(&mut self) -> bool {
        std::mem::take(&mut self.pulse_requested)
    }

    /// Consumes a pending commit-pass request, returning whether one was pending.
    pub fn take_commit_request(&mut self) -> bool {
        std::mem::take(&mut self.commit_requested)
    }
}

impl Default for ManualPulse {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseSource for ManualPulse {
    fn request_pulse(&mut self) {
        self.pulse_requested = true;
    }

    fn request_commit_pass(&mut self) {
        self.commit_requested = true;
    }

    fn frame_time(&self) -> u64 {
        self.now_ms
    }

    fn pulse_interval(&self) -> u64 {
        self.interval_ms
    }

    fn set_pulse_interval(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_consumed_once() {
        let mut pulse = ManualPulse::new();
        assert!(!pulse.take_pulse_request());

        pulse.request_pulse();
        pulse.request_pulse();
        assert!(pulse.take_pulse_request());
        assert!(!pulse.take_pulse_request());
    }

    #[test]
    fn time_moves_only_on_advance() {
        let mut pulse = ManualPulse::new();
        assert_eq!(pulse.frame_time(), 0);
        pulse.advance(16);
        pulse.advance(16);
        assert_eq!(pulse.frame_time(), 32);
    }

    #[test]
    fn interval_is_settable() {
        let mut pulse = ManualPulse::with_interval(16);
        pulse.set_pulse_interval(8);
        assert_eq!(pulse.pulse_interval(), 8);
    }
}
