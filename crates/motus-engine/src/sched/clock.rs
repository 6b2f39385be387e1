use std::time::Instant;

use super::pulse::PulseSource;

/// Monotonic real-time pulse source.
///
/// Frame times are milliseconds since construction (or the last
/// [`reset`](ClockPulse::reset)). A host loop typically sleeps for
/// `pulse_interval()` between iterations, then polls
/// [`take_pulse_request`](ClockPulse::take_pulse_request) and calls
/// `FrameScheduler::on_pulse`, followed by `run_commits` when a commit pass
/// was requested.
#[derive(Debug)]
pub struct ClockPulse {
    epoch: Instant,
    interval_ms: u64,
    pulse_requested: bool,
    commit_requested: bool,
}

impl ClockPulse {
    /// 60 Hz nominal interval.
    pub fn new() -> Self {
        Self::with_interval(16)
    }

    pub fn with_interval(interval_ms: u64) -> Self {
        Self {
            epoch: Instant::now(),
            interval_ms,
            pulse_requested: false,
            commit_requested: false,
        }
    }

    /// Resets the timebase origin.
    ///
    /// Useful when resuming after a suspension, so frame times do not jump.
    pub fn reset(&mut self) {
        self.epoch = Instant::now();
    }

    pub fn take_pulse_request(&mut self) -> bool {
        std::mem::take(&mut self.pulse_requested)
    }

    pub fn take_commit_request(&mut self) -> bool {
        std::mem::take(&mut self.commit_requested)
    }
}

impl Default for ClockPulse {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseSource for ClockPulse {
    fn request_pulse(&mut self) {
        self.pulse_requested = true;
    }

    fn request_commit_pass(&mut self) {
        self.commit_requested = true;
    }

    fn frame_time(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
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
    fn frame_time_is_monotonic() {
        let clock = ClockPulse::new();
        let a = clock.frame_time();
        let b = clock.frame_time();
        assert!(b >= a);
    }

    #[test]
    fn reset_rebases_near_zero() {
        let mut clock = ClockPulse::new();
        clock.reset();
        // Immediately after reset, elapsed time is tiny.
        assert!(clock.frame_time() < 100);
    }

    #[test]
    fn requests_latch_until_taken() {
        let mut clock = ClockPulse::new();
        clock.request_commit_pass();
        assert!(clock.take_commit_request());
        assert!(!clock.take_commit_request());
    }
}
