use std::cell::RefCell;
use std::rc::Rc;

use super::pulse::PulseSource;

/// Control directive returned from [`FrameCallback::on_frame`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameAction {
    /// Keep receiving frame callbacks.
    Continue,
    /// Done; the scheduler removes this callback after the current frame.
    Finished,
}

/// Receiver of animation frame timing and frame commit timing.
///
/// All timestamps are milliseconds on the owning scheduler's pulse-source
/// timebase.
pub trait FrameCallback {
    /// Advance the animation to `frame_time_ms`.
    fn on_frame(&mut self, frame_time_ms: u64) -> FrameAction;

    /// One-shot notification delivered after the frame's traversal work,
    /// requested via [`FrameScheduler::request_commit_once`]. Commit time
    /// can differ from the frame time when traversals are expensive;
    /// animations use it to re-anchor their start time so no frames are
    /// skipped.
    fn on_commit(&mut self, frame_time_ms: u64) {
        let _ = frame_time_ms;
    }

    /// Invoked when a [`FrameScheduler::cancel_conflicting`] sweep removes
    /// this callback.
    fn on_cancel(&mut self) {}

    /// Token identifying the target this animation drives. Sweeps compare
    /// tokens to find conflicting animations; `None` opts out.
    fn conflict_token(&self) -> Option<u64> {
        None
    }
}

/// Shared handle to a registered callback.
///
/// `Rc` allocation identity is the registration identity: registering two
/// clones of one handle registers one callback.
pub type SharedCallback = Rc<RefCell<dyn FrameCallback>>;

struct Entry {
    callback: SharedCallback,
    /// Earliest frame time at which the callback becomes eligible.
    /// Cleared the first time it is met.
    eligible_at_ms: Option<u64>,
    commit_pending: bool,
}

/// Shared timing pulse for all active animations on one event loop.
///
/// Every registered callback is driven from the same pulse, so concurrently
/// running animations compute their values from identical frame times. The
/// scheduler is constructed and owned by the host loop; the pulse source `P`
/// supplies the timebase and carries the scheduler's scheduling requests
/// back to the host (see [`PulseSource`]).
///
/// Registration order is preserved: callbacks fire in the order they were
/// added, and delayed callbacks keep their original slot once eligible.
/// Removal mid-frame tombstones the slot so iteration over the remaining
/// callbacks is unaffected; tombstones are compacted after the pass.
pub struct FrameScheduler<P: PulseSource> {
    source: P,
    slots: Vec<Option<Entry>>,
    commit_queue: Vec<SharedCallback>,
    dirty: bool,
}

impl<P: PulseSource> FrameScheduler<P> {
    pub fn new(source: P) -> Self {
        Self {
            source,
            slots: Vec::new(),
            commit_queue: Vec::new(),
            dirty: false,
        }
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut P {
        &mut self.source
    }

    /// Number of live registered callbacks.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_idle(&self) -> bool {
        self.active_count() == 0
    }

    pub fn pulse_interval(&self) -> u64 {
        self.source.pulse_interval()
    }

    pub fn set_pulse_interval(&mut self, interval_ms: u64) {
        self.source.set_pulse_interval(interval_ms);
    }

    /// Registers `callback` for per-frame callbacks, starting after
    /// `delay_ms`.
    ///
    /// Arms the pulse source if the registry was empty. Re-registering an
    /// already-registered callback is a no-op, except that a positive delay
    /// is still recorded (overwriting any previous one).
    pub fn register(&mut self, callback: SharedCallback, delay_ms: u64) {
        if self.is_idle() {
            self.source.request_pulse();
        }

        let eligible_at_ms = (delay_ms > 0).then(|| self.source.frame_time() + delay_ms);

        match self.find(&callback) {
            Some(index) => {
                if eligible_at_ms.is_some() {
                    if let Some(entry) = self.slots[index].as_mut() {
                        entry.eligible_at_ms = eligible_at_ms;
                    }
                }
            }
            None => {
                log::debug!(
                    "registering frame callback (delay {delay_ms}ms, {} live)",
                    self.active_count()
                );
                self.slots.push(Some(Entry {
                    callback,
                    eligible_at_ms,
                    commit_pending: false,
                }));
            }
        }
    }

    /// Removes `callback` from all frame-related timing. Unknown callbacks
    /// are ignored.
    pub fn unregister(&mut self, callback: &SharedCallback) {
        if let Some(index) = self.find(callback) {
            self.slots[index] = None;
            self.dirty = true;
            log::debug!("unregistered frame callback ({} live)", self.active_count());
        }
    }

    /// Requests exactly one [`FrameCallback::on_commit`] after the
    /// callback's next eligible frame.
    ///
    /// The callback must already be registered for frame callbacks;
    /// otherwise this is a no-op. A request that is already pending is not
    /// duplicated.
    pub fn request_commit_once(&mut self, callback: &SharedCallback) {
        let Some(index) = self.find(callback) else {
            log::debug!("commit requested for unregistered callback; ignored");
            return;
        };
        if let Some(entry) = self.slots[index].as_mut() {
            entry.commit_pending = true;
        }
    }

    /// Runs one frame pass at the source's current frame time.
    ///
    /// Invokes `on_frame` on every live, eligible callback in registration
    /// order, queues commit notifications for entries that requested one,
    /// compacts tombstoned slots, and re-arms the pulse source while any
    /// live callback remains.
    pub fn on_pulse(&mut self) {
        let frame_time = self.source.frame_time();
        log::trace!("frame pulse at {frame_time}ms ({} live)", self.active_count());

        let len = self.slots.len();
        for index in 0..len {
            let (callback, commit_pending) = {
                let Some(entry) = self.slots[index].as_mut() else {
                    continue;
                };
                match entry.eligible_at_ms {
                    Some(due) if frame_time < due => continue,
                    // Delay satisfied: clear the one-time gate.
                    Some(_) => entry.eligible_at_ms = None,
                    None => {}
                }
                (Rc::clone(&entry.callback), entry.commit_pending)
            };

            let action = callback.borrow_mut().on_frame(frame_time);
            if action == FrameAction::Finished {
                // Tombstone only; compaction happens after the pass so the
                // remaining slots keep their indices during iteration.
                self.slots[index] = None;
                self.dirty = true;
                continue;
            }

            if commit_pending {
                if self.commit_queue.is_empty() {
                    self.source.request_commit_pass();
                }
                self.commit_queue.push(callback);
            }
        }

        if self.dirty {
            self.compact();
        }
        if !self.is_idle() {
            self.source.request_pulse();
        }
    }

    /// Delivers queued commit notifications.
    ///
    /// The host calls this strictly after the frame's traversal work. Each
    /// notification fires at most once and reads a fresh frame time; it is
    /// suppressed when the callback was unregistered or re-delayed since the
    /// triggering frame.
    pub fn run_commits(&mut self) {
        if self.commit_queue.is_empty() {
            return;
        }
        let queue = std::mem::take(&mut self.commit_queue);
        for callback in queue {
            let Some(index) = self.find(&callback) else {
                continue;
            };
            let due = match self.slots[index].as_mut() {
                Some(entry) if entry.commit_pending && entry.eligible_at_ms.is_none() => {
                    entry.commit_pending = false;
                    true
                }
                _ => false,
            };
            if due {
                let frame_time = self.source.frame_time();
                callback.borrow_mut().on_commit(frame_time);
            }
        }
    }

    /// Sweeps the registry, cancelling every live callback the predicate
    /// matches.
    ///
    /// The matching policy belongs to the caller, typically a newly
    /// started animation comparing [`FrameCallback::conflict_token`]s.
    /// Matched callbacks receive `on_cancel` and are removed.
    pub fn cancel_conflicting(&mut self, mut should_cancel: impl FnMut(&dyn FrameCallback) -> bool) {
        for index in 0..self.slots.len() {
            let Some(entry) = self.slots[index].as_ref() else {
                continue;
            };
            let callback = Rc::clone(&entry.callback);
            let matched = should_cancel(&*callback.borrow());
            if matched {
                callback.borrow_mut().on_cancel();
                self.slots[index] = None;
                self.dirty = true;
                log::debug!("cancelled conflicting animation ({} live)", self.active_count());
            }
        }
    }

    fn find(&self, callback: &SharedCallback) -> Option<usize> {
        self.slots.iter().position(|slot| {
            slot.as_ref()
                .is_some_and(|entry| Rc::ptr_eq(&entry.callback, callback))
        })
    }

    fn compact(&mut self) {
        self.slots.retain(Option::is_some);
        self.dirty = false;
    }
}
