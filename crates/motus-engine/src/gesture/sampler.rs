use super::description::{Gesture, TouchPoint};

/// All touch points present at one instant of a sampled gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineFrame {
    /// Milliseconds since the start of the gesture.
    pub time_ms: u64,
    pub points: Vec<TouchPoint>,
}

/// Converts a gesture into a discrete, time-ordered touch timeline.
///
/// Sampling is driven by key times (the start and end of every stroke),
/// so path boundaries are always sampled exactly, never interpolated. In
/// between, the cursor advances by at most `sample_interval_ms` per frame:
///
/// - while at least one stroke is touching, the next frame lands at
///   `min(next_key_time, cursor + interval)`, so key points are never
///   stepped over
/// - while nothing is touching, the cursor jumps straight to the next key
///   time instead of emitting idle frames
///
/// Strokes sharing an exact boundary time collapse into one frame. The
/// returned frames are independent values; the injector may consume them at
/// its own pace.
pub fn sample_timeline(gesture: &Gesture, sample_interval_ms: u64) -> Vec<TimelineFrame> {
    // A zero interval cannot advance the cursor between key times.
    let interval = sample_interval_ms.max(1);

    let mut frames = Vec::new();
    let mut scratch: Vec<TouchPoint> = Vec::with_capacity(gesture.stroke_count());
    let mut cursor = 0u64;
    let mut touching = false;

    let mut next_key = gesture.next_key_time_at_least(0);
    while let Some(key) = next_key {
        cursor = if touching {
            key.min(cursor + interval)
        } else {
            key
        };
        gesture.points_at(cursor, &mut scratch);
        touching = !scratch.is_empty();
        frames.push(TimelineFrame {
            time_ms: cursor,
            points: scratch.clone(),
        });
        next_key = gesture.next_key_time_at_least(cursor + 1);
    }

    log::trace!(
        "sampled {} strokes into {} timeline frames at {interval}ms",
        gesture.stroke_count(),
        frames.len()
    );
    frames
}
