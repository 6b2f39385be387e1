use std::sync::atomic::{AtomicU32, Ordering};

use motus_path::{Path, PathMeasure, Vec2};

use super::error::GestureError;

/// Process-unique stroke identifier.
///
/// Ids stay unique across gestures so a stroke in one gesture can name the
/// stroke it continues from an earlier gesture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct StrokeId(u32);

impl StrokeId {
    fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Immutable description of one timed touch path within a gesture.
///
/// A stroke follows its path at constant speed over `[start_ms, end_ms]`.
/// A zero-length path (single `move_to`) is a touch that doesn't move: it
/// reports its fixed point for the whole interval.
#[derive(Debug, Clone)]
pub struct Stroke {
    id: StrokeId,
    path: Path,
    measure: PathMeasure,
    start_ms: u64,
    end_ms: u64,
    /// Arc length traversed per millisecond.
    speed: f32,
    tap_point: Option<Vec2>,
    will_continue: bool,
    continues: Option<StrokeId>,
}

impl Stroke {
    /// Validates and builds a stroke that lifts at its end time.
    ///
    /// `path` must be non-empty, single-contour, with non-negative bounds;
    /// `duration_ms` must be positive. `start_ms` is measured from the
    /// start of the gesture.
    pub fn new(path: Path, start_ms: u64, duration_ms: u64) -> Result<Self, GestureError> {
        Self::with_continuation(path, start_ms, duration_ms, false)
    }

    /// Like [`Stroke::new`], but `will_continue` marks the stroke as kept
    /// down when its gesture completes, to be continued by a stroke in a
    /// later gesture.
    pub fn with_continuation(
        path: Path,
        start_ms: u64,
        duration_ms: u64,
        will_continue: bool,
    ) -> Result<Self, GestureError> {
        if duration_ms == 0 {
            return Err(GestureError::ZeroDuration);
        }
        if path.is_empty() {
            return Err(GestureError::EmptyPath);
        }
        if path.contour_count() > 1 {
            return Err(GestureError::MultipleContours);
        }
        let bounds = path.bounds().ok_or(GestureError::EmptyPath)?;
        if bounds.min().x < 0.0 || bounds.min().y < 0.0 {
            return Err(GestureError::NegativeBounds);
        }

        let measure = PathMeasure::new(&path).ok_or(GestureError::EmptyPath)?;
        let tap_point = (measure.length() == 0.0).then(|| measure.pos_at(0.0));
        let speed = measure.length() / duration_ms as f32;

        Ok(Self {
            id: StrokeId::next(),
            path,
            measure,
            start_ms,
            end_ms: start_ms + duration_ms,
            speed,
            tap_point,
            will_continue,
            continues: None,
        })
    }

    /// Builds a stroke continuing this one in a later gesture.
    ///
    /// Only legal on strokes marked `will_continue`; the new path should
    /// start where this stroke's path ends. `start_ms` is measured from the
    /// start of the *new* gesture.
    pub fn continue_with(
        &self,
        path: Path,
        start_ms: u64,
        duration_ms: u64,
        will_continue: bool,
    ) -> Result<Self, GestureError> {
        if !self.will_continue {
            return Err(GestureError::NotContinuable);
        }
        let mut stroke = Self::with_continuation(path, start_ms, duration_ms, will_continue)?;
        stroke.continues = Some(self.id);
        Ok(stroke)
    }

    #[inline]
    pub fn id(&self) -> StrokeId {
        self.id
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    #[inline]
    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    #[inline]
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }

    #[inline]
    pub fn will_continue(&self) -> bool {
        self.will_continue
    }

    /// Id of the stroke this one continues, if any.
    #[inline]
    pub fn continues(&self) -> Option<StrokeId> {
        self.continues
    }

    /// Whether the stroke is touching at `time_ms` (inclusive interval).
    pub(crate) fn covers(&self, time_ms: u64) -> bool {
        time_ms >= self.start_ms && time_ms <= self.end_ms
    }

    /// Position along the path at `time_ms`. Assumes `covers(time_ms)`.
    pub(crate) fn position_at(&self, time_ms: u64) -> Vec2 {
        if let Some(point) = self.tap_point {
            return point;
        }
        if time_ms == self.end_ms {
            // Pin the endpoint: converting time to length near the end can
            // land short of the full path length.
            return self.measure.pos_at(self.measure.length());
        }
        self.measure.pos_at(self.speed * (time_ms - self.start_ms) as f32)
    }
}
