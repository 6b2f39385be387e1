use motus_path::Vec2;

use super::error::GestureError;
use super::stroke::{Stroke, StrokeId};

/// Gestures may contain no more than this many strokes.
pub const MAX_STROKES: usize = 10;

/// Upper bound on a gesture's span, in milliseconds. Nearly all gestures
/// are much shorter.
pub const MAX_SPAN_MS: u64 = 60_000;

/// The location of one touching stroke at a particular instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchPoint {
    pub stroke_id: StrokeId,
    /// Id of the stroke this touch continues from an earlier gesture.
    pub continues: Option<StrokeId>,
    /// True when this sample puts the touch down.
    pub is_start: bool,
    /// True when this sample lifts the touch.
    pub is_end: bool,
    pub position: Vec2,
}

/// A validated, immutable multi-stroke gesture.
///
/// Built through [`GestureBuilder`]; both caps ([`MAX_STROKES`],
/// [`MAX_SPAN_MS`]) are enforced as strokes are added, so an existing
/// `Gesture` always satisfies them.
#[derive(Debug, Clone)]
pub struct Gesture {
    strokes: Vec<Stroke>,
}

impl Gesture {
    pub fn builder() -> GestureBuilder {
        GestureBuilder::new()
    }

    #[inline]
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    #[inline]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    #[inline]
    pub fn stroke(&self, index: usize) -> Option<&Stroke> {
        self.strokes.get(index)
    }

    /// Latest stroke end time. The gesture is assumed to start at 0, so
    /// waiting before the first stroke counts against the span.
    pub fn span_ms(&self) -> u64 {
        self.strokes.iter().map(Stroke::end_ms).max().unwrap_or(0)
    }

    /// Smallest key time (a stroke start or end) at or after `offset_ms`.
    pub(crate) fn next_key_time_at_least(&self, offset_ms: u64) -> Option<u64> {
        self.strokes
            .iter()
            .flat_map(|stroke| [stroke.start_ms(), stroke.end_ms()])
            .filter(|&key| key >= offset_ms)
            .min()
    }

    /// Collects a touch point for every stroke touching at `time_ms`.
    ///
    /// `out` is cleared first; strokes contribute in gesture order.
    pub(crate) fn points_at(&self, time_ms: u64, out: &mut Vec<TouchPoint>) {
        out.clear();
        for stroke in &self.strokes {
            if !stroke.covers(time_ms) {
                continue;
            }
            out.push(TouchPoint {
                stroke_id: stroke.id(),
                continues: stroke.continues(),
                is_start: stroke.continues().is_none() && time_ms == stroke.start_ms(),
                is_end: !stroke.will_continue() && time_ms == stroke.end_ms(),
                position: stroke.position_at(time_ms),
            });
        }
    }
}

/// Incrementally assembles a [`Gesture`], validating at every step.
#[derive(Debug, Default)]
pub struct GestureBuilder {
    strokes: Vec<Stroke>,
}

impl GestureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stroke.
    ///
    /// Rejected strokes are not retained: failing the stroke-count or span
    /// cap leaves the builder exactly as it was.
    pub fn add_stroke(&mut self, stroke: Stroke) -> Result<&mut Self, GestureError> {
        if self.strokes.len() >= MAX_STROKES {
            return Err(GestureError::TooManyStrokes { max: MAX_STROKES });
        }
        let span = self
            .strokes
            .iter()
            .chain(std::iter::once(&stroke))
            .map(Stroke::end_ms)
            .max()
            .unwrap_or(0);
        if span > MAX_SPAN_MS {
            return Err(GestureError::SpanExceeded { max_ms: MAX_SPAN_MS });
        }
        self.strokes.push(stroke);
        Ok(self)
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn build(self) -> Result<Gesture, GestureError> {
        if self.strokes.is_empty() {
            return Err(GestureError::EmptyGesture);
        }
        Ok(Gesture {
            strokes: self.strokes,
        })
    }
}

#[cfg(test)]
mod tests {
    use motus_path::Path;

    use super::*;

    fn swipe(start_ms: u64, duration_ms: u64) -> Stroke {
        let path = Path::line(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
        Stroke::new(path, start_ms, duration_ms).unwrap()
    }

    // ── builder caps ──────────────────────────────────────────────────────

    #[test]
    fn empty_gesture_is_rejected_at_build() {
        assert_eq!(
            Gesture::builder().build().unwrap_err(),
            GestureError::EmptyGesture
        );
    }

    #[test]
    fn eleventh_stroke_is_rejected_and_not_retained() {
        let mut builder = Gesture::builder();
        for _ in 0..MAX_STROKES {
            builder.add_stroke(swipe(0, 100)).unwrap();
        }
        assert_eq!(
            builder.add_stroke(swipe(0, 100)).unwrap_err(),
            GestureError::TooManyStrokes { max: MAX_STROKES }
        );
        assert_eq!(builder.stroke_count(), MAX_STROKES);

        let gesture = builder.build().unwrap();
        assert_eq!(gesture.stroke_count(), MAX_STROKES);
    }

    #[test]
    fn stroke_past_the_span_cap_is_rejected_and_not_retained() {
        let mut builder = Gesture::builder();
        builder.add_stroke(swipe(0, 100)).unwrap();
        assert_eq!(
            builder.add_stroke(swipe(MAX_SPAN_MS, 1)).unwrap_err(),
            GestureError::SpanExceeded { max_ms: MAX_SPAN_MS }
        );
        assert_eq!(builder.stroke_count(), 1);
    }

    #[test]
    fn stroke_ending_exactly_at_the_cap_is_accepted() {
        let mut builder = Gesture::builder();
        builder.add_stroke(swipe(MAX_SPAN_MS - 100, 100)).unwrap();
        assert_eq!(builder.build().unwrap().span_ms(), MAX_SPAN_MS);
    }

    // ── key times ─────────────────────────────────────────────────────────

    #[test]
    fn key_times_are_stroke_boundaries() {
        let mut builder = Gesture::builder();
        builder.add_stroke(swipe(0, 100)).unwrap();
        builder.add_stroke(swipe(250, 50)).unwrap();
        let gesture = builder.build().unwrap();

        assert_eq!(gesture.next_key_time_at_least(0), Some(0));
        assert_eq!(gesture.next_key_time_at_least(1), Some(100));
        assert_eq!(gesture.next_key_time_at_least(101), Some(250));
        assert_eq!(gesture.next_key_time_at_least(251), Some(300));
        assert_eq!(gesture.next_key_time_at_least(301), None);
    }

    // ── touch points ──────────────────────────────────────────────────────

    #[test]
    fn concurrent_strokes_sample_together() {
        let mut builder = Gesture::builder();
        builder.add_stroke(swipe(0, 100)).unwrap();
        builder
            .add_stroke(
                Stroke::new(Path::point(Vec2::new(5.0, 5.0)), 50, 100).unwrap(),
            )
            .unwrap();
        let gesture = builder.build().unwrap();

        let mut points = Vec::new();
        gesture.points_at(60, &mut points);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].stroke_id, gesture.stroke(0).unwrap().id());
        assert_eq!(points[1].stroke_id, gesture.stroke(1).unwrap().id());
    }

    #[test]
    fn start_and_end_flags_mark_stroke_boundaries() {
        let mut builder = Gesture::builder();
        builder.add_stroke(swipe(0, 100)).unwrap();
        let gesture = builder.build().unwrap();

        let mut points = Vec::new();
        gesture.points_at(0, &mut points);
        assert!(points[0].is_start && !points[0].is_end);

        gesture.points_at(50, &mut points);
        assert!(!points[0].is_start && !points[0].is_end);

        gesture.points_at(100, &mut points);
        assert!(!points[0].is_start && points[0].is_end);
    }

    #[test]
    fn continued_strokes_suppress_start_and_end_flags() {
        let held = Stroke::with_continuation(
            Path::line(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)),
            0,
            100,
            true,
        )
        .unwrap();
        let next = held
            .continue_with(
                Path::line(Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0)),
                0,
                100,
                false,
            )
            .unwrap();

        let mut builder = Gesture::builder();
        builder.add_stroke(held).unwrap();
        let first = builder.build().unwrap();
        let mut points = Vec::new();
        // Held at its end: finger stays down, no lift.
        first.points_at(100, &mut points);
        assert!(!points[0].is_end);

        let mut builder = Gesture::builder();
        builder.add_stroke(next).unwrap();
        let second = builder.build().unwrap();
        // Continuation at its start: finger was already down, no press.
        second.points_at(0, &mut points);
        assert!(!points[0].is_start);
        assert_eq!(points[0].continues, Some(first.stroke(0).unwrap().id()));
    }
}
