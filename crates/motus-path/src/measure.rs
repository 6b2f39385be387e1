use super::{Path, Vec2};

/// Arc-length measurement over the first contour of a [`Path`].
///
/// Positions are resolved by walking cumulative segment lengths and
/// interpolating within the containing segment. The contour's points are
/// copied at construction, so the measure stays valid independently of the
/// source path.
#[derive(Debug, Clone)]
pub struct PathMeasure {
    points: Vec<Vec2>,
    /// `cumulative[i]` is the arc length from the contour start to `points[i]`.
    cumulative: Vec<f32>,
    total: f32,
}

impl PathMeasure {
    /// Measures the first contour of `path`. `None` for an empty path.
    pub fn new(path: &Path) -> Option<Self> {
        let contour = path.first_contour()?;
        let points: Vec<Vec2> = contour.points().to_vec();

        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        cumulative.push(0.0);
        for pair in points.windows(2) {
            total += pair[0].distance(pair[1]);
            cumulative.push(total);
        }

        Some(Self {
            points,
            cumulative,
            total,
        })
    }

    /// Total arc length of the measured contour.
    #[inline]
    pub fn length(&self) -> f32 {
        self.total
    }

    /// Position at `distance` along the contour.
    ///
    /// `distance` is clamped to `[0, length]`. At `length` the exact last
    /// point is returned rather than an interpolated value, so sampling the
    /// endpoint never lands short of it. A degenerate (single-point) contour
    /// always reports its point.
    pub fn pos_at(&self, distance: f32) -> Vec2 {
        let first = self.points[0];
        if self.points.len() < 2 || self.total == 0.0 || distance <= 0.0 {
            return first;
        }
        if distance >= self.total {
            return self.points[self.points.len() - 1];
        }

        // partition_point: index of the first cumulative value > distance.
        let upper = self.cumulative.partition_point(|&len| len <= distance);
        let seg_start = self.points[upper - 1];
        let seg_end = self.points[upper];
        let seg_len = self.cumulative[upper] - self.cumulative[upper - 1];
        if seg_len <= 0.0 {
            return seg_start;
        }

        let t = (distance - self.cumulative[upper - 1]) / seg_len;
        seg_start.lerp(seg_end, t)
    }
}
