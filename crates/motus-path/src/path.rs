use super::{Rect, Vec2};

/// A single continuous run of connected points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    points: Vec<Vec2>,
}

impl Contour {
    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn first(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    /// A contour holding a single point has zero geometric length.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }
}

/// Polyline path built from `move_to` / `line_to` commands.
///
/// Each `move_to` opens a new contour; `line_to` extends the open contour.
/// Curves are not represented; callers flatten them to line segments at
/// whatever tolerance suits their input pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    contours: Vec<Contour>,
}

impl Path {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Single stationary point, e.g. the location of a tap.
    pub fn point(p: Vec2) -> Self {
        let mut path = Self::new();
        path.move_to(p);
        path
    }

    /// Straight segment from `from` to `to`, e.g. a swipe.
    pub fn line(from: Vec2, to: Vec2) -> Self {
        let mut path = Self::new();
        path.move_to(from).line_to(to);
        path
    }

    /// Opens a new contour starting at `p`.
    pub fn move_to(&mut self, p: Vec2) -> &mut Self {
        self.contours.push(Contour { points: vec![p] });
        self
    }

    /// Extends the open contour with a segment to `p`.
    ///
    /// Calling `line_to` on an empty path opens a contour at `p`, matching
    /// `move_to(p)`.
    pub fn line_to(&mut self, p: Vec2) -> &mut Self {
        match self.contours.last_mut() {
            Some(contour) => contour.points.push(p),
            None => {
                self.contours.push(Contour { points: vec![p] });
            }
        }
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    #[inline]
    pub fn contour_count(&self) -> usize {
        self.contours.len()
    }

    #[inline]
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    #[inline]
    pub fn first_contour(&self) -> Option<&Contour> {
        self.contours.first()
    }

    /// Bounding rectangle over every point in every contour.
    ///
    /// `None` for an empty path.
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self.contours.iter().flat_map(|c| c.points.iter().copied());
        let first = points.next()?;
        let rect = points.fold(Rect::from_min_max(first, first), Rect::include);
        Some(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn new_path_is_empty() {
        let path = Path::new();
        assert!(path.is_empty());
        assert_eq!(path.contour_count(), 0);
        assert!(path.bounds().is_none());
    }

    #[test]
    fn point_path_is_single_degenerate_contour() {
        let path = Path::point(Vec2::new(3.0, 4.0));
        assert_eq!(path.contour_count(), 1);
        let contour = path.first_contour().unwrap();
        assert!(contour.is_degenerate());
        assert_eq!(contour.first(), Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn line_path_has_two_points() {
        let path = Path::line(Vec2::zero(), Vec2::new(10.0, 0.0));
        assert_eq!(path.contour_count(), 1);
        assert_eq!(path.first_contour().unwrap().points().len(), 2);
    }

    #[test]
    fn each_move_to_opens_a_contour() {
        let mut path = Path::new();
        path.move_to(Vec2::zero())
            .line_to(Vec2::new(1.0, 0.0))
            .move_to(Vec2::new(5.0, 5.0))
            .line_to(Vec2::new(6.0, 5.0));
        assert_eq!(path.contour_count(), 2);
    }

    #[test]
    fn line_to_on_empty_path_opens_contour() {
        let mut path = Path::new();
        path.line_to(Vec2::new(2.0, 2.0));
        assert_eq!(path.contour_count(), 1);
        assert_eq!(path.first_contour().unwrap().points().len(), 1);
    }

    // ── bounds ────────────────────────────────────────────────────────────

    #[test]
    fn bounds_span_all_contours() {
        let mut path = Path::new();
        path.move_to(Vec2::new(1.0, 1.0))
            .line_to(Vec2::new(4.0, 2.0))
            .move_to(Vec2::new(-3.0, 7.0));
        let bounds = path.bounds().unwrap();
        assert_eq!(bounds.min(), Vec2::new(-3.0, 1.0));
        assert_eq!(bounds.max(), Vec2::new(4.0, 7.0));
    }

    #[test]
    fn bounds_of_point_path_are_zero_sized() {
        let bounds = Path::point(Vec2::new(2.0, 3.0)).bounds().unwrap();
        assert_eq!(bounds.min(), bounds.max());
        assert_eq!(bounds.width(), 0.0);
    }
}
