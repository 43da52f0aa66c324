//! Line segments in any dimension, with planar extras.

use nalgebra::{Point, Point2, SVector, Vector2};

use crate::geom::transform::Deformable;
use crate::math::DEGENERATE_EPSILON;

/// A straight segment from `a` to `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment<const D: usize> {
    /// Start point.
    pub a: Point<f64, D>,
    /// End point.
    pub b: Point<f64, D>,
}

/// A planar segment.
pub type LineSegment2 = LineSegment<2>;
/// A segment in space.
pub type LineSegment3 = LineSegment<3>;

/// Closest approach between two planar segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentDistance {
    /// Distance between the closest points.
    pub distance: f64,
    /// Parameter of the closest point on the first segment.
    pub t: f64,
    /// Parameter of the closest point on the second segment.
    pub u: f64,
}

impl<const D: usize> LineSegment<D> {
    /// Create a segment.
    pub fn new(a: Point<f64, D>, b: Point<f64, D>) -> Self {
        Self { a, b }
    }

    /// Vector from `a` to `b`.
    pub fn direction(&self) -> SVector<f64, D> {
        self.b - self.a
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Point at parameter `t` (`0` is `a`, `1` is `b`), not clamped.
    pub fn lerp(&self, t: f64) -> Point<f64, D> {
        self.a + self.direction() * t
    }

    /// Midpoint.
    pub fn midpoint(&self) -> Point<f64, D> {
        self.lerp(0.5)
    }

    /// Segment with its endpoints swapped.
    pub fn reversed(&self) -> Self {
        Self::new(self.b, self.a)
    }

    /// Distance from `p` to the segment, with the parameter of the closest point.
    ///
    /// A zero-length segment reports parameter `0.5`.
    pub fn distance_to_point(&self, p: &Point<f64, D>) -> (f64, f64) {
        let d = self.direction();
        let len2 = d.norm_squared();
        if len2 == 0.0 {
            return ((p - self.a).norm(), 0.5);
        }
        let t = ((p - self.a).dot(&d) / len2).clamp(0.0, 1.0);
        ((p - self.lerp(t)).norm(), t)
    }
}

impl<const D: usize> Deformable<Point<f64, D>> for LineSegment<D> {
    fn deform<F>(&self, f: F) -> Self
    where
        F: Fn(&Point<f64, D>) -> Point<f64, D> + Send + Sync + 'static,
    {
        Self::new(f(&self.a), f(&self.b))
    }
}

fn cross2(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

impl LineSegment<2> {
    /// Intersection of the infinite lines through both segments.
    ///
    /// Returns `None` when the lines are parallel within `epsilon`, otherwise
    /// the midpoint of the two solved points (they coincide up to rounding).
    pub fn intersection(&self, other: &LineSegment2, epsilon: f64) -> Option<Point2<f64>> {
        let (t, u) = self.line_parameters(other, epsilon)?;
        let p = self.lerp(t);
        let q = other.lerp(u);
        Some(nalgebra::center(&p, &q))
    }

    fn line_parameters(&self, other: &LineSegment2, epsilon: f64) -> Option<(f64, f64)> {
        let d1 = self.direction();
        let d2 = other.direction();
        let denom = cross2(&d1, &d2);
        if denom.abs() < epsilon {
            return None;
        }
        let w = other.a - self.a;
        Some((cross2(&w, &d2) / denom, cross2(&w, &d1) / denom))
    }

    /// Closest approach between two segments.
    ///
    /// Crossing segments are at distance zero. Otherwise the closest pair
    /// involves an endpoint, so the best of the four endpoint-to-segment
    /// distances is returned.
    pub fn segment_distance(&self, other: &LineSegment2, epsilon: f64) -> SegmentDistance {
        if let Some((t, u)) = self.line_parameters(other, epsilon) {
            if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
                return SegmentDistance { distance: 0.0, t, u };
            }
        }

        let (d0, u0) = other.distance_to_point(&self.a);
        let (d1, u1) = other.distance_to_point(&self.b);
        let (d2, t2) = self.distance_to_point(&other.a);
        let (d3, t3) = self.distance_to_point(&other.b);

        [
            SegmentDistance { distance: d0, t: 0.0, u: u0 },
            SegmentDistance { distance: d1, t: 1.0, u: u1 },
            SegmentDistance { distance: d2, t: t2, u: 0.0 },
            SegmentDistance { distance: d3, t: t3, u: 1.0 },
        ]
        .into_iter()
        .fold(
            SegmentDistance { distance: f64::INFINITY, t: 0.0, u: 0.0 },
            |best, c| if c.distance < best.distance { c } else { best },
        )
    }

    /// Segment shifted sideways by `amount`.
    ///
    /// Positive amounts move it to the right of its direction, which grows a
    /// counter-clockwise polygon. A zero-length segment is returned unchanged.
    pub fn parallel_offset(&self, amount: f64) -> LineSegment2 {
        let d = self.direction();
        let len = d.norm();
        if len < DEGENERATE_EPSILON {
            return *self;
        }
        let normal = Vector2::new(d.y, -d.x) / len * amount;
        Self::new(self.a + normal, self.b + normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_distance_to_point() {
        let s = LineSegment3::new(Point3::origin(), Point3::new(2.0, 0.0, 0.0));
        let (d, t) = s.distance_to_point(&Point3::new(1.0, 1.0, 0.0));
        assert!((d - 1.0).abs() < 1e-12);
        assert!((t - 0.5).abs() < 1e-12);

        let (d, t) = s.distance_to_point(&Point3::new(3.0, 0.0, 0.0));
        assert!((d - 1.0).abs() < 1e-12);
        assert_eq!(t, 1.0);
    }

    #[test]
    fn test_zero_length_segment() {
        let p = Point2::new(1.0, 1.0);
        let s = LineSegment2::new(p, p);
        let (d, t) = s.distance_to_point(&Point2::new(1.0, 3.0));
        assert!((d - 2.0).abs() < 1e-12);
        assert_eq!(t, 0.5);
        assert_eq!(s.parallel_offset(1.0), s);
    }

    #[test]
    fn test_short_segment_is_not_a_point() {
        let s = LineSegment2::new(Point2::new(0.0, 0.0), Point2::new(1e-6, 0.0));
        let (d, t) = s.distance_to_point(&Point2::new(1e-6, 1.0));
        assert!((t - 1.0).abs() < 1e-9, "t = {}", t);
        assert!((d - 1.0).abs() < 1e-12);

        let (_, t) = s.distance_to_point(&Point2::new(2.5e-7, -3.0));
        assert!((t - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_intersection() {
        let a = LineSegment2::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));
        let b = LineSegment2::new(Point2::new(0.0, 2.0), Point2::new(2.0, 0.0));
        let p = a.intersection(&b, 1e-9).unwrap();
        assert!((p - Point2::new(1.0, 1.0)).norm() < 1e-12);

        let c = LineSegment2::new(Point2::new(0.0, 1.0), Point2::new(2.0, 3.0));
        assert!(a.intersection(&c, 1e-9).is_none());
    }

    #[test]
    fn test_segment_distance() {
        let a = LineSegment2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        let b = LineSegment2::new(Point2::new(0.5, -1.0), Point2::new(0.5, 1.0));
        assert_eq!(a.segment_distance(&b, 1e-9).distance, 0.0);

        let c = LineSegment2::new(Point2::new(2.0, 1.0), Point2::new(3.0, 1.0));
        let d = a.segment_distance(&c, 1e-9);
        assert!((d.distance - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(d.t, 1.0);
        assert_eq!(d.u, 0.0);
    }

    #[test]
    fn test_parallel_offset_moves_right() {
        let s = LineSegment2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        let o = s.parallel_offset(0.5);
        assert_eq!(o.a, Point2::new(0.0, -0.5));
        assert_eq!(o.b, Point2::new(1.0, -0.5));
    }
}
