//! Polylines, polygons and their arc-length parameterisation.

use log::warn;
use nalgebra::{Point, Point2, Point3, Vector3};

use super::bounds::{Aabb, Bounded};
use super::line::{LineSegment, LineSegment2};
use super::transform::Deformable;
use crate::error::{GeometryError, Result};
use crate::math::DEGENERATE_EPSILON;
use crate::mesh::GridMesh;
use crate::procedural::{Curve, Curve2, StandardPlane};

/// A sequence of points joined by straight segments, optionally closed.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyLine<const D: usize> {
    points: Vec<Point<f64, D>>,
    closed: bool,
}

/// A planar polyline.
pub type PolyLine2 = PolyLine<2>;
/// A polyline in space.
pub type PolyLine3 = PolyLine<3>;

impl<const D: usize> PolyLine<D> {
    /// Create a polyline.
    pub fn new(points: Vec<Point<f64, D>>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// The vertices.
    pub fn points(&self) -> &[Point<f64, D>] {
        &self.points
    }

    /// Whether the last point connects back to the first.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of segments: one per vertex when closed, one fewer when open.
    pub fn num_segments(&self) -> usize {
        match (self.points.len(), self.closed) {
            (0, _) => 0,
            (n, true) => n,
            (n, false) => n - 1,
        }
    }

    /// Vertex `i`, wrapping modulo the vertex count.
    ///
    /// # Panics
    /// If the polyline is empty.
    pub fn point(&self, i: usize) -> &Point<f64, D> {
        &self.points[i % self.points.len()]
    }

    /// Segment `i`, from vertex `i` to vertex `i + 1`.
    pub fn segment(&self, i: usize) -> LineSegment<D> {
        LineSegment::new(*self.point(i), *self.point(i + 1))
    }

    /// All segments in order.
    pub fn segments(&self) -> impl Iterator<Item = LineSegment<D>> + '_ {
        (0..self.num_segments()).map(move |i| self.segment(i))
    }

    /// Total length.
    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    /// Arc-length parameterisation of this polyline.
    pub fn curve(&self) -> Result<PolyLineCurve<D>> {
        PolyLineCurve::new(self.clone())
    }
}

impl<const D: usize> Deformable<Point<f64, D>> for PolyLine<D> {
    fn deform<F>(&self, f: F) -> Self
    where
        F: Fn(&Point<f64, D>) -> Point<f64, D> + Send + Sync + 'static,
    {
        Self::new(self.points.iter().map(f).collect(), self.closed)
    }
}

impl PolyLine2 {
    /// Embed in 3D on a standard plane.
    pub fn to_3d(&self, plane: StandardPlane) -> PolyLine3 {
        PolyLine::new(
            self.points.iter().map(|p| plane.embed(p)).collect(),
            self.closed,
        )
    }

    /// Offset every segment sideways by `amount` and rejoin them.
    ///
    /// Positive amounts move to the right of the direction of travel, growing
    /// a counter-clockwise polygon. Vertex `i` of the result is where the
    /// offsets of the two segments meeting at vertex `i` intersect; an open
    /// polyline keeps its offset end points. When two neighbouring segments
    /// are parallel both offset end points are kept instead, so the result can
    /// have more vertices than the input. Fewer than two points gives an empty
    /// polyline.
    pub fn offset(&self, amount: f64) -> PolyLine2 {
        if self.points.len() < 2 {
            return PolyLine::new(Vec::new(), self.closed);
        }
        let lines: Vec<LineSegment2> = self.segments().map(|s| s.parallel_offset(amount)).collect();
        let n = lines.len();
        let mut out = Vec::with_capacity(self.points.len());

        let joins = if self.closed { 0..n } else { 1..n };
        if !self.closed {
            out.push(lines[0].a);
        }
        for i in joins {
            let before = &lines[(i + n - 1) % n];
            let after = &lines[i];
            match before.intersection(after, DEGENERATE_EPSILON) {
                Some(p) => out.push(p),
                None => {
                    warn!("offset: segments {} and {} are parallel, keeping both ends", (i + n - 1) % n, i);
                    out.push(before.b);
                    out.push(after.a);
                }
            }
        }
        if !self.closed {
            out.push(lines[n - 1].b);
        }
        PolyLine::new(out, self.closed)
    }
}

impl PolyLine3 {
    /// Ruled strip from this polyline to `other`, vertex by vertex.
    ///
    /// Fails with [`GeometryError::InvalidArgument`] if the vertex counts differ.
    pub fn rule(&self, other: &PolyLine3) -> Result<GridMesh> {
        GridMesh::quad_strip(&self.points, &other.points, self.closed && other.closed)
    }

    /// Strip swept by moving this polyline along `vector`.
    pub fn extrude(&self, vector: Vector3<f64>) -> Result<GridMesh> {
        let moved: Vec<Point3<f64>> = self.points.iter().map(|p| p + vector).collect();
        GridMesh::quad_strip(&self.points, &moved, self.closed)
    }
}

impl Bounded for PolyLine3 {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.points)
    }
}

/// A polyline evaluated by arc length: `t = 0` is the first vertex and `t = 1`
/// the end of the last segment.
#[derive(Debug, Clone)]
pub struct PolyLineCurve<const D: usize> {
    line: PolyLine<D>,
    total_length: f64,
    /// Cumulative segment starts as a fraction of the total, plus a final `1`.
    relative_starts: Vec<f64>,
}

impl<const D: usize> PolyLineCurve<D> {
    /// Parameterise `line`.
    ///
    /// Fails with [`GeometryError::InvalidArgument`] if there are no segments
    /// or the total length is zero.
    pub fn new(line: PolyLine<D>) -> Result<Self> {
        let lengths: Vec<f64> = line.segments().map(|s| s.length()).collect();
        if lengths.is_empty() {
            return Err(GeometryError::invalid_arg(
                "line",
                line.len(),
                "needs at least one segment",
            ));
        }
        let total_length: f64 = lengths.iter().sum();
        if total_length < DEGENERATE_EPSILON {
            return Err(GeometryError::invalid_arg(
                "line",
                total_length,
                "has zero length",
            ));
        }
        let mut relative_starts = Vec::with_capacity(lengths.len() + 1);
        let mut acc = 0.0;
        relative_starts.push(0.0);
        for len in &lengths {
            acc += len;
            relative_starts.push(acc / total_length);
        }
        Ok(Self {
            line,
            total_length,
            relative_starts,
        })
    }

    /// The parameterised polyline.
    pub fn polyline(&self) -> &PolyLine<D> {
        &self.line
    }

    /// Total arc length.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Whether the underlying polyline is closed.
    pub fn is_closed(&self) -> bool {
        self.line.is_closed()
    }

    /// Segment containing relative arc length `t`.
    pub fn segment_index(&self, t: f64) -> usize {
        let last = self.relative_starts.len() - 2;
        // interior starts only, so the result is always a valid segment
        self.relative_starts[1..=last].partition_point(|&s| s <= t)
    }

    /// Point at relative arc length `t`, clamped to `[0, 1]`.
    pub fn eval(&self, t: f64) -> Point<f64, D> {
        let t = t.clamp(0.0, 1.0);
        let i = self.segment_index(t);
        let start = self.relative_starts[i];
        let span = self.relative_starts[i + 1] - start;
        let segment = self.line.segment(i);
        if span <= 0.0 {
            return segment.a;
        }
        segment.lerp((t - start) / span)
    }

    /// Convert into a [`Curve`] with the polyline's closure.
    pub fn into_curve(self) -> Curve<Point<f64, D>> {
        let closed = self.is_closed();
        Curve::new(move |t| self.eval(t), closed)
    }
}

/// A closed planar polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    line: PolyLine2,
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn check_star(p: usize, q: usize) -> Result<()> {
    if p < 3 {
        return Err(GeometryError::invalid_arg("p", p, "a star needs at least three points"));
    }
    if q == 0 || q >= p {
        return Err(GeometryError::invalid_arg("q", q, "must be between 1 and p - 1"));
    }
    Ok(())
}

fn unit_circle_points(n: usize) -> Vec<Point2<f64>> {
    crate::procedural::curves::circle().sample(n)
}

impl Polygon {
    /// Create a polygon from its vertices.
    pub fn new(points: Vec<Point2<f64>>) -> Self {
        Self {
            line: PolyLine::new(points, true),
        }
    }

    /// Regular `n`-gon inscribed in the unit circle, starting at `(1, 0)`.
    pub fn regular(n: usize) -> Self {
        Self::new(unit_circle_points(n))
    }

    /// Regular star polygon `{p/q}`: every `q`-th of `p` points on the unit
    /// circle.
    ///
    /// `p` and `q` must be relatively prime so a single loop visits every
    /// point; use [`star_figure`] otherwise.
    pub fn star(p: usize, q: usize) -> Result<Self> {
        check_star(p, q)?;
        if gcd(p, q) != 1 {
            return Err(GeometryError::invalid_arg("q", q, "must be relatively prime to p"));
        }
        let circle = unit_circle_points(p);
        Ok(Self::new((0..p).map(|i| circle[i * q % p]).collect()))
    }

    /// The vertices.
    pub fn points(&self) -> &[Point2<f64>] {
        self.line.points()
    }

    /// View as a closed polyline.
    pub fn as_polyline(&self) -> &PolyLine2 {
        &self.line
    }

    /// Unwrap into a closed polyline.
    pub fn into_polyline(self) -> PolyLine2 {
        self.line
    }

    /// Signed area, positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        0.5 * self
            .line
            .segments()
            .map(|s| s.a.x * s.b.y - s.b.x * s.a.y)
            .sum::<f64>()
    }

    /// Offset outwards (for counter-clockwise winding) by `amount`.
    pub fn offset(&self, amount: f64) -> Polygon {
        Self {
            line: self.line.offset(amount),
        }
    }

    /// Prism side walls: the polygon in the xy plane extruded `height` along z.
    pub fn extrude(&self, height: f64) -> Result<GridMesh> {
        self.line
            .to_3d(StandardPlane::Xy)
            .extrude(Vector3::new(0.0, 0.0, height))
    }

    /// Arc-length parameterised outline as a closed curve.
    pub fn to_curve(&self) -> Result<Curve2> {
        Ok(self.line.curve()?.into_curve())
    }
}

impl Deformable<Point2<f64>> for Polygon {
    fn deform<F>(&self, f: F) -> Self
    where
        F: Fn(&Point2<f64>) -> Point2<f64> + Send + Sync + 'static,
    {
        Self {
            line: self.line.deform(f),
        }
    }
}

/// Star figure `{p/q}` drawn on the unit circle.
///
/// For relatively prime `p, q` this is the closed star polygon. Otherwise the
/// figure falls apart into `gcd(p, q)` separate loops, which are traced one
/// after another (each returning to its start) as a single open polyline.
pub fn star_figure(p: usize, q: usize) -> Result<PolyLine2> {
    check_star(p, q)?;
    if gcd(p, q) == 1 {
        return Polygon::star(p, q).map(Polygon::into_polyline);
    }
    let circle = unit_circle_points(p);
    let mut visited = vec![false; p];
    let mut out = Vec::with_capacity(p + gcd(p, q));
    for start in 0..p {
        if visited[start] {
            continue;
        }
        let mut j = start;
        loop {
            visited[j] = true;
            out.push(circle[j]);
            j = (j + q) % p;
            if j == start {
                break;
            }
        }
        out.push(circle[start]);
    }
    Ok(PolyLine::new(out, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::transform::Transformable2D;
    use nalgebra::Vector2;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ])
    }

    #[test]
    fn test_segments_open_and_closed() {
        let open = PolyLine2::new(unit_square().points().to_vec(), false);
        assert_eq!(open.num_segments(), 3);
        assert!((open.length() - 3.0).abs() < 1e-12);
        let closed = unit_square().into_polyline();
        assert_eq!(closed.num_segments(), 4);
        assert_eq!(closed.segment(3).b, Point2::new(0.0, 0.0));
        assert_eq!(closed.point(5), &Point2::new(1.0, 0.0));
        assert_eq!(PolyLine2::new(Vec::new(), true).num_segments(), 0);
    }

    #[test]
    fn test_curve_by_arc_length() {
        let line = PolyLine3::new(
            vec![
                Point3::origin(),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 3.0, 0.0),
            ],
            false,
        );
        let curve = line.curve().unwrap();
        assert_eq!(curve.total_length(), 4.0);
        assert_eq!(curve.segment_index(0.1), 0);
        assert_eq!(curve.segment_index(0.5), 1);
        assert!((curve.eval(0.125) - Point3::new(0.5, 0.0, 0.0)).norm() < 1e-12);
        assert!((curve.eval(0.5) - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-12);
        assert_eq!(curve.eval(1.0), Point3::new(1.0, 3.0, 0.0));
        assert_eq!(curve.eval(-1.0), Point3::origin());
    }

    #[test]
    fn test_curve_rejects_degenerate_lines() {
        assert!(matches!(
            PolyLine2::new(vec![Point2::origin()], false).curve(),
            Err(GeometryError::InvalidArgument { .. })
        ));
        let p = Point2::new(1.0, 1.0);
        assert!(PolyLine2::new(vec![p, p], false).curve().is_err());
    }

    #[test]
    fn test_closed_curve_wraps_through_the_last_segment() {
        let curve = unit_square().to_curve().unwrap();
        assert!(curve.is_closed());
        assert!((curve.eval(0.875) - Point2::new(0.0, 0.5)).norm() < 1e-12);
    }

    #[test]
    fn test_offset_square_grows() {
        let square = unit_square();
        assert!((square.signed_area() - 1.0).abs() < 1e-12);
        let grown = square.offset(0.5);
        assert_eq!(grown.points().len(), 4);
        assert!((grown.points()[0] - Point2::new(-0.5, -0.5)).norm() < 1e-12);
        assert!((grown.signed_area() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_offset_open_polyline_keeps_ends() {
        let line = PolyLine2::new(
            vec![Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), Point2::new(2.0, 2.0)],
            false,
        );
        let off = line.offset(1.0);
        assert_eq!(
            off.points(),
            &[Point2::new(0.0, -1.0), Point2::new(3.0, -1.0), Point2::new(3.0, 2.0)]
        );
    }

    #[test]
    fn test_offset_parallel_segments_keep_both_ends() {
        let line = PolyLine2::new(
            vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(2.0, 0.0)],
            false,
        );
        assert_eq!(line.offset(1.0).len(), 4);
    }

    #[test]
    fn test_regular_and_star() {
        let hex = Polygon::regular(6);
        assert_eq!(hex.points().len(), 6);
        assert!(hex.signed_area() > 0.0);

        let pentagram = Polygon::star(5, 2).unwrap();
        assert_eq!(pentagram.points()[1], Polygon::regular(5).points()[2]);
        assert!(Polygon::star(6, 2).is_err());
        assert!(Polygon::star(2, 1).is_err());
        assert!(Polygon::star(5, 5).is_err());
    }

    #[test]
    fn test_star_figure_components() {
        let hexagram = star_figure(6, 2).unwrap();
        assert!(!hexagram.is_closed());
        // two triangles, each traced back to its start
        assert_eq!(hexagram.len(), 8);
        assert_eq!(hexagram.points()[0], hexagram.points()[3]);

        let pentagram = star_figure(5, 2).unwrap();
        assert!(pentagram.is_closed());
        assert_eq!(pentagram.len(), 5);
    }

    #[test]
    fn test_extrude_polygon_makes_closed_strip() {
        let walls = unit_square().extrude(2.0).unwrap();
        assert_eq!(walls.num_vertices(), 8);
        assert_eq!(walls.num_faces(), 4);
        assert!(walls.is_closed_u());
        assert_eq!(walls.point(2, 1), &Point3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_rule_requires_matching_lengths() {
        let a = PolyLine3::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)], false);
        let b = PolyLine3::new(vec![Point3::origin()], false);
        assert!(a.rule(&b).is_err());
        let strip = a.rule(&a.deform(|p| p + Vector3::z())).unwrap();
        assert_eq!(strip.num_faces(), 1);
    }

    #[test]
    fn test_transform_2d() {
        let moved = unit_square().translate_2d(Vector2::new(1.0, 0.0));
        assert_eq!(moved.points()[0], Point2::new(1.0, 0.0));
    }
}
