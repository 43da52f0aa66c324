//! Ordered one-ring neighbourhoods of a vertex.
//!
//! A [`VertexNeighbourhood`] is a centre point plus the cyclic list of its
//! neighbours. Wedge `i` is the triangle `(center, neighbour(i), neighbour(i + 1))`;
//! neighbour indices wrap in both directions. Rings come from
//! [`Topology::vertex_neighbourhood`](crate::mesh::Topology::vertex_neighbourhood)
//! or from [`GridMesh::surface_point`](crate::mesh::GridMesh::surface_point).

use nalgebra::{Point2, Point3, Vector3};

use crate::geom::transform::Deformable;
use crate::math::{angle_between, DEGENERATE_EPSILON};

/// Cotangent of the angle at `a` in triangle `(a, b, c)`, zero when the angle
/// is degenerate (`|sin| < 1e-10`).
pub(crate) fn cotangent_angle(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    let lengths = ab.norm() * ac.norm();
    if lengths < DEGENERATE_EPSILON {
        return 0.0;
    }
    let cross_norm = ab.cross(&ac).norm();
    if cross_norm / lengths < DEGENERATE_EPSILON {
        0.0
    } else {
        ab.dot(&ac) / cross_norm
    }
}

fn normalize_or_zero(v: Vector3<f64>) -> Vector3<f64> {
    let n = v.norm();
    if n < DEGENERATE_EPSILON {
        Vector3::zeros()
    } else {
        v / n
    }
}

/// A vertex and its ordered ring of neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexNeighbourhood {
    center: Point3<f64>,
    neighbours: Vec<Point3<f64>>,
}

impl VertexNeighbourhood {
    /// Create a ring. `neighbours` must be in cyclic order around `center`.
    pub fn new(center: Point3<f64>, neighbours: Vec<Point3<f64>>) -> Self {
        Self { center, neighbours }
    }

    /// The centre vertex.
    pub fn center(&self) -> &Point3<f64> {
        &self.center
    }

    /// The ring, in order.
    pub fn neighbours(&self) -> &[Point3<f64>] {
        &self.neighbours
    }

    /// Number of neighbours (the valence).
    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    /// Whether the ring is empty.
    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    #[inline]
    fn next(&self, i: usize) -> usize {
        (i + 1) % self.len()
    }

    #[inline]
    fn prev(&self, i: usize) -> usize {
        (i + self.len() - 1) % self.len()
    }

    /// Neighbour `i`, wrapping modulo the valence.
    pub fn neighbour(&self, i: usize) -> &Point3<f64> {
        &self.neighbours[i % self.len()]
    }

    /// Vector from the centre to neighbour `i`.
    pub fn out_vector(&self, i: usize) -> Vector3<f64> {
        self.neighbour(i) - self.center
    }

    /// Vector from neighbour `i` to the centre.
    pub fn in_vector(&self, i: usize) -> Vector3<f64> {
        self.center - self.neighbour(i)
    }

    /// Wedge triangle `i`.
    pub fn triangle(&self, i: usize) -> [Point3<f64>; 3] {
        [self.center, *self.neighbour(i), *self.neighbour(self.next(i))]
    }

    fn wedge_cross(&self, i: usize) -> Vector3<f64> {
        self.out_vector(i).cross(&self.out_vector(self.next(i)))
    }

    /// Unit normal of wedge `i`, zero for a degenerate wedge.
    pub fn normal(&self, i: usize) -> Vector3<f64> {
        normalize_or_zero(self.wedge_cross(i))
    }

    /// Angle at the centre in wedge `i`.
    pub fn angle(&self, i: usize) -> f64 {
        angle_between(&self.out_vector(i), &self.out_vector(self.next(i)))
    }

    /// Area of wedge `i`.
    pub fn triangle_area(&self, i: usize) -> f64 {
        0.5 * self.wedge_cross(i).norm()
    }

    /// Midpoint of the edge to neighbour `i`.
    pub fn edge_midpoint(&self, i: usize) -> Point3<f64> {
        nalgebra::center(&self.center, self.neighbour(i))
    }

    /// Centroid of wedge `i`.
    pub fn face_center(&self, i: usize) -> Point3<f64> {
        let [a, b, c] = self.triangle(i);
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// All wedge normals.
    pub fn normals(&self) -> Vec<Vector3<f64>> {
        (0..self.len()).map(|i| self.normal(i)).collect()
    }

    /// All wedge angles.
    pub fn angles(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.angle(i)).collect()
    }

    /// All wedge areas.
    pub fn triangle_areas(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.triangle_area(i)).collect()
    }

    /// All edge midpoints.
    pub fn edge_midpoints(&self) -> Vec<Point3<f64>> {
        (0..self.len()).map(|i| self.edge_midpoint(i)).collect()
    }

    /// All wedge centroids.
    pub fn face_centers(&self) -> Vec<Point3<f64>> {
        (0..self.len()).map(|i| self.face_center(i)).collect()
    }

    /// Normalised sum of the wedge normals.
    pub fn average_normal(&self) -> Vector3<f64> {
        normalize_or_zero((0..self.len()).map(|i| self.normal(i)).sum())
    }

    /// Wedge normals weighted by wedge area, normalised.
    pub fn area_weighted_normal(&self) -> Vector3<f64> {
        normalize_or_zero((0..self.len()).map(|i| self.wedge_cross(i)).sum())
    }

    /// Wedge normals weighted by the angle at the centre, normalised.
    pub fn angle_weighted_normal(&self) -> Vector3<f64> {
        normalize_or_zero((0..self.len()).map(|i| self.normal(i) * self.angle(i)).sum())
    }

    /// Barycentric cell area: a third of the summed wedge areas.
    pub fn barycentric_cell_area(&self) -> f64 {
        (0..self.len()).map(|i| self.triangle_area(i)).sum::<f64>() / 3.0
    }

    /// Cell area of a ring taken from a quad grid: half the summed wedge areas.
    ///
    /// Each wedge is half of a grid cell and every cell is shared by its four
    /// corners, so a vertex owns one cell's worth of area.
    pub fn quad_cell_area(&self) -> f64 {
        (0..self.len()).map(|i| self.triangle_area(i)).sum::<f64>() / 2.0
    }

    /// Cotangent weight of the edge to neighbour `i`: `cot(alpha) + cot(beta)`.
    ///
    /// `alpha` is the angle opposite the edge at neighbour `i - 1`, `beta` the
    /// one at neighbour `i + 1`.
    pub fn cotangent_weight(&self, i: usize) -> f64 {
        let p = &self.center;
        let other = self.neighbour(i);
        let prev = self.neighbour(self.prev(i));
        let next = self.neighbour(self.next(i));
        cotangent_angle(prev, p, other) + cotangent_angle(next, p, other)
    }

    /// Out-vector `i` scaled by its cotangent weight.
    pub fn cotangent_weighted_vector(&self, i: usize) -> Vector3<f64> {
        self.out_vector(i) * self.cotangent_weight(i)
    }

    /// Cotangent Laplacian: `sum(weighted out-vectors) / (2 * cell area)`.
    ///
    /// Zero when the cell area is below `1e-10`.
    pub fn discrete_laplacian(&self) -> Vector3<f64> {
        self.cotangent_laplacian(self.barycentric_cell_area())
    }

    /// Cotangent Laplacian normalised by a given cell area.
    ///
    /// Zero when `area` is below `1e-10`.
    pub fn cotangent_laplacian(&self, area: f64) -> Vector3<f64> {
        if area < DEGENERATE_EPSILON {
            return Vector3::zeros();
        }
        let sum: Vector3<f64> = (0..self.len())
            .map(|i| self.cotangent_weighted_vector(i))
            .sum();
        sum / (2.0 * area)
    }

    /// Catmull-Clark vertex point `(F + 2R + (n - 3) P) / n`.
    ///
    /// `F` averages the wedge centroids, `R` the edge midpoints. An empty ring
    /// returns the centre.
    pub fn catmull_clark_center(&self) -> Point3<f64> {
        let n = self.len();
        if n == 0 {
            return self.center;
        }
        let nf = n as f64;
        let f: Vector3<f64> = self.face_centers().iter().map(|p| p.coords).sum::<Vector3<f64>>() / nf;
        let r: Vector3<f64> = self.edge_midpoints().iter().map(|p| p.coords).sum::<Vector3<f64>>() / nf;
        Point3::from((f + r * 2.0 + self.center.coords * (nf - 3.0)) / nf)
    }
}

impl Deformable<Point3<f64>> for VertexNeighbourhood {
    fn deform<F>(&self, f: F) -> Self
    where
        F: Fn(&Point3<f64>) -> Point3<f64> + Send + Sync + 'static,
    {
        Self {
            center: f(&self.center),
            neighbours: self.neighbours.iter().map(&f).collect(),
        }
    }
}

/// A grid vertex with its parameter and one-ring.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfacePoint {
    /// Parameter of the vertex on the unit square.
    pub uv: Point2<f64>,
    /// Ring ordered right, up, left, down in parameter space.
    pub ring: VertexNeighbourhood,
}

impl SurfacePoint {
    /// Position of the vertex.
    pub fn position(&self) -> &Point3<f64> {
        self.ring.center()
    }

    /// Surface normal estimate.
    pub fn normal(&self) -> Vector3<f64> {
        self.ring.average_normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    /// Flat regular ring of `n` unit neighbours around the origin in the xy plane.
    fn flat_ring(n: usize) -> VertexNeighbourhood {
        let neighbours = (0..n)
            .map(|i| {
                let a = 2.0 * PI * i as f64 / n as f64;
                Point3::new(a.cos(), a.sin(), 0.0)
            })
            .collect();
        VertexNeighbourhood::new(Point3::origin(), neighbours)
    }

    #[test]
    fn test_wrapping() {
        let ring = flat_ring(4);
        assert_eq!(ring.neighbour(4), ring.neighbour(0));
        assert_eq!(ring.triangle(3)[2], *ring.neighbour(0));
    }

    #[test]
    fn test_quad_cell_area_is_one_grid_cell() {
        // four unit neighbours at right angles: a unit-spaced grid
        let ring = flat_ring(4);
        assert!((ring.quad_cell_area() - 1.0).abs() < 1e-12);
        assert!((ring.barycentric_cell_area() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(ring.cotangent_laplacian(0.0), Vector3::zeros());
    }

    #[test]
    fn test_flat_ring_geometry() {
        let ring = flat_ring(6);
        let angle_sum: f64 = ring.angles().iter().sum();
        assert!((angle_sum - 2.0 * PI).abs() < 1e-12);
        assert!((ring.average_normal() - Vector3::z()).norm() < 1e-12);
        assert!((ring.area_weighted_normal() - Vector3::z()).norm() < 1e-12);
        assert!((ring.angle_weighted_normal() - Vector3::z()).norm() < 1e-12);
        assert!(ring.discrete_laplacian().norm() < 1e-12);
    }

    #[test]
    fn test_cotangent_weight_square() {
        // right angles at the neighbours: cot(45deg) twice
        let ring = flat_ring(4);
        assert!((ring.cotangent_weight(0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_wedges() {
        let p = Point3::new(1.0, 0.0, 0.0);
        let ring = VertexNeighbourhood::new(Point3::origin(), vec![p, p, p]);
        assert_eq!(ring.cotangent_weight(0), 0.0);
        assert_eq!(ring.barycentric_cell_area(), 0.0);
        assert_eq!(ring.discrete_laplacian(), Vector3::zeros());
        assert_eq!(ring.average_normal(), Vector3::zeros());
    }

    #[test]
    fn test_catmull_clark_center_of_flat_ring_stays_put() {
        let ring = flat_ring(4);
        assert!(ring.catmull_clark_center().coords.norm() < 1e-12);
    }
}
