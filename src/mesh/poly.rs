//! Indexed polygon meshes with a fixed number of corners per face.
//!
//! A [`PolyMesh`] is a point buffer plus a face buffer of `[usize; N]` records.
//! Meshes are immutable: deforming one produces a new point buffer and shares
//! the source face buffer through an [`Arc`].

use std::fmt::Debug;
use std::sync::Arc;

use nalgebra::{Point3, Vector3};

use crate::error::{GeometryError, Result};
use crate::geom::bounds::{Aabb, Bounded};
use crate::geom::transform::Deformable;
use crate::math::{approx_eq, DEGENERATE_EPSILON};

/// A face record: a fixed-size list of point indices.
pub trait FaceIndices: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Number of corners per face.
    const ARITY: usize;

    /// The point indices in corner order.
    fn indices(&self) -> &[usize];

    /// The same face with every index shifted by `by`.
    fn offset(&self, by: usize) -> Self;

    /// Whether two corners reference the same point.
    fn is_degenerate(&self) -> bool {
        let s = self.indices();
        (0..s.len()).any(|i| s[i + 1..].contains(&s[i]))
    }
}

impl<const N: usize> FaceIndices for [usize; N] {
    const ARITY: usize = N;

    #[inline]
    fn indices(&self) -> &[usize] {
        self.as_slice()
    }

    #[inline]
    fn offset(&self, by: usize) -> Self {
        self.map(|i| i + by)
    }
}

/// A mesh whose faces all have the same number of corners.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyMesh<F: FaceIndices> {
    points: Vec<Point3<f64>>,
    faces: Arc<[F]>,
}

/// A triangle mesh.
pub type TriMesh = PolyMesh<[usize; 3]>;

/// A quad mesh.
pub type QuadMesh = PolyMesh<[usize; 4]>;

/// Check that every face index points into a buffer of `num_points` points.
pub(crate) fn validate_faces<F: FaceIndices>(num_points: usize, faces: &[F]) -> Result<()> {
    for (fi, face) in faces.iter().enumerate() {
        if let Some(&vi) = face.indices().iter().find(|&&vi| vi >= num_points) {
            return Err(GeometryError::InvalidVertexIndex { face: fi, vertex: vi });
        }
    }
    Ok(())
}

impl<F: FaceIndices> PolyMesh<F> {
    /// Create a mesh, checking that every face index is in range.
    ///
    /// Degenerate faces are accepted; see [`PolyMesh::has_degenerate_faces`].
    ///
    /// # Example
    /// ```
    /// use procgeom::mesh::TriMesh;
    /// use nalgebra::Point3;
    ///
    /// let points = vec![
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    /// ];
    /// let mesh = TriMesh::new(points, vec![[0, 1, 2]]).unwrap();
    /// assert_eq!(mesh.num_faces(), 1);
    /// assert!(TriMesh::new(vec![], vec![[0, 1, 2]]).is_err());
    /// ```
    pub fn new(points: Vec<Point3<f64>>, faces: Vec<F>) -> Result<Self> {
        validate_faces(points.len(), &faces)?;
        Ok(Self {
            points,
            faces: faces.into(),
        })
    }

    /// A mesh with no points and no faces.
    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            faces: Arc::from(Vec::new()),
        }
    }

    /// Assemble a mesh whose indices are already known to be in range.
    pub(crate) fn from_parts(points: Vec<Point3<f64>>, faces: Arc<[F]>) -> Self {
        debug_assert!(validate_faces(points.len(), &faces).is_ok());
        Self { points, faces }
    }

    /// Number of corners per face.
    pub fn arity(&self) -> usize {
        F::ARITY
    }

    /// The point buffer.
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// The face buffer.
    pub fn faces(&self) -> &[F] {
        &self.faces
    }

    /// The shared face buffer.
    pub fn shared_faces(&self) -> &Arc<[F]> {
        &self.faces
    }

    /// Consume the mesh, returning its buffers.
    pub fn into_parts(self) -> (Vec<Point3<f64>>, Arc<[F]>) {
        (self.points, self.faces)
    }

    /// Number of points.
    pub fn num_vertices(&self) -> usize {
        self.points.len()
    }

    /// Number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of corners (`faces * arity`).
    pub fn num_corners(&self) -> usize {
        self.faces.len() * F::ARITY
    }

    /// Whether the mesh has no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Face `f`.
    pub fn face(&self, f: usize) -> F {
        self.faces[f]
    }

    /// The flattened corner buffer: every face's indices in order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.faces.iter().flat_map(|f| f.indices().iter().copied())
    }

    /// Points of face `f` in corner order.
    pub fn face_points(&self, f: usize) -> impl Iterator<Item = &Point3<f64>> + '_ {
        self.faces[f].indices().iter().map(move |&i| &self.points[i])
    }

    /// One point per corner, in corner order.
    pub fn points_by_corner(&self) -> Vec<Point3<f64>> {
        self.indices().map(|i| self.points[i]).collect()
    }

    /// Whether any face references the same point twice.
    pub fn has_degenerate_faces(&self) -> bool {
        self.faces.iter().any(|f| f.is_degenerate())
    }

    /// Whether every point is referenced by at least one face.
    pub fn are_all_vertices_used(&self) -> bool {
        let mut used = vec![false; self.points.len()];
        for i in self.indices() {
            used[i] = true;
        }
        used.into_iter().all(|u| u)
    }

    /// Face normal by Newell's method, unit length, zero for degenerate faces.
    pub fn face_normal(&self, f: usize) -> Vector3<f64> {
        let idx = self.faces[f].indices();
        let mut n = Vector3::<f64>::zeros();
        for (k, &i) in idx.iter().enumerate() {
            let p = &self.points[i];
            let q = &self.points[idx[(k + 1) % idx.len()]];
            n.x += (p.y - q.y) * (p.z + q.z);
            n.y += (p.z - q.z) * (p.x + q.x);
            n.z += (p.x - q.x) * (p.y + q.y);
        }
        let len = n.norm();
        if len < DEGENERATE_EPSILON {
            Vector3::zeros()
        } else {
            n / len
        }
    }

    /// Face area, as a triangle fan from the first corner.
    pub fn face_area(&self, f: usize) -> f64 {
        let idx = self.faces[f].indices();
        let p0 = &self.points[idx[0]];
        idx.windows(2)
            .skip(1)
            .map(|w| {
                let a = self.points[w[0]] - p0;
                let b = self.points[w[1]] - p0;
                0.5 * a.cross(&b).norm()
            })
            .sum()
    }

    /// Total surface area.
    pub fn area(&self) -> f64 {
        (0..self.num_faces()).map(|f| self.face_area(f)).sum()
    }

    /// Average of all points, or `None` for a mesh without points.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.points.is_empty() {
            return None;
        }
        let sum: Vector3<f64> = self.points.iter().map(|p| p.coords).sum();
        Some(Point3::from(sum / self.points.len() as f64))
    }

    /// Point closest to `x`.
    pub fn nearest_point(&self, x: &Point3<f64>) -> Option<Point3<f64>> {
        self.points
            .iter()
            .min_by(|a, b| (*a - x).norm_squared().total_cmp(&(*b - x).norm_squared()))
            .copied()
    }

    /// Point furthest from `x`.
    pub fn furthest_point(&self, x: &Point3<f64>) -> Option<Point3<f64>> {
        self.points
            .iter()
            .max_by(|a, b| (*a - x).norm_squared().total_cmp(&(*b - x).norm_squared()))
            .copied()
    }

    /// Point maximising the summed distance to `x0` and `x1`.
    pub fn furthest_point_from_pair(&self, x0: &Point3<f64>, x1: &Point3<f64>) -> Option<Point3<f64>> {
        let score = |p: &Point3<f64>| (p - x0).norm() + (p - x1).norm();
        self.points
            .iter()
            .max_by(|a, b| score(*a).total_cmp(&score(*b)))
            .copied()
    }

    /// Whether all points lie on one plane within `tolerance`.
    ///
    /// Fewer than four points are always planar. Collinear inputs are planar.
    pub fn is_planar(&self, tolerance: f64) -> bool {
        let pts = &self.points;
        if pts.len() < 4 {
            return true;
        }
        let p0 = pts[0];
        let Some(p1) = pts.iter().find(|p| (*p - p0).norm() > tolerance) else {
            return true;
        };
        let d1 = p1 - p0;
        let normal = pts
            .iter()
            .map(|p| d1.cross(&(p - p0)))
            .find(|n| n.norm() > tolerance);
        let Some(normal) = normal else {
            return true;
        };
        let normal = normal.normalize();
        pts.iter().all(|p| normal.dot(&(p - p0)).abs() <= tolerance)
    }

    /// Same face count and, face by face, the same corner positions.
    pub fn geometry_equals(&self, other: &PolyMesh<F>, tolerance: f64) -> bool {
        self.num_faces() == other.num_faces()
            && (0..self.num_faces()).all(|f| {
                self.face_points(f)
                    .zip(other.face_points(f))
                    .all(|(a, b)| approx_eq(a, b, tolerance))
            })
    }

    /// Points moved so the bounding box is centred at the origin and scaled
    /// so its largest extent is one.
    pub fn normalized_points(&self) -> Vec<Point3<f64>> {
        let b = self.bounds();
        let size = b.extent().max();
        let scale = if size > DEGENERATE_EPSILON { 1.0 / size } else { 1.0 };
        let c = b.center();
        self.points
            .iter()
            .map(|p| Point3::from((p - c) * scale))
            .collect()
    }

    /// Largest distance between corresponding corners after normalising both
    /// meshes. `None` when the face counts differ.
    pub fn max_normalized_distance(&self, other: &PolyMesh<F>) -> Option<f64> {
        if self.num_faces() != other.num_faces() {
            return None;
        }
        let a = self.normalized_points();
        let b = other.normalized_points();
        Some(
            self.indices()
                .zip(other.indices())
                .map(|(i, j)| (a[i] - b[j]).norm())
                .fold(0.0, f64::max),
        )
    }
}

impl<F: FaceIndices> Default for PolyMesh<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F: FaceIndices> Bounded for PolyMesh<F> {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.points)
    }
}

impl<F: FaceIndices> Deformable<Point3<f64>> for PolyMesh<F> {
    fn deform<G>(&self, f: G) -> Self
    where
        G: Fn(&Point3<f64>) -> Point3<f64> + Send + Sync + 'static,
    {
        Self {
            points: self.points.iter().map(f).collect(),
            faces: Arc::clone(&self.faces),
        }
    }
}

impl TriMesh {
    /// The three corner points of face `f`.
    pub fn triangle(&self, f: usize) -> [Point3<f64>; 3] {
        self.faces[f].map(|i| self.points[i])
    }
}

impl QuadMesh {
    /// The four corner points of face `f`.
    pub fn quad(&self, f: usize) -> [Point3<f64>; 4] {
        self.faces[f].map(|i| self.points[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::transform::Transformable;

    fn unit_square() -> QuadMesh {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        QuadMesh::new(points, vec![[0, 1, 2, 3]]).unwrap()
    }

    #[test]
    fn test_invalid_vertex_index() {
        let points = vec![Point3::origin(); 3];
        let err = TriMesh::new(points, vec![[0, 1, 2], [0, 1, 3]]).unwrap_err();
        assert_eq!(err, GeometryError::InvalidVertexIndex { face: 1, vertex: 3 });
    }

    #[test]
    fn test_degenerate_faces_are_reported_not_rejected() {
        let points = vec![Point3::origin(); 3];
        let mesh = TriMesh::new(points, vec![[0, 1, 1]]).unwrap();
        assert!(mesh.has_degenerate_faces());
        assert!(!unit_square().has_degenerate_faces());
        assert!([0usize, 1, 2, 0].is_degenerate());
    }

    #[test]
    fn test_area_and_normal() {
        let m = unit_square();
        assert!((m.area() - 1.0).abs() < 1e-12);
        assert!((m.face_normal(0) - Vector3::z()).norm() < 1e-12);
        assert_eq!(m.num_corners(), 4);
        assert_eq!(m.indices().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_face_normal_triangle_and_quad() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let tri = TriMesh::new(points, vec![[0, 1, 2]]).unwrap();
        let expected = Vector3::new(0.0, -1.0, 1.0) / 2.0_f64.sqrt();
        assert!((tri.face_normal(0) - expected).norm() < 1e-12);

        // a quad standing in the xz plane faces -y
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let quad = QuadMesh::new(points, vec![[0, 1, 2, 3], [3, 2, 1, 0]]).unwrap();
        assert!((quad.face_normal(0) + Vector3::y()).norm() < 1e-12);
        assert!((quad.face_normal(1) - Vector3::y()).norm() < 1e-12);

        let flat = TriMesh::new(vec![Point3::origin(); 3], vec![[0, 1, 2]]).unwrap();
        assert_eq!(flat.face_normal(0), Vector3::zeros());
    }

    #[test]
    fn test_deform_shares_faces() {
        let m = unit_square();
        let moved = m.translate(Vector3::new(0.0, 0.0, 2.0));
        assert!(Arc::ptr_eq(m.shared_faces(), moved.shared_faces()));
        assert_eq!(moved.points()[0], Point3::new(0.0, 0.0, 2.0));
        assert!(m.geometry_equals(&m.clone(), 1e-9));
        assert!(!m.geometry_equals(&moved, 1e-9));
        assert_eq!(m.max_normalized_distance(&moved), Some(0.0));
    }

    #[test]
    fn test_planarity_and_queries() {
        let m = unit_square();
        assert!(m.is_planar(1e-9));
        let bent = m.deform(|p| if p.x > 0.5 && p.y > 0.5 { p + Vector3::z() } else { *p });
        assert!(!bent.is_planar(1e-9));

        assert_eq!(m.centroid(), Some(Point3::new(0.5, 0.5, 0.0)));
        assert_eq!(
            m.nearest_point(&Point3::new(0.9, 0.1, 0.0)),
            Some(Point3::new(1.0, 0.0, 0.0))
        );
        assert_eq!(
            m.furthest_point(&Point3::origin()),
            Some(Point3::new(1.0, 1.0, 0.0))
        );
        assert!(m.are_all_vertices_used());
    }
}
