//! Incremental mesh construction.
//!
//! A [`MeshBuilder`] accumulates points and faces, possibly from other meshes,
//! and is consumed by [`MeshBuilder::build`], which validates every index once.

use nalgebra::Point3;

use super::poly::{FaceIndices, PolyMesh};
use crate::error::Result;

/// Accumulates points and faces for a [`PolyMesh`].
///
/// # Example
/// ```
/// use procgeom::mesh::{MeshBuilder, TriMesh};
/// use nalgebra::Point3;
///
/// let mut builder = MeshBuilder::<[usize; 3]>::new();
/// let a = builder.add_point(Point3::new(0.0, 0.0, 0.0));
/// let b = builder.add_point(Point3::new(1.0, 0.0, 0.0));
/// let c = builder.add_point(Point3::new(0.0, 1.0, 0.0));
/// builder.add_face([a, b, c]);
///
/// let mesh: TriMesh = builder.build().unwrap();
/// assert_eq!(mesh.num_faces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MeshBuilder<F: FaceIndices> {
    points: Vec<Point3<f64>>,
    faces: Vec<F>,
}

impl<F: FaceIndices> MeshBuilder<F> {
    /// An empty builder.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// An empty builder with room for the given counts.
    pub fn with_capacity(points: usize, faces: usize) -> Self {
        Self {
            points: Vec::with_capacity(points),
            faces: Vec::with_capacity(faces),
        }
    }

    /// Append a point, returning its index.
    pub fn add_point(&mut self, p: Point3<f64>) -> usize {
        self.points.push(p);
        self.points.len() - 1
    }

    /// Append points.
    pub fn add_points<I: IntoIterator<Item = Point3<f64>>>(&mut self, points: I) -> &mut Self {
        self.points.extend(points);
        self
    }

    /// Append a face. Indices are checked by [`MeshBuilder::build`].
    pub fn add_face(&mut self, face: F) -> &mut Self {
        self.faces.push(face);
        self
    }

    /// Append faces.
    pub fn add_faces<I: IntoIterator<Item = F>>(&mut self, faces: I) -> &mut Self {
        self.faces.extend(faces);
        self
    }

    /// Append a whole mesh, offsetting its faces past the points added so far.
    pub fn add_mesh(&mut self, mesh: &PolyMesh<F>) -> &mut Self {
        let offset = self.points.len();
        self.points.extend_from_slice(mesh.points());
        self.faces.extend(mesh.faces().iter().map(|f| f.offset(offset)));
        self
    }

    /// Points added so far.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Faces added so far.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Finish the mesh.
    ///
    /// Fails with [`GeometryError::InvalidVertexIndex`](crate::error::GeometryError::InvalidVertexIndex)
    /// if a face references a point that was never added.
    pub fn build(self) -> Result<PolyMesh<F>> {
        PolyMesh::new(self.points, self.faces)
    }

    /// Consume without validating.
    pub(crate) fn into_parts(self) -> (Vec<Point3<f64>>, Vec<F>) {
        (self.points, self.faces)
    }
}

impl<F: FaceIndices> Default for MeshBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}
