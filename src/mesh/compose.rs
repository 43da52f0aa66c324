//! Combining and copying meshes.

use nalgebra::{Point3, Vector3};

use super::builder::MeshBuilder;
use super::poly::{FaceIndices, PolyMesh, TriMesh};
use crate::geom::transform::Transformable;

/// Concatenate meshes into one.
///
/// Points are appended in order and each mesh's faces are offset by the number
/// of points that came before it.
///
/// # Example
/// ```
/// use procgeom::mesh::{merge, TriMesh};
/// use nalgebra::Point3;
///
/// let tri = TriMesh::new(vec![Point3::origin(); 3], vec![[0, 1, 2]]).unwrap();
/// let merged = merge(&[tri.clone(), tri]);
/// assert_eq!(merged.num_vertices(), 6);
/// assert_eq!(merged.faces()[1], [3, 4, 5]);
/// ```
pub fn merge<'a, F, I>(meshes: I) -> PolyMesh<F>
where
    F: FaceIndices,
    I: IntoIterator<Item = &'a PolyMesh<F>>,
{
    let mut builder = MeshBuilder::new();
    for mesh in meshes {
        builder.add_mesh(mesh);
    }
    // offsets keep every index in range of the accumulated points
    let (points, faces) = builder.into_parts();
    PolyMesh::from_parts(points, faces.into())
}

/// Lazily produce one translated copy of `mesh` per offset.
pub fn clone_translated<'a, F, I>(
    mesh: &'a PolyMesh<F>,
    offsets: I,
) -> impl Iterator<Item = PolyMesh<F>> + 'a
where
    F: FaceIndices,
    I: IntoIterator<Item = Vector3<f64>>,
    I::IntoIter: 'a,
{
    offsets.into_iter().map(move |offset| mesh.translate(offset))
}

/// Fan-triangulate a simple polygon around its centroid.
///
/// The centroid is appended as the last point; face `i` is
/// `[i, i + 1, centroid]` with the last edge wrapping to the first point.
/// Fewer than three points give an empty mesh.
pub fn simple_polygon_fan(points: &[Point3<f64>]) -> TriMesh {
    let n = points.len();
    if n < 3 {
        return TriMesh::empty();
    }
    let centroid = Point3::from(points.iter().map(|p| p.coords).sum::<Vector3<f64>>() / n as f64);
    let mut all = points.to_vec();
    all.push(centroid);
    let faces: Vec<[usize; 3]> = (0..n).map(|i| [i, (i + 1) % n, n]).collect();
    TriMesh::from_parts(all, faces.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::QuadMesh;

    fn unit_quad() -> QuadMesh {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        QuadMesh::new(points, vec![[0, 1, 2, 3]]).unwrap()
    }

    #[test]
    fn test_merge_counts_and_offsets() {
        let q = unit_quad();
        let copies: Vec<QuadMesh> =
            clone_translated(&q, (0..3).map(|i| Vector3::new(2.0 * i as f64, 0.0, 0.0))).collect();
        assert_eq!(copies.len(), 3);
        assert_eq!(copies[2].points()[0], Point3::new(4.0, 0.0, 0.0));

        let merged = merge(&copies);
        assert_eq!(merged.num_vertices(), 12);
        assert_eq!(merged.num_faces(), 3);
        for (k, face) in merged.faces().iter().enumerate() {
            assert_eq!(*face, [0, 1, 2, 3].map(|i| i + 4 * k));
        }
        assert_eq!(merged.points()[8], Point3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_merge_nothing() {
        let none: Vec<QuadMesh> = Vec::new();
        let merged = merge(&none);
        assert!(merged.is_empty());
        assert_eq!(merged.num_vertices(), 0);
    }

    #[test]
    fn test_polygon_fan() {
        let square = unit_quad();
        let fan = simple_polygon_fan(square.points());
        assert_eq!(fan.num_faces(), 4);
        assert_eq!(fan.points()[4], Point3::new(0.5, 0.5, 0.0));
        assert_eq!(fan.faces()[3], [3, 0, 4]);
        assert!((fan.area() - 1.0).abs() < 1e-12);
        assert!(simple_polygon_fan(&square.points()[..2]).is_empty());
    }
}
