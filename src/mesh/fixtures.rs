//! Closed meshes shared by unit tests.

use std::collections::BTreeMap;

use nalgebra::Point3;

use super::{MeshBuilder, TriMesh};
use crate::geom::transform::{Deformable, Transformable};

/// Regular icosahedron inscribed in the unit sphere, wound outward.
///
/// Vertices are the cyclic permutations of `(0, ±1, ±φ)`; faces are the
/// triples of mutually adjacent vertices.
pub(crate) fn icosahedron() -> TriMesh {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let mut points = Vec::with_capacity(12);
    for a in [-1.0, 1.0] {
        for b in [-phi, phi] {
            points.push(Point3::new(0.0, a, b));
            points.push(Point3::new(a, b, 0.0));
            points.push(Point3::new(b, 0.0, a));
        }
    }

    // edges have length 2 before scaling
    let adjacent = |i: usize, j: usize| ((points[i] - points[j]).norm() - 2.0).abs() < 1e-9;
    let mut faces = Vec::with_capacity(20);
    for i in 0..12 {
        for j in (i + 1)..12 {
            for k in (j + 1)..12 {
                if !(adjacent(i, j) && adjacent(j, k) && adjacent(i, k)) {
                    continue;
                }
                let n = (points[j] - points[i]).cross(&(points[k] - points[i]));
                if n.dot(&points[i].coords) > 0.0 {
                    faces.push([i, j, k]);
                } else {
                    faces.push([i, k, j]);
                }
            }
        }
    }

    let radius = (1.0 + phi * phi).sqrt();
    TriMesh::new(points, faces).unwrap().scale_uniform(1.0 / radius)
}

/// Icosahedron split `levels` times, every new point pushed onto the unit
/// sphere.
pub(crate) fn icosphere(levels: usize) -> TriMesh {
    (0..levels).fold(icosahedron(), |mesh, _| {
        split_triangles(&mesh).deform(|p| Point3::from(p.coords.normalize()))
    })
}

/// Split every triangle into four at its edge midpoints.
fn split_triangles(mesh: &TriMesh) -> TriMesh {
    let points = mesh.points();
    let mut builder = MeshBuilder::<[usize; 3]>::with_capacity(
        points.len() * 4,
        mesh.num_faces() * 4,
    );
    builder.add_points(points.iter().copied());

    let mut midpoints: BTreeMap<(usize, usize), usize> = BTreeMap::new();
    let mut midpoint = |builder: &mut MeshBuilder<[usize; 3]>, a: usize, b: usize| {
        *midpoints
            .entry((a.min(b), a.max(b)))
            .or_insert_with(|| builder.add_point(nalgebra::center(&points[a], &points[b])))
    };

    for &[a, b, c] in mesh.faces() {
        let ab = midpoint(&mut builder, a, b);
        let bc = midpoint(&mut builder, b, c);
        let ca = midpoint(&mut builder, c, a);
        builder.add_faces([[a, ab, ca], [ab, b, bc], [ca, bc, c], [ab, bc, ca]]);
    }
    builder.build().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icosahedron_shape() {
        let mesh = icosahedron();
        assert_eq!(mesh.num_vertices(), 12);
        assert_eq!(mesh.num_faces(), 20);
        for p in mesh.points() {
            assert!((p.coords.norm() - 1.0).abs() < 1e-12);
        }
        for f in 0..mesh.num_faces() {
            let centroid = mesh.face_points(f).map(|p| p.coords).sum::<nalgebra::Vector3<f64>>();
            assert!(mesh.face_normal(f).dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn test_icosphere_counts() {
        let mesh = icosphere(2);
        assert_eq!(mesh.num_faces(), 20 * 16);
        // V = 10 * 4^n + 2
        assert_eq!(mesh.num_vertices(), 162);
    }
}
