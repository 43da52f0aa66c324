//! # procgeom
//!
//! A procedural geometry kernel: curves and surfaces defined by functions,
//! tessellated into indexed meshes, analysed through derived connectivity.
//!
//! procgeom keeps shapes immutable and cheap to share. Curves and parametric
//! surfaces are closures evaluated on demand; meshes hold a point buffer and a
//! shared face buffer; connectivity and curvature are computed from a mesh
//! snapshot when asked for.
//!
//! ## Features
//!
//! - **Procedural shapes**: composable curves and parametric surfaces with
//!   catalogues of standard ones (knots, tori, saddles, ...)
//! - **Meshes**: triangle, quad and grid meshes with `[usize; N]` faces
//! - **Topology**: corner-based adjacency, border detection and ordered one-rings
//! - **Curvature**: Gaussian, mean and principal curvature per vertex
//! - **Spatial queries**: a bounding-box k-d tree
//! - **Parallelism**: surface evaluation and per-vertex analysis run on rayon
//!
//! ## Quick Start
//!
//! ```
//! use procgeom::prelude::*;
//!
//! // Tessellate a torus; both parameter axes wrap, so the mesh has no border
//! let grid = tessellate(&surfaces::torus(2.0, 0.5), 32, 16);
//! assert_eq!(grid.num_faces(), 32 * 16);
//!
//! // Derive connectivity
//! let topo = Topology::build(grid.quad_mesh()).unwrap();
//! assert!(topo.is_closed());
//! assert_eq!(topo.num_edges(), 2 * 32 * 16);
//!
//! // Analyse
//! let curvature = compute_curvature(&topo);
//! println!("K at vertex 0: {}", curvature.gaussian(VertexId::new(0)));
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use procgeom::prelude::*;
//! use nalgebra::Point3;
//!
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//!
//! let faces = vec![
//!     [0, 2, 1], // bottom
//!     [0, 1, 3], // front
//!     [1, 2, 3], // right
//!     [2, 0, 3], // left
//! ];
//!
//! let mesh = TriMesh::new(points, faces).unwrap();
//! assert_eq!(mesh.num_vertices(), 4);
//! assert_eq!(mesh.num_faces(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod geom;
pub mod math;
pub mod mesh;
pub mod procedural;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use procgeom::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::curvature::{compute_curvature, grid_curvature, CurvatureResult};
    pub use crate::algo::kdtree::BoundingTree;
    pub use crate::algo::neighbourhood::VertexNeighbourhood;
    pub use crate::algo::tessellate::tessellate;
    pub use crate::error::{GeometryError, Result};
    pub use crate::geom::{
        Aabb, Bounded, Deformable, LineSegment2, LineSegment3, PolyLine2, PolyLine3, Polygon,
        Transformable, Transformable2D,
    };
    pub use crate::mesh::{
        merge, CornerId, FaceId, FaceIndices, GridMesh, MeshBuilder, PolyMesh, QuadMesh,
        Topology, TriMesh, VertexId,
    };
    pub use crate::procedural::{
        curves, surfaces, Curve, Curve2, Curve3, ParametricSurface, StandardPlane,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_tetrahedron() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];

        let faces = vec![
            [0, 2, 1], // bottom
            [0, 1, 3], // front
            [1, 2, 3], // right
            [2, 0, 3], // left
        ];

        let mesh = TriMesh::new(points, faces).unwrap();
        let topo = Topology::build(&mesh).unwrap();

        assert_eq!(topo.num_vertices(), 4);
        assert_eq!(topo.num_faces(), 4);
        assert_eq!(topo.num_half_edges(), 12);
        assert_eq!(topo.num_edges(), 6);
        assert!(topo.is_closed());
        assert!(!topo.is_non_manifold());

        // every vertex of a closed tetrahedron has a full three-neighbour ring
        for v in 0..4 {
            let ring = topo.vertex_neighbourhood(VertexId::new(v)).unwrap();
            assert_eq!(ring.len(), 3);
        }
    }

    #[test]
    fn test_merge_then_build_topology() {
        let quad = surfaces::plane();
        let a = tessellate(&quad, 2, 2);
        let b = a.translate(nalgebra::Vector3::new(3.0, 0.0, 0.0));
        let merged = merge([a.quad_mesh(), b.quad_mesh()]);
        assert_eq!(merged.num_vertices(), 18);
        assert_eq!(merged.num_faces(), 8);
        let topo = Topology::build(&merged).unwrap();
        // two separate 2x2 patches, 8 border edges each
        assert_eq!(topo.border_edges().count(), 16);
    }
}
