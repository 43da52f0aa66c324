//! Mesh data structures.
//!
//! # Overview
//!
//! The primary type is [`PolyMesh`], a point buffer plus a shared buffer of
//! fixed-arity face records. [`TriMesh`] and [`QuadMesh`] are the two arities
//! the rest of the crate works with, and [`GridMesh`] is a quad mesh that
//! remembers the parametric grid it was sampled on.
//!
//! Connectivity is not stored in the mesh. [`Topology`] derives it on demand
//! from a snapshot, using type-safe ids:
//! - [`VertexId`] - Identifies a vertex
//! - [`FaceId`] - Identifies a face
//! - [`CornerId`] - Identifies a corner (and the directed edge leaving it)
//!
//! # Construction
//!
//! ```
//! use procgeom::mesh::{QuadMesh, Topology};
//! use nalgebra::Point3;
//!
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mesh = QuadMesh::new(points, vec![[0, 1, 2, 3]]).unwrap();
//! let topo = Topology::build(&mesh).unwrap();
//! assert_eq!(topo.num_edges(), 4);
//! ```

mod builder;
mod compose;
#[cfg(test)]
pub(crate) mod fixtures;
mod grid;
mod index;
mod poly;
mod topology;

pub use builder::MeshBuilder;
pub use compose::{clone_translated, merge, simple_polygon_fan};
pub use grid::GridMesh;
pub use index::{CornerId, FaceId, VertexId};
pub use poly::{FaceIndices, PolyMesh, QuadMesh, TriMesh};
pub use topology::Topology;
