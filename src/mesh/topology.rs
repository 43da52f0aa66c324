//! Corner-based connectivity for triangle and quad meshes.
//!
//! [`Topology`] snapshots a mesh's points and flattened corner buffer and
//! derives, in two linear passes over the corners:
//!
//! - the faces incident to each vertex, in insertion order;
//! - for each corner, the face across the directed edge leaving it.
//!
//! Corner `c` belongs to face `c / arity`. Its directed edge runs from
//! `vertex(c)` to `vertex(next(c))`. An edge with no face across it is a
//! border edge.
//!
//! The topology is a snapshot: it never observes later changes to the mesh.
//! Rebuild it when the mesh changes.
//!
//! # Example
//!
//! ```
//! use procgeom::mesh::{QuadMesh, Topology};
//! use nalgebra::Point3;
//!
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(2.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(2.0, 1.0, 0.0),
//! ];
//! let mesh = QuadMesh::new(points, vec![[0, 1, 4, 3], [1, 2, 5, 4]]).unwrap();
//! let topo = Topology::build(&mesh).unwrap();
//!
//! assert_eq!(topo.num_edges(), 7);
//! assert_eq!(topo.border_edges().count(), 6);
//! assert!(!topo.is_closed());
//! ```

use log::debug;
use nalgebra::Point3;

use super::index::{CornerId, FaceId, VertexId};
use super::poly::{FaceIndices, PolyMesh};
use crate::algo::neighbourhood::VertexNeighbourhood;
use crate::error::{GeometryError, Result};

/// Connectivity derived from a triangle or quad mesh.
#[derive(Debug, Clone)]
pub struct Topology {
    arity: usize,
    points: Vec<Point3<f64>>,
    corners: Vec<usize>,
    vertex_faces: Vec<Vec<FaceId>>,
    opposite: Vec<FaceId>,
    non_manifold: bool,
}

impl Topology {
    /// Derive the topology of a mesh.
    ///
    /// Fails with [`GeometryError::UnsupportedTopology`] unless the mesh has
    /// three or four corners per face. Non-manifold edges do not fail the
    /// build; they set [`Topology::is_non_manifold`].
    pub fn build<F: FaceIndices>(mesh: &PolyMesh<F>) -> Result<Self> {
        let arity = F::ARITY;
        if arity != 3 && arity != 4 {
            return Err(GeometryError::UnsupportedTopology { arity });
        }

        let points = mesh.points().to_vec();
        let corners: Vec<usize> = mesh.indices().collect();

        let mut vertex_faces: Vec<Vec<FaceId>> = vec![Vec::new(); points.len()];
        for (c, &v) in corners.iter().enumerate() {
            let f = FaceId::new(c / arity);
            let faces = &mut vertex_faces[v];
            // corners of one face are consecutive, so a repeat can only be the last entry
            if faces.last() != Some(&f) {
                faces.push(f);
            }
        }

        let mut topo = Self {
            arity,
            points,
            corners,
            vertex_faces,
            opposite: Vec::new(),
            non_manifold: false,
        };
        topo.compute_opposites();
        Ok(topo)
    }

    /// Pair every corner's edge with a face across it.
    ///
    /// Where more than two faces share an edge, the last one found in
    /// vertex-to-face order is kept and the topology is flagged non-manifold.
    fn compute_opposites(&mut self) {
        let mut opposite = vec![FaceId::invalid(); self.corners.len()];
        let mut non_manifold = false;

        for (c, slot) in opposite.iter_mut().enumerate() {
            let corner = CornerId::new(c);
            let face = self.face_of_corner(corner);
            let v1 = self.corners[self.next_corner(corner).index()];
            for &f1 in &self.vertex_faces[self.corners[c]] {
                if f1 == face || !self.face_has_vertex(f1, v1) {
                    continue;
                }
                if slot.is_valid() {
                    non_manifold = true;
                }
                *slot = f1;
            }
        }

        if non_manifold {
            debug!(
                "topology: non-manifold edges among {} faces",
                self.num_faces()
            );
        }
        self.opposite = opposite;
        self.non_manifold = non_manifold;
    }

    fn face_has_vertex(&self, f: FaceId, v: usize) -> bool {
        let start = f.index() * self.arity;
        self.corners[start..start + self.arity].contains(&v)
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.points.len()
    }

    /// Number of faces.
    pub fn num_faces(&self) -> usize {
        self.corners.len() / self.arity
    }

    /// Number of corners.
    pub fn num_corners(&self) -> usize {
        self.corners.len()
    }

    /// Number of half-edges, one per corner.
    pub fn num_half_edges(&self) -> usize {
        self.corners.len()
    }

    /// Number of undirected edges.
    ///
    /// A border half-edge counts once; an interior edge is counted from the
    /// side whose face index is lower.
    pub fn num_edges(&self) -> usize {
        self.opposite
            .iter()
            .enumerate()
            .filter(|(c, opp)| !opp.is_valid() || opp.index() > c / self.arity)
            .count()
    }

    /// Corners per face (3 or 4).
    pub fn corners_per_face(&self) -> usize {
        self.arity
    }

    /// The face a corner belongs to.
    #[inline]
    pub fn face_of_corner(&self, c: CornerId) -> FaceId {
        FaceId::new(c.index() / self.arity)
    }

    /// The first corner of a face.
    #[inline]
    pub fn first_corner_of_face(&self, f: FaceId) -> CornerId {
        CornerId::new(f.index() * self.arity)
    }

    /// The corners of a face, in order.
    pub fn corners_of_face(&self, f: FaceId) -> impl Iterator<Item = CornerId> {
        let start = f.index() * self.arity;
        (start..start + self.arity).map(CornerId::new)
    }

    /// The next corner around the same face.
    #[inline]
    pub fn next_corner(&self, c: CornerId) -> CornerId {
        let i = c.index();
        let base = i - i % self.arity;
        CornerId::new(base + (i % self.arity + 1) % self.arity)
    }

    /// The previous corner around the same face.
    #[inline]
    pub fn prev_corner(&self, c: CornerId) -> CornerId {
        let i = c.index();
        let base = i - i % self.arity;
        CornerId::new(base + (i % self.arity + self.arity - 1) % self.arity)
    }

    /// Whether corner `c` belongs to face `f`.
    pub fn face_has_corner(&self, f: FaceId, c: CornerId) -> bool {
        self.face_of_corner(c) == f
    }

    /// The vertex at a corner.
    #[inline]
    pub fn vertex_of_corner(&self, c: CornerId) -> VertexId {
        VertexId::new(self.corners[c.index()])
    }

    /// Position of a vertex.
    #[inline]
    pub fn point_of_vertex(&self, v: VertexId) -> &Point3<f64> {
        &self.points[v.index()]
    }

    /// All vertex positions.
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Faces incident to a vertex, each once, in insertion order.
    pub fn faces_of_vertex(&self, v: VertexId) -> &[FaceId] {
        &self.vertex_faces[v.index()]
    }

    /// Faces incident to the vertex at a corner.
    pub fn faces_of_corner(&self, c: CornerId) -> &[FaceId] {
        self.faces_of_vertex(self.vertex_of_corner(c))
    }

    /// The vertices of a face, in corner order.
    pub fn vertices_of_face(&self, f: FaceId) -> impl Iterator<Item = VertexId> + '_ {
        self.corners_of_face(f).map(move |c| self.vertex_of_corner(c))
    }

    /// The face across the edge leaving a corner, `None` on a border.
    ///
    /// On a non-manifold edge this is the last incident face of the edge's
    /// start vertex.
    #[inline]
    pub fn opposite_face(&self, c: CornerId) -> Option<FaceId> {
        self.opposite[c.index()].valid()
    }

    /// Whether the edge leaving a corner has no face across it.
    #[inline]
    pub fn is_border_edge(&self, c: CornerId) -> bool {
        !self.opposite[c.index()].is_valid()
    }

    /// Whether any edge of a face is a border edge.
    pub fn is_border_face(&self, f: FaceId) -> bool {
        self.corners_of_face(f).any(|c| self.is_border_edge(c))
    }

    /// Faces across the edges of `f`, in corner order, skipping borders.
    pub fn bordering_faces(&self, f: FaceId) -> impl Iterator<Item = FaceId> + '_ {
        self.corners_of_face(f).filter_map(move |c| self.opposite_face(c))
    }

    /// All border edges, as the corners they leave.
    pub fn border_edges(&self) -> impl Iterator<Item = CornerId> + '_ {
        (0..self.num_corners())
            .map(CornerId::new)
            .filter(move |&c| self.is_border_edge(c))
    }

    /// All faces with at least one border edge.
    pub fn border_faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.num_faces())
            .map(FaceId::new)
            .filter(move |&f| self.is_border_face(f))
    }

    /// Endpoints of the edge leaving a corner.
    pub fn edge_vertices(&self, c: CornerId) -> [VertexId; 2] {
        [self.vertex_of_corner(c), self.vertex_of_corner(self.next_corner(c))]
    }

    /// Endpoint positions of the edge leaving a corner.
    pub fn edge_points(&self, c: CornerId) -> [Point3<f64>; 2] {
        self.edge_vertices(c).map(|v| *self.point_of_vertex(v))
    }

    fn corner_of_vertex_in_face(&self, f: FaceId, v: VertexId) -> Option<CornerId> {
        self.corners_of_face(f).find(|&c| self.vertex_of_corner(c) == v)
    }

    /// Vertices sharing an edge with `v`, each once, in first-seen order.
    pub fn neighbour_vertices(&self, v: VertexId) -> Vec<VertexId> {
        let mut out = Vec::new();
        for &f in self.faces_of_vertex(v) {
            for c in self.corners_of_face(f).filter(|&c| self.vertex_of_corner(c) == v) {
                for n in [
                    self.vertex_of_corner(self.next_corner(c)),
                    self.vertex_of_corner(self.prev_corner(c)),
                ] {
                    if n != v && !out.contains(&n) {
                        out.push(n);
                    }
                }
            }
        }
        out
    }

    /// Whether some edge had more than one face across it.
    pub fn is_non_manifold(&self) -> bool {
        self.non_manifold
    }

    /// Whether the mesh has no border edges.
    pub fn is_closed(&self) -> bool {
        self.opposite.iter().all(|f| f.is_valid())
    }

    /// The ordered one-ring around `v`.
    ///
    /// Each incident face contributes a wedge from the vertex after `v` to the
    /// vertex before it; wedges are chained end to start. Returns `None` for
    /// isolated vertices, border vertices (the chain does not close), and
    /// vertices whose wedges do not form a single cycle.
    pub fn vertex_neighbourhood(&self, v: VertexId) -> Option<VertexNeighbourhood> {
        let faces = self.faces_of_vertex(v);
        if faces.is_empty() {
            return None;
        }

        let wedges: Vec<(VertexId, VertexId)> = faces
            .iter()
            .filter_map(|&f| self.corner_of_vertex_in_face(f, v))
            .map(|c| {
                (
                    self.vertex_of_corner(self.next_corner(c)),
                    self.vertex_of_corner(self.prev_corner(c)),
                )
            })
            .collect();

        let &(first, mut current) = wedges.first()?;
        let mut used = vec![false; wedges.len()];
        used[0] = true;
        let mut ring = vec![first];

        while current != first {
            ring.push(current);
            let next = (0..wedges.len()).find(|&i| !used[i] && wedges[i].0 == current)?;
            used[next] = true;
            current = wedges[next].1;
        }

        if used.iter().any(|u| !u) {
            return None;
        }

        Some(VertexNeighbourhood::new(
            *self.point_of_vertex(v),
            ring.into_iter().map(|n| *self.point_of_vertex(n)).collect(),
        ))
    }
}
