//! Discrete curvature from one-ring neighbourhoods.
//!
//! Curvature is estimated per vertex from its ordered ring of neighbours:
//!
//! - **Gaussian curvature K**: angle defect over the barycentric cell area,
//!   `(2π - Σθ) / A`
//! - **Mean curvature H**: half the length of the cotangent Laplacian, negative
//!   when the Laplacian points against the averaged ring normal
//! - **Principal curvatures k1, k2**: `H ± sqrt(H² - K)`, with a negative
//!   radicand clamped to zero
//!
//! Vertices without a closed ring (border or non-manifold vertices) report zero.
//!
//! # Example
//!
//! ```
//! use procgeom::algo::curvature::compute_curvature;
//! use procgeom::algo::tessellate::tessellate;
//! use procgeom::mesh::{Topology, VertexId};
//! use procgeom::procedural::surfaces;
//!
//! let grid = tessellate(&surfaces::torus(2.0, 0.5), 32, 16);
//! let topo = Topology::build(grid.quad_mesh()).unwrap();
//! let result = compute_curvature(&topo);
//!
//! let (k1, k2) = result.principal(VertexId::new(0));
//! assert!(k1 >= k2);
//! ```
//!
//! # References
//!
//! - Meyer, M., et al. (2003). "Discrete Differential-Geometry Operators for
//!   Triangulated 2-Manifolds." Visualization and Mathematics III.

use std::f64::consts::PI;

use rayon::prelude::*;

use super::neighbourhood::VertexNeighbourhood;
use crate::math::DEGENERATE_EPSILON;
use crate::mesh::{GridMesh, Topology, VertexId};

/// Curvature of a single vertex ring.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VertexCurvature {
    /// Barycentric cell area.
    pub cell_area: f64,
    /// Sum of the wedge angles at the centre.
    pub angle_sum: f64,
    /// Gaussian curvature (K).
    pub gaussian: f64,
    /// Mean curvature (H), signed.
    pub mean: f64,
    /// Maximum principal curvature (k1).
    pub principal_max: f64,
    /// Minimum principal curvature (k2).
    pub principal_min: f64,
}

impl VertexCurvature {
    /// Estimate curvature at the centre of a triangle-fan ring, over its
    /// barycentric cell area.
    pub fn new(ring: &VertexNeighbourhood) -> Self {
        Self::with_cell_area(ring, ring.barycentric_cell_area())
    }

    /// Estimate curvature with an explicit cell area.
    ///
    /// Rings sampled from a quad grid own [`VertexNeighbourhood::quad_cell_area`]
    /// rather than a third of their wedges.
    pub fn with_cell_area(ring: &VertexNeighbourhood, cell_area: f64) -> Self {
        let angle_sum: f64 = ring.angles().iter().sum();

        if cell_area < DEGENERATE_EPSILON {
            return Self {
                cell_area,
                angle_sum,
                ..Self::default()
            };
        }

        let k = (2.0 * PI - angle_sum) / cell_area;

        let laplacian = ring.cotangent_laplacian(cell_area);
        let h_unsigned = laplacian.norm() / 2.0;
        let sign = if laplacian.dot(&ring.average_normal()) >= 0.0 {
            1.0
        } else {
            -1.0
        };
        let h = sign * h_unsigned;

        let sqrt_disc = (h * h - k).max(0.0).sqrt();

        Self {
            cell_area,
            angle_sum,
            gaussian: k,
            mean: h,
            principal_max: h + sqrt_disc,
            principal_min: h - sqrt_disc,
        }
    }

    /// Shape index `(2/π) atan((k1 + k2) / (k1 - k2))`, zero at umbilics.
    pub fn shape_index(&self) -> f64 {
        shape_index(self.principal_max, self.principal_min)
    }

    /// Curvedness `sqrt((k1² + k2²) / 2)`.
    pub fn curvedness(&self) -> f64 {
        curvedness(self.principal_max, self.principal_min)
    }
}

fn shape_index(k1: f64, k2: f64) -> f64 {
    let diff = k1 - k2;
    if diff.abs() < DEGENERATE_EPSILON {
        0.0 // umbilic
    } else {
        (2.0 / PI) * ((k1 + k2) / diff).atan()
    }
}

fn curvedness(k1: f64, k2: f64) -> f64 {
    ((k1 * k1 + k2 * k2) / 2.0).sqrt()
}

/// Per-vertex curvature of a mesh, indexed like the topology's vertices.
///
/// Vertices without a closed ring hold zeros in every column.
#[derive(Debug, Clone, Default)]
pub struct CurvatureResult {
    /// Gaussian curvature (K) per vertex.
    gaussian: Vec<f64>,
    /// Mean curvature (H) per vertex (signed).
    mean: Vec<f64>,
    /// Maximum principal curvature (k1) per vertex.
    principal_max: Vec<f64>,
    /// Minimum principal curvature (k2) per vertex.
    principal_min: Vec<f64>,
    /// Barycentric cell area per vertex.
    cell_area: Vec<f64>,
}

impl CurvatureResult {
    fn from_vertices(results: Vec<VertexCurvature>) -> Self {
        let n = results.len();
        let mut out = Self {
            gaussian: Vec::with_capacity(n),
            mean: Vec::with_capacity(n),
            principal_max: Vec::with_capacity(n),
            principal_min: Vec::with_capacity(n),
            cell_area: Vec::with_capacity(n),
        };
        for vc in results {
            out.gaussian.push(vc.gaussian);
            out.mean.push(vc.mean);
            out.principal_max.push(vc.principal_max);
            out.principal_min.push(vc.principal_min);
            out.cell_area.push(vc.cell_area);
        }
        out
    }

    /// Angle defect over cell area at `v`.
    #[inline]
    pub fn gaussian(&self, v: VertexId) -> f64 {
        self.gaussian[v.index()]
    }

    /// Signed mean curvature at `v`.
    #[inline]
    pub fn mean(&self, v: VertexId) -> f64 {
        self.mean[v.index()]
    }

    /// `(k1, k2)` at `v`, with `k1 >= k2`.
    #[inline]
    pub fn principal(&self, v: VertexId) -> (f64, f64) {
        (self.principal_max[v.index()], self.principal_min[v.index()])
    }

    /// Barycentric cell area of a vertex, zero where no ring exists.
    #[inline]
    pub fn cell_area(&self, v: VertexId) -> f64 {
        self.cell_area[v.index()]
    }

    /// Gaussian curvature of every vertex, in vertex order.
    #[inline]
    pub fn gaussian_values(&self) -> &[f64] {
        &self.gaussian
    }

    /// Mean curvature of every vertex, in vertex order.
    #[inline]
    pub fn mean_values(&self) -> &[f64] {
        &self.mean
    }

    /// Number of vertices covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.gaussian.len()
    }

    /// Whether the source mesh had no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gaussian.is_empty()
    }

    /// Shape index at a vertex, in `[-1, 1]`: -1 cup, 0 saddle, 1 cap.
    pub fn shape_index(&self, v: VertexId) -> f64 {
        shape_index(self.principal_max[v.index()], self.principal_min[v.index()])
    }

    /// Curvedness at a vertex.
    pub fn curvedness(&self, v: VertexId) -> f64 {
        curvedness(self.principal_max[v.index()], self.principal_min[v.index()])
    }
}

/// Curvature at every vertex, from the one-rings chained by the topology.
///
/// Runs on the rayon pool; [`compute_curvature_sequential`] gives the same
/// values on the current thread.
pub fn compute_curvature(topology: &Topology) -> CurvatureResult {
    compute_curvature_impl(topology, true)
}

/// [`compute_curvature`] on the current thread.
pub fn compute_curvature_sequential(topology: &Topology) -> CurvatureResult {
    compute_curvature_impl(topology, false)
}

fn compute_curvature_impl(topology: &Topology, parallel: bool) -> CurvatureResult {
    let compute_vertex = |idx: usize| -> VertexCurvature {
        topology
            .vertex_neighbourhood(VertexId::new(idx))
            .map(|ring| VertexCurvature::new(&ring))
            .unwrap_or_default()
    };

    let n = topology.num_vertices();
    let results: Vec<VertexCurvature> = if parallel {
        (0..n).into_par_iter().map(compute_vertex).collect()
    } else {
        (0..n).map(compute_vertex).collect()
    };

    CurvatureResult::from_vertices(results)
}

/// Curvature over the 4-neighbour rings of a grid mesh.
///
/// Vertex `i` of the result is grid point `i`. Each vertex owns one grid
/// cell of area. Vertices on an open edge report zero. Runs in parallel.
pub fn grid_curvature(grid: &GridMesh) -> CurvatureResult {
    let columns = grid.columns();
    let results: Vec<VertexCurvature> = (0..grid.num_vertices())
        .into_par_iter()
        .map(|idx| {
            grid.surface_point(idx % columns, idx / columns)
                .map(|sp| VertexCurvature::with_cell_area(&sp.ring, sp.ring.quad_cell_area()))
                .unwrap_or_default()
        })
        .collect();
    CurvatureResult::from_vertices(results)
}
