//! Tessellation of parametric surfaces into grid meshes.
//!
//! The surface is sampled at every UV of a [`SurfaceDiscretization`] built for
//! its own closure flags, and the samples are paired with the discretization's
//! faces. Closed axes share their seam vertices, so a closed/closed surface
//! such as a torus tessellates to a mesh without border.
//!
//! # Example
//!
//! ```
//! use procgeom::algo::tessellate::tessellate;
//! use procgeom::procedural::surfaces;
//!
//! let grid = tessellate(&surfaces::cylinder(), 16, 4);
//! assert_eq!(grid.num_faces(), 64);
//! assert_eq!(grid.num_vertices(), 16 * 5);
//! ```

use log::debug;
use rayon::prelude::*;

use super::discretize::{Resolution, SurfaceDiscretization};
use crate::mesh::GridMesh;
use crate::procedural::ParametricSurface;

/// Options for [`tessellate_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TessellateOptions {
    /// Cells along `u`.
    pub columns: usize,
    /// Cells along `v`.
    pub rows: usize,
    /// Evaluate the surface on the rayon pool.
    pub parallel: bool,
}

impl Default for TessellateOptions {
    fn default() -> Self {
        Self {
            columns: 32,
            rows: 32,
            parallel: true,
        }
    }
}

impl TessellateOptions {
    /// Options for the given resolution, evaluated in parallel.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            ..Default::default()
        }
    }

    /// Set the cell count along `u`.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Set the cell count along `v`.
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Choose between parallel and sequential evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Tessellate a surface into `columns x rows` quads, evaluating in parallel.
pub fn tessellate(surface: &ParametricSurface, columns: usize, rows: usize) -> GridMesh {
    tessellate_with_options(surface, TessellateOptions::new(columns, rows))
}

/// Tessellate a surface on the current thread.
///
/// Produces exactly the same mesh as [`tessellate`].
pub fn tessellate_sequential(surface: &ParametricSurface, columns: usize, rows: usize) -> GridMesh {
    tessellate_with_options(
        surface,
        TessellateOptions::new(columns, rows).with_parallel(false),
    )
}

/// Tessellate with explicit options.
pub fn tessellate_with_options(surface: &ParametricSurface, options: TessellateOptions) -> GridMesh {
    let discretization = SurfaceDiscretization::new(
        Resolution::new(options.columns, options.rows),
        surface.closed_u(),
        surface.closed_v(),
    );
    tessellate_impl(surface, discretization, options.parallel)
}

/// Tessellate over a prepared discretization.
///
/// The discretization's closure flags are used as given, even if they differ
/// from the surface's.
pub fn tessellate_with(surface: &ParametricSurface, discretization: &SurfaceDiscretization) -> GridMesh {
    tessellate_impl(surface, discretization.clone(), true)
}

fn tessellate_impl(
    surface: &ParametricSurface,
    discretization: SurfaceDiscretization,
    parallel: bool,
) -> GridMesh {
    let points = if parallel {
        discretization
            .uvs()
            .par_iter()
            .map(|uv| surface.eval(*uv))
            .collect()
    } else {
        discretization.uvs().iter().map(|uv| surface.eval(*uv)).collect()
    };

    let (nu, nv) = (discretization.nu(), discretization.nv());
    let (closed_u, closed_v) = (discretization.is_closed_u(), discretization.is_closed_v());
    debug!(
        "tessellated {}x{} samples into {} quads",
        nu,
        nv,
        discretization.faces().len()
    );
    GridMesh::from_parts(
        points,
        discretization.into_faces().into(),
        nu,
        nv,
        closed_u,
        closed_v,
    )
}
