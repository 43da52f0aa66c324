//! Surface discretization: the UV sample grid and quad faces for a resolution.
//!
//! A grid of `columns x rows` cells over the unit square. An open axis needs
//! one more sample than it has cells; a closed axis does not, because its last
//! cell wraps around to the first sample. Every cell produces one quad, so the
//! face count is always `columns * rows` and a closed seam is stitched once.

use nalgebra::Point2;

use crate::error::{GeometryError, Result};
use crate::math::interpolate;

/// Number of cells along each parametric axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Resolution {
    /// Cells along `u`.
    pub columns: usize,
    /// Cells along `v`.
    pub rows: usize,
}

impl Resolution {
    /// Create a resolution.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }
}

impl TryFrom<(i64, i64)> for Resolution {
    type Error = GeometryError;

    /// Validate a signed resolution, rejecting negative counts.
    fn try_from((columns, rows): (i64, i64)) -> Result<Self> {
        let columns = usize::try_from(columns)
            .map_err(|_| GeometryError::invalid_arg("columns", columns, "must be non-negative"))?;
        let rows = usize::try_from(rows)
            .map_err(|_| GeometryError::invalid_arg("rows", rows, "must be non-negative"))?;
        Ok(Self { columns, rows })
    }
}

/// Number of samples needed along an axis with `cells` cells.
///
/// Zero cells means no samples at all, whatever the closure.
#[inline]
pub fn sample_count(cells: usize, closed: bool) -> usize {
    if cells == 0 {
        0
    } else if closed {
        cells
    } else {
        cells + 1
    }
}

/// Quad of cell `(col, row)` in a row-major grid of `nu x nv` samples.
///
/// Corners run `(col,row)`, `(col+1,row)`, `(col+1,row+1)`, `(col,row+1)`
/// with the `+1` steps taken modulo the sample counts.
#[inline]
pub fn quad_face(col: usize, row: usize, nu: usize, nv: usize) -> [usize; 4] {
    let col1 = (col + 1) % nu;
    let row1 = (row + 1) % nv;
    [
        row * nu + col,
        row * nu + col1,
        row1 * nu + col1,
        row1 * nu + col,
    ]
}

/// The UV samples and faces of a discretized unit square.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceDiscretization {
    resolution: Resolution,
    closed_u: bool,
    closed_v: bool,
    u_values: Vec<f64>,
    v_values: Vec<f64>,
    uvs: Vec<Point2<f64>>,
    faces: Vec<[usize; 4]>,
}

impl SurfaceDiscretization {
    /// Discretize the unit square.
    ///
    /// # Example
    /// ```
    /// use procgeom::algo::discretize::{Resolution, SurfaceDiscretization};
    ///
    /// let d = SurfaceDiscretization::new(Resolution::new(4, 2), true, false);
    /// assert_eq!(d.u_values().len(), 4);
    /// assert_eq!(d.v_values().len(), 3);
    /// assert_eq!(d.faces().len(), 8);
    /// ```
    pub fn new(resolution: Resolution, closed_u: bool, closed_v: bool) -> Self {
        let Resolution { columns, rows } = resolution;
        let nu = sample_count(columns, closed_u);
        let nv = sample_count(rows, closed_v);
        let (nu, nv) = if nu == 0 || nv == 0 { (0, 0) } else { (nu, nv) };

        let u_values = interpolate(nu, closed_u);
        let v_values = interpolate(nv, closed_v);

        let uvs = v_values
            .iter()
            .flat_map(|&v| u_values.iter().map(move |&u| Point2::new(u, v)))
            .collect();

        let faces = if nu == 0 {
            Vec::new()
        } else {
            (0..rows)
                .flat_map(|row| (0..columns).map(move |col| quad_face(col, row, nu, nv)))
                .collect()
        };

        Self {
            resolution,
            closed_u,
            closed_v,
            u_values,
            v_values,
            uvs,
            faces,
        }
    }

    /// The requested resolution.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Whether `u` wraps.
    pub fn is_closed_u(&self) -> bool {
        self.closed_u
    }

    /// Whether `v` wraps.
    pub fn is_closed_v(&self) -> bool {
        self.closed_v
    }

    /// Samples along `u`.
    pub fn u_values(&self) -> &[f64] {
        &self.u_values
    }

    /// Samples along `v`.
    pub fn v_values(&self) -> &[f64] {
        &self.v_values
    }

    /// Number of samples along `u`.
    pub fn nu(&self) -> usize {
        self.u_values.len()
    }

    /// Number of samples along `v`.
    pub fn nv(&self) -> usize {
        self.v_values.len()
    }

    /// All UV samples, row-major: index `row * nu + col`.
    pub fn uvs(&self) -> &[Point2<f64>] {
        &self.uvs
    }

    /// Quad faces, row-major: index `row * columns + col`.
    pub fn faces(&self) -> &[[usize; 4]] {
        &self.faces
    }

    /// Consume into the face buffer.
    pub fn into_faces(self) -> Vec<[usize; 4]> {
        self.faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::FaceIndices;

    #[test]
    fn test_counts_for_every_closure() {
        for &(cu, cv) in &[(false, false), (true, false), (false, true), (true, true)] {
            let d = SurfaceDiscretization::new(Resolution::new(5, 3), cu, cv);
            let nu = if cu { 5 } else { 6 };
            let nv = if cv { 3 } else { 4 };
            assert_eq!(d.nu(), nu);
            assert_eq!(d.nv(), nv);
            assert_eq!(d.uvs().len(), nu * nv);
            assert_eq!(d.faces().len(), 15);
            for face in d.faces() {
                assert!(face.iter().all(|&i| i < nu * nv), "{:?}", face);
                assert!(!face.is_degenerate(), "{:?}", face);
            }
        }
    }

    #[test]
    fn test_closed_axis_omits_one() {
        let d = SurfaceDiscretization::new(Resolution::new(4, 2), true, false);
        assert_eq!(d.u_values(), &[0.0, 0.25, 0.5, 0.75]);
        assert_eq!(d.v_values(), &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_seam_stitched_to_first_column() {
        let d = SurfaceDiscretization::new(Resolution::new(4, 1), true, false);
        // last cell of row 0 wraps back to column 0
        assert_eq!(d.faces()[3], [3, 0, 4, 7]);
        assert_eq!(d.faces()[0], [0, 1, 5, 4]);
    }

    #[test]
    fn test_uv_layout_is_row_major() {
        let d = SurfaceDiscretization::new(Resolution::new(2, 2), false, false);
        assert_eq!(d.uvs()[1], Point2::new(0.5, 0.0));
        assert_eq!(d.uvs()[3], Point2::new(0.0, 0.5));
    }

    #[test]
    fn test_zero_resolution_is_empty() {
        let d = SurfaceDiscretization::new(Resolution::new(0, 3), false, false);
        assert!(d.uvs().is_empty());
        assert!(d.faces().is_empty());
        let d = SurfaceDiscretization::new(Resolution::new(3, 0), true, true);
        assert!(d.uvs().is_empty());
        assert!(d.faces().is_empty());
    }

    #[test]
    fn test_negative_resolution_rejected() {
        assert!(matches!(
            Resolution::try_from((-1i64, 4i64)),
            Err(GeometryError::InvalidArgument { name: "columns", .. })
        ));
        assert!(matches!(
            Resolution::try_from((4i64, -2i64)),
            Err(GeometryError::InvalidArgument { name: "rows", .. })
        ));
        assert_eq!(Resolution::try_from((3i64, 2i64)), Ok(Resolution::new(3, 2)));
    }
}
