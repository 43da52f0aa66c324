//! Quad meshes laid out as a parametric grid.
//!
//! A [`GridMesh`] is a [`QuadMesh`] whose points form a row-major
//! `columns x rows` sample grid (index `row * columns + col`) and whose faces
//! are the grid cells, stitched across closed axes. Tessellated surfaces,
//! ruled strips and extruded profiles all produce grid meshes.

use std::sync::Arc;

use nalgebra::{Point2, Point3};

use super::poly::QuadMesh;
use crate::algo::discretize::quad_face;
use crate::algo::neighbourhood::{SurfacePoint, VertexNeighbourhood};
use crate::error::{GeometryError, Result};
use crate::geom::bounds::{Aabb, Bounded};
use crate::geom::transform::Deformable;

/// Cells along an axis with `samples` samples.
fn cell_count(samples: usize, closed: bool) -> usize {
    if closed {
        samples
    } else {
        samples.saturating_sub(1)
    }
}

/// A quad mesh over a parametric sample grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMesh {
    mesh: QuadMesh,
    columns: usize,
    rows: usize,
    closed_u: bool,
    closed_v: bool,
}

impl GridMesh {
    /// Build a grid mesh from row-major points.
    ///
    /// `columns` and `rows` count samples, not cells. Fails with
    /// [`GeometryError::InvalidArgument`] when `points.len() != columns * rows`.
    pub fn new(
        points: Vec<Point3<f64>>,
        columns: usize,
        rows: usize,
        closed_u: bool,
        closed_v: bool,
    ) -> Result<Self> {
        if points.len() != columns * rows {
            return Err(GeometryError::invalid_arg(
                "points",
                points.len(),
                "must equal columns * rows",
            ));
        }
        let cells_u = cell_count(columns, closed_u);
        let cells_v = cell_count(rows, closed_v);
        let faces: Vec<[usize; 4]> = (0..cells_v)
            .flat_map(|row| (0..cells_u).map(move |col| quad_face(col, row, columns, rows)))
            .collect();
        Ok(Self::from_parts(points, faces.into(), columns, rows, closed_u, closed_v))
    }

    /// Assemble from a point grid and faces already laid out for it.
    pub(crate) fn from_parts(
        points: Vec<Point3<f64>>,
        faces: Arc<[[usize; 4]]>,
        columns: usize,
        rows: usize,
        closed_u: bool,
        closed_v: bool,
    ) -> Self {
        Self {
            mesh: QuadMesh::from_parts(points, faces),
            columns,
            rows,
            closed_u,
            closed_v,
        }
    }

    /// A two-row strip joining `lower[i]` to `upper[i]`.
    ///
    /// With `closed` the strip wraps from the last column to the first.
    pub fn quad_strip(lower: &[Point3<f64>], upper: &[Point3<f64>], closed: bool) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(GeometryError::invalid_arg(
                "upper",
                upper.len(),
                "must have as many points as the lower row",
            ));
        }
        let points = lower.iter().chain(upper.iter()).copied().collect();
        Self::new(points, lower.len(), 2, closed, false)
    }

    /// The underlying quad mesh.
    pub fn quad_mesh(&self) -> &QuadMesh {
        &self.mesh
    }

    /// Consume into the underlying quad mesh.
    pub fn into_quad_mesh(self) -> QuadMesh {
        self.mesh
    }

    /// Samples along `u`.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Samples along `v`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Whether `u` wraps.
    pub fn is_closed_u(&self) -> bool {
        self.closed_u
    }

    /// Whether `v` wraps.
    pub fn is_closed_v(&self) -> bool {
        self.closed_v
    }

    /// Number of points.
    pub fn num_vertices(&self) -> usize {
        self.mesh.num_vertices()
    }

    /// Number of quads.
    pub fn num_faces(&self) -> usize {
        self.mesh.num_faces()
    }

    /// Point index of grid vertex `(col, row)`.
    #[inline]
    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.columns + col
    }

    /// Position of grid vertex `(col, row)`.
    pub fn point(&self, col: usize, row: usize) -> &Point3<f64> {
        &self.mesh.points()[self.index(col, row)]
    }

    fn step(i: usize, delta: isize, len: usize, closed: bool) -> Option<usize> {
        let j = i as isize + delta;
        if (0..len as isize).contains(&j) {
            Some(j as usize)
        } else if closed && len > 0 {
            Some(j.rem_euclid(len as isize) as usize)
        } else {
            None
        }
    }

    fn parameter(i: usize, samples: usize, closed: bool) -> f64 {
        let cells = cell_count(samples, closed).max(1);
        i as f64 / cells as f64
    }

    /// The grid vertex with its 4-neighbour ring, ordered right, up, left, down.
    ///
    /// `None` when the vertex is off the grid or a neighbour would fall off an
    /// open edge.
    pub fn surface_point(&self, col: usize, row: usize) -> Option<SurfacePoint> {
        if col >= self.columns || row >= self.rows {
            return None;
        }
        let (nu, nv) = (self.columns, self.rows);
        let right = Self::step(col, 1, nu, self.closed_u)?;
        let left = Self::step(col, -1, nu, self.closed_u)?;
        let up = Self::step(row, 1, nv, self.closed_v)?;
        let down = Self::step(row, -1, nv, self.closed_v)?;

        let neighbours = vec![
            *self.point(right, row),
            *self.point(col, up),
            *self.point(left, row),
            *self.point(col, down),
        ];
        Some(SurfacePoint {
            uv: Point2::new(
                Self::parameter(col, nu, self.closed_u),
                Self::parameter(row, nv, self.closed_v),
            ),
            ring: VertexNeighbourhood::new(*self.point(col, row), neighbours),
        })
    }

    /// Bilinear interpolation of the grid at parameter `uv`.
    ///
    /// Closed axes wrap the parameter; open axes clamp it to `[0, 1]`.
    /// `None` for a grid without cells.
    pub fn eval(&self, uv: Point2<f64>) -> Option<Point3<f64>> {
        let cells_u = cell_count(self.columns, self.closed_u);
        let cells_v = cell_count(self.rows, self.closed_v);
        if cells_u == 0 || cells_v == 0 {
            return None;
        }

        let locate = |t: f64, cells: usize, closed: bool| -> (usize, f64) {
            let t = if closed { t.rem_euclid(1.0) } else { t.clamp(0.0, 1.0) };
            let x = t * cells as f64;
            let i = (x.floor() as usize).min(cells - 1);
            (i, x - i as f64)
        };
        let (col, fu) = locate(uv.x, cells_u, self.closed_u);
        let (row, fv) = locate(uv.y, cells_v, self.closed_v);

        let [a, b, c, d] = self.mesh.quad(row * cells_u + col);
        let lower = a.coords.lerp(&b.coords, fu);
        let upper = d.coords.lerp(&c.coords, fu);
        Some(Point3::from(lower.lerp(&upper, fv)))
    }
}

impl Bounded for GridMesh {
    fn bounds(&self) -> Aabb {
        self.mesh.bounds()
    }
}

impl Deformable<Point3<f64>> for GridMesh {
    fn deform<F>(&self, f: F) -> Self
    where
        F: Fn(&Point3<f64>) -> Point3<f64> + Send + Sync + 'static,
    {
        Self {
            mesh: self.mesh.deform(f),
            columns: self.columns,
            rows: self.rows,
            closed_u: self.closed_u,
            closed_v: self.closed_v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Topology;

    fn flat_grid(columns: usize, rows: usize, closed_u: bool, closed_v: bool) -> GridMesh {
        let points = (0..rows)
            .flat_map(|j| (0..columns).map(move |i| Point3::new(i as f64, j as f64, 0.0)))
            .collect();
        GridMesh::new(points, columns, rows, closed_u, closed_v).unwrap()
    }

    #[test]
    fn test_face_counts() {
        assert_eq!(flat_grid(4, 3, false, false).num_faces(), 6);
        assert_eq!(flat_grid(4, 3, true, false).num_faces(), 8);
        assert_eq!(flat_grid(4, 3, true, true).num_faces(), 12);
        assert!(GridMesh::new(vec![Point3::origin(); 5], 2, 3, false, false).is_err());
    }

    #[test]
    fn test_surface_point_ring_order() {
        let g = flat_grid(3, 3, false, false);
        let sp = g.surface_point(1, 1).unwrap();
        assert_eq!(
            sp.ring.neighbours(),
            &[
                Point3::new(2.0, 1.0, 0.0),
                Point3::new(1.0, 2.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
            ]
        );
        assert_eq!(sp.uv, Point2::new(0.5, 0.5));
        assert!((sp.normal() - nalgebra::Vector3::z()).norm() < 1e-12);
        assert!(g.surface_point(0, 1).is_none());
        assert!(g.surface_point(3, 0).is_none());
    }

    #[test]
    fn test_surface_point_wraps_closed_axis() {
        let g = flat_grid(4, 3, true, false);
        let sp = g.surface_point(0, 1).unwrap();
        assert_eq!(sp.ring.neighbours()[2], Point3::new(3.0, 1.0, 0.0));
    }

    #[test]
    fn test_eval_bilinear() {
        let g = flat_grid(3, 3, false, false);
        let p = g.eval(Point2::new(0.25, 0.75)).unwrap();
        assert!((p - Point3::new(0.5, 1.5, 0.0)).norm() < 1e-12);
        assert_eq!(g.eval(Point2::new(1.0, 1.0)), Some(Point3::new(2.0, 2.0, 0.0)));
        assert_eq!(g.eval(Point2::new(-1.0, 2.0)), Some(Point3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn test_quad_strip() {
        let lower = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)];
        let upper: Vec<_> = lower.iter().map(|p| p + nalgebra::Vector3::z()).collect();
        let open = GridMesh::quad_strip(&lower, &upper, false).unwrap();
        assert_eq!(open.num_faces(), 2);
        let closed = GridMesh::quad_strip(&lower, &upper, true).unwrap();
        assert_eq!(closed.num_faces(), 3);
        let topo = Topology::build(closed.quad_mesh()).unwrap();
        assert_eq!(topo.border_edges().count(), 6);
        assert!(GridMesh::quad_strip(&lower, &upper[..2], false).is_err());
    }
}
