//! Whole-shape modifiers.
//!
//! Two kinds live here. Face-level operations ([`triangulate`],
//! [`flip_faces`], [`faceted`]) rebuild a mesh's face buffer. Point-level
//! deformers ([`twist`], [`taper`], [`bend`], [`skew`]) return closures for
//! [`Deformable::deform`], which can be attenuated with [`with_falloff`].
//!
//! Deformers are parameterised by an axis segment: `t = 0` at its start,
//! `t = 1` at its end, measured by projecting onto the segment.
//!
//! ```
//! use procgeom::algo::modifiers::{axis_line, twist, Axis};
//! use procgeom::algo::tessellate::tessellate;
//! use procgeom::geom::{Bounded, Deformable};
//! use procgeom::procedural::surfaces;
//!
//! let column = tessellate(&surfaces::cylinder(), 16, 8);
//! let axis = axis_line(&column.bounds(), Axis::Z);
//! let twisted = column.deform(twist(axis, std::f64::consts::FRAC_PI_2));
//! assert_eq!(twisted.num_vertices(), column.num_vertices());
//! ```

use nalgebra::{Point3, Rotation3, Unit, Vector3};

use crate::geom::bounds::{Aabb, Bounded};
use crate::geom::line::LineSegment3;
use crate::geom::transform::{Deformable, Transformable};
use crate::math::{DEGENERATE_EPSILON, TOLERANCE};
use crate::mesh::{PolyMesh, QuadMesh, TriMesh};

/// Split every quad `[a, b, c, d]` into `[a, b, c]` and `[c, d, a]`.
pub fn triangulate(mesh: &QuadMesh) -> TriMesh {
    let faces: Vec<[usize; 3]> = mesh
        .faces()
        .iter()
        .flat_map(|&[a, b, c, d]| [[a, b, c], [c, d, a]])
        .collect();
    PolyMesh::from_parts(mesh.points().to_vec(), faces.into())
}

/// Reverse the winding of every face.
pub fn flip_faces<const N: usize>(mesh: &PolyMesh<[usize; N]>) -> PolyMesh<[usize; N]> {
    let faces: Vec<[usize; N]> = mesh
        .faces()
        .iter()
        .map(|f| {
            let mut f = *f;
            f.reverse();
            f
        })
        .collect();
    PolyMesh::from_parts(mesh.points().to_vec(), faces.into())
}

/// Give every face its own copy of its corner points.
pub fn faceted<const N: usize>(mesh: &PolyMesh<[usize; N]>) -> PolyMesh<[usize; N]> {
    let faces: Vec<[usize; N]> = (0..mesh.num_faces())
        .map(|f| std::array::from_fn(|k| f * N + k))
        .collect();
    PolyMesh::from_parts(mesh.points_by_corner(), faces.into())
}

/// Round every coordinate to the nearest multiple of `size`.
///
/// A `size` smaller than [`TOLERANCE`] in magnitude leaves the points as they are.
pub fn snap_points<T: Deformable<Point3<f64>>>(shape: &T, size: f64) -> T {
    if size.abs() < TOLERANCE {
        return shape.deform(|p| *p);
    }
    shape.deform(move |p| Point3::from((p.coords / size).map(f64::round) * size))
}

/// Move a shape so the centre of the bottom of its bounds sits at the origin.
pub fn reset_pivot<T: Transformable + Bounded>(shape: &T) -> T {
    let pivot = shape.bounds().center_bottom();
    shape.translate(-pivot.coords)
}

/// A signed world axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// +x
    X,
    /// +y
    Y,
    /// +z
    Z,
    /// -x
    NegativeX,
    /// -y
    NegativeY,
    /// -z
    NegativeZ,
}

impl Axis {
    /// Unit direction.
    pub fn direction(self) -> Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
            Axis::NegativeX => -Vector3::x_axis(),
            Axis::NegativeY => -Vector3::y_axis(),
            Axis::NegativeZ => -Vector3::z_axis(),
        }
    }

    fn index(self) -> usize {
        match self {
            Axis::X | Axis::NegativeX => 0,
            Axis::Y | Axis::NegativeY => 1,
            Axis::Z | Axis::NegativeZ => 2,
        }
    }

    fn is_negative(self) -> bool {
        matches!(self, Axis::NegativeX | Axis::NegativeY | Axis::NegativeZ)
    }
}

/// The segment through the centre of `bounds` spanning it along `axis`.
///
/// Negative axes run from the maximum side to the minimum side.
pub fn axis_line(bounds: &Aabb, axis: Axis) -> LineSegment3 {
    let i = axis.index();
    let mut a = bounds.center();
    let mut b = a;
    a[i] = bounds.min[i];
    b[i] = bounds.max[i];
    let line = LineSegment3::new(a, b);
    if axis.is_negative() {
        line.reversed()
    } else {
        line
    }
}

/// Projection parameter of `p` onto the infinite line through `line`.
fn parameter(line: &LineSegment3, p: &Point3<f64>) -> f64 {
    let d = line.direction();
    let len2 = d.norm_squared();
    if len2 < DEGENERATE_EPSILON {
        return 0.0;
    }
    (p - line.a).dot(&d) / len2
}

/// Position along `line`, clamped to `[0, 1]`.
pub fn amount_along_line(line: LineSegment3) -> impl Fn(&Point3<f64>) -> f64 + Send + Sync + 'static {
    move |p| parameter(&line, p).clamp(0.0, 1.0)
}

/// Position along `axis` within `bounds`, clamped to `[0, 1]`.
pub fn amount_along_axis(bounds: &Aabb, axis: Axis) -> impl Fn(&Point3<f64>) -> f64 + Send + Sync + 'static {
    amount_along_line(axis_line(bounds, axis))
}

/// Distance from `center` as a fraction of `max`, clamped to `[0, 1]`.
///
/// A non-positive `max` puts every point other than the centre at `1`.
pub fn distance_as_amount(center: Point3<f64>, max: f64) -> impl Fn(&Point3<f64>) -> f64 + Send + Sync + 'static {
    move |p| {
        let d = (p - center).norm();
        if max <= 0.0 {
            if d > 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            (d / max).clamp(0.0, 1.0)
        }
    }
}

/// Blend a deformation with the identity: `p + (f(p) - p) * falloff(p)`.
pub fn with_falloff<F, A>(f: F, falloff: A) -> impl Fn(&Point3<f64>) -> Point3<f64> + Send + Sync + 'static
where
    F: Fn(&Point3<f64>) -> Point3<f64> + Send + Sync + 'static,
    A: Fn(&Point3<f64>) -> f64 + Send + Sync + 'static,
{
    move |p| p + (f(p) - p) * falloff(p)
}

/// Rotate about `axis`, by `0` at its start up to `angle` at its end.
///
/// Points beyond the ends keep rotating at the same rate.
pub fn twist(axis: LineSegment3, angle: f64) -> impl Fn(&Point3<f64>) -> Point3<f64> + Send + Sync + 'static {
    let dir = Unit::try_new(axis.direction(), DEGENERATE_EPSILON);
    move |p| match dir {
        Some(dir) => {
            let rotation = Rotation3::from_axis_angle(&dir, angle * parameter(&axis, p));
            axis.a + rotation * (p - axis.a)
        }
        None => *p,
    }
}

/// Scale the distance from `axis` by `start_scale` at its start blending to
/// `end_scale` at its end.
pub fn taper(axis: LineSegment3, start_scale: f64, end_scale: f64) -> impl Fn(&Point3<f64>) -> Point3<f64> + Send + Sync + 'static {
    move |p| {
        let t = parameter(&axis, p);
        let foot = axis.lerp(t);
        let scale = start_scale + (end_scale - start_scale) * t;
        foot + (p - foot) * scale
    }
}

/// Bend the length of `axis` into a circular arc turning through `angle`
/// towards `toward`.
///
/// `toward` is made perpendicular to the axis. Offsets towards the bend
/// shrink the arc radius; offsets across it are kept.
pub fn bend(axis: LineSegment3, toward: Vector3<f64>, angle: f64) -> impl Fn(&Point3<f64>) -> Point3<f64> + Send + Sync + 'static {
    let length = axis.length();
    let d = axis.direction().try_normalize(DEGENERATE_EPSILON);
    let n = d.and_then(|d| (toward - d * toward.dot(&d)).try_normalize(DEGENERATE_EPSILON));
    move |p| {
        let (Some(d), Some(n)) = (d, n) else {
            return *p;
        };
        if angle.abs() < DEGENERATE_EPSILON || length < DEGENERATE_EPSILON {
            return *p;
        }
        let v = p - axis.a;
        let along = v.dot(&d);
        let offset = v.dot(&n);
        let across = v - d * along - n * offset;

        let radius = length / angle;
        let theta = along / radius;
        let center = axis.a + n * radius;
        center + (d * theta.sin() - n * theta.cos()) * (radius - offset) + across
    }
}

/// Shear: displace by `from` at the start of `line` blending to `to` at its
/// end, clamped outside it.
pub fn skew(line: LineSegment3, from: Vector3<f64>, to: Vector3<f64>) -> impl Fn(&Point3<f64>) -> Point3<f64> + Send + Sync + 'static {
    let amount = amount_along_line(line);
    move |p| p + from + (to - from) * amount(p)
}
