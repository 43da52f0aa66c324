//! Parametric surfaces over the unit square.
//!
//! A [`ParametricSurface`] maps `(u, v)` in `[0, 1]^2` to a point and records
//! which parameter axes wrap around. Nothing is sampled until the surface is
//! tessellated; see [`crate::algo::tessellate`].

use nalgebra::{Point2, Point3, Rotation3, Unit, Vector3};

use super::curve::{Curve2, Curve3};
use super::function::Procedural;
use crate::geom::transform::Deformable;
use crate::math::{DEGENERATE_EPSILON, TOLERANCE};

/// A surface `uv -> point` with closure flags per axis.
#[derive(Debug, Clone)]
pub struct ParametricSurface {
    func: Procedural<Point2<f64>, Point3<f64>>,
    closed_u: bool,
    closed_v: bool,
}

impl ParametricSurface {
    /// Wrap a function of `uv`.
    pub fn new<F>(f: F, closed_u: bool, closed_v: bool) -> Self
    where
        F: Fn(Point2<f64>) -> Point3<f64> + Send + Sync + 'static,
    {
        Self {
            func: Procedural::new(f),
            closed_u,
            closed_v,
        }
    }

    /// Wrap an existing procedural.
    pub fn from_procedural(
        func: Procedural<Point2<f64>, Point3<f64>>,
        closed_u: bool,
        closed_v: bool,
    ) -> Self {
        Self {
            func,
            closed_u,
            closed_v,
        }
    }

    /// Evaluate at `uv`.
    #[inline]
    pub fn eval(&self, uv: Point2<f64>) -> Point3<f64> {
        self.func.eval(uv)
    }

    /// Evaluate at `(u, v)`.
    #[inline]
    pub fn eval_uv(&self, u: f64, v: f64) -> Point3<f64> {
        self.eval(Point2::new(u, v))
    }

    /// Whether `u = 1` meets `u = 0`.
    pub fn closed_u(&self) -> bool {
        self.closed_u
    }

    /// Whether `v = 1` meets `v = 0`.
    pub fn closed_v(&self) -> bool {
        self.closed_v
    }

    /// Reparameterise: `uv -> self(g(uv))`. Closure flags are kept.
    pub fn transform_input<G>(&self, g: G) -> Self
    where
        G: Fn(Point2<f64>) -> Point2<f64> + Send + Sync + 'static,
    {
        Self {
            func: self.func.remap(g),
            closed_u: self.closed_u,
            closed_v: self.closed_v,
        }
    }

    /// Partial derivatives `(d/du, d/dv)` by finite differences.
    pub fn partials(&self, uv: Point2<f64>) -> (Vector3<f64>, Vector3<f64>) {
        let h = TOLERANCE;
        let p = self.eval(uv);
        let du = if uv.x + h > 1.0 {
            (p - self.eval(Point2::new(uv.x - h, uv.y))) / h
        } else {
            (self.eval(Point2::new(uv.x + h, uv.y)) - p) / h
        };
        let dv = if uv.y + h > 1.0 {
            (p - self.eval(Point2::new(uv.x, uv.y - h))) / h
        } else {
            (self.eval(Point2::new(uv.x, uv.y + h)) - p) / h
        };
        (du, dv)
    }

    /// Unit normal `du x dv`, zero where the parameterisation is singular.
    pub fn normal(&self, uv: Point2<f64>) -> Vector3<f64> {
        let (du, dv) = self.partials(uv);
        let n = du.cross(&dv);
        let len = n.norm();
        if len > 0.0 {
            n / len
        } else {
            n
        }
    }

    /// Sweep a planar profile along a path.
    ///
    /// `u` runs along the profile and `v` along the path. The profile plane
    /// is spanned by two vectors perpendicular to the path tangent. They start
    /// against the world axis least aligned with the first tangent and are
    /// parallel transported from there, so the profile does not spin about
    /// the path. On a closed path the frame at the end may be turned against
    /// the start by the path's total torsion.
    pub fn sweep(profile: &Curve2, path: &Curve3) -> Self {
        let closed_u = profile.is_closed();
        let closed_v = path.is_closed();
        let profile = profile.clone();
        let frames = TransportedFrames::new(path, FRAME_SAMPLES);
        let path = path.clone();
        Self::new(
            move |uv| {
                let origin = path.eval(uv.y);
                let tangent = path.tangent(uv.y);
                let (side, up) = frames.at(uv.y, &tangent);
                let q = profile.eval(uv.x);
                origin + side * q.x + up * q.y
            },
            closed_u,
            closed_v,
        )
    }

    /// Ruled surface: straight lines from `a(u)` (at `v = 0`) to `b(u)`.
    pub fn rule(a: &Curve3, b: &Curve3) -> Self {
        let closed_u = a.is_closed() && b.is_closed();
        let (a, b) = (a.clone(), b.clone());
        Self::new(
            move |uv| {
                let p = a.eval(uv.x);
                let q = b.eval(uv.x);
                p + (q - p) * uv.y
            },
            closed_u,
            false,
        )
    }

    /// Extrude a curve along a vector.
    pub fn extrude(profile: &Curve3, vector: Vector3<f64>) -> Self {
        let moved = profile.map(move |p| p + vector);
        Self::rule(profile, &moved)
    }

    /// Revolve a profile about an axis through the origin.
    ///
    /// `u` is the fraction of `angle` turned, `v` runs along the profile. A full
    /// revolution should pass `closed = true` so the seam is shared.
    pub fn revolve(profile: &Curve3, axis: Unit<Vector3<f64>>, angle: f64, closed: bool) -> Self {
        let closed_v = profile.is_closed();
        let profile = profile.clone();
        Self::new(
            move |uv| Rotation3::from_axis_angle(&axis, angle * uv.x) * profile.eval(uv.y),
            closed,
            closed_v,
        )
    }

    /// Height field `z = f(x, y)` over `[-1, 1]^2`.
    pub fn height_field<F>(f: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        Self::new(
            move |uv| {
                let x = uv.x * 2.0 - 1.0;
                let y = uv.y * 2.0 - 1.0;
                Point3::new(x, y, f(x, y))
            },
            false,
            false,
        )
    }
}

/// Two unit vectors spanning the plane perpendicular to `tangent`.
/// Path samples used to carry a sweep frame along.
const FRAME_SAMPLES: usize = 256;

/// Side vectors of a rotation-minimising frame at evenly spaced path samples.
#[derive(Debug, Clone)]
struct TransportedFrames {
    tangents: Vec<Vector3<f64>>,
    sides: Vec<Vector3<f64>>,
}

impl TransportedFrames {
    fn new(path: &Curve3, samples: usize) -> Self {
        let samples = samples.max(1);
        let mut tangents: Vec<Vector3<f64>> = Vec::with_capacity(samples + 1);
        let mut sides = Vec::with_capacity(samples + 1);
        let mut side = frame(&path.tangent(0.0)).0;
        for i in 0..=samples {
            let tangent = path.tangent(i as f64 / samples as f64);
            if let Some(previous) = tangents.last() {
                side = transport(&side, previous, &tangent);
            }
            tangents.push(tangent);
            sides.push(side);
        }
        Self { tangents, sides }
    }

    /// Frame at parameter `t`, carried from the nearest sample to `tangent`.
    fn at(&self, t: f64, tangent: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
        let last = self.tangents.len() - 1;
        let i = ((t.clamp(0.0, 1.0) * last as f64).round() as usize).min(last);
        let side = transport(&self.sides[i], &self.tangents[i], tangent);
        // remove drift out of the normal plane
        let side = side - tangent * side.dot(tangent);
        let len = side.norm();
        if len < DEGENERATE_EPSILON {
            return frame(tangent);
        }
        let side = side / len;
        (side, tangent.cross(&side))
    }
}

/// Rotate `v` by the rotation taking `from` onto `to`.
///
/// Opposite or zero tangents leave `v` unchanged.
fn transport(v: &Vector3<f64>, from: &Vector3<f64>, to: &Vector3<f64>) -> Vector3<f64> {
    Rotation3::rotation_between(from, to).map_or(*v, |r| r * v)
}

fn frame(tangent: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let axes = [Vector3::x(), Vector3::y(), Vector3::z()];
    let reference = axes
        .iter()
        .min_by(|a, b| tangent.dot(a).abs().total_cmp(&tangent.dot(b).abs()))
        .copied()
        .unwrap_or_else(Vector3::z);
    let side = tangent.cross(&reference);
    let len = side.norm();
    if len == 0.0 {
        // zero tangent: fall back to the world xy plane
        return (Vector3::x(), Vector3::y());
    }
    let side = side / len;
    (side, tangent.cross(&side))
}

impl Deformable<Point3<f64>> for ParametricSurface {
    fn deform<F>(&self, f: F) -> Self
    where
        F: Fn(&Point3<f64>) -> Point3<f64> + Send + Sync + 'static,
    {
        Self {
            func: self.func.map(move |p| f(&p)),
            closed_u: self.closed_u,
            closed_v: self.closed_v,
        }
    }
}
