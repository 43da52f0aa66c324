//! Parametric curves over the unit interval.

use nalgebra::{Point, Point2, Point3, SVector};

use super::function::Procedural;
use crate::geom::polyline::PolyLine;
use crate::geom::transform::Deformable;
use crate::math::{interpolate, TOLERANCE};

/// A curve `t -> P` on `[0, 1]`, optionally closed (`t = 1` meets `t = 0`).
#[derive(Debug, Clone)]
pub struct Curve<P> {
    func: Procedural<f64, P>,
    closed: bool,
}

/// A planar curve.
pub type Curve2 = Curve<Point2<f64>>;
/// A space curve.
pub type Curve3 = Curve<Point3<f64>>;

impl<P: 'static> Curve<P> {
    /// Wrap a function.
    pub fn new<F>(f: F, closed: bool) -> Self
    where
        F: Fn(f64) -> P + Send + Sync + 'static,
    {
        Self {
            func: Procedural::new(f),
            closed,
        }
    }

    /// Wrap an existing procedural.
    pub fn from_procedural(func: Procedural<f64, P>, closed: bool) -> Self {
        Self { func, closed }
    }

    /// The underlying function.
    pub fn function(&self) -> &Procedural<f64, P> {
        &self.func
    }

    /// Evaluate at `t`.
    #[inline]
    pub fn eval(&self, t: f64) -> P {
        self.func.eval(t)
    }

    /// Whether the curve is closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Same function, different closure.
    pub fn with_closed(&self, closed: bool) -> Self {
        Self {
            func: self.func.clone(),
            closed,
        }
    }

    /// Evaluate at `count` evenly spaced parameters.
    ///
    /// Closed curves skip `t = 1`, which would duplicate the first sample.
    pub fn sample(&self, count: usize) -> Vec<P> {
        interpolate(count, self.closed)
            .into_iter()
            .map(|t| self.eval(t))
            .collect()
    }

    /// Post-compose with `g`, keeping the closure.
    pub fn map<Q: 'static, G>(&self, g: G) -> Curve<Q>
    where
        G: Fn(P) -> Q + Send + Sync + 'static,
    {
        Curve {
            func: self.func.map(g),
            closed: self.closed,
        }
    }
}

impl<const D: usize> Curve<Point<f64, D>> {
    /// Finite-difference derivative at `t`.
    ///
    /// Forward difference with step [`TOLERANCE`], backward when `t + h`
    /// leaves the unit interval.
    pub fn derivative(&self, t: f64) -> SVector<f64, D> {
        let h = TOLERANCE;
        if t + h > 1.0 {
            (self.eval(t) - self.eval(t - h)) / h
        } else {
            (self.eval(t + h) - self.eval(t)) / h
        }
    }

    /// Unit tangent at `t`, zero where the derivative vanishes.
    pub fn tangent(&self, t: f64) -> SVector<f64, D> {
        let d = self.derivative(t);
        let n = d.norm();
        if n > 0.0 {
            d / n
        } else {
            d
        }
    }

    /// Sample into a polyline with the curve's closure.
    pub fn to_polyline(&self, count: usize) -> PolyLine<D> {
        PolyLine::new(self.sample(count), self.closed)
    }
}

impl<const D: usize> Deformable<Point<f64, D>> for Curve<Point<f64, D>> {
    fn deform<F>(&self, f: F) -> Self
    where
        F: Fn(&Point<f64, D>) -> Point<f64, D> + Send + Sync + 'static,
    {
        self.map(move |p| f(&p))
    }
}

/// The axis-aligned plane a planar shape is embedded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StandardPlane {
    /// `(x, y) -> (x, y, 0)`.
    #[default]
    Xy,
    /// `(x, y) -> (x, 0, y)`.
    Xz,
    /// `(x, y) -> (0, x, y)`.
    Yz,
}

impl StandardPlane {
    /// Embed a planar point.
    pub fn embed(self, p: &Point2<f64>) -> Point3<f64> {
        match self {
            StandardPlane::Xy => Point3::new(p.x, p.y, 0.0),
            StandardPlane::Xz => Point3::new(p.x, 0.0, p.y),
            StandardPlane::Yz => Point3::new(0.0, p.x, p.y),
        }
    }
}

impl Curve2 {
    /// Lift into 3D on a standard plane.
    pub fn to_3d(&self, plane: StandardPlane) -> Curve3 {
        self.map(move |p| plane.embed(&p))
    }
}
