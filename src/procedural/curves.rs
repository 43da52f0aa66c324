//! A catalogue of standard curves.
//!
//! Parameters run over `[0, 1]`; periodic curves convert `t` to an angle with
//! [`turns`], so one unit of `t` is one revolution.

use nalgebra::{Point2, Point3};

use super::curve::{Curve2, Curve3};
use crate::math::turns;

/// Scalar functions used to build graphs and profiles.
pub mod scalar {
    /// `m x + b`.
    pub fn line(x: f64, m: f64, b: f64) -> f64 {
        m * x + b
    }

    /// `a x^2 + b x + c`.
    pub fn quadratic(x: f64, a: f64, b: f64, c: f64) -> f64 {
        a * x * x + b * x + c
    }

    /// `x^2`.
    pub fn parabola(x: f64) -> f64 {
        x * x
    }

    /// `x` rounded down to a multiple of `1 / steps`.
    pub fn staircase_floor(x: f64, steps: u32) -> f64 {
        let n = steps as f64;
        (x * n).floor() / n
    }

    /// `x` rounded up to a multiple of `1 / steps`.
    pub fn staircase_ceil(x: f64, steps: u32) -> f64 {
        let n = steps as f64;
        (x * n).ceil() / n
    }

    /// `x` rounded to the nearest multiple of `1 / steps`.
    pub fn staircase_round(x: f64, steps: u32) -> f64 {
        let n = steps as f64;
        (x * n).round() / n
    }
}

/// Polar equations: radius as a function of the angle in radians.
pub mod polar {
    /// Unit circle.
    pub fn circle(_theta: f64) -> f64 {
        1.0
    }

    /// Limaçon `b + a cos(theta)`.
    pub fn limacon(theta: f64, a: f64, b: f64) -> f64 {
        b + a * theta.cos()
    }

    /// Cardioid, the limaçon with `a = b = 1`.
    pub fn cardioid(theta: f64) -> f64 {
        limacon(theta, 1.0, 1.0)
    }

    /// Rose `cos(k theta)`.
    pub fn rose(theta: f64, k: u32) -> f64 {
        (k as f64 * theta).cos()
    }

    /// Archimedean spiral `a + b theta`.
    pub fn archimedean_spiral(theta: f64, a: f64, b: f64) -> f64 {
        a + b * theta
    }

    /// Conic section with a focus at the origin.
    pub fn conic_section(theta: f64, eccentricity: f64, semi_latus_rectum: f64) -> f64 {
        semi_latus_rectum / (1.0 - eccentricity * theta.cos())
    }

    /// Lemniscate of Bernoulli, `sqrt(a^2 cos(2 theta))`.
    ///
    /// The lobes only cover angles where `cos(2 theta) >= 0`; elsewhere the
    /// radius is `0`.
    pub fn lemniscate(theta: f64, a: f64) -> f64 {
        (a * a * (2.0 * theta).cos()).max(0.0).sqrt()
    }
}

/// Turn a polar equation into a planar curve, sweeping one full revolution.
pub fn polar_curve<F>(r: F, closed: bool) -> Curve2
where
    F: Fn(f64) -> f64 + Send + Sync + 'static,
{
    Curve2::new(
        move |t| {
            let theta = turns(t);
            let radius = r(theta);
            Point2::new(radius * theta.cos(), radius * theta.sin())
        },
        closed,
    )
}

/// The graph `(x, f(x))` over `x` in `[0, 1]`.
pub fn graph<F>(f: F) -> Curve2
where
    F: Fn(f64) -> f64 + Send + Sync + 'static,
{
    Curve2::new(move |x| Point2::new(x, f(x)), false)
}

/// Unit circle, counter-clockwise from `(1, 0)`.
pub fn circle() -> Curve2 {
    Curve2::new(
        |t| {
            let a = turns(t);
            Point2::new(a.cos(), a.sin())
        },
        true,
    )
}

/// Lissajous figure `(cos(kx a), sin(ky a))`.
pub fn lissajous(kx: u32, ky: u32) -> Curve2 {
    let (kx, ky) = (kx as f64, ky as f64);
    Curve2::new(
        move |t| {
            let a = turns(t);
            Point2::new((kx * a).cos(), (ky * a).sin())
        },
        true,
    )
}

/// Fay's transcendental butterfly, traced over `[0, 12 pi]`.
pub fn butterfly() -> Curve2 {
    Curve2::new(
        |t| {
            let a = turns(t) * 6.0;
            let r = a.cos().exp() - 2.0 * (4.0 * a).cos() - (a / 12.0).sin().powi(5);
            Point2::new(a.sin() * r, a.cos() * r)
        },
        true,
    )
}

/// Graph of `m x + b`.
pub fn line(m: f64, b: f64) -> Curve2 {
    graph(move |x| scalar::line(x, m, b))
}

/// Graph of `x^2`.
pub fn parabola() -> Curve2 {
    graph(scalar::parabola)
}

/// One period of a sine wave.
pub fn sine() -> Curve2 {
    graph(|x| turns(x).sin())
}

/// One period of a cosine wave.
pub fn cosine() -> Curve2 {
    graph(|x| turns(x).cos())
}

/// Graph of `tan(x)`; stays finite on `[0, 1]`.
pub fn tangent() -> Curve2 {
    graph(f64::tan)
}

/// Unit circle in the xy plane.
pub fn circle3() -> Curve3 {
    Curve3::new(
        |t| {
            let a = turns(t);
            Point3::new(a.cos(), a.sin(), 0.0)
        },
        true,
    )
}

/// Unit-radius helix rising from `z = 0` to `z = 1` over `revolutions` turns.
pub fn helix(revolutions: f64) -> Curve3 {
    Curve3::new(
        move |t| {
            let a = turns(t * revolutions);
            Point3::new(a.cos(), a.sin(), t)
        },
        false,
    )
}

/// `(p, q)` torus knot.
pub fn torus_knot(p: u32, q: u32) -> Curve3 {
    let (p, q) = (p as f64, q as f64);
    Curve3::new(
        move |t| {
            let a = turns(t);
            let r = (q * a).cos() + 2.0;
            Point3::new(r * (p * a).cos(), r * (p * a).sin(), -(q * a).sin())
        },
        true,
    )
}

/// Trefoil knot.
pub fn trefoil_knot() -> Curve3 {
    Curve3::new(
        |t| {
            let a = turns(t);
            Point3::new(
                a.sin() + 2.0 * (2.0 * a).sin(),
                a.cos() - 2.0 * (2.0 * a).cos(),
                -(3.0 * a).sin(),
            )
        },
        true,
    )
}

/// Figure-eight knot.
pub fn figure_eight_knot() -> Curve3 {
    Curve3::new(
        |t| {
            let a = turns(t);
            let r = 2.0 + (2.0 * a).cos();
            Point3::new(r * (3.0 * a).cos(), r * (3.0 * a).sin(), (4.0 * a).sin())
        },
        true,
    )
}
