//! A catalogue of standard parametric surfaces.
//!
//! Angles are taken in turns of the parameters, so periodic axes wrap exactly
//! at `u = 1` / `v = 1`.

use std::f64::consts::FRAC_PI_2;

use nalgebra::Point3;

use super::surface::ParametricSurface;
use crate::math::turns;

/// Height functions `z = f(x, y)` for [`ParametricSurface::height_field`].
pub mod heights {
    use crate::math::turns;

    /// `x^3 - 3 x y^2`.
    pub fn monkey_saddle(x: f64, y: f64) -> f64 {
        x * x * x - 3.0 * x * y * y
    }

    /// `x^3 / 3 + x y^2 + 2 (x^2 - y^2)`.
    pub fn handkerchief(x: f64, y: f64) -> f64 {
        x * x * x / 3.0 + x * y * y + 2.0 * (x * x - y * y)
    }

    /// `x^2 y^2`.
    pub fn crossed_trough(x: f64, y: f64) -> f64 {
        x * x * y * y
    }

    /// `sin(x turns) + cos(y turns)`.
    pub fn sin_plus_cos(x: f64, y: f64) -> f64 {
        turns(x).sin() + turns(y).cos()
    }

    /// `x^2 - y^2`.
    pub fn saddle(x: f64, y: f64) -> f64 {
        x * x - y * y
    }

    /// `x^4 - 6 x^2 y^2 + y^4`.
    pub fn dog_saddle(x: f64, y: f64) -> f64 {
        let (x2, y2) = (x * x, y * y);
        x2 * x2 - 6.0 * x2 * y2 + y2 * y2
    }
}

/// Unit sphere, y up. `v` sweeps a full meridian circle so both axes close.
pub fn sphere() -> ParametricSurface {
    ParametricSurface::new(
        |uv| {
            let (u, v) = (turns(uv.x), turns(uv.y));
            Point3::new(-u.cos() * v.sin(), v.cos(), u.sin() * v.sin())
        },
        true,
        true,
    )
}

/// Torus about z with tube centre radius `r1` and tube radius `r2`.
pub fn torus(r1: f64, r2: f64) -> ParametricSurface {
    ParametricSurface::new(
        move |uv| {
            let (u, v) = (turns(uv.x), turns(uv.y));
            let ring = r1 + r2 * u.cos();
            Point3::new(ring * v.cos(), ring * v.sin(), r2 * u.sin())
        },
        true,
        true,
    )
}

/// The unit square in the xy plane.
pub fn plane() -> ParametricSurface {
    ParametricSurface::new(|uv| Point3::new(uv.x, uv.y, 0.0), false, false)
}

/// Unit disc in the xy plane; `v` is the radius.
pub fn disc() -> ParametricSurface {
    ParametricSurface::new(
        |uv| {
            let u = turns(uv.x);
            Point3::new(u.cos() * uv.y, u.sin() * uv.y, 0.0)
        },
        true,
        false,
    )
}

/// Unit-radius open cylinder from `z = 0` to `z = 1`.
pub fn cylinder() -> ParametricSurface {
    conical_section(1.0, 1.0)
}

/// Open frustum from radius `r1` at `z = 0` to `r2` at `z = 1`.
pub fn conical_section(r1: f64, r2: f64) -> ParametricSurface {
    ParametricSurface::new(
        move |uv| {
            let u = turns(uv.x);
            let r = r1 + (r2 - r1) * uv.y;
            Point3::new(u.cos() * r, u.sin() * r, uv.y)
        },
        true,
        false,
    )
}

/// Cone of base radius `r` with its apex at `z = 1`.
pub fn cone(r: f64) -> ParametricSurface {
    conical_section(r, 0.0)
}

/// Trefoil tube scaled by `r`.
pub fn trefoil(r: f64) -> ParametricSurface {
    ParametricSurface::new(
        move |uv| {
            let (u, v) = (turns(uv.x), turns(uv.y));
            let third = turns(1.0 / 3.0);
            let a = 2.0 + v.cos();
            let b = 2.0 + (v + third).cos();
            Point3::new(
                r * (3.0 * u).sin() / a,
                r * (u.sin() + 2.0 * (2.0 * u).sin()) / b,
                r / 2.0 * (u.cos() - 2.0 * (2.0 * u).cos()) * a * b / 4.0,
            )
        },
        true,
        true,
    )
}

/// Monkey saddle height field.
pub fn monkey_saddle() -> ParametricSurface {
    ParametricSurface::height_field(heights::monkey_saddle)
}

/// Unit-radius capsule: a cylinder from `z = 0` to `z = 1` capped by
/// hemispheres.
///
/// The bottom cap covers `v < 0.25`, the cylinder `0.25..=0.75` and the top
/// cap the rest; the poles sit at `z = -1` and `z = 2`.
pub fn capsule() -> ParametricSurface {
    ParametricSurface::new(
        |uv| {
            let u = turns(uv.x);
            let v = uv.y;
            let (radius, z) = if v < 0.25 {
                let phi = v / 0.25 * FRAC_PI_2;
                (phi.sin(), -phi.cos())
            } else if v <= 0.75 {
                (1.0, (v - 0.25) / 0.5)
            } else {
                let phi = (v - 0.75) / 0.25 * FRAC_PI_2;
                (phi.cos(), 1.0 + phi.sin())
            };
            Point3::new(u.cos() * radius, u.sin() * radius, z)
        },
        true,
        false,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point2, Vector3};

    const SAMPLES: [f64; 5] = [0.0, 0.2, 0.45, 0.7, 0.95];

    #[test]
    fn test_sphere_is_unit() {
        let s = sphere();
        for &u in &SAMPLES {
            for &v in &SAMPLES {
                assert!((s.eval_uv(u, v).coords.norm() - 1.0).abs() < 1e-12);
            }
        }
        assert!((s.eval_uv(0.3, 0.0) - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_torus_points_lie_on_the_torus() {
        let s = torus(2.0, 0.5);
        for &u in &SAMPLES {
            for &v in &SAMPLES {
                let p = s.eval_uv(u, v);
                let ring = (p.x * p.x + p.y * p.y).sqrt() - 2.0;
                assert!((ring * ring + p.z * p.z - 0.25).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_closed_surfaces_wrap() {
        for s in [sphere(), torus(1.0, 0.25), trefoil(1.0)] {
            assert!(s.closed_u() && s.closed_v());
            for &t in &SAMPLES {
                assert!((s.eval_uv(1.0, t) - s.eval_uv(0.0, t)).norm() < 1e-9);
                assert!((s.eval_uv(t, 1.0) - s.eval_uv(t, 0.0)).norm() < 1e-9);
            }
        }
    }

    #[test]
    fn test_cylinder_normal_points_outwards() {
        let s = cylinder();
        let uv = Point2::new(0.0, 0.5);
        assert!((s.normal(uv) - Vector3::x()).norm() < 1e-5);
    }

    #[test]
    fn test_cone_and_disc() {
        let c = cone(2.0);
        assert!((c.eval_uv(0.0, 0.0) - Point3::new(2.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((c.eval_uv(0.4, 1.0) - Point3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
        let d = disc();
        assert_eq!(d.eval_uv(0.7, 0.0), Point3::origin());
        assert!(d.closed_u() && !d.closed_v());
    }

    #[test]
    fn test_capsule_is_continuous() {
        let s = capsule();
        let eps = 1e-9;
        for v in [0.25, 0.75] {
            assert!((s.eval_uv(0.1, v - eps) - s.eval_uv(0.1, v + eps)).norm() < 1e-6);
        }
        assert!((s.eval_uv(0.0, 0.0) - Point3::new(0.0, 0.0, -1.0)).norm() < 1e-12);
        assert!((s.eval_uv(0.0, 1.0) - Point3::new(0.0, 0.0, 2.0)).norm() < 1e-12);
    }

    #[test]
    fn test_height_functions() {
        assert_eq!(heights::monkey_saddle(1.0, 1.0), -2.0);
        assert_eq!(heights::saddle(2.0, 1.0), 3.0);
        assert_eq!(heights::dog_saddle(1.0, 1.0), -4.0);
        assert_eq!(heights::crossed_trough(2.0, 3.0), 36.0);
        assert!((heights::handkerchief(1.0, 0.0) - (1.0 / 3.0 + 2.0)).abs() < 1e-12);
        assert!((heights::sin_plus_cos(0.25, 0.0) - 2.0).abs() < 1e-12);
        assert_eq!(monkey_saddle().eval_uv(1.0, 1.0), Point3::new(1.0, 1.0, -2.0));
    }
}
