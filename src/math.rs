//! Tolerances and parameter-space helpers shared by the rest of the crate.
//!
//! The vector algebra itself comes from [`nalgebra`]; this module only holds the
//! handful of scalar conventions geometry code agrees on: the default equality
//! tolerance, the default angular tolerance, and how a unit interval is sampled
//! for open and closed domains.

use std::f64::consts::PI;

use nalgebra::{Point3, Vector3};

/// Default floating-point equality tolerance.
pub const TOLERANCE: f64 = 1e-6;

/// Default angular tolerance: one tenth of a degree, in radians.
pub const ONE_TENTH_OF_A_DEGREE: f64 = PI / 1800.0;

/// Below this magnitude a sine, area or length is treated as zero.
pub(crate) const DEGENERATE_EPSILON: f64 = 1e-10;

/// Convert a fraction of a full turn to radians.
#[inline]
pub fn turns(t: f64) -> f64 {
    t * 2.0 * PI
}

/// `count` evenly spaced values in `[0, 1]`, both endpoints included.
///
/// Used for open domains. `count == 1` gives `[0.0]`, `count == 0` gives nothing.
pub fn interpolate_inclusive(count: usize) -> impl Iterator<Item = f64> + Clone {
    let denom = count.saturating_sub(1).max(1) as f64;
    (0..count).map(move |i| i as f64 / denom)
}

/// `count` evenly spaced values in `[0, 1)`, the duplicate endpoint `1.0` omitted.
///
/// Used for closed domains, where `1.0` is identified with `0.0`.
pub fn interpolate_exclusive(count: usize) -> impl Iterator<Item = f64> + Clone {
    let denom = count.max(1) as f64;
    (0..count).map(move |i| i as f64 / denom)
}

/// Parameter samples for a domain of the given closure.
pub fn interpolate(count: usize, closed: bool) -> Vec<f64> {
    if closed {
        interpolate_exclusive(count).collect()
    } else {
        interpolate_inclusive(count).collect()
    }
}

/// Compare two points component-wise within `tolerance`.
pub fn approx_eq(a: &Point3<f64>, b: &Point3<f64>, tolerance: f64) -> bool {
    (a - b).iter().all(|c| c.abs() <= tolerance)
}

/// Angle between two vectors in radians, `0` if either is (nearly) zero.
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let na = a.norm();
    let nb = b.norm();
    if na < DEGENERATE_EPSILON || nb < DEGENERATE_EPSILON {
        return 0.0;
    }
    (a.dot(b) / (na * nb)).clamp(-1.0, 1.0).acos()
}

/// Whether two vectors point along the same line within an angular tolerance.
pub fn colinear(a: &Vector3<f64>, b: &Vector3<f64>, tolerance: f64) -> bool {
    let angle = angle_between(a, b);
    angle <= tolerance || (PI - angle) <= tolerance
}

/// Whether every vector is colinear with the first one.
pub fn are_colinear(vectors: &[Vector3<f64>], tolerance: f64) -> bool {
    match vectors.split_first() {
        None => true,
        Some((reference, rest)) => {
            !reference.iter().any(|c| c.is_nan())
                && rest.iter().all(|v| colinear(v, reference, tolerance))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_includes_both_endpoints() {
        let xs: Vec<f64> = interpolate_inclusive(5).collect();
        assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(interpolate_inclusive(1).collect::<Vec<_>>(), vec![0.0]);
        assert_eq!(interpolate_inclusive(0).count(), 0);
    }

    #[test]
    fn test_exclusive_omits_endpoint() {
        let xs: Vec<f64> = interpolate_exclusive(4).collect();
        assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75]);
        assert!(!xs.contains(&1.0));
        assert_eq!(interpolate_exclusive(0).count(), 0);
    }

    #[test]
    fn test_colinear() {
        let x = Vector3::x();
        let vs = vec![x, -x * 2.0, x * 0.5];
        assert!(are_colinear(&vs, ONE_TENTH_OF_A_DEGREE));

        let vs = vec![x, Vector3::new(1.0, 0.1, 0.0)];
        assert!(!are_colinear(&vs, ONE_TENTH_OF_A_DEGREE));
    }

    #[test]
    fn test_angle_between_degenerate() {
        assert_eq!(angle_between(&Vector3::zeros(), &Vector3::x()), 0.0);
        let a = angle_between(&Vector3::x(), &Vector3::y());
        assert!((a - PI / 2.0).abs() < 1e-12);
    }
}
