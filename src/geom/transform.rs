//! Capability traits for shapes that can be deformed point-wise.
//!
//! Every shape in the crate is immutable: deforming produces a new value. A
//! shape implements [`Deformable`] once for its point type and picks up the
//! affine helpers from [`Transformable`] (3D) or [`Transformable2D`] (2D)
//! through blanket implementations.

use nalgebra::{Matrix4, Point2, Point3, Rotation3, Unit, Vector2, Vector3};

/// A shape that can be rebuilt by mapping each of its points through a function.
pub trait Deformable<P>: Sized {
    /// Return a new shape with every point replaced by `f(point)`.
    ///
    /// Connectivity (face indices, closure flags, ...) is carried over unchanged.
    fn deform<F>(&self, f: F) -> Self
    where
        F: Fn(&P) -> P + Send + Sync + 'static;
}

/// Affine helpers for 3D shapes.
pub trait Transformable: Deformable<Point3<f64>> {
    /// Apply a homogeneous transformation matrix.
    fn transform(&self, matrix: &Matrix4<f64>) -> Self {
        let m = *matrix;
        self.deform(move |p| m.transform_point(p))
    }

    /// Translate by a vector.
    fn translate(&self, offset: Vector3<f64>) -> Self {
        self.deform(move |p| *p + offset)
    }

    /// Scale component-wise about the origin.
    fn scale(&self, factors: Vector3<f64>) -> Self {
        self.deform(move |p| Point3::from(p.coords.component_mul(&factors)))
    }

    /// Scale uniformly about the origin.
    fn scale_uniform(&self, factor: f64) -> Self {
        self.deform(move |p| Point3::from(p.coords * factor))
    }

    /// Rotate about an axis through the origin.
    fn rotate(&self, axis: &Unit<Vector3<f64>>, angle: f64) -> Self {
        let rotation = Rotation3::from_axis_angle(axis, angle);
        self.deform(move |p| rotation * p)
    }
}

impl<T: Deformable<Point3<f64>>> Transformable for T {}

/// Affine helpers for planar shapes.
pub trait Transformable2D: Deformable<Point2<f64>> {
    /// Translate by a vector.
    fn translate_2d(&self, offset: Vector2<f64>) -> Self {
        self.deform(move |p| *p + offset)
    }

    /// Scale component-wise about the origin.
    fn scale_2d(&self, factors: Vector2<f64>) -> Self {
        self.deform(move |p| Point2::from(p.coords.component_mul(&factors)))
    }
}

impl<T: Deformable<Point2<f64>>> Transformable2D for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Dot(Point3<f64>);

    impl Deformable<Point3<f64>> for Dot {
        fn deform<F>(&self, f: F) -> Self
        where
            F: Fn(&Point3<f64>) -> Point3<f64> + Send + Sync + 'static,
        {
            Dot(f(&self.0))
        }
    }

    #[test]
    fn test_translate_and_scale() {
        let d = Dot(Point3::new(1.0, 2.0, 3.0));
        assert_eq!(d.translate(Vector3::new(1.0, 1.0, 1.0)).0, Point3::new(2.0, 3.0, 4.0));
        assert_eq!(d.scale(Vector3::new(2.0, 0.0, -1.0)).0, Point3::new(2.0, 0.0, -3.0));
        assert_eq!(d.scale_uniform(0.5).0, Point3::new(0.5, 1.0, 1.5));
    }

    #[test]
    fn test_transform_matches_translation() {
        let d = Dot(Point3::new(1.0, 0.0, 0.0));
        let m = Matrix4::new_translation(&Vector3::new(0.0, 5.0, 0.0));
        assert_eq!(d.transform(&m).0, Point3::new(1.0, 5.0, 0.0));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let d = Dot(Point3::new(1.0, 0.0, 0.0));
        let r = d.rotate(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2);
        assert!((r.0 - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }
}
