//! Axis-aligned bounding boxes.

use nalgebra::{Point3, Vector3};

/// An axis-aligned box in 3D.
///
/// The empty box has `min = +inf` and `max = -inf` on every axis, so merging
/// anything into it yields that thing and it never intersects a real box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a box from two corners. The corners are not reordered.
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// The empty box.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box containing all points. No points gives the empty box.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        let mut b = Self::empty();
        for p in points {
            b.include(p);
        }
        b
    }

    /// Whether the box contains no point at all.
    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    /// Grow the box to contain a point.
    pub fn include(&mut self, p: &Point3<f64>) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Smallest box containing both boxes.
    pub fn merge(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Box centre. Meaningless for the empty box.
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Centre of the bottom face (minimum z).
    pub fn center_bottom(&self) -> Point3<f64> {
        let c = self.center();
        Point3::new(c.x, c.y, self.min.z)
    }

    /// Size along each axis, zero for the empty box.
    pub fn extent(&self) -> Vector3<f64> {
        if self.is_empty() {
            Vector3::zeros()
        } else {
            self.max - self.min
        }
    }

    /// Whether the two boxes overlap (touching counts).
    pub fn intersects(&self, other: &Aabb) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && other.min[i] <= self.max[i])
    }

    /// Whether the point lies inside or on the box.
    pub fn contains(&self, p: &Point3<f64>) -> bool {
        (0..3).all(|i| self.min[i] <= p[i] && p[i] <= self.max[i])
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

/// Anything with an axis-aligned bounding box.
pub trait Bounded {
    /// The bounding box.
    fn bounds(&self) -> Aabb;
}

impl Bounded for Aabb {
    fn bounds(&self) -> Aabb {
        *self
    }
}

impl Bounded for Point3<f64> {
    fn bounds(&self) -> Aabb {
        Aabb::new(*self, *self)
    }
}

impl<T: Bounded + ?Sized> Bounded for &T {
    fn bounds(&self) -> Aabb {
        (**self).bounds()
    }
}

/// Union of the bounds of every item; [`Aabb::empty`] for no items.
pub fn bounds_of<'a, T, I>(items: I) -> Aabb
where
    T: Bounded + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .fold(Aabb::empty(), |acc, item| acc.merge(&item.bounds()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_empty_box() {
        let e = Aabb::empty();
        assert!(e.is_empty());
        assert!(!unit_box().is_empty());
        assert_ne!(e, unit_box());
        assert!(!e.intersects(&unit_box()));
        assert_eq!(e.merge(&unit_box()), unit_box());
        assert_eq!(e.extent(), Vector3::zeros());
    }

    #[test]
    fn test_bounds_of() {
        let pts = vec![
            Point3::new(1.0, -2.0, 0.0),
            Point3::new(-1.0, 3.0, 0.5),
            Point3::new(0.0, 0.0, -4.0),
        ];
        let b = bounds_of(&pts);
        assert_eq!(b.min, Point3::new(-1.0, -2.0, -4.0));
        assert_eq!(b.max, Point3::new(1.0, 3.0, 0.5));
        assert_eq!(b, Aabb::from_points(&pts));

        let none: Vec<Point3<f64>> = Vec::new();
        assert!(bounds_of(&none).is_empty());
    }

    #[test]
    fn test_intersects_and_contains() {
        let a = unit_box();
        let b = Aabb::new(Point3::new(1.0, 1.0, 1.0), Point3::new(2.0, 2.0, 2.0));
        let c = Aabb::new(Point3::new(1.5, 0.0, 0.0), Point3::new(2.0, 1.0, 1.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.contains(&Point3::new(0.5, 0.5, 0.5)));
        assert!(!a.contains(&Point3::new(0.5, 1.5, 0.5)));
        assert_eq!(a.center_bottom(), Point3::new(0.5, 0.5, 0.0));
    }
}
