//! Geometric primitives: bounding boxes, segments, polylines and the
//! capability traits shared by every shape.

pub mod bounds;
pub mod line;
pub mod polyline;
pub mod transform;

pub use bounds::{bounds_of, Aabb, Bounded};
pub use line::{LineSegment, LineSegment2, LineSegment3, SegmentDistance};
pub use polyline::{star_figure, PolyLine, PolyLine2, PolyLine3, PolyLineCurve, Polygon};
pub use transform::{Deformable, Transformable, Transformable2D};
