//! Procedural geometry: shapes defined by functions rather than samples.
//!
//! [`Curve`]s map `[0, 1]` to points and [`ParametricSurface`]s map the unit
//! square to points. Both are cheap to clone, compose with further functions
//! and are only evaluated when sampled or tessellated.
//!
//! ```
//! use procgeom::procedural::{curves, surfaces};
//!
//! let knot = curves::torus_knot(2, 3);
//! assert_eq!(knot.sample(64).len(), 64);
//!
//! let torus = surfaces::torus(2.0, 0.5);
//! assert!(torus.closed_u() && torus.closed_v());
//! ```

mod curve;
pub mod curves;
mod function;
mod surface;
pub mod surfaces;

pub use curve::{Curve, Curve2, Curve3, StandardPlane};
pub use function::Procedural;
pub use surface::ParametricSurface;
