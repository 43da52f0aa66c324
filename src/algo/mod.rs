//! Geometry processing algorithms.
//!
//! - **Discretization**: UV sample grids and their quad faces
//! - **Tessellation**: parametric surfaces to grid meshes
//! - **Neighbourhoods**: ordered one-rings and the operators defined on them
//! - **Curvature**: discrete Gaussian, mean and principal curvature
//! - **Spatial partitioning**: a bounding-box k-d tree
//! - **Modifiers**: face rewrites and point deformers

pub mod curvature;
pub mod discretize;
pub mod kdtree;
pub mod modifiers;
pub mod neighbourhood;
pub mod tessellate;
