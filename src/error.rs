//! Error types for procgeom.
//!
//! Geometry operations are pure computations, so every error here is local and
//! non-retryable. Degenerate geometry (zero-length segments, coincident points,
//! near-parallel lines) is handled by fallback branches and never surfaces as an
//! error.

use thiserror::Error;

/// Result type alias using [`GeometryError`].
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Errors that can occur during geometry operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A numeric argument is malformed (negative resolution, zero-length curve, ...).
    #[error("invalid argument: {name} = {value} ({reason})")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// The topology engine only handles triangle and quad meshes.
    #[error("unsupported topology: faces with {arity} corners (expected 3 or 4)")]
    UnsupportedTopology {
        /// Number of corners per face of the rejected mesh.
        arity: usize,
    },

    /// A face references a point that does not exist.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },
}

impl GeometryError {
    /// Create an invalid argument error.
    pub fn invalid_arg<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        GeometryError::InvalidArgument {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = GeometryError::invalid_arg("columns", -3, "must be non-negative");
        assert_eq!(
            e.to_string(),
            "invalid argument: columns = -3 (must be non-negative)"
        );

        let e = GeometryError::UnsupportedTopology { arity: 5 };
        assert!(e.to_string().contains("5 corners"));
    }
}
