//! # Geometry Errors
//!
//! Error types for mesh buffer construction.

use thiserror::Error;

/// Errors raised while assembling a [`TriangleMesh`](crate::TriangleMesh).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// Flat coordinate buffer is not made of xyz triples.
    #[error("Position buffer length {len} is not a multiple of 3")]
    PositionLength { len: usize },

    /// Flat index buffer is not made of triangles.
    #[error("Index buffer length {len} is not a multiple of 3")]
    IndexLength { len: usize },

    /// A triangle references a vertex that does not exist.
    #[error("Triangle {triangle} references vertex {index} but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    /// Primitive radius must be positive and finite.
    #[error("Radius must be positive: {0}")]
    InvalidRadius(f64),
}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
