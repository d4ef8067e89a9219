//! # DCEL Errors
//!
//! Build errors ([`DcelError`]) are data errors found while constructing the
//! DCEL. Query errors ([`TopologyError`]) separate an expected boundary from
//! an id that does not belong to the mesh.

use thiserror::Error;

use crate::types::{FaceId, HalfEdgeId, VertexId};

/// Errors raised while building a DCEL.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DcelError {
    /// Merge threshold must be positive and finite.
    #[error("Merge threshold must be positive and finite, got {0}")]
    InvalidThreshold(f64),

    /// Input position contains NaN or infinity.
    #[error("Vertex {vertex} has a non-finite position")]
    NonFinitePosition { vertex: VertexId },

    /// Welding merged two corners of a triangle.
    #[error("Face {face} collapses after welding: corners {vertices:?}")]
    CollapsedFace { face: FaceId, vertices: [VertexId; 3] },

    /// Position buffer does not match the vertex count.
    #[error("Expected {expected} positions, got {actual}")]
    PositionCount { expected: usize, actual: usize },
}

/// Errors raised by adjacency queries.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    /// The half-edge has no twin; the query needed one.
    #[error("Half-edge {half_edge} lies on a boundary (no twin)")]
    Boundary { half_edge: HalfEdgeId },

    /// The vertex is referenced by no face.
    #[error("Vertex {vertex} has no incident half-edge")]
    IsolatedVertex { vertex: VertexId },

    /// Vertex id is not part of this mesh.
    #[error("Unknown vertex {vertex}")]
    UnknownVertex { vertex: VertexId },

    /// Face id is not part of this mesh.
    #[error("Unknown face {face}")]
    UnknownFace { face: FaceId },

    /// Half-edge id is not part of this mesh.
    #[error("Unknown half-edge {half_edge}")]
    UnknownHalfEdge { half_edge: HalfEdgeId },

    /// A structural invariant does not hold.
    #[error("Half-edge {half_edge} is inconsistent: {reason}")]
    Inconsistent {
        half_edge: HalfEdgeId,
        reason: &'static str,
    },
}

/// Result type alias for DCEL construction.
pub type DcelResult<T> = Result<T, DcelError>;

/// Result type alias for DCEL queries.
pub type TopologyResult<T> = Result<T, TopologyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TopologyError::Boundary {
            half_edge: HalfEdgeId(5),
        };
        assert!(err.to_string().contains("h5"));

        let err = DcelError::CollapsedFace {
            face: FaceId(2),
            vertices: [VertexId(0), VertexId(0), VertexId(1)],
        };
        assert!(err.to_string().contains("Face f2"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DcelError>();
        assert_send_sync::<TopologyError>();
    }
}
