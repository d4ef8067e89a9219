//! # DCEL Records
//!
//! Index types and the three record kinds stored in the arena.
//!
//! ## Ownership
//!
//! - **Face**: owns the three half-edges `3f`, `3f + 1`, `3f + 2`
//! - **HalfEdge**: refers to its face, its successor and (maybe) its twin
//! - **Vertex**: refers to one incoming half-edge
//!
//! Every reference is a plain index into the arena, so nothing owns anything
//! twice and no reference cycle exists.

use std::fmt;

use glam::DVec3;

/// Index of a vertex (input position) in the DCEL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct VertexId(pub u32);

/// Index of a half-edge in the DCEL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct HalfEdgeId(pub u32);

/// Index of a face in the DCEL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FaceId(pub u32);

macro_rules! impl_id {
    ($ty:ident, $prefix:literal) => {
        impl $ty {
            /// Position in the owning array.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

impl_id!(VertexId, "v");
impl_id!(HalfEdgeId, "h");
impl_id!(FaceId, "f");

impl HalfEdgeId {
    /// Face owning this half-edge.
    #[inline]
    pub fn face(self) -> FaceId {
        FaceId(self.0 / 3)
    }
}

impl FaceId {
    /// The `corner`-th half-edge of this face (`corner < 3`).
    #[inline]
    pub fn half_edge(self, corner: u32) -> HalfEdgeId {
        HalfEdgeId(self.0 * 3 + corner % 3)
    }
}

/// One input position.
///
/// Welding never removes records: a welded-away vertex keeps its position and
/// points at its representative through `index`.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Position at build time.
    pub position: DVec3,
    /// Canonical vertex after welding; equals `original_index` when the
    /// vertex represents itself.
    pub index: VertexId,
    /// Index in the input buffer.
    pub original_index: VertexId,
    /// One half-edge whose head is this vertex. `None` for welded-away and
    /// isolated vertices.
    pub half_edge: Option<HalfEdgeId>,
}

impl Vertex {
    /// True when this record is its own canonical vertex.
    #[inline]
    pub fn is_canonical(&self) -> bool {
        self.index == self.original_index
    }
}

/// Directed edge `tail → head` inside one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    /// Start vertex (canonical).
    pub tail: VertexId,
    /// End vertex (canonical).
    pub head: VertexId,
    /// Successor in the face cycle.
    pub next: HalfEdgeId,
    /// Opposite half-edge on the neighbouring face, `None` on a boundary.
    pub twin: Option<HalfEdgeId>,
    /// Owning face.
    pub face: FaceId,
}

/// Triangle with its canonical corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// Corners in input winding order, after welding.
    pub vertices: [VertexId; 3],
    /// First half-edge of the cycle (`vertices[0] → vertices[1]`).
    pub half_edge: HalfEdgeId,
    /// Index in the input triangle buffer.
    pub index: FaceId,
}
