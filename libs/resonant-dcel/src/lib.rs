//! # Resonant DCEL
//!
//! Doubly connected edge list for triangle meshes.
//!
//! ## Architecture
//!
//! ```text
//! TriangleMesh → weld_vertices → faces + half-edges → twins → back-references
//!                                                      ↓
//!                              queries: fans, one-ring, n-ring, adjacency
//! ```
//!
//! Records live in three arrays and refer to each other by typed index
//! ([`VertexId`], [`HalfEdgeId`], [`FaceId`]). Face `f` owns half-edges
//! `3f..3f + 3`.
//!
//! ## Usage
//!
//! ```rust
//! use resonant_dcel::{Dcel, DcelOptions, VertexId};
//! use resonant_geometry::primitives::icosahedron;
//!
//! let dcel = Dcel::new(&icosahedron(1.0).unwrap(), &DcelOptions::default()).unwrap();
//! assert_eq!(dcel.vertices_on_vertex(VertexId(0)).unwrap().len(), 5);
//! ```

pub mod dcel;
pub mod error;
pub mod normals;
pub mod query;
pub mod types;
pub mod weld;

pub use dcel::{BuildDiagnostics, Dcel, DcelOptions};
pub use error::{DcelError, DcelResult, TopologyError, TopologyResult};
pub use types::{Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexId};
pub use weld::weld_vertices;
