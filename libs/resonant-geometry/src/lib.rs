//! # Resonant Geometry
//!
//! Mesh buffers and the geometry helpers shared by the DCEL and the
//! deformation engine.
//!
//! ## Architecture
//!
//! ```text
//! model loader (flat arrays) → TriangleMesh → resonant-dcel / resonant-deform
//! ```
//!
//! All math runs on `f64` (`glam::DVec3`). Conversion to `f32` only happens
//! when buffers are handed to the renderer.

pub mod error;
pub mod mesh;
pub mod normals;
pub mod primitives;
pub mod spherical;

pub use error::{GeometryError, GeometryResult};
pub use mesh::{flatten_f32, TriangleMesh};
pub use normals::{area_weighted_normals, face_normal, triangle_double_area};
pub use spherical::{centroid, SphericalCoord};
