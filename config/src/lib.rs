//! # Config Crate
//!
//! Centralized configuration constants for the resonant mesh-deformation
//! engine. All magic numbers and tunable parameters are defined here so the
//! geometry, harmonics, DCEL and deformation crates agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{MAX_SH_DEGREE, MIN_RADIUS};
//!
//! // Band degrees above the precomputed table are rejected up front
//! let requested_degree = 12;
//! assert!(requested_degree <= MAX_SH_DEGREE);
//!
//! // Radii are clamped before converting to spherical angles
//! let r: f64 = 0.0;
//! assert!(r.max(MIN_RADIUS) > 0.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Frame-Safe**: Defaults never produce NaN in the per-frame path
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
