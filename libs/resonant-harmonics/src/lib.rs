//! # Resonant Harmonics
//!
//! Real-valued spherical harmonics `Y(l, m, θ, φ)` used as a smooth scalar
//! field over a mesh.
//!
//! ## Architecture
//!
//! ```text
//! factorial → NormalizationTable (K)  ┐
//!             associated_legendre (P) ├→ ShEvaluator ─ HarmonicCache
//!                                     ┘
//! ```
//!
//! The normalization constants are tabulated once for `l ≤ max_degree`. The
//! Legendre and SH values are memoized in a [`HarmonicCache`] owned by the
//! evaluator, so the cache lives and dies with whoever owns the evaluator.
//!
//! ## Usage
//!
//! ```rust
//! use resonant_harmonics::ShEvaluator;
//!
//! let mut sh = ShEvaluator::new(8).unwrap();
//! let y00 = sh.evaluate(0, 0, 0.3, 1.2).unwrap();
//! assert!((y00 - 0.282_094_791_773_878_1).abs() < 1e-12);
//! ```

pub mod cache;
pub mod error;
pub mod evaluator;
pub mod factorial;
pub mod legendre;

pub use cache::{CacheStats, HarmonicCache, Quantizer};
pub use error::{HarmonicsError, HarmonicsResult};
pub use evaluator::{check_degree_order, real_spherical_harmonic, ShEvaluator};
pub use factorial::{factorial, normalization, NormalizationTable};
pub use legendre::associated_legendre;
