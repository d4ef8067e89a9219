//! # Resonant Deform
//!
//! Deforms a triangle mesh every frame from three audio band energies.
//!
//! ## Architecture
//!
//! ```text
//! spectrum (u8 bins) → BandEnergies ─┐
//!                                    ├→ DeformationEngine → positions + normals
//! DeformConfig (sliders, JSON) ──────┘        │
//!                                             ├─ rest pose (captured once)
//!                                             ├─ ShEvaluator + cache
//!                                             └─ Dcel (welded normals)
//! ```
//!
//! Each vertex moves along its rest normal by
//!
//! ```text
//! Σ_band  energy · energy_gain · radial_scale · r^magnitude · Y(l, m, θ, φ)
//! ```
//!
//! where `(r, θ, φ)` are the vertex's spherical coordinates about the rest
//! centroid.
//!
//! ## Usage
//!
//! ```rust
//! use resonant_dcel::DcelOptions;
//! use resonant_deform::{BandEnergies, DeformConfig, DeformationEngine};
//! use resonant_geometry::primitives::icosphere;
//!
//! let mut engine = DeformationEngine::new(
//!     icosphere(1.0, 1).unwrap(),
//!     &DcelOptions::default(),
//!     DeformConfig::default(),
//! )
//! .unwrap();
//!
//! let spectrum = [40u8, 220, 90, 10, 0, 180, 30, 5, 2];
//! let energies = BandEnergies::from_spectrum(&spectrum).unwrap();
//! engine.deform(energies).unwrap();
//!
//! let vertices = engine.positions_f32();
//! let normals = engine.normals_f32();
//! assert_eq!(vertices.len(), normals.len());
//! ```

pub mod bands;
pub mod engine;
pub mod error;
pub mod params;

pub use bands::{map_range, BandEnergies};
pub use engine::{DeformationEngine, FrameStats, RestPose};
pub use error::{DeformError, DeformResult};
pub use params::{Band, BandParameter, DeformConfig};
