//! # Deformation Engine
//!
//! Displaces every vertex of a mesh along its rest normal by a sum of three
//! spherical harmonics, each weighted by one band energy.
//!
//! ## Lifecycle
//!
//! ```text
//! new ──set_positions*──► Uninitialized ──capture_baseline / first deform──► Captured
//!                                                                 │  ▲
//!                                                                 └──┘ deform, reset
//! ```
//!
//! The rest pose (positions, normals and center) is captured once and never
//! modified afterwards.
//!
//! ## Per-frame work
//!
//! The harmonic basis of a vertex (`radial_scale · r^magnitude · Y(l, m, θ, φ)`
//! for each band) only depends on the rest pose and the configuration, so it
//! is tabulated through the evaluator whenever the configuration changes. A
//! frame then reduces to a weighted sum per vertex, run in parallel with
//! rayon, followed by a normal recomputation over the welded topology.
//!
//! With a non-zero `phase_drift` the azimuth depends on the frame's energies;
//! the basis is then re-evaluated every frame, single-threaded, through the
//! memo cache.

use glam::DVec3;
use rayon::prelude::*;
use resonant_dcel::{Dcel, DcelOptions};
use resonant_geometry::{flatten_f32, SphericalCoord, TriangleMesh};
use resonant_harmonics::{CacheStats, Quantizer, ShEvaluator};
use tracing::{debug, info, warn};

use config::constants::MAX_SH_DEGREE;

use crate::bands::BandEnergies;
use crate::error::{DeformError, DeformResult};
use crate::params::{Band, DeformConfig};

// =============================================================================
// REST POSE
// =============================================================================

/// Immutable snapshot the deformation is computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct RestPose {
    positions: Vec<DVec3>,
    normals: Vec<DVec3>,
    center: DVec3,
}

impl RestPose {
    /// Rest positions, one per vertex record.
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Rest normals.
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    /// Mean of the canonical rest positions.
    pub fn center(&self) -> DVec3 {
        self.center
    }
}

#[derive(Debug, Clone)]
enum Phase {
    Uninitialized,
    Captured(RestPose),
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Summary of one [`DeformationEngine::deform`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Frame counter, starting at 1.
    pub frame: u64,
    /// Vertices updated.
    pub vertices: usize,
    /// Largest absolute displacement along the normal.
    pub max_displacement: f64,
    /// Vertices whose new position was not finite and stayed at rest.
    pub fallback_vertices: usize,
    /// Basis entries that evaluated to NaN/infinity and were zeroed.
    pub zeroed_basis: usize,
    /// Vertices closer to the center than `min_radius`.
    pub clamped_vertices: usize,
    /// True when the basis was (re)evaluated for this frame.
    pub basis_rebuilt: bool,
}

/// Per-vertex harmonic terms and the anomalies found while computing them.
#[derive(Debug, Clone, Default)]
struct Basis {
    terms: Vec<[f64; 3]>,
    zeroed: usize,
    clamped: usize,
}

impl Basis {
    /// Evaluates `radial_scale · r^magnitude · Y(l, m, θ, φ + offset)` for
    /// every vertex and band.
    fn evaluate(
        evaluator: &mut ShEvaluator,
        config: &DeformConfig,
        rest: &RestPose,
        phi_offsets: [f64; 3],
    ) -> DeformResult<Self> {
        let mut basis = Basis {
            terms: Vec::with_capacity(rest.positions.len()),
            ..Basis::default()
        };

        for &position in &rest.positions {
            let offset = position - rest.center;
            if offset.length() < config.min_radius {
                basis.clamped += 1;
            }
            let coord = SphericalCoord::from_offset(offset, config.min_radius)
                .with_phase(config.theta_phase, config.phi_phase);

            let mut terms = [0.0; 3];
            for band in Band::ALL {
                let param = config.band(band);
                let phi = coord.phi + phi_offsets[band.index()];
                let y = evaluator.evaluate(param.degree, param.order, coord.theta, phi)?;
                let term = config.radial_scale * coord.radius.powf(param.magnitude) * y;
                terms[band.index()] = if term.is_finite() {
                    term
                } else {
                    basis.zeroed += 1;
                    0.0
                };
            }
            basis.terms.push(terms);
        }

        if basis.zeroed > 0 {
            warn!(count = basis.zeroed, "Zeroed non-finite harmonic basis terms");
        }
        if basis.clamped > 0 {
            warn!(
                count = basis.clamped,
                min_radius = config.min_radius,
                "Clamped vertices at the mesh center"
            );
        }
        Ok(basis)
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// Audio-driven mesh deformation engine.
///
/// Owns the mesh buffers, the DCEL built from them and the harmonic
/// evaluator (with its cache); all three live exactly as long as the engine.
///
/// # Example
///
/// ```rust
/// use resonant_dcel::DcelOptions;
/// use resonant_deform::{BandEnergies, DeformConfig, DeformationEngine};
/// use resonant_geometry::primitives::icosphere;
///
/// let mesh = icosphere(1.0, 2).unwrap();
/// let mut engine =
///     DeformationEngine::new(mesh, &DcelOptions::default(), DeformConfig::default()).unwrap();
///
/// let stats = engine.deform(BandEnergies::new(4.0, 2.0, 1.0)).unwrap();
/// assert_eq!(stats.vertices, 162);
/// assert!(stats.max_displacement > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct DeformationEngine {
    mesh: TriangleMesh,
    normals: Vec<DVec3>,
    dcel: Dcel,
    config: DeformConfig,
    evaluator: ShEvaluator,
    phase: Phase,
    basis: Option<Basis>,
    frame: u64,
}

impl DeformationEngine {
    /// Builds the topology of `mesh` and installs `config`.
    ///
    /// # Errors
    ///
    /// - [`DeformError::Dcel`] when the mesh cannot be turned into a DCEL
    /// - [`DeformError::Harmonics`] / [`DeformError::InvalidConfig`] for an
    ///   invalid configuration
    pub fn new(mesh: TriangleMesh, options: &DcelOptions, config: DeformConfig) -> DeformResult<Self> {
        config.validate(MAX_SH_DEGREE)?;
        let dcel = Dcel::new(&mesh, options)?;
        let normals = dcel.vertex_normals(mesh.positions())?;
        let evaluator =
            ShEvaluator::with_quantizer(MAX_SH_DEGREE, Quantizer::with_step(config.angle_quantum)?)?;

        Ok(Self {
            mesh,
            normals,
            dcel,
            config,
            evaluator,
            phase: Phase::Uninitialized,
            basis: None,
            frame: 0,
        })
    }

    // =========================================================================
    // CONFIGURATION
    // =========================================================================

    /// Current configuration.
    pub fn config(&self) -> &DeformConfig {
        &self.config
    }

    /// Installs a new configuration.
    ///
    /// Validation happens here, so a bad slider value never reaches a frame;
    /// on error the previous configuration stays active. The basis table is
    /// dropped only when the new configuration samples a different basis.
    pub fn set_config(&mut self, config: DeformConfig) -> DeformResult<()> {
        config.validate(self.evaluator.max_degree())?;
        if config == self.config {
            return Ok(());
        }

        if config.angle_quantum != self.config.angle_quantum {
            self.evaluator
                .set_quantizer(Quantizer::with_step(config.angle_quantum)?);
        }
        if !config.same_basis(&self.config) {
            self.basis = None;
        }
        debug!(?config, "Installed deformation config");
        self.config = config;
        Ok(())
    }

    /// Replaces the vertex positions before the rest pose is captured, e.g.
    /// after the loader recenters the model.
    ///
    /// # Errors
    ///
    /// [`DeformError::AlreadyCaptured`] once the rest pose exists, or a
    /// length/finiteness error for `positions`.
    pub fn set_positions(&mut self, positions: &[DVec3]) -> DeformResult<()> {
        if matches!(self.phase, Phase::Captured(_)) {
            return Err(DeformError::AlreadyCaptured);
        }
        let expected = self.mesh.vertex_count();
        if positions.len() != expected {
            return Err(DeformError::VertexCountMismatch {
                expected,
                actual: positions.len(),
            });
        }
        if let Some(vertex) = positions.iter().position(|p| !p.is_finite()) {
            return Err(DeformError::NonFinitePosition { vertex });
        }

        self.mesh.positions_mut().copy_from_slice(positions);
        self.dcel
            .vertex_normals_into(self.mesh.positions(), &mut self.normals)?;
        Ok(())
    }

    // =========================================================================
    // REST POSE
    // =========================================================================

    /// Snapshots the current positions and normals as the rest pose.
    ///
    /// [`DeformationEngine::deform`] does this on its first call; calling it
    /// explicitly lets the caller control when.
    pub fn capture_baseline(&mut self) -> DeformResult<&RestPose> {
        if matches!(self.phase, Phase::Captured(_)) {
            return Err(DeformError::AlreadyCaptured);
        }
        self.capture();
        match &self.phase {
            Phase::Captured(rest) => Ok(rest),
            Phase::Uninitialized => Err(DeformError::AlreadyCaptured),
        }
    }

    fn capture(&mut self) {
        let canonical: Vec<DVec3> = self
            .dcel
            .vertices()
            .iter()
            .filter(|v| v.is_canonical())
            .map(|v| self.mesh.positions()[v.original_index.index()])
            .collect();
        let center = resonant_geometry::centroid(&canonical);

        info!(
            vertices = self.mesh.vertex_count(),
            canonical = canonical.len(),
            center = ?center,
            "Captured rest pose"
        );

        self.phase = Phase::Captured(RestPose {
            positions: self.mesh.positions().to_vec(),
            normals: self.normals.clone(),
            center,
        });
        self.basis = None;
    }

    /// Rest pose, once captured.
    pub fn rest_pose(&self) -> Option<&RestPose> {
        match &self.phase {
            Phase::Captured(rest) => Some(rest),
            Phase::Uninitialized => None,
        }
    }

    /// True once the rest pose exists.
    pub fn is_captured(&self) -> bool {
        self.rest_pose().is_some()
    }

    /// Puts the rest positions and normals back into the output buffers.
    pub fn reset(&mut self) {
        if let Phase::Captured(rest) = &self.phase {
            self.mesh.positions_mut().copy_from_slice(&rest.positions);
            self.normals.copy_from_slice(&rest.normals);
        }
    }

    // =========================================================================
    // FRAME
    // =========================================================================

    /// Deforms the mesh for one frame.
    ///
    /// Captures the rest pose on the first call. Positions are always
    /// recomputed from the rest pose, so frames never accumulate, and zero
    /// energies reproduce the rest pose exactly.
    ///
    /// # Errors
    ///
    /// [`DeformError::NonFiniteEnergy`] for NaN/infinite energies; nothing is
    /// modified in that case.
    pub fn deform(&mut self, energies: BandEnergies) -> DeformResult<FrameStats> {
        energies.validate()?;
        if !self.is_captured() {
            self.capture();
        }
        let Phase::Captured(rest) = &self.phase else {
            return Err(DeformError::AlreadyCaptured);
        };

        let energy = energies.to_array();
        let drifting = self.config.phase_drift != 0.0;
        let mut basis_rebuilt = false;

        let frame_basis;
        let basis: &Basis = if drifting {
            let offsets = energy.map(|e| e * self.config.phase_drift);
            frame_basis = Basis::evaluate(&mut self.evaluator, &self.config, rest, offsets)?;
            basis_rebuilt = true;
            &frame_basis
        } else {
            match &mut self.basis {
                Some(table) => table,
                slot @ None => {
                    let table = Basis::evaluate(&mut self.evaluator, &self.config, rest, [0.0; 3])?;
                    debug!(
                        vertices = table.terms.len(),
                        stats = ?self.evaluator.harmonic_stats(),
                        "Built harmonic basis table"
                    );
                    basis_rebuilt = true;
                    slot.insert(table)
                }
            }
        };

        let weights = energy.map(|e| e * self.config.energy_gain);
        let (fallback_vertices, max_displacement) = self
            .mesh
            .positions_mut()
            .par_iter_mut()
            .zip(rest.positions.par_iter())
            .zip(rest.normals.par_iter())
            .zip(basis.terms.par_iter())
            .map(|(((position, &rest_position), &normal), terms)| {
                let displacement =
                    weights[0] * terms[0] + weights[1] * terms[1] + weights[2] * terms[2];
                let moved = rest_position + normal * displacement;
                if moved.is_finite() {
                    *position = moved;
                    (0, displacement.abs())
                } else {
                    *position = rest_position;
                    (1, 0.0)
                }
            })
            .reduce(|| (0usize, 0.0f64), |a, b| (a.0 + b.0, a.1.max(b.1)));

        if fallback_vertices > 0 {
            warn!(count = fallback_vertices, "Kept non-finite vertices at rest");
        }

        self.dcel
            .vertex_normals_into(self.mesh.positions(), &mut self.normals)?;

        self.frame += 1;
        let stats = FrameStats {
            frame: self.frame,
            vertices: rest.positions.len(),
            max_displacement,
            fallback_vertices,
            zeroed_basis: basis.zeroed,
            clamped_vertices: basis.clamped,
            basis_rebuilt,
        };
        debug!(?stats, "Deformed frame");
        Ok(stats)
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Current mesh (deformed positions, input triangles).
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Current vertex positions.
    pub fn positions(&self) -> &[DVec3] {
        self.mesh.positions()
    }

    /// Current vertex normals.
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    /// Positions as a flat f32 buffer for upload.
    pub fn positions_f32(&self) -> Vec<f32> {
        self.mesh.positions_f32()
    }

    /// Normals as a flat f32 buffer for upload.
    pub fn normals_f32(&self) -> Vec<f32> {
        flatten_f32(&self.normals)
    }

    /// Triangle indices as a flat u32 buffer.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.mesh.indices_u32()
    }

    /// Topology of the mesh.
    pub fn dcel(&self) -> &Dcel {
        &self.dcel
    }

    /// Frames deformed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// SH cache counters.
    pub fn harmonic_stats(&self) -> CacheStats {
        self.evaluator.harmonic_stats()
    }

    /// Legendre cache counters.
    pub fn legendre_stats(&self) -> CacheStats {
        self.evaluator.legendre_stats()
    }
}
