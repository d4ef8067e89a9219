//! # Deformation Parameters
//!
//! Run-time configuration of the engine. Every struct here is plain data
//! with serde support so an external control surface (sliders, a JSON file)
//! can replace it wholesale; the engine validates it on installation.
//!
//! ## Example
//!
//! ```rust
//! use resonant_deform::{BandParameter, DeformConfig};
//!
//! let config = DeformConfig {
//!     low: BandParameter::try_new(4, -2, 0.5).unwrap(),
//!     ..DeformConfig::default()
//! };
//! assert!(config.validate(40).is_ok());
//! ```

use std::fmt;

use config::constants::{
    DEFAULT_ANGLE_QUANTUM, DEFAULT_ENERGY_GAIN, DEFAULT_HIGH_BAND, DEFAULT_LOW_BAND,
    DEFAULT_MAGNITUDE, DEFAULT_MID_BAND, DEFAULT_PHASE_DRIFT, DEFAULT_RADIAL_SCALE, MAX_SH_DEGREE,
    MIN_RADIUS,
};
use resonant_harmonics::{check_degree_order, HarmonicsError};
use serde::{Deserialize, Serialize};

use crate::error::{DeformError, DeformResult};

// =============================================================================
// BANDS
// =============================================================================

/// Frequency band of the analyzer spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Low,
    Mid,
    High,
}

impl Band {
    /// All bands, low to high.
    pub const ALL: [Band; 3] = [Band::Low, Band::Mid, Band::High];

    /// Position in per-band arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Band::Low => 0,
            Band::Mid => 1,
            Band::High => 2,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Band::Low => "low",
            Band::Mid => "mid",
            Band::High => "high",
        })
    }
}

/// Harmonic driven by one band: `Y(degree, order)` scaled by `r^magnitude`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandParameter {
    /// Degree `l`.
    pub degree: u32,
    /// Order `m`, `|m| ≤ l`.
    pub order: i32,
    /// Radial exponent.
    pub magnitude: f64,
}

impl BandParameter {
    /// Builds a parameter from unchecked slider values.
    ///
    /// # Errors
    ///
    /// - [`HarmonicsError::NegativeDegree`] for `degree < 0`
    /// - [`HarmonicsError::OrderOutOfRange`] for `|order| > degree`
    /// - [`DeformError::InvalidConfig`] for a non-finite magnitude
    pub fn try_new(degree: i64, order: i64, magnitude: f64) -> DeformResult<Self> {
        let l = u32::try_from(degree).map_err(|_| {
            if degree < 0 {
                HarmonicsError::NegativeDegree { degree }
            } else {
                HarmonicsError::DegreeOutOfRange {
                    degree: u32::MAX,
                    max: MAX_SH_DEGREE,
                }
            }
        })?;
        let m = i32::try_from(order)
            .ok()
            .filter(|m| m.unsigned_abs() <= l)
            .ok_or(HarmonicsError::OrderOutOfRange {
                degree: l,
                order: order.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            })?;
        if !magnitude.is_finite() {
            return Err(DeformError::InvalidConfig {
                field: "magnitude",
                value: magnitude,
            });
        }
        Ok(Self {
            degree: l,
            order: m,
            magnitude,
        })
    }

    fn from_default((degree, order): (u32, i32)) -> Self {
        Self {
            degree,
            order,
            magnitude: DEFAULT_MAGNITUDE,
        }
    }

    /// Checks `|m| ≤ l ≤ max_degree` and a finite magnitude.
    pub fn validate(&self, max_degree: u32) -> DeformResult<()> {
        check_degree_order(self.degree, self.order, max_degree)?;
        finite("magnitude", self.magnitude)
    }
}

// =============================================================================
// ENGINE CONFIGURATION
// =============================================================================

/// Full engine configuration.
///
/// Each band displaces a vertex along its rest normal by
/// `energy · energy_gain · radial_scale · r^magnitude · Y(l, m, θ + θ₀, φ + φ₀ + drift · energy)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeformConfig {
    pub low: BandParameter,
    pub mid: BandParameter,
    pub high: BandParameter,
    /// Global polar phase offset `θ₀` in radians.
    pub theta_phase: f64,
    /// Global azimuth phase offset `φ₀` in radians.
    pub phi_phase: f64,
    /// Multiplier applied to every band energy.
    pub energy_gain: f64,
    /// Multiplier applied to every radial term.
    pub radial_scale: f64,
    /// Lower clamp for the vertex radius before angles are taken.
    pub min_radius: f64,
    /// Azimuth advance per unit of band energy.
    pub phase_drift: f64,
    /// Quantization step of the harmonic cache keys; zero for exact keys.
    pub angle_quantum: f64,
}

impl Default for DeformConfig {
    fn default() -> Self {
        Self {
            low: BandParameter::from_default(DEFAULT_LOW_BAND),
            mid: BandParameter::from_default(DEFAULT_MID_BAND),
            high: BandParameter::from_default(DEFAULT_HIGH_BAND),
            theta_phase: 0.0,
            phi_phase: 0.0,
            energy_gain: DEFAULT_ENERGY_GAIN,
            radial_scale: DEFAULT_RADIAL_SCALE,
            min_radius: MIN_RADIUS,
            phase_drift: DEFAULT_PHASE_DRIFT,
            angle_quantum: DEFAULT_ANGLE_QUANTUM,
        }
    }
}

impl DeformConfig {
    /// Parameter of one band.
    pub fn band(&self, band: Band) -> &BandParameter {
        match band {
            Band::Low => &self.low,
            Band::Mid => &self.mid,
            Band::High => &self.high,
        }
    }

    /// Mutable parameter of one band.
    pub fn band_mut(&mut self, band: Band) -> &mut BandParameter {
        match band {
            Band::Low => &mut self.low,
            Band::Mid => &mut self.mid,
            Band::High => &mut self.high,
        }
    }

    /// Validates every field against a table of `max_degree`.
    pub fn validate(&self, max_degree: u32) -> DeformResult<()> {
        for band in Band::ALL {
            self.band(band).validate(max_degree)?;
        }
        finite("theta_phase", self.theta_phase)?;
        finite("phi_phase", self.phi_phase)?;
        finite("energy_gain", self.energy_gain)?;
        finite("radial_scale", self.radial_scale)?;
        finite("phase_drift", self.phase_drift)?;
        if !(self.min_radius > 0.0 && self.min_radius.is_finite()) {
            return Err(DeformError::InvalidConfig {
                field: "min_radius",
                value: self.min_radius,
            });
        }
        if !(self.angle_quantum >= 0.0 && self.angle_quantum.is_finite()) {
            return Err(DeformError::InvalidConfig {
                field: "angle_quantum",
                value: self.angle_quantum,
            });
        }
        Ok(())
    }

    /// True when `other` samples the same per-vertex basis; gains and drift
    /// are applied per frame and do not count. The quantum does, since the
    /// table is evaluated at snapped angles.
    pub fn same_basis(&self, other: &Self) -> bool {
        self.angle_quantum == other.angle_quantum
            && self.low == other.low
            && self.mid == other.mid
            && self.high == other.high
            && self.theta_phase == other.theta_phase
            && self.phi_phase == other.phi_phase
            && self.radial_scale == other.radial_scale
            && self.min_radius == other.min_radius
    }
}

fn finite(field: &'static str, value: f64) -> DeformResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DeformError::InvalidConfig { field, value })
    }
}
