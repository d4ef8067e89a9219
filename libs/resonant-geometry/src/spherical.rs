//! # Spherical Coordinates
//!
//! Conversion of vertex offsets (relative to a mesh center) into the
//! `(r, θ, φ)` triple the harmonic field is sampled with.
//!
//! Convention: `θ` is the polar angle measured from `+Z`, `φ` the azimuth
//! measured from `+X` towards `+Y`.

use glam::DVec3;

/// Spherical coordinates of a point relative to some center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoord {
    /// Distance from the center, never below the clamp passed on creation.
    pub radius: f64,
    /// Polar angle in radians, `[0, π]` before any phase offset.
    pub theta: f64,
    /// Azimuth in radians, `(-π, π]` before any phase offset.
    pub phi: f64,
}

impl SphericalCoord {
    /// Converts an offset vector to spherical coordinates.
    ///
    /// The radius is clamped to `min_radius` so a point on the center still
    /// yields finite angles, and `z / r` is clamped into `[-1, 1]` before
    /// `acos` to absorb rounding.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use resonant_geometry::SphericalCoord;
    ///
    /// let s = SphericalCoord::from_offset(DVec3::ZERO, 1e-9);
    /// assert!(s.theta.is_finite() && s.phi.is_finite());
    /// ```
    pub fn from_offset(delta: DVec3, min_radius: f64) -> Self {
        let radius = delta.length().max(min_radius);
        let phi = delta.y.atan2(delta.x);
        let theta = (delta.z / radius).clamp(-1.0, 1.0).acos();
        Self { radius, theta, phi }
    }

    /// Returns a copy with global phase offsets added to both angles.
    #[inline]
    pub fn with_phase(self, theta_phase: f64, phi_phase: f64) -> Self {
        Self {
            theta: self.theta + theta_phase,
            phi: self.phi + phi_phase,
            ..self
        }
    }

    /// Converts back to a cartesian offset.
    pub fn to_offset(self) -> DVec3 {
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        DVec3::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta) * self.radius
    }
}

/// Mean of a set of points; zero for an empty slice.
pub fn centroid(points: &[DVec3]) -> DVec3 {
    if points.is_empty() {
        return DVec3::ZERO;
    }
    points.iter().copied().sum::<DVec3>() / points.len() as f64
}
