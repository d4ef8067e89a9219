//! # Configuration Constants
//!
//! Centralized constants for the deformation pipeline.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point tolerances
//! - **Harmonics**: Degree limits for the normalization table
//! - **Welding**: Vertex merge defaults for DCEL construction
//! - **Deformation**: Band defaults and displacement gains
//! - **Spectrum**: Analyzer byte range and band energy range

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Twice-area below which a triangle is reported as degenerate.
///
/// Zero-area faces are kept in the DCEL but listed in the build diagnostics,
/// since their normals carry no direction.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-12;

/// Smallest radius used when converting a vertex offset into spherical
/// coordinates.
///
/// A vertex sitting exactly on the mesh center has no defined angles; its
/// radius is clamped to this value first.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_RADIUS;
///
/// let r: f64 = 0.0;
/// let clamped = r.max(MIN_RADIUS);
/// assert!((0.0 / clamped).is_finite());
/// ```
pub const MIN_RADIUS: f64 = 1e-9;

// =============================================================================
// HARMONICS CONSTANTS
// =============================================================================

/// Highest spherical-harmonic degree tabulated at engine startup.
///
/// Band configurations asking for a larger degree are rejected when the
/// configuration is installed.
pub const MAX_SH_DEGREE: u32 = 40;

/// Highest degree a normalization table can hold.
///
/// `K(l, m)` needs `(l + m)!` and `170!` is the largest factorial an `f64`
/// represents, so `2 * l` must stay at or below 170.
///
/// # Example
///
/// ```rust
/// use config::constants::{MAX_SH_DEGREE, MAX_TABULATED_DEGREE};
///
/// assert!(MAX_SH_DEGREE <= MAX_TABULATED_DEGREE);
/// ```
pub const MAX_TABULATED_DEGREE: u32 = 85;

/// Default argument quantization step for the harmonic memo cache.
///
/// Zero keeps exact bit-for-bit keys; a positive step snaps arguments to a
/// lattice so nearby angles share cache entries.
pub const DEFAULT_ANGLE_QUANTUM: f64 = 0.0;

// =============================================================================
// WELDING CONSTANTS
// =============================================================================

/// Suggested merge distance for vertex welding.
///
/// Welding is disabled unless a threshold is passed explicitly; loaders that
/// produce triangle soup usually pass this value.
pub const DEFAULT_MERGE_THRESHOLD: f64 = 1e-4;

// =============================================================================
// DEFORMATION CONSTANTS
// =============================================================================

/// Default radial exponent applied to every band (`r^magnitude`).
pub const DEFAULT_MAGNITUDE: f64 = 0.25;

/// Default gain applied to each band energy before it weights the harmonic.
pub const DEFAULT_ENERGY_GAIN: f64 = 0.03;

/// Default scale applied to the radial term of every band.
pub const DEFAULT_RADIAL_SCALE: f64 = 2.0;

/// Default azimuth advance per unit of band energy.
///
/// Zero keeps the per-vertex harmonic basis fixed between configuration
/// changes. A non-zero drift such as 0.5 rotates each band's pattern with its
/// energy and forces a fresh evaluation every frame.
pub const DEFAULT_PHASE_DRIFT: f64 = 0.0;

/// Default (degree, order) of the low band.
pub const DEFAULT_LOW_BAND: (u32, i32) = (9, 3);

/// Default (degree, order) of the mid band.
pub const DEFAULT_MID_BAND: (u32, i32) = (18, 6);

/// Default (degree, order) of the high band.
pub const DEFAULT_HIGH_BAND: (u32, i32) = (24, 8);

// =============================================================================
// SPECTRUM CONSTANTS
// =============================================================================

/// Largest value an analyzer byte bin can hold.
pub const SPECTRUM_BYTE_MAX: f64 = 255.0;

/// Upper end of the band energy range the engine expects.
///
/// # Example
///
/// ```rust
/// use config::constants::{BAND_ENERGY_MAX, SPECTRUM_BYTE_MAX};
///
/// let loudest = SPECTRUM_BYTE_MAX / SPECTRUM_BYTE_MAX * BAND_ENERGY_MAX;
/// assert_eq!(loudest, BAND_ENERGY_MAX);
/// ```
pub const BAND_ENERGY_MAX: f64 = 10.0;

/// Minimum number of spectrum bins needed to form three bands.
pub const MIN_SPECTRUM_BINS: usize = 3;
