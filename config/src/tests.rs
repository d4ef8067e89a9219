//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_min_radius_is_tiny_but_positive() {
    assert!(MIN_RADIUS > 0.0);
    assert!(MIN_RADIUS < 1e-6, "MIN_RADIUS should not distort real geometry");
}

#[test]
fn test_degenerate_area_below_epsilon() {
    assert!(DEGENERATE_AREA_EPSILON <= EPSILON);
}

// =============================================================================
// HARMONICS TESTS
// =============================================================================

#[test]
fn test_max_degree_fits_factorial_range() {
    assert!(MAX_SH_DEGREE <= MAX_TABULATED_DEGREE);
    assert!(2 * MAX_TABULATED_DEGREE <= 170);
}

#[test]
fn test_default_quantum_is_exact() {
    assert_eq!(DEFAULT_ANGLE_QUANTUM, 0.0);
}

// =============================================================================
// DEFORMATION TESTS
// =============================================================================

#[test]
fn test_default_bands_are_valid_harmonics() {
    for (degree, order) in [DEFAULT_LOW_BAND, DEFAULT_MID_BAND, DEFAULT_HIGH_BAND] {
        assert!(order.unsigned_abs() <= degree, "|m| must not exceed l");
        assert!(degree <= MAX_SH_DEGREE);
    }
}

#[test]
fn test_default_gains_are_positive() {
    assert!(DEFAULT_ENERGY_GAIN > 0.0);
    assert!(DEFAULT_RADIAL_SCALE > 0.0);
    assert!(DEFAULT_MAGNITUDE >= 0.0);
}

#[test]
fn test_default_drift_keeps_basis_fixed() {
    assert_eq!(DEFAULT_PHASE_DRIFT, 0.0);
}

// =============================================================================
// SPECTRUM TESTS
// =============================================================================

#[test]
fn test_spectrum_ranges() {
    assert_eq!(SPECTRUM_BYTE_MAX, u8::MAX as f64);
    assert!(BAND_ENERGY_MAX > 0.0);
    assert_eq!(MIN_SPECTRUM_BINS, 3);
}

#[test]
fn test_merge_threshold_is_small() {
    assert!(DEFAULT_MERGE_THRESHOLD > 0.0);
    assert!(DEFAULT_MERGE_THRESHOLD < 1e-2);
}
