//! # Spherical Harmonic Evaluator
//!
//! Real SH basis:
//!
//! ```text
//! m = 0:  K(l, 0) · P(l, 0, cos θ)
//! m > 0:  √2 · K(l, m) · cos(mφ) · P(l, m, cos θ)
//! m < 0:  √2 · K(l, |m|) · sin(|m|φ) · P(l, |m|, cos θ)
//! ```

use std::f64::consts::SQRT_2;

use crate::cache::{CacheStats, HarmonicCache, Quantizer};
use crate::error::{HarmonicsError, HarmonicsResult};
use crate::factorial::{normalization, NormalizationTable};
use crate::legendre::associated_legendre;

/// Validates an `(l, m)` pair against `|m| ≤ l ≤ max_degree`.
///
/// # Example
///
/// ```rust
/// use resonant_harmonics::check_degree_order;
///
/// assert!(check_degree_order(3, -3, 40).is_ok());
/// assert!(check_degree_order(3, 4, 40).is_err());
/// assert!(check_degree_order(41, 0, 40).is_err());
/// ```
pub fn check_degree_order(l: u32, m: i32, max_degree: u32) -> HarmonicsResult<()> {
    if l > max_degree {
        return Err(HarmonicsError::DegreeOutOfRange {
            degree: l,
            max: max_degree,
        });
    }
    if m.unsigned_abs() > l {
        return Err(HarmonicsError::OrderOutOfRange { degree: l, order: m });
    }
    Ok(())
}

/// Evaluates `Y(l, m, θ, φ)` straight from the closed forms, without tables
/// or caches. Returns zero when `|m| > l`.
pub fn real_spherical_harmonic(l: u32, m: i32, theta: f64, phi: f64) -> f64 {
    let order = m.unsigned_abs();
    if order > l {
        return 0.0;
    }
    combine(m, normalization(l, order), associated_legendre(l, order, theta.cos()), phi)
}

#[inline]
fn combine(m: i32, k: f64, p: f64, phi: f64) -> f64 {
    let order = m.unsigned_abs() as f64;
    match m {
        0 => k * p,
        m if m > 0 => SQRT_2 * k * (order * phi).cos() * p,
        _ => SQRT_2 * k * (order * phi).sin() * p,
    }
}

/// Spherical-harmonic evaluator owning its normalization table and memo cache.
///
/// Created alongside whatever drives it (the deformation engine) and dropped
/// with it; nothing here is global.
///
/// # Example
///
/// ```rust
/// use resonant_harmonics::ShEvaluator;
///
/// let mut sh = ShEvaluator::new(4).unwrap();
/// let a = sh.evaluate(2, 1, 0.7, 0.2).unwrap();
/// let b = sh.evaluate(2, 1, 0.7, 0.2).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(sh.harmonic_stats().hits, 1);
/// ```
#[derive(Debug, Clone)]
pub struct ShEvaluator {
    table: NormalizationTable,
    cache: HarmonicCache,
}

impl ShEvaluator {
    /// Creates an evaluator with a table up to `max_degree` and exact keys.
    pub fn new(max_degree: u32) -> HarmonicsResult<Self> {
        Ok(Self {
            table: NormalizationTable::new(max_degree)?,
            cache: HarmonicCache::new(),
        })
    }

    /// Creates an evaluator whose cache quantizes its arguments.
    pub fn with_quantizer(max_degree: u32, quantizer: Quantizer) -> HarmonicsResult<Self> {
        Ok(Self {
            table: NormalizationTable::new(max_degree)?,
            cache: HarmonicCache::with_quantizer(quantizer),
        })
    }

    /// Highest degree this evaluator accepts.
    #[inline]
    pub fn max_degree(&self) -> u32 {
        self.table.max_degree()
    }

    /// The normalization table.
    #[inline]
    pub fn table(&self) -> &NormalizationTable {
        &self.table
    }

    /// The memo cache.
    #[inline]
    pub fn cache(&self) -> &HarmonicCache {
        &self.cache
    }

    /// Replaces the cache quantizer, dropping entries keyed the old way.
    pub fn set_quantizer(&mut self, quantizer: Quantizer) {
        self.cache.set_quantizer(quantizer);
    }

    /// Validates `(l, m)` against this evaluator's table.
    pub fn check(&self, l: u32, m: i32) -> HarmonicsResult<()> {
        check_degree_order(l, m, self.max_degree())
    }

    /// Memoized `P(l, m, x)`.
    ///
    /// Orders above the degree evaluate to zero, like the free function.
    pub fn legendre(&mut self, l: u32, m: u32, x: f64) -> f64 {
        let key = self.cache.legendre_key(l, m, x);
        if let Some(value) = self.cache.lookup_legendre(&key) {
            return value;
        }
        let value = associated_legendre(l, m, x);
        self.cache.store_legendre(key, value);
        value
    }

    /// Memoized `Y(l, m, θ, φ)`.
    ///
    /// # Errors
    ///
    /// [`HarmonicsError`] when `|m| > l` or `l` exceeds the table.
    pub fn evaluate(&mut self, l: u32, m: i32, theta: f64, phi: f64) -> HarmonicsResult<f64> {
        self.check(l, m)?;

        let (key, theta, phi) = self.cache.harmonic_key(l, m, theta, phi);
        if let Some(value) = self.cache.lookup_harmonic(&key) {
            return Ok(value);
        }

        let order = m.unsigned_abs();
        let k = self
            .table
            .get(l, order)
            .ok_or(HarmonicsError::DegreeOutOfRange {
                degree: l,
                max: self.max_degree(),
            })?;
        let p = self.legendre(l, order, theta.cos());
        let value = combine(m, k, p, phi);

        self.cache.store_harmonic(key, value);
        Ok(value)
    }

    /// SH hit/miss counters.
    pub fn harmonic_stats(&self) -> CacheStats {
        self.cache.harmonic_stats()
    }

    /// Legendre hit/miss counters.
    pub fn legendre_stats(&self) -> CacheStats {
        self.cache.legendre_stats()
    }

    /// Empties the memo cache; the normalization table is kept.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    #[test]
    fn test_y00_is_constant() {
        let mut sh = ShEvaluator::new(2).unwrap();
        let expected = 0.5 / PI.sqrt();
        for (theta, phi) in [(0.0, 0.0), (1.0, 2.0), (PI, -1.0)] {
            assert_relative_eq!(sh.evaluate(0, 0, theta, phi).unwrap(), expected);
        }
    }

    #[test]
    fn test_degree_one_closed_forms() {
        let c = (3.0 / (4.0 * PI)).sqrt();
        let (theta, phi) = (0.8, 1.3);
        // Condon–Shortley phase
        assert_abs_diff_eq!(real_spherical_harmonic(1, 0, theta, phi), c * theta.cos(), epsilon = 1e-14);
        assert_abs_diff_eq!(
            real_spherical_harmonic(1, 1, theta, phi),
            -c * theta.sin() * phi.cos(),
            epsilon = 1e-14
        );
        assert_abs_diff_eq!(
            real_spherical_harmonic(1, -1, theta, phi),
            -c * theta.sin() * phi.sin(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_cached_matches_direct() {
        let mut sh = ShEvaluator::new(10).unwrap();
        for l in 0..=10u32 {
            for m in -(l as i32)..=(l as i32) {
                let cached = sh.evaluate(l, m, 1.1, -0.4).unwrap();
                assert_relative_eq!(
                    cached,
                    real_spherical_harmonic(l, m, 1.1, -0.4),
                    max_relative = 1e-12,
                    epsilon = 1e-15
                );
            }
        }
    }

    #[test]
    fn test_zonal_harmonics_ignore_phi() {
        let mut sh = ShEvaluator::new(8).unwrap();
        for l in 0..=8 {
            for theta in [0.0, 0.3, 1.2, 2.9] {
                let reference = sh.evaluate(l, 0, theta, 0.0).unwrap();
                for phi in [-3.0, 0.7, 2.2, 5.5] {
                    assert_eq!(sh.evaluate(l, 0, theta, phi).unwrap(), reference);
                }
            }
        }
    }

    #[test]
    fn test_rejects_invalid_arguments() {
        let mut sh = ShEvaluator::new(4).unwrap();
        assert_eq!(
            sh.evaluate(2, 3, 0.0, 0.0),
            Err(HarmonicsError::OrderOutOfRange { degree: 2, order: 3 })
        );
        assert_eq!(
            sh.evaluate(2, -3, 0.0, 0.0),
            Err(HarmonicsError::OrderOutOfRange { degree: 2, order: -3 })
        );
        assert_eq!(
            sh.evaluate(5, 0, 0.0, 0.0),
            Err(HarmonicsError::DegreeOutOfRange { degree: 5, max: 4 })
        );
        assert!(sh.cache().is_empty());
    }

    #[test]
    fn test_cache_hit_skips_recomputation() {
        let mut sh = ShEvaluator::new(6).unwrap();
        sh.evaluate(6, -2, 0.5, 0.25).unwrap();
        assert_eq!(sh.harmonic_stats(), CacheStats { hits: 0, misses: 1 });
        assert_eq!(sh.legendre_stats().misses, 1);

        sh.evaluate(6, -2, 0.5, 0.25).unwrap();
        assert_eq!(sh.harmonic_stats(), CacheStats { hits: 1, misses: 1 });
        // The Legendre table was not consulted for the hit.
        assert_eq!(sh.legendre_stats().misses + sh.legendre_stats().hits, 1);
    }

    #[test]
    fn test_legendre_shared_between_orders_of_same_sign() {
        let mut sh = ShEvaluator::new(6).unwrap();
        sh.evaluate(4, 2, 0.5, 0.1).unwrap();
        sh.evaluate(4, -2, 0.5, 0.1).unwrap();
        assert_eq!(sh.legendre_stats(), CacheStats { hits: 1, misses: 1 });
        assert_eq!(sh.cache().legendre_len(), 1);
        assert_eq!(sh.cache().harmonic_len(), 2);
    }

    #[test]
    fn test_quantized_evaluator_shares_nearby_angles() {
        let quantizer = Quantizer::with_step(1e-3).unwrap();
        let mut sh = ShEvaluator::with_quantizer(8, quantizer).unwrap();
        let a = sh.evaluate(5, 3, 0.40001, 1.00002).unwrap();
        let b = sh.evaluate(5, 3, 0.40004, 0.99998).unwrap();
        assert_eq!(a, b);
        assert_eq!(sh.harmonic_stats().hits, 1);
        assert_relative_eq!(a, real_spherical_harmonic(5, 3, 0.4, 1.0), max_relative = 1e-12);
    }

    #[test]
    fn test_clear_cache_keeps_table() {
        let mut sh = ShEvaluator::new(3).unwrap();
        sh.evaluate(3, 1, 0.1, 0.2).unwrap();
        sh.clear_cache();
        assert!(sh.cache().is_empty());
        assert_eq!(sh.max_degree(), 3);
        assert!(sh.table().get(3, 3).is_some());
    }
}
