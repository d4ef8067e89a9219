//! # Harmonic Cache
//!
//! Memo tables for Legendre and SH values, owned by the evaluator that fills
//! them.
//!
//! ## Features
//!
//! - **Argument keys**: exact bit patterns by default, or lattice indices
//!   for the SH angles when a quantization step is configured
//! - **Statistics**: Track hit/miss rates for tuning
//! - **Explicit lifecycle**: Created with the evaluator, cleared on demand,
//!   dropped with it
//!
//! Lookups never fail: a miss is recorded and the caller computes and stores
//! the value.

use std::collections::HashMap;

use crate::error::{HarmonicsError, HarmonicsResult};

/// Maps a continuous argument onto a hashable key.
///
/// With a zero step the key is the exact bit pattern (`-0.0` folded onto
/// `0.0`). With a positive step the argument is snapped to the nearest
/// multiple of the step and the multiple's index is the key; the value is then
/// computed at the snapped argument, so cached results stay exact for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    step: f64,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::exact()
    }
}

impl Quantizer {
    /// Exact-equality keys.
    pub const fn exact() -> Self {
        Self { step: 0.0 }
    }

    /// Lattice keys with the given step; zero means exact.
    ///
    /// # Example
    ///
    /// ```rust
    /// use resonant_harmonics::Quantizer;
    ///
    /// let q = Quantizer::with_step(0.5).unwrap();
    /// assert_eq!(q.snap(1.2), 1.0);
    /// assert_eq!(q.key(1.2), q.key(0.9));
    /// ```
    pub fn with_step(step: f64) -> HarmonicsResult<Self> {
        if !step.is_finite() || step < 0.0 {
            return Err(HarmonicsError::InvalidQuantum(step));
        }
        Ok(Self { step })
    }

    /// Quantization step (zero when exact).
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// True when keys are exact bit patterns.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.step == 0.0
    }

    /// Argument actually evaluated for `x`.
    #[inline]
    pub fn snap(&self, x: f64) -> f64 {
        if self.is_exact() {
            x
        } else {
            (x / self.step).round() * self.step
        }
    }

    /// Cache key for `x`.
    #[inline]
    pub fn key(&self, x: f64) -> u64 {
        if self.is_exact() {
            // -0.0 and 0.0 compare equal, so they share a key
            if x == 0.0 {
                0.0_f64.to_bits()
            } else {
                x.to_bits()
            }
        } else {
            (x / self.step).round() as i64 as u64
        }
    }
}

/// Key of a memoized Legendre value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegendreKey {
    pub l: u32,
    pub m: u32,
    pub x: u64,
}

/// Key of a memoized SH value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HarmonicKey {
    pub l: u32,
    pub m: i32,
    pub theta: u64,
    pub phi: u64,
}

/// Cache statistics for monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
}

impl CacheStats {
    /// Computes the hit rate (0.0 to 1.0).
    ///
    /// # Returns
    ///
    /// Hit rate as a fraction, or 0.0 if no accesses.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    fn record(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }
}

/// Legendre and SH memo tables.
///
/// Unbounded: entries accumulate until [`HarmonicCache::clear`] or until the
/// owner is dropped.
#[derive(Debug, Clone, Default)]
pub struct HarmonicCache {
    quantizer: Quantizer,
    legendre: HashMap<LegendreKey, f64>,
    harmonics: HashMap<HarmonicKey, f64>,
    legendre_stats: CacheStats,
    harmonic_stats: CacheStats,
}

impl HarmonicCache {
    /// Creates an empty cache with exact keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache with the given quantizer.
    pub fn with_quantizer(quantizer: Quantizer) -> Self {
        Self {
            quantizer,
            ..Self::default()
        }
    }

    /// Quantizer used for every key.
    #[inline]
    pub fn quantizer(&self) -> Quantizer {
        self.quantizer
    }

    /// Replaces the quantizer. Entries keyed with the old one are dropped.
    pub fn set_quantizer(&mut self, quantizer: Quantizer) {
        if quantizer != self.quantizer {
            self.quantizer = quantizer;
            self.legendre.clear();
            self.harmonics.clear();
        }
    }

    /// Builds the key for `P(l, m, x)`.
    ///
    /// Always exact: `x` is the cosine of an already snapped polar angle, so
    /// quantizing it again would evaluate `P` away from that angle.
    #[inline]
    pub fn legendre_key(&self, l: u32, m: u32, x: f64) -> LegendreKey {
        LegendreKey {
            l,
            m,
            x: Quantizer::exact().key(x),
        }
    }

    /// Builds the key for `Y(l, m, θ, φ)` and the angles to evaluate it at.
    #[inline]
    pub fn harmonic_key(&self, l: u32, m: i32, theta: f64, phi: f64) -> (HarmonicKey, f64, f64) {
        let key = HarmonicKey {
            l,
            m,
            theta: self.quantizer.key(theta),
            phi: self.quantizer.key(phi),
        };
        (key, self.quantizer.snap(theta), self.quantizer.snap(phi))
    }

    /// Looks up a Legendre value, recording a hit or a miss.
    pub fn lookup_legendre(&mut self, key: &LegendreKey) -> Option<f64> {
        let value = self.legendre.get(key).copied();
        self.legendre_stats.record(value.is_some());
        value
    }

    /// Stores a Legendre value.
    pub fn store_legendre(&mut self, key: LegendreKey, value: f64) {
        self.legendre.insert(key, value);
    }

    /// Looks up an SH value, recording a hit or a miss.
    pub fn lookup_harmonic(&mut self, key: &HarmonicKey) -> Option<f64> {
        let value = self.harmonics.get(key).copied();
        self.harmonic_stats.record(value.is_some());
        value
    }

    /// Stores an SH value.
    pub fn store_harmonic(&mut self, key: HarmonicKey, value: f64) {
        self.harmonics.insert(key, value);
    }

    /// Number of memoized Legendre values.
    pub fn legendre_len(&self) -> usize {
        self.legendre.len()
    }

    /// Number of memoized SH values.
    pub fn harmonic_len(&self) -> usize {
        self.harmonics.len()
    }

    /// True when both tables are empty.
    pub fn is_empty(&self) -> bool {
        self.legendre.is_empty() && self.harmonics.is_empty()
    }

    /// Legendre hit/miss counters.
    pub fn legendre_stats(&self) -> CacheStats {
        self.legendre_stats
    }

    /// SH hit/miss counters.
    pub fn harmonic_stats(&self) -> CacheStats {
        self.harmonic_stats
    }

    /// Drops every entry and resets the statistics.
    pub fn clear(&mut self) {
        self.legendre.clear();
        self.harmonics.clear();
        self.legendre_stats = CacheStats::default();
        self.harmonic_stats = CacheStats::default();
    }
}
