//! # Factorials and Normalization
//!
//! `K(l, m) = sqrt((2l + 1) · (l − m)! / (4π · (l + m)!))`
//!
//! The constants only depend on `(l, m)`, so they are tabulated once for
//! every `0 ≤ m ≤ l ≤ max_degree` instead of being rebuilt from factorials
//! for every vertex of every frame.

use std::f64::consts::PI;

use config::constants::MAX_TABULATED_DEGREE;
use tracing::debug;

use crate::error::{HarmonicsError, HarmonicsResult};

/// Iterative factorial, `0! = 1`.
///
/// Exact up to `22!`; beyond that the product is rounded like any `f64`
/// product and overflows to infinity past `170!`.
///
/// # Example
///
/// ```rust
/// use resonant_harmonics::factorial;
///
/// assert_eq!(factorial(0), 1.0);
/// assert_eq!(factorial(5), 120.0);
/// ```
pub fn factorial(n: u32) -> f64 {
    (2..=n).fold(1.0, |acc, k| acc * k as f64)
}

/// Closed-form normalization constant `K(l, m)` for `0 ≤ m ≤ l`.
///
/// Returns zero when `m > l`; no harmonic exists there.
pub fn normalization(l: u32, m: u32) -> f64 {
    if m > l {
        return 0.0;
    }
    let ratio = factorial(l - m) / factorial(l + m);
    ((2 * l + 1) as f64 * ratio / (4.0 * PI)).sqrt()
}

/// Dense table of `K(l, m)` for `0 ≤ m ≤ l ≤ max_degree`.
///
/// Stored row by row: entry `(l, m)` lives at `l(l + 1)/2 + m`.
#[derive(Debug, Clone)]
pub struct NormalizationTable {
    max_degree: u32,
    values: Vec<f64>,
}

impl NormalizationTable {
    /// Builds the table.
    ///
    /// Fails when `max_degree` needs factorials an `f64` cannot hold.
    ///
    /// # Example
    ///
    /// ```rust
    /// use resonant_harmonics::NormalizationTable;
    ///
    /// let table = NormalizationTable::new(4).unwrap();
    /// assert!(table.get(4, 4).is_some());
    /// assert!(table.get(5, 0).is_none());
    /// ```
    pub fn new(max_degree: u32) -> HarmonicsResult<Self> {
        if max_degree > MAX_TABULATED_DEGREE {
            return Err(HarmonicsError::DegreeOutOfRange {
                degree: max_degree,
                max: MAX_TABULATED_DEGREE,
            });
        }

        let rows = max_degree as usize + 1;
        let mut values = Vec::with_capacity(rows * (rows + 1) / 2);
        for l in 0..=max_degree {
            values.extend((0..=l).map(|m| normalization(l, m)));
        }

        debug!(max_degree, entries = values.len(), "normalization table built");
        Ok(Self { max_degree, values })
    }

    /// Highest tabulated degree.
    #[inline]
    pub fn max_degree(&self) -> u32 {
        self.max_degree
    }

    /// Looks up `K(l, m)`; `None` outside the table.
    #[inline]
    pub fn get(&self, l: u32, m: u32) -> Option<f64> {
        if l > self.max_degree || m > l {
            return None;
        }
        let l = l as usize;
        self.values.get(l * (l + 1) / 2 + m as usize).copied()
    }
}
