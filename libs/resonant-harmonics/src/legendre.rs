//! # Associated Legendre Polynomials
//!
//! `P(l, m, x)` for `m ≥ 0` with the Condon–Shortley phase, evaluated by the
//! standard upward recurrence in `l`:
//!
//! ```text
//! P(m,   m, x) = (−1)^m (2m − 1)!! (1 − x²)^(m/2)
//! P(m+1, m, x) = x (2m + 1) P(m, m, x)
//! P(l,   m, x) = ((2l − 1) x P(l−1, m, x) − (l + m − 1) P(l−2, m, x)) / (l − m)
//! ```

/// Evaluates `P(l, m, x)` for `x ∈ [−1, 1]`.
///
/// Returns zero for `m > l`. Negative orders are never evaluated here; the
/// real SH combination maps them onto `|m|`.
///
/// # Example
///
/// ```rust
/// use resonant_harmonics::associated_legendre;
///
/// // P(2, 0, x) = (3x² − 1) / 2
/// assert!((associated_legendre(2, 0, 0.5) - (-0.125)).abs() < 1e-15);
/// ```
pub fn associated_legendre(l: u32, m: u32, x: f64) -> f64 {
    if m > l {
        return 0.0;
    }

    // (−1)^m (2m − 1)!! (1 − x²)^(m/2) as a running product
    let mut pmm = 1.0;
    if m > 0 {
        let somx2 = ((1.0 - x) * (1.0 + x)).max(0.0).sqrt();
        let mut odd = 1.0;
        for _ in 0..m {
            pmm *= -odd * somx2;
            odd += 2.0;
        }
    }
    if l == m {
        return pmm;
    }

    let mut pmmp1 = x * (2 * m + 1) as f64 * pmm;
    if l == m + 1 {
        return pmmp1;
    }

    let mut pll = 0.0;
    for ll in (m + 2)..=l {
        pll = ((2 * ll - 1) as f64 * x * pmmp1 - (ll + m - 1) as f64 * pmm) / (ll - m) as f64;
        pmm = pmmp1;
        pmmp1 = pll;
    }
    pll
}
