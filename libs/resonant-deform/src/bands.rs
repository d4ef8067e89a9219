//! # Band Energies
//!
//! Three scalars summarizing the analyzer spectrum, one per [`Band`].
//!
//! The analyzer delivers byte magnitudes (`0..=255`) per frequency bin. The
//! bins are split into three contiguous ranges, each range is reduced to its
//! maximum and the maximum is mapped onto `0..=10`.

use config::constants::{BAND_ENERGY_MAX, MIN_SPECTRUM_BINS, SPECTRUM_BYTE_MAX};
use serde::{Deserialize, Serialize};

use crate::error::{DeformError, DeformResult};
use crate::params::Band;

/// Linearly maps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// No clamping: values outside the input range extrapolate.
///
/// # Example
///
/// ```rust
/// use resonant_deform::map_range;
///
/// assert_eq!(map_range(25.0, 10.0, 50.0, 0.0, 100.0), 37.5);
/// ```
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let fraction = (value - in_min) / (in_max - in_min);
    out_min + fraction * (out_max - out_min)
}

/// Energy of each band for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BandEnergies {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl BandEnergies {
    /// Silence: no displacement at all.
    pub const ZERO: Self = Self {
        low: 0.0,
        mid: 0.0,
        high: 0.0,
    };

    pub fn new(low: f64, mid: f64, high: f64) -> Self {
        Self { low, mid, high }
    }

    /// Energy of one band.
    #[inline]
    pub fn get(&self, band: Band) -> f64 {
        match band {
            Band::Low => self.low,
            Band::Mid => self.mid,
            Band::High => self.high,
        }
    }

    /// Energies as `[low, mid, high]`.
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.low, self.mid, self.high]
    }

    /// Rejects NaN and infinite energies.
    pub fn validate(&self) -> DeformResult<()> {
        for band in Band::ALL {
            let value = self.get(band);
            if !value.is_finite() {
                return Err(DeformError::NonFiniteEnergy { band, value });
            }
        }
        Ok(())
    }

    /// Reduces a byte spectrum to three band energies in `0..=10`.
    ///
    /// Bins `[0, n/3)` feed the low band, `[n/3, 2n/3)` the mid band and
    /// `[2n/3, n)` the high band, so every bin is used; the high band absorbs
    /// the remainder when `n` is not a multiple of three.
    ///
    /// # Example
    ///
    /// ```rust
    /// use resonant_deform::BandEnergies;
    ///
    /// let energies = BandEnergies::from_spectrum(&[255, 0, 0, 51, 0, 0]).unwrap();
    /// assert_eq!(energies, BandEnergies::new(10.0, 2.0, 0.0));
    /// ```
    pub fn from_spectrum(spectrum: &[u8]) -> DeformResult<Self> {
        let n = spectrum.len();
        if n < MIN_SPECTRUM_BINS {
            return Err(DeformError::SpectrumTooShort { len: n });
        }

        let (first, second) = (n / 3, 2 * n / 3);
        let energy = |bins: &[u8]| {
            let peak = bins.iter().copied().max().unwrap_or(0);
            map_range(peak as f64, 0.0, SPECTRUM_BYTE_MAX, 0.0, BAND_ENERGY_MAX)
        };

        Ok(Self {
            low: energy(&spectrum[..first]),
            mid: energy(&spectrum[first..second]),
            high: energy(&spectrum[second..]),
        })
    }
}
