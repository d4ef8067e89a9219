//! # Deformation Errors
//!
//! Configuration problems are reported when a configuration is installed;
//! per-frame errors are limited to malformed energies.

use resonant_dcel::DcelError;
use resonant_harmonics::HarmonicsError;
use thiserror::Error;

use crate::params::Band;

/// Errors raised by the deformation engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeformError {
    /// Invalid `(l, m)` or degree beyond the table.
    #[error("Harmonics error: {0}")]
    Harmonics(#[from] HarmonicsError),

    /// Mesh topology could not be built.
    #[error("DCEL error: {0}")]
    Dcel(#[from] DcelError),

    /// A scalar configuration field is out of range.
    #[error("Invalid configuration value for {field}: {value}")]
    InvalidConfig { field: &'static str, value: f64 },

    /// Band energy is NaN or infinite.
    #[error("Energy of the {band} band is not finite: {value}")]
    NonFiniteEnergy { band: Band, value: f64 },

    /// Position buffer does not match the mesh.
    #[error("Expected {expected} vertices, got {actual}")]
    VertexCountMismatch { expected: usize, actual: usize },

    /// Input position is NaN or infinite.
    #[error("Vertex {vertex} has a non-finite position")]
    NonFinitePosition { vertex: usize },

    /// The rest pose is immutable once captured.
    #[error("Rest pose has already been captured")]
    AlreadyCaptured,

    /// Fewer bins than bands.
    #[error("Spectrum has {len} bins, at least 3 are needed")]
    SpectrumTooShort { len: usize },
}

/// Result type alias for deformation operations.
pub type DeformResult<T> = Result<T, DeformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DeformError::NonFiniteEnergy {
            band: Band::Mid,
            value: f64::NAN,
        };
        assert!(err.to_string().contains("mid band"));

        let err: DeformError = HarmonicsError::OrderOutOfRange { degree: 2, order: 5 }.into();
        assert!(err.to_string().starts_with("Harmonics error"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DeformError>();
    }
}
