//! # Harmonics Errors
//!
//! Invalid `(l, m)` requests are configuration errors. They are reported
//! when a band is configured, before any frame is evaluated.

use thiserror::Error;

/// Errors that can occur while configuring or evaluating harmonics.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HarmonicsError {
    /// Degree must be non-negative.
    #[error("Degree must be non-negative, got {degree}")]
    NegativeDegree { degree: i64 },

    /// Order magnitude must not exceed the degree.
    #[error("Order {order} is out of range for degree {degree} (|m| <= l)")]
    OrderOutOfRange { degree: u32, order: i32 },

    /// Degree is larger than the precomputed normalization table.
    #[error("Degree {degree} exceeds the tabulated maximum {max}")]
    DegreeOutOfRange { degree: u32, max: u32 },

    /// Quantization step must be finite and non-negative.
    #[error("Invalid quantization step: {0}")]
    InvalidQuantum(f64),
}

/// Result type alias for harmonics operations.
pub type HarmonicsResult<T> = Result<T, HarmonicsError>;
