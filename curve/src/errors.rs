//! Error types for decoding field elements and curve points.

use thiserror::Error;

/// Errors raised when bytes or coordinates cannot be turned into valid
/// curve data. Arithmetic itself never fails; malformed input is rejected
/// here, at decode time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// A 32-byte value is not below the field modulus.
    #[error("field element is not canonical")]
    NonCanonicalField,
    /// The coordinates do not satisfy the curve equation.
    #[error("point is not on the curve")]
    NotOnCurve,
    /// The point is on the curve but outside the prime-order subgroup.
    #[error("point is not in the prime-order subgroup")]
    NotInSubgroup,
    /// Input has the wrong number of bytes.
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
