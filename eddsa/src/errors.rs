//! Error types for the EdDSA signature scheme.

use curve::CurveError;
use thiserror::Error;

/// Errors raised while decoding keys, signatures and messages.
///
/// Verification itself never fails with an error: a signature that does not
/// verify yields `false`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum EddsaError {
    /// A point or field element failed to decode.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// The verifying key is the identity point.
    #[error("verifying key is the identity point")]
    InvalidPoint,

    /// A scalar encoding is not below the subgroup order.
    #[error("scalar is not below the subgroup order")]
    NonCanonicalScalar,

    /// A signing key with a zero secret scalar.
    #[error("signing key scalar is zero")]
    ZeroScalar,

    /// A message element encoding at or above the field modulus.
    #[error("message does not fit in one field element")]
    MessageOutOfRange,

    /// Input has the wrong number of bytes.
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
