//! Error types for witness encoding, solving, artifacts and the proving seam.
//!
//! The four failure classes stay distinct: encoding errors are raised while
//! building a [`WitnessAssignment`](crate::WitnessAssignment), a signature that
//! does not verify is a plain `false`, an unsatisfied constraint is reported
//! as [`Satisfaction::Unsatisfied`](crate::Satisfaction) or
//! [`ProveError::Unsatisfied`], and backend failures pass through untouched.

use curve::CurveError;
use eddsa::EddsaError;
use thiserror::Error;

use crate::constraint_system::ConstraintId;

/// A (public key, message, signature) triple cannot be represented as
/// field elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("invalid public key: {0}")]
    PublicKey(#[source] EddsaError),

    #[error("invalid message: {0}")]
    Message(#[source] EddsaError),

    #[error("signature coordinate is not a field element: {0}")]
    SignatureCoordinate(#[source] CurveError),

    #[error("signature scalar is not a field element")]
    SignatureScalar,

    #[error("expected {expected} signature bytes, got {actual}")]
    SignatureLength { expected: usize, actual: usize },
}

/// A witness assignment does not fit the constraint system's input layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("expected {expected} public inputs, got {actual}")]
    PublicInputCount { expected: usize, actual: usize },

    #[error("expected {expected} secret inputs, got {actual}")]
    SecretInputCount { expected: usize, actual: usize },
}

/// A serialized constraint system or witness could not be read back.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error(transparent)]
    Postcard(#[from] postcard::Error),

    #[error("malformed constraint system: {0}")]
    Malformed(&'static str),
}

/// Proof generation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProveError {
    #[error(transparent)]
    Solve(#[from] SolveError),

    /// The witness violates a constraint; no proof exists.
    #[error("constraint {constraint} ({label}) is not satisfied")]
    Unsatisfied {
        constraint: ConstraintId,
        label: String,
    },

    /// The proving key was produced for a different constraint system.
    #[error("proving key does not match the constraint system")]
    KeyMismatch,
}

/// Proof verification could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("expected {expected} public inputs, got {actual}")]
    PublicInputCount { expected: usize, actual: usize },
}
