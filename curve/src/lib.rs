//! Twisted Edwards curve arithmetic over 256-bit prime fields.
//!
//! This crate provides a generic Montgomery-form prime field, the BN254
//! scalar field and the Baby Jubjub subgroup order as instantiations,
//! affine and extended projective points generic over a
//! [`TwistedEdwardsConfig`], and the Baby Jubjub parameters.
//! Malformed encodings are rejected at decode time with [`CurveError`].

mod affine;
mod babyjubjub;
mod basefield;
mod errors;
mod field;
mod group;
mod msm;
mod projective;
mod random;
mod scalarfield;

pub use affine::{decode_coordinates, Affine, POINT_BYTES};
pub use babyjubjub::BabyJubjub;
pub use basefield::BaseField;
pub use errors::CurveError;
pub use field::{Fp, FpParams, PrimeField, FIELD_BYTES};
pub use group::TwistedEdwardsConfig;
pub use msm::double_scalar_mul_basepoint;
pub use projective::Projective;
pub use random::RandomField;
pub use scalarfield::ScalarField;
