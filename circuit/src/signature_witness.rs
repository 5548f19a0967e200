//! Witness assignments and the encoding of signature triples into them.

use curve::{decode_coordinates, PrimeField, TwistedEdwardsConfig, FIELD_BYTES, POINT_BYTES};
use eddsa::{Message, VerifyingKey, SIG_SIZE};
use serde::{Deserialize, Serialize};

use crate::errors::{ArtifactError, EncodingError};

/// Values for the input variables of a constraint system, in declaration
/// order. Internal wires are derived from these by
/// [`ConstraintSystem::solve`](crate::ConstraintSystem::solve).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct WitnessAssignment<F: PrimeField> {
    pub public: Vec<F>,
    pub secret: Vec<F>,
}

impl<F: PrimeField> WitnessAssignment<F> {
    pub fn new(public: Vec<F>, secret: Vec<F>) -> Self {
        WitnessAssignment { public, secret }
    }

    pub fn public_inputs(&self) -> &[F] {
        &self.public
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        Ok(postcard::to_allocvec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        Ok(postcard::from_bytes(bytes)?)
    }
}

/// Signature components as raw field elements.
///
/// Unlike [`eddsa::Signature::from_bytes`], decoding only requires each
/// 32-byte word to be a canonical field element. Whether `R` lies on the
/// curve and whether `S` is below the subgroup order are questions for the
/// constraints, so a tampered signature still produces a witness.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SignatureWitness<C: TwistedEdwardsConfig> {
    pub r_x: C::BaseField,
    pub r_y: C::BaseField,
    pub s: C::BaseField,
}

impl<C: TwistedEdwardsConfig> SignatureWitness<C> {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EncodingError> {
        if bytes.len() != SIG_SIZE {
            return Err(EncodingError::SignatureLength {
                expected: SIG_SIZE,
                actual: bytes.len(),
            });
        }
        let (r_x, r_y) = decode_coordinates::<C>(&bytes[..POINT_BYTES])
            .map_err(EncodingError::SignatureCoordinate)?;

        let mut s_bytes = [0u8; FIELD_BYTES];
        s_bytes.copy_from_slice(&bytes[POINT_BYTES..]);
        let s = C::BaseField::from_le_bytes(&s_bytes).ok_or(EncodingError::SignatureScalar)?;

        Ok(SignatureWitness { r_x, r_y, s })
    }

    pub fn values(&self) -> [C::BaseField; 3] {
        [self.r_x, self.r_y, self.s]
    }
}

/// Public key and message as raw field elements, in input order.
pub(crate) fn statement_values<C: TwistedEdwardsConfig>(
    pk: &VerifyingKey<C>,
    msg: &Message<C::BaseField>,
) -> [C::BaseField; 3] {
    let point = pk.point();
    [point.x, point.y, msg.element()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve::{BabyJubjub, BaseField, CurveError};

    #[test]
    fn test_lenient_decoding_accepts_off_curve_commitment() {
        let mut bytes = [0u8; SIG_SIZE];
        bytes[0] = 1;
        bytes[64] = 5;
        let sig = SignatureWitness::<BabyJubjub>::from_bytes(&bytes).expect("canonical words");
        assert_eq!(sig.r_x, BaseField::ONE);
        assert_eq!(sig.r_y, BaseField::ZERO);
        assert_eq!(sig.s, BaseField::from_u64(5));
    }

    #[test]
    fn test_rejects_non_canonical_words() {
        let mut bytes = [0u8; SIG_SIZE];
        bytes[..32].copy_from_slice(&[0xff; 32]);
        assert_eq!(
            SignatureWitness::<BabyJubjub>::from_bytes(&bytes),
            Err(EncodingError::SignatureCoordinate(CurveError::NonCanonicalField))
        );

        let mut bytes = [0u8; SIG_SIZE];
        bytes[64..].copy_from_slice(&[0xff; 32]);
        assert_eq!(
            SignatureWitness::<BabyJubjub>::from_bytes(&bytes),
            Err(EncodingError::SignatureScalar)
        );

        assert_eq!(
            SignatureWitness::<BabyJubjub>::from_bytes(&bytes[..10]),
            Err(EncodingError::SignatureLength {
                expected: SIG_SIZE,
                actual: 10
            })
        );
    }

    #[test]
    fn test_assignment_bytes_round_trip() {
        let assignment = WitnessAssignment::new(
            vec![BaseField::from_u64(1), BaseField::from_u64(2)],
            vec![BaseField::from_u64(3)],
        );
        let bytes = assignment.to_bytes().expect("serialize");
        assert_eq!(WitnessAssignment::from_bytes(&bytes).expect("deserialize"), assignment);
    }
}
