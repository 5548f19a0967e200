//! Signature type and challenge hashing.

use curve::{Affine, BabyJubjub, FIELD_BYTES, POINT_BYTES, PrimeField, TwistedEdwardsConfig};
use mimc::FieldHasher;
use serde::{Deserialize, Serialize};

use crate::constants::SIG_SIZE;
use crate::errors::EddsaError;
use crate::message::Message;

/// An EdDSA signature `(R, S)`.
///
/// The signature satisfies `S·B == R + c·A` where `B` is the subgroup
/// generator, `A` the signer's public key and `c = H(R, A, M)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Signature<C: TwistedEdwardsConfig = BabyJubjub> {
    /// The commitment point `R = k·B`, where `k` is the signing nonce
    pub r: Affine<C>,
    /// The response scalar `S = k + c·sk mod l`
    pub s: C::ScalarField,
}

impl<C: TwistedEdwardsConfig> Signature<C> {
    /// `R.x || R.y || S`, each 32 bytes little-endian.
    pub fn to_bytes(&self) -> [u8; SIG_SIZE] {
        let mut out = [0u8; SIG_SIZE];
        out[..POINT_BYTES].copy_from_slice(&self.r.to_bytes());
        out[POINT_BYTES..].copy_from_slice(&self.s.to_le_bytes());
        out
    }

    /// Strict decoding: `R` must be on the curve and `S` below the subgroup
    /// order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EddsaError> {
        if bytes.len() != SIG_SIZE {
            return Err(EddsaError::InvalidLength {
                expected: SIG_SIZE,
                actual: bytes.len(),
            });
        }
        let r = Affine::from_bytes(&bytes[..POINT_BYTES])?;

        let mut s_bytes = [0u8; FIELD_BYTES];
        s_bytes.copy_from_slice(&bytes[POINT_BYTES..]);
        let s = C::ScalarField::from_le_bytes(&s_bytes).ok_or(EddsaError::NonCanonicalScalar)?;

        Ok(Signature { r, s })
    }
}

/// The challenge `H(R.x, R.y, A.x, A.y, M)` as a base field element.
///
/// This is the value recomputed inside the constraint system, where it is
/// used at full width.
pub fn challenge_element<C, H>(
    hasher: &H,
    r: &Affine<C>,
    pk: &Affine<C>,
    msg: &Message<C::BaseField>,
) -> C::BaseField
where
    C: TwistedEdwardsConfig,
    H: FieldHasher<C::BaseField>,
{
    hasher.hash(&[r.x, r.y, pk.x, pk.y, msg.element()])
}

/// The challenge reduced modulo the subgroup order.
pub(crate) fn hash_challenge<C, H>(
    hasher: &H,
    r: &Affine<C>,
    pk: &Affine<C>,
    msg: &Message<C::BaseField>,
) -> C::ScalarField
where
    C: TwistedEdwardsConfig,
    H: FieldHasher<C::BaseField>,
{
    let c = challenge_element(hasher, r, pk, msg);
    C::ScalarField::from_le_bytes_mod_order(&c.to_le_bytes())
}
