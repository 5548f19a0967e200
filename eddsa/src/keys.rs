//! Signing and verifying keys for the EdDSA signature scheme.

use curve::{
    Affine, BabyJubjub, CurveError, FIELD_BYTES, PrimeField, Projective, RandomField,
    TwistedEdwardsConfig,
};
use mimc::FieldHasher;
use rand::Rng;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{PK_SIZE, PREFIX_SIZE, SK_SIZE};
use crate::errors::EddsaError;
use crate::message::Message;
use crate::signatures::{Signature, hash_challenge};

/// A secret signing key.
///
/// Holds the secret scalar `sk` and a secret 32-byte prefix that seeds
/// deterministic nonce derivation. Signing the same message twice yields
/// the same signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SigningKey<C: TwistedEdwardsConfig = BabyJubjub> {
    scalar: C::ScalarField,
    prefix: [u8; PREFIX_SIZE],
}

/// A public verifying key `A = sk·B`.
///
/// Always a non-identity point of the prime-order subgroup; every
/// constructor and the deserializer enforce this.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VerifyingKey<C: TwistedEdwardsConfig = BabyJubjub> {
    point: Affine<C>,
}

impl<C: TwistedEdwardsConfig> SigningKey<C> {
    /// Generates a random signing key using the provided random number generator.
    ///
    /// # Example
    ///
    /// ```
    /// use eddsa::SigningKey;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let signing_key: SigningKey = SigningKey::random(&mut rng);
    /// ```
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut scalar = C::ScalarField::random(rng);
        while scalar.is_zero() {
            scalar = C::ScalarField::random(rng);
        }
        let mut prefix = [0u8; PREFIX_SIZE];
        rng.fill(&mut prefix);
        SigningKey { scalar, prefix }
    }

    /// `scalar || prefix`.
    pub fn to_bytes(&self) -> [u8; SK_SIZE] {
        let mut out = [0u8; SK_SIZE];
        out[..FIELD_BYTES].copy_from_slice(&self.scalar.to_le_bytes());
        out[FIELD_BYTES..].copy_from_slice(&self.prefix);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EddsaError> {
        if bytes.len() != SK_SIZE {
            return Err(EddsaError::InvalidLength {
                expected: SK_SIZE,
                actual: bytes.len(),
            });
        }
        let mut scalar_bytes = [0u8; FIELD_BYTES];
        scalar_bytes.copy_from_slice(&bytes[..FIELD_BYTES]);
        let scalar =
            C::ScalarField::from_le_bytes(&scalar_bytes).ok_or(EddsaError::NonCanonicalScalar)?;
        if scalar.is_zero() {
            return Err(EddsaError::ZeroScalar);
        }

        let mut prefix = [0u8; PREFIX_SIZE];
        prefix.copy_from_slice(&bytes[FIELD_BYTES..]);
        Ok(SigningKey { scalar, prefix })
    }

    /// Derives the public verifying key `A = sk·B`.
    pub fn verifying_key(&self) -> VerifyingKey<C> {
        VerifyingKey {
            point: Affine::mul_generator(&self.scalar),
        }
    }

    /// Signs a message.
    ///
    /// 1. Derive the nonce `k = H(prefix, M, 0) || H(prefix, M, 1) mod l`
    /// 2. Compute `R = k·B`
    /// 3. Compute the challenge `c = H(R, A, M) mod l`
    /// 4. Compute `S = k + c·sk`
    pub fn sign<H>(&self, hasher: &H, msg: &Message<C::BaseField>) -> Signature<C>
    where
        H: FieldHasher<C::BaseField>,
    {
        let nonce = self.derive_nonce(hasher, msg);
        let r = Affine::mul_generator(&nonce);
        let pk = self.verifying_key();

        let c = hash_challenge(hasher, &r, &pk.point, msg);
        let s = nonce + c * self.scalar;

        Signature { r, s }
    }

    fn derive_nonce<H>(&self, hasher: &H, msg: &Message<C::BaseField>) -> C::ScalarField
    where
        H: FieldHasher<C::BaseField>,
    {
        let prefix = C::BaseField::from_le_bytes_mod_order(&self.prefix);
        let lo = hasher.hash(&[prefix, msg.element(), C::BaseField::ZERO]);
        let hi = hasher.hash(&[prefix, msg.element(), C::BaseField::ONE]);

        let mut wide = [0u8; 2 * FIELD_BYTES];
        wide[..FIELD_BYTES].copy_from_slice(&lo.to_le_bytes());
        wide[FIELD_BYTES..].copy_from_slice(&hi.to_le_bytes());
        C::ScalarField::from_le_bytes_mod_order(&wide)
    }
}

impl<C: TwistedEdwardsConfig> VerifyingKey<C> {
    /// Accept `point` only if it is a non-identity element of the prime-order
    /// subgroup.
    pub fn from_point(point: Affine<C>) -> Result<Self, EddsaError> {
        if !point.is_on_curve() {
            return Err(CurveError::NotOnCurve.into());
        }
        if point.is_identity() {
            return Err(EddsaError::InvalidPoint);
        }
        if !point.is_in_prime_subgroup() {
            return Err(CurveError::NotInSubgroup.into());
        }
        Ok(VerifyingKey { point })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EddsaError> {
        if bytes.len() != PK_SIZE {
            return Err(EddsaError::InvalidLength {
                expected: PK_SIZE,
                actual: bytes.len(),
            });
        }
        Self::from_point(Affine::from_bytes(bytes)?)
    }

    pub fn to_bytes(&self) -> [u8; PK_SIZE] {
        self.point.to_bytes()
    }

    #[inline]
    pub fn point(&self) -> &Affine<C> {
        &self.point
    }

    /// Verifies a signature on a message.
    ///
    /// Accepts iff `S·B == R + c·A` with `c = H(R, A, M) mod l`. A commitment
    /// `R` off the curve is rejected before the equation is evaluated; `S`
    /// is below the subgroup order by construction of the scalar type.
    ///
    /// # Example
    ///
    /// ```
    /// use curve::{BaseField, PrimeField};
    /// use eddsa::{Message, SigningKey};
    /// use mimc::Mimc;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let mimc = Mimc::<BaseField>::default();
    /// let sk: SigningKey = SigningKey::random(&mut rng);
    /// let msg = Message::new(BaseField::from_u64(7));
    ///
    /// let sig = sk.sign(&mimc, &msg);
    /// assert!(sk.verifying_key().verify(&mimc, &msg, &sig));
    /// ```
    pub fn verify<H>(&self, hasher: &H, msg: &Message<C::BaseField>, sig: &Signature<C>) -> bool
    where
        H: FieldHasher<C::BaseField>,
    {
        if !sig.r.is_on_curve() {
            return false;
        }

        let c = hash_challenge(hasher, &sig.r, &self.point, msg);
        let lhs = Projective::double_scalar_mul_basepoint(
            &sig.s,
            &-c,
            &Projective::from_affine(&self.point),
        );

        lhs == Projective::from_affine(&sig.r)
    }

    /// Decode and verify; undecodable signature bytes do not verify.
    pub fn verify_bytes<H>(&self, hasher: &H, msg: &Message<C::BaseField>, sig: &[u8]) -> bool
    where
        H: FieldHasher<C::BaseField>,
    {
        match Signature::from_bytes(sig) {
            Ok(sig) => self.verify(hasher, msg, &sig),
            Err(_) => false,
        }
    }
}

impl<C: TwistedEdwardsConfig> From<&SigningKey<C>> for VerifyingKey<C> {
    fn from(sk: &SigningKey<C>) -> Self {
        sk.verifying_key()
    }
}

impl<C: TwistedEdwardsConfig> TryFrom<Affine<C>> for VerifyingKey<C> {
    type Error = EddsaError;

    fn try_from(point: Affine<C>) -> Result<Self, Self::Error> {
        Self::from_point(point)
    }
}

impl<C: TwistedEdwardsConfig> Serialize for SigningKey<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.scalar, self.prefix).serialize(serializer)
    }
}

impl<'de, C: TwistedEdwardsConfig> Deserialize<'de> for SigningKey<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (scalar, prefix) = <(C::ScalarField, [u8; PREFIX_SIZE])>::deserialize(deserializer)?;
        if scalar.is_zero() {
            return Err(D::Error::custom(EddsaError::ZeroScalar));
        }
        Ok(SigningKey { scalar, prefix })
    }
}

impl<C: TwistedEdwardsConfig> Serialize for VerifyingKey<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.point.serialize(serializer)
    }
}

impl<'de, C: TwistedEdwardsConfig> Deserialize<'de> for VerifyingKey<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let point = Affine::<C>::deserialize(deserializer)?;
        Self::from_point(point).map_err(D::Error::custom)
    }
}
