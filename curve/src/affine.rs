use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CurveError;
use crate::field::PrimeField;
use crate::group::TwistedEdwardsConfig;
use crate::projective::Projective;

/// Serialized size of a point: `x || y`, 32 little-endian bytes each.
pub const POINT_BYTES: usize = 64;

/// Affine point `(x, y)` on a twisted Edwards curve.
///
/// The identity is `(0, 1)`; there is no point at infinity. Coordinates are
/// public so that callers can build arbitrary pairs, which is why checked
/// constructors and [`is_on_curve`](Self::is_on_curve) exist.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Affine<C: TwistedEdwardsConfig> {
    pub x: C::BaseField,
    pub y: C::BaseField,
}

impl<C: TwistedEdwardsConfig> Affine<C> {
    /// Create a point without validating it.
    pub fn new(x: C::BaseField, y: C::BaseField) -> Self {
        Affine { x, y }
    }

    /// Create a point, rejecting coordinates that are not on the curve.
    pub fn from_coordinates(x: C::BaseField, y: C::BaseField) -> Result<Self, CurveError> {
        let point = Affine { x, y };
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(CurveError::NotOnCurve)
        }
    }

    #[inline]
    pub fn identity() -> Self {
        Affine {
            x: C::BaseField::ZERO,
            y: C::BaseField::ONE,
        }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y == C::BaseField::ONE
    }

    /// Generator of the prime-order subgroup.
    pub fn generator() -> Self {
        let (x, y) = C::generator();
        Affine { x, y }
    }

    /// Check `a·x² + y² = 1 + d·x²·y²`.
    pub fn is_on_curve(&self) -> bool {
        let x2 = self.x.square();
        let y2 = self.y.square();
        let lhs = C::coeff_a() * x2 + y2;
        let rhs = C::BaseField::ONE + C::coeff_d() * x2 * y2;
        lhs == rhs
    }

    /// Check that `l·P` is the identity, `l` being the subgroup order.
    pub fn is_in_prime_subgroup(&self) -> bool {
        let order = <C::ScalarField as PrimeField>::modulus_limbs();
        Projective::from(self).mul_limbs(&order).is_identity()
    }

    pub fn negate(&self) -> Self {
        Affine {
            x: -self.x,
            y: self.y,
        }
    }

    pub fn double(&self) -> Self {
        *self + *self
    }

    /// Constant-structure scalar multiplication.
    pub fn scalar_mul(&self, scalar: &C::ScalarField) -> Self {
        Projective::from(self).scalar_mul(scalar).to_affine()
    }

    /// Multiply the subgroup generator.
    pub fn mul_generator(scalar: &C::ScalarField) -> Self {
        Projective::<C>::generator().scalar_mul(scalar).to_affine()
    }

    pub fn to_bytes(&self) -> [u8; POINT_BYTES] {
        let mut out = [0u8; POINT_BYTES];
        out[..32].copy_from_slice(&self.x.to_le_bytes());
        out[32..].copy_from_slice(&self.y.to_le_bytes());
        out
    }

    /// Decode `x || y`, rejecting non-canonical coordinates and points off
    /// the curve. Subgroup membership is left to the caller.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CurveError> {
        let (x, y) = decode_coordinates::<C>(bytes)?;
        Self::from_coordinates(x, y)
    }
}

/// Split 64 bytes into two canonical coordinates without any curve check.
pub fn decode_coordinates<C: TwistedEdwardsConfig>(
    bytes: &[u8],
) -> Result<(C::BaseField, C::BaseField), CurveError> {
    if bytes.len() != POINT_BYTES {
        return Err(CurveError::InvalidLength {
            expected: POINT_BYTES,
            actual: bytes.len(),
        });
    }
    let mut x_bytes = [0u8; 32];
    let mut y_bytes = [0u8; 32];
    x_bytes.copy_from_slice(&bytes[..32]);
    y_bytes.copy_from_slice(&bytes[32..]);

    let x = C::BaseField::from_le_bytes(&x_bytes).ok_or(CurveError::NonCanonicalField)?;
    let y = C::BaseField::from_le_bytes(&y_bytes).ok_or(CurveError::NonCanonicalField)?;
    Ok((x, y))
}

impl<C: TwistedEdwardsConfig> Default for Affine<C> {
    fn default() -> Self {
        Self::identity()
    }
}

// The affine addition law with one inversion per coordinate:
//
//   x3 = (x1·y2 + y1·x2) / (1 + d·x1·x2·y1·y2)
//   y3 = (y1·y2 - a·x1·x2) / (1 - d·x1·x2·y1·y2)
//
// Both denominators are nonzero for points on the curve.
impl<C: TwistedEdwardsConfig> Add for Affine<C> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let x1x2 = self.x * other.x;
        let y1y2 = self.y * other.y;
        let dxy = C::coeff_d() * x1x2 * y1y2;

        let x_num = self.x * other.y + self.y * other.x;
        let y_num = y1y2 - C::coeff_a() * x1x2;
        let x_den = (C::BaseField::ONE + dxy)
            .inverse()
            .unwrap_or(C::BaseField::ZERO);
        let y_den = (C::BaseField::ONE - dxy)
            .inverse()
            .unwrap_or(C::BaseField::ZERO);

        Affine {
            x: x_num * x_den,
            y: y_num * y_den,
        }
    }
}

impl<C: TwistedEdwardsConfig> AddAssign for Affine<C> {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl<C: TwistedEdwardsConfig> Sub for Affine<C> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl<C: TwistedEdwardsConfig> SubAssign for Affine<C> {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl<C: TwistedEdwardsConfig> Neg for Affine<C> {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl<C: TwistedEdwardsConfig> Mul<&C::ScalarField> for Affine<C> {
    type Output = Self;

    fn mul(self, scalar: &C::ScalarField) -> Self {
        self.scalar_mul(scalar)
    }
}

impl<C: TwistedEdwardsConfig> Serialize for Affine<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.x, self.y).serialize(serializer)
    }
}

impl<'de, C: TwistedEdwardsConfig> Deserialize<'de> for Affine<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (x, y) = <(C::BaseField, C::BaseField)>::deserialize(deserializer)?;
        Self::from_coordinates(x, y).map_err(D::Error::custom)
    }
}
