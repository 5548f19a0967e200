use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use subtle::{Choice, ConditionallySelectable};

use crate::affine::Affine;
use crate::field::PrimeField;
use crate::group::TwistedEdwardsConfig;
use crate::msm::double_scalar_mul_basepoint;

/// Point in extended twisted Edwards coordinates `(X:Y:Z:T)`.
///
/// Represents `(x, y) = (X/Z, Y/Z)` with the auxiliary `T = X·Y/Z`.
/// The identity is `(0:1:1:0)`. Equality compares the underlying affine
/// point, not the representation.
#[derive(Copy, Clone, Debug)]
pub struct Projective<C: TwistedEdwardsConfig> {
    pub x: C::BaseField,
    pub y: C::BaseField,
    pub z: C::BaseField,
    pub t: C::BaseField,
}

impl<C: TwistedEdwardsConfig> Projective<C> {
    pub fn new(x: C::BaseField, y: C::BaseField, z: C::BaseField, t: C::BaseField) -> Self {
        Projective { x, y, z, t }
    }

    #[inline]
    pub fn identity() -> Self {
        Projective {
            x: C::BaseField::ZERO,
            y: C::BaseField::ONE,
            z: C::BaseField::ONE,
            t: C::BaseField::ZERO,
        }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y == self.z
    }

    pub fn generator() -> Self {
        Self::from_affine(&Affine::generator())
    }

    pub fn from_affine(point: &Affine<C>) -> Self {
        Projective {
            x: point.x,
            y: point.y,
            z: C::BaseField::ONE,
            t: point.x * point.y,
        }
    }

    /// Convert to affine coordinates. A zero `Z` (unreachable from valid
    /// points) maps to `(0, 0)`.
    pub fn to_affine(&self) -> Affine<C> {
        let z_inv = self.z.inverse().unwrap_or(C::BaseField::ZERO);
        Affine::new(self.x * z_inv, self.y * z_inv)
    }

    /// Check the projective curve equation and the `T` relation:
    /// `(a·X² + Y²)·Z² = Z⁴ + d·X²·Y²` and `X·Y = T·Z`.
    pub fn is_on_curve(&self) -> bool {
        if self.z.is_zero() {
            return false;
        }
        let x2 = self.x.square();
        let y2 = self.y.square();
        let z2 = self.z.square();
        let lhs = (C::coeff_a() * x2 + y2) * z2;
        let rhs = z2.square() + C::coeff_d() * x2 * y2;
        lhs == rhs && self.x * self.y == self.t * self.z
    }

    /// dbl-2008-hwcd.
    pub fn double(&self) -> Self {
        let a = self.x.square();
        let b = self.y.square();
        let c = self.z.square().double();
        let d = C::coeff_a() * a;
        let e = (self.x + self.y).square() - a - b;
        let g = d + b;
        let f = g - c;
        let h = d - b;

        Projective {
            x: e * f,
            y: g * h,
            z: f * g,
            t: e * h,
        }
    }

    pub fn negate(&self) -> Self {
        Projective {
            x: -self.x,
            y: self.y,
            z: self.z,
            t: -self.t,
        }
    }

    /// Montgomery ladder over all 256 bits of `limbs` (little-endian).
    ///
    /// Every iteration performs one addition, one doubling and two
    /// conditional swaps regardless of the bit value.
    pub fn mul_limbs(&self, limbs: &[u64; 4]) -> Self {
        let mut r0 = Self::identity();
        let mut r1 = *self;

        for i in (0..256).rev() {
            let bit = Choice::from(((limbs[i / 64] >> (i % 64)) & 1) as u8);
            Self::conditional_swap(&mut r0, &mut r1, bit);
            r1 = r0 + r1;
            r0 = r0.double();
            Self::conditional_swap(&mut r0, &mut r1, bit);
        }

        r0
    }

    pub fn scalar_mul(&self, scalar: &C::ScalarField) -> Self {
        self.mul_limbs(&scalar.to_canonical_limbs())
    }

    pub fn mul_generator(scalar: &C::ScalarField) -> Self {
        Self::generator().scalar_mul(scalar)
    }

    /// Compute `a·B + b·P` in variable time, `B` being the generator.
    /// Only for public operands.
    pub fn double_scalar_mul_basepoint(
        a: &C::ScalarField,
        b: &C::ScalarField,
        point: &Self,
    ) -> Self {
        double_scalar_mul_basepoint(a, b, point)
    }

    /// Convert many points to affine with a single field inversion
    /// (Montgomery's trick).
    pub fn batch_normalize(points: &[Self]) -> Vec<Affine<C>> {
        let mut prefix = Vec::with_capacity(points.len());
        let mut acc = C::BaseField::ONE;
        for p in points {
            prefix.push(acc);
            acc *= p.z;
        }

        let mut inv = acc.inverse().unwrap_or(C::BaseField::ZERO);
        let mut out = vec![Affine::identity(); points.len()];
        for (i, p) in points.iter().enumerate().rev() {
            let z_inv = inv * prefix[i];
            inv *= p.z;
            out[i] = Affine::new(p.x * z_inv, p.y * z_inv);
        }
        out
    }
}

impl<C: TwistedEdwardsConfig> Default for Projective<C> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<C: TwistedEdwardsConfig> PartialEq for Projective<C> {
    fn eq(&self, other: &Self) -> bool {
        self.x * other.z == other.x * self.z && self.y * other.z == other.y * self.z
    }
}

impl<C: TwistedEdwardsConfig> Eq for Projective<C> {}

impl<C: TwistedEdwardsConfig> ConditionallySelectable for Projective<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Projective {
            x: C::BaseField::conditional_select(&a.x, &b.x, choice),
            y: C::BaseField::conditional_select(&a.y, &b.y, choice),
            z: C::BaseField::conditional_select(&a.z, &b.z, choice),
            t: C::BaseField::conditional_select(&a.t, &b.t, choice),
        }
    }
}

// add-2008-hwcd, complete for the curves accepted by `TwistedEdwardsConfig`.
impl<C: TwistedEdwardsConfig> Add for Projective<C> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let a = self.x * other.x;
        let b = self.y * other.y;
        let c = C::coeff_d() * self.t * other.t;
        let d = self.z * other.z;
        let e = (self.x + self.y) * (other.x + other.y) - a - b;
        let f = d - c;
        let g = d + c;
        let h = b - C::coeff_a() * a;

        Projective {
            x: e * f,
            y: g * h,
            z: f * g,
            t: e * h,
        }
    }
}

impl<C: TwistedEdwardsConfig> AddAssign for Projective<C> {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl<C: TwistedEdwardsConfig> Sub for Projective<C> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl<C: TwistedEdwardsConfig> SubAssign for Projective<C> {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl<C: TwistedEdwardsConfig> Neg for Projective<C> {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl<C: TwistedEdwardsConfig> Mul<&C::ScalarField> for Projective<C> {
    type Output = Self;

    fn mul(self, scalar: &C::ScalarField) -> Self {
        self.scalar_mul(scalar)
    }
}

impl<C: TwistedEdwardsConfig> From<Affine<C>> for Projective<C> {
    fn from(point: Affine<C>) -> Self {
        Projective::from_affine(&point)
    }
}

impl<C: TwistedEdwardsConfig> From<&Affine<C>> for Projective<C> {
    fn from(point: &Affine<C>) -> Self {
        Projective::from_affine(point)
    }
}

impl<C: TwistedEdwardsConfig> From<Projective<C>> for Affine<C> {
    fn from(point: Projective<C>) -> Self {
        point.to_affine()
    }
}
