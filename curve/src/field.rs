//! Prime fields in Montgomery form.
//!
//! Every field in this crate fits in four 64-bit limbs and has a modulus
//! below 2^255, so a single generic implementation parameterised by
//! [`FpParams`] serves both the curve's base field and its scalar field.
//! Limbs are stored little-endian.

use core::fmt::{self, Debug, Display, Formatter};
use core::hash::Hash;
use core::iter::{Product, Sum};
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_bigint::BigUint;
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Size of a canonical field element encoding.
pub const FIELD_BYTES: usize = 32;

/// Arithmetic shared by every prime field in the workspace.
///
/// Values are always reduced: conversions out of the field return the
/// canonical representative in `[0, p)`, and conversions into the field
/// either reject non-canonical input or reduce explicitly.
pub trait PrimeField:
    Copy
    + Default
    + Debug
    + Display
    + Eq
    + Hash
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
    + MulAssign
    + Neg<Output = Self>
    + Sum
    + Product
    + ConditionallySelectable
    + ConstantTimeEq
    + Serialize
    + DeserializeOwned
{
    const ZERO: Self;
    const ONE: Self;
    /// Bit length of the modulus.
    const NUM_BITS: u32;

    /// The modulus as little-endian limbs.
    fn modulus_limbs() -> [u64; 4];

    fn from_u64(value: u64) -> Self;

    /// Accepts only canonical values (`< p`).
    fn from_canonical_limbs(limbs: [u64; 4]) -> Option<Self>;

    /// Reduces any 256-bit value modulo `p`.
    fn from_limbs_mod_order(limbs: [u64; 4]) -> Self;

    fn to_canonical_limbs(&self) -> [u64; 4];

    /// Multiplicative inverse; `None` for zero.
    fn inverse(&self) -> Option<Self>;

    #[inline]
    fn is_zero(&self) -> bool {
        self.ct_eq(&Self::ZERO).into()
    }

    #[inline]
    fn square(&self) -> Self {
        *self * *self
    }

    #[inline]
    fn double(&self) -> Self {
        *self + *self
    }

    /// Square-and-multiply over all 256 exponent bits. The multiplication is
    /// always performed and the result selected, so the operation sequence
    /// does not depend on the exponent.
    fn pow(&self, exp: &[u64; 4]) -> Self {
        let mut acc = Self::ONE;
        for limb in exp.iter().rev() {
            for i in (0..64).rev() {
                acc = acc.square();
                let multiplied = acc * *self;
                let bit = Choice::from(((limb >> i) & 1) as u8);
                acc = Self::conditional_select(&acc, &multiplied, bit);
            }
        }
        acc
    }

    fn from_le_bytes(bytes: &[u8; FIELD_BYTES]) -> Option<Self> {
        Self::from_canonical_limbs(bytes_to_limbs(bytes))
    }

    fn to_le_bytes(&self) -> [u8; FIELD_BYTES] {
        limbs_to_bytes(&self.to_canonical_limbs())
    }

    /// Interprets `bytes` as a little-endian integer of any length and
    /// reduces it modulo `p`.
    fn from_le_bytes_mod_order(bytes: &[u8]) -> Self {
        Self::from_biguint(&BigUint::from_bytes_le(bytes))
    }

    /// Interprets `bytes` as a big-endian integer of any length and reduces
    /// it modulo `p`.
    fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        Self::from_biguint(&BigUint::from_bytes_be(bytes))
    }

    fn from_biguint(value: &BigUint) -> Self {
        let reduced = value % Self::modulus();
        Self::from_limbs_mod_order(biguint_to_limbs(&reduced))
    }

    fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_le(&self.to_le_bytes())
    }

    fn modulus() -> BigUint {
        BigUint::from_bytes_le(&limbs_to_bytes(&Self::modulus_limbs()))
    }

    /// Little-endian bits of the canonical value, `NUM_BITS` long.
    fn to_bits_le(&self) -> Vec<bool> {
        let limbs = self.to_canonical_limbs();
        (0..Self::NUM_BITS as usize)
            .map(|i| (limbs[i / 64] >> (i % 64)) & 1 == 1)
            .collect()
    }
}

/// Constants describing one Montgomery field instance.
pub trait FpParams: 'static + Copy + Default + Debug + Eq + Hash + Send + Sync {
    /// Name used by `Debug`.
    const NAME: &'static str;
    const MODULUS: [u64; 4];
    /// 2^256 mod p.
    const R: [u64; 4];
    /// 2^512 mod p.
    const R2: [u64; 4];
    /// -p^{-1} mod 2^64.
    const INV: u64;
    const NUM_BITS: u32;
}

/// Field element stored in Montgomery form (`value * 2^256 mod p`).
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Fp<P: FpParams> {
    limbs: [u64; 4],
    _params: PhantomData<P>,
}

impl<P: FpParams> Fp<P> {
    const fn from_raw(limbs: [u64; 4]) -> Self {
        Fp {
            limbs,
            _params: PhantomData,
        }
    }
}

pub(crate) fn bytes_to_limbs(bytes: &[u8; 32]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *limb = u64::from_le_bytes(word);
    }
    limbs
}

pub(crate) fn limbs_to_bytes(limbs: &[u64; 4]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (chunk, limb) in bytes.chunks_exact_mut(8).zip(limbs.iter()) {
        chunk.copy_from_slice(&limb.to_le_bytes());
    }
    bytes
}

/// Callers guarantee `value < 2^256`.
fn biguint_to_limbs(value: &BigUint) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for (limb, digit) in limbs.iter_mut().zip(value.to_u64_digits()) {
        *limb = digit;
    }
    limbs
}

#[inline]
const fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, overflow1) = a.overflowing_add(b);
    let (sum, overflow2) = sum.overflowing_add(carry as u64);
    (sum, overflow1 || overflow2)
}

#[inline]
const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, overflow1) = a.overflowing_sub(b);
    let (diff, overflow2) = diff.overflowing_sub(borrow as u64);
    (diff, overflow1 || overflow2)
}

/// `mask` is all ones to pick `a`, all zeros to pick `b`.
#[inline]
const fn select_limbs(mask: u64, a: [u64; 4], b: [u64; 4]) -> [u64; 4] {
    [
        (a[0] & mask) | (b[0] & !mask),
        (a[1] & mask) | (b[1] & !mask),
        (a[2] & mask) | (b[2] & !mask),
        (a[3] & mask) | (b[3] & !mask),
    ]
}

#[inline]
const fn sub_with_borrow(a: [u64; 4], b: [u64; 4]) -> ([u64; 4], bool) {
    let (r0, borrow) = a[0].overflowing_sub(b[0]);
    let (r1, borrow) = borrowing_sub(a[1], b[1], borrow);
    let (r2, borrow) = borrowing_sub(a[2], b[2], borrow);
    let (r3, borrow) = borrowing_sub(a[3], b[3], borrow);
    ([r0, r1, r2, r3], borrow)
}

/// `(a + b) mod m` for reduced inputs.
#[inline]
const fn add_mod(a: [u64; 4], b: [u64; 4], m: [u64; 4]) -> [u64; 4] {
    let (r0, carry) = a[0].overflowing_add(b[0]);
    let (r1, carry) = carrying_add(a[1], b[1], carry);
    let (r2, carry) = carrying_add(a[2], b[2], carry);
    let (r3, carry) = carrying_add(a[3], b[3], carry);
    let sum = [r0, r1, r2, r3];

    // m < 2^255, so a + b never carries out of the top limb.
    let _ = carry;
    let (reduced, borrow) = sub_with_borrow(sum, m);
    let keep_sum = (borrow as u64).wrapping_neg();
    select_limbs(keep_sum, sum, reduced)
}

/// `(a - b) mod m` for reduced inputs.
#[inline]
const fn sub_mod(a: [u64; 4], b: [u64; 4], m: [u64; 4]) -> [u64; 4] {
    let (diff, borrow) = sub_with_borrow(a, b);
    let mask = (borrow as u64).wrapping_neg();
    let correction = [m[0] & mask, m[1] & mask, m[2] & mask, m[3] & mask];

    let (r0, carry) = diff[0].overflowing_add(correction[0]);
    let (r1, carry) = carrying_add(diff[1], correction[1], carry);
    let (r2, carry) = carrying_add(diff[2], correction[2], carry);
    let (r3, _) = carrying_add(diff[3], correction[3], carry);
    [r0, r1, r2, r3]
}

/// Montgomery multiplication: `a * b * 2^-256 mod m`.
///
/// `b` must be reduced; `a` may be any 256-bit value, which is what lets
/// `from_limbs_mod_order` reduce arbitrary input by multiplying with R^2.
#[inline]
fn montgomery_mul(a: [u64; 4], b: [u64; 4], m: [u64; 4], inv: u64) -> [u64; 4] {
    let mut t = [0u64; 8];

    for i in 0..4 {
        let mut carry = 0u128;
        for j in 0..4 {
            let product = (a[i] as u128) * (b[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }
        t[i + 4] = carry as u64;
    }

    for i in 0..4 {
        let k = t[i].wrapping_mul(inv);
        let mut carry = 0u128;

        for j in 0..4 {
            let product = (k as u128) * (m[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }

        for j in 4..8 - i {
            let sum = (t[i + j] as u128) + carry;
            t[i + j] = sum as u64;
            carry = sum >> 64;
        }
    }

    let result = [t[4], t[5], t[6], t[7]];
    let (reduced, borrow) = sub_with_borrow(result, m);
    let keep_result = (borrow as u64).wrapping_neg();
    select_limbs(keep_result, result, reduced)
}

#[inline]
const fn is_canonical(limbs: [u64; 4], m: [u64; 4]) -> bool {
    let (_, borrow) = sub_with_borrow(limbs, m);
    borrow
}

impl<P: FpParams> PrimeField for Fp<P> {
    const ZERO: Self = Fp::from_raw([0, 0, 0, 0]);
    const ONE: Self = Fp::from_raw(P::R);
    const NUM_BITS: u32 = P::NUM_BITS;

    #[inline]
    fn modulus_limbs() -> [u64; 4] {
        P::MODULUS
    }

    #[inline]
    fn from_u64(value: u64) -> Self {
        Self::from_limbs_mod_order([value, 0, 0, 0])
    }

    fn from_canonical_limbs(limbs: [u64; 4]) -> Option<Self> {
        if is_canonical(limbs, P::MODULUS) {
            Some(Self::from_limbs_mod_order(limbs))
        } else {
            None
        }
    }

    #[inline]
    fn from_limbs_mod_order(limbs: [u64; 4]) -> Self {
        Fp::from_raw(montgomery_mul(limbs, P::R2, P::MODULUS, P::INV))
    }

    #[inline]
    fn to_canonical_limbs(&self) -> [u64; 4] {
        montgomery_mul(self.limbs, [1, 0, 0, 0], P::MODULUS, P::INV)
    }

    fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        // Fermat: a^(p-2).
        let (exp, _) = sub_with_borrow(P::MODULUS, [2, 0, 0, 0]);
        Some(self.pow(&exp))
    }
}

impl<P: FpParams> Add for Fp<P> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Fp::from_raw(add_mod(self.limbs, rhs.limbs, P::MODULUS))
    }
}

impl<P: FpParams> AddAssign for Fp<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: FpParams> Sub for Fp<P> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Fp::from_raw(sub_mod(self.limbs, rhs.limbs, P::MODULUS))
    }
}

impl<P: FpParams> SubAssign for Fp<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: FpParams> Neg for Fp<P> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Fp::from_raw(sub_mod([0, 0, 0, 0], self.limbs, P::MODULUS))
    }
}

impl<P: FpParams> Mul for Fp<P> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Fp::from_raw(montgomery_mul(self.limbs, rhs.limbs, P::MODULUS, P::INV))
    }
}

impl<P: FpParams> MulAssign for Fp<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: FpParams> Sum for Fp<P> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<P: FpParams> Product for Fp<P> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl<P: FpParams> ConditionallySelectable for Fp<P> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp::from_raw([
            u64::conditional_select(&a.limbs[0], &b.limbs[0], choice),
            u64::conditional_select(&a.limbs[1], &b.limbs[1], choice),
            u64::conditional_select(&a.limbs[2], &b.limbs[2], choice),
            u64::conditional_select(&a.limbs[3], &b.limbs[3], choice),
        ])
    }
}

impl<P: FpParams> ConstantTimeEq for Fp<P> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.limbs[..].ct_eq(&other.limbs[..])
    }
}

impl<P: FpParams> Display for Fp<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let canonical = self.to_canonical_limbs();
        write!(
            f,
            "0x{:016x}{:016x}{:016x}{:016x}",
            canonical[3], canonical[2], canonical[1], canonical[0]
        )
    }
}

impl<P: FpParams> Debug for Fp<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", P::NAME, self)
    }
}

// Serialized as the 32-byte little-endian canonical value, never the
// Montgomery limbs.
impl<P: FpParams> Serialize for Fp<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_le_bytes().serialize(serializer)
    }
}

impl<'de, P: FpParams> Deserialize<'de> for Fp<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = <[u8; 32]>::deserialize(deserializer)?;
        Self::from_le_bytes(&bytes)
            .ok_or_else(|| D::Error::custom(format!("non-canonical {} element", P::NAME)))
    }
}

impl<P: FpParams> Distribution<Fp<P>> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Fp<P> {
        let top_bits = P::NUM_BITS - 192;
        loop {
            let mut limbs: [u64; 4] = rng.random();
            limbs[3] &= (1u64 << top_bits) - 1;

            if let Some(value) = Fp::from_canonical_limbs(limbs) {
                return value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BaseField, ScalarField};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_one() {
        assert_eq!(BaseField::ZERO + BaseField::ZERO, BaseField::ZERO);
        assert_eq!(BaseField::ONE * BaseField::ONE, BaseField::ONE);
        assert_eq!(BaseField::ZERO * BaseField::ONE, BaseField::ZERO);
        assert_eq!(BaseField::ONE.to_canonical_limbs(), [1, 0, 0, 0]);
    }

    #[test]
    fn test_small_arithmetic() {
        let a = BaseField::from_u64(6);
        let b = BaseField::from_u64(7);
        assert_eq!(a + b, BaseField::from_u64(13));
        assert_eq!(b - a, BaseField::ONE);
        assert_eq!(a * b, BaseField::from_u64(42));
        assert_eq!(a - b, -BaseField::ONE);
    }

    #[test]
    fn test_negation_wraps_to_modulus() {
        let minus_one = -BaseField::ONE;
        let mut expected = BaseField::modulus_limbs();
        expected[0] -= 1;
        assert_eq!(minus_one.to_canonical_limbs(), expected);
        assert_eq!(-BaseField::ZERO, BaseField::ZERO);
    }

    #[test]
    fn test_inverse() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..8 {
            let a: BaseField = rng.random();
            let inv = a.inverse().expect("nonzero");
            assert_eq!(a * inv, BaseField::ONE);

            let s: ScalarField = rng.random();
            assert_eq!(s * s.inverse().expect("nonzero"), ScalarField::ONE);
        }
        assert!(BaseField::ZERO.inverse().is_none());
    }

    #[test]
    fn test_pow_matches_repeated_multiplication() {
        let a = BaseField::from_u64(3);
        assert_eq!(a.pow(&[5, 0, 0, 0]), a * a * a * a * a);
        assert_eq!(a.pow(&[0, 0, 0, 0]), BaseField::ONE);
    }

    #[test]
    fn test_canonical_bytes_round_trip() {
        let mut rng = StdRng::seed_from_u64(11);
        let a: BaseField = rng.random();
        let bytes = a.to_le_bytes();
        assert_eq!(BaseField::from_le_bytes(&bytes), Some(a));
    }

    #[test]
    fn test_rejects_non_canonical() {
        let modulus = limbs_to_bytes(&BaseField::modulus_limbs());
        assert!(BaseField::from_le_bytes(&modulus).is_none());
        assert!(BaseField::from_le_bytes(&[0xff; 32]).is_none());
    }

    #[test]
    fn test_reduction_mod_order() {
        // p + 5 reduces to 5.
        let mut limbs = ScalarField::modulus_limbs();
        limbs[0] += 5;
        assert_eq!(ScalarField::from_limbs_mod_order(limbs), ScalarField::from_u64(5));

        let wide = [0xffu8; 64];
        let reduced = ScalarField::from_le_bytes_mod_order(&wide);
        let expected = BigUint::from_bytes_le(&wide) % ScalarField::modulus();
        assert_eq!(reduced.to_biguint(), expected);
    }

    #[test]
    fn test_bits_le() {
        let bits = BaseField::from_u64(0b1011).to_bits_le();
        assert_eq!(bits.len(), 254);
        assert_eq!(&bits[..5], &[true, true, false, true, false]);
        assert!(bits[5..].iter().all(|b| !b));
    }

    #[test]
    fn test_conditional_select() {
        let a = BaseField::from_u64(1);
        let b = BaseField::from_u64(2);
        assert_eq!(BaseField::conditional_select(&a, &b, Choice::from(0)), a);
        assert_eq!(BaseField::conditional_select(&a, &b, Choice::from(1)), b);
    }

    #[test]
    fn test_serde_uses_canonical_bytes() {
        let a = BaseField::from_u64(0x0102);
        let encoded = bincode::serialize(&a).expect("serialize");
        assert_eq!(&encoded[..2], &[0x02, 0x01]);
        let decoded: BaseField = bincode::deserialize(&encoded).expect("deserialize");
        assert_eq!(decoded, a);

        let bad = bincode::serialize(&[0xffu8; 32]).expect("serialize");
        assert!(bincode::deserialize::<BaseField>(&bad).is_err());
    }
}
