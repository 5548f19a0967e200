//! Baby Jubjub, the twisted Edwards curve embedded in BN254.
//!
//! Equation: 168700·x² + y² = 1 + 168696·x²·y² over the BN254 scalar field.
//! `a` is a square and `d` is not, so the addition law is complete.
//! The base point is the standard order-l generator (`Base8`).

use crate::field::PrimeField;
use crate::group::TwistedEdwardsConfig;
use crate::{BaseField, ScalarField};

const COEFF_A: u64 = 168700;
const COEFF_D: u64 = 168696;

// 5299619240641551281634865583518297030282874472190772894086521144482721001553
const BASE_X: [u64; 4] = [
    0x2893f3f6bb957051,
    0x2ab8d8010534e0b6,
    0x4eacb2e09d6277c1,
    0x0bb77a6ad63e739b,
];

// 16950150798460657717958625567821834550301663161624707787222815936182638968203
const BASE_Y: [u64; 4] = [
    0x4b3c257a872d7d8b,
    0xfce0051fb9e13377,
    0x25572e1cd16bf9ed,
    0x25797203f7a0b249,
];

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BabyJubjub;

impl TwistedEdwardsConfig for BabyJubjub {
    type BaseField = BaseField;
    type ScalarField = ScalarField;

    #[inline]
    fn coeff_a() -> BaseField {
        BaseField::from_u64(COEFF_A)
    }

    #[inline]
    fn coeff_d() -> BaseField {
        BaseField::from_u64(COEFF_D)
    }

    #[inline]
    fn generator() -> (BaseField, BaseField) {
        (
            BaseField::from_limbs_mod_order(BASE_X),
            BaseField::from_limbs_mod_order(BASE_Y),
        )
    }
}
