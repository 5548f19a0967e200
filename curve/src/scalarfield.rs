//! Scalar field of Baby Jubjub: integers modulo the prime subgroup order.
//!
//! l = 2736030358979909402780800718157159386076813972158567259200215660948447373041
//!
//! The full curve group has order 8·l; keys and nonces live in the order-l
//! subgroup generated by the base point.

use crate::field::{Fp, FpParams};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScalarFieldParams;

impl FpParams for ScalarFieldParams {
    const NAME: &'static str = "ScalarField";

    const MODULUS: [u64; 4] = [
        0x677297dc392126f1,
        0xab3eedb83920ee0a,
        0x370a08b6d0302b0b,
        0x060c89ce5c263405,
    ];

    const R: [u64; 4] = [
        0x073315dea08f9c76,
        0xe7acffc6a098f24b,
        0xf85a9201d818f015,
        0x01f16424e1bb7724,
    ];

    const R2: [u64; 4] = [
        0x35e44abee7ecb21e,
        0x74646cacf5f84ec4,
        0xe472df203faa158f,
        0x0445b524f1ba50a8,
    ];

    const INV: u64 = 0x532ce5aebc48f5ef;

    const NUM_BITS: u32 = 251;
}

/// Scalar modulo the Baby Jubjub subgroup order.
pub type ScalarField = Fp<ScalarFieldParams>;
