//! Base field of Baby Jubjub: the BN254 scalar field.
//!
//! p = 21888242871839275222246405745257275088548364400416034343698204186575808495617
//!
//! This is also the native field of the constraint system, so curve
//! coordinates are single circuit variables.

use crate::field::{Fp, FpParams};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BaseFieldParams;

impl FpParams for BaseFieldParams {
    const NAME: &'static str = "BaseField";

    const MODULUS: [u64; 4] = [
        0x43e1f593f0000001,
        0x2833e84879b97091,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ];

    const R: [u64; 4] = [
        0xac96341c4ffffffb,
        0x36fc76959f60cd29,
        0x666ea36f7879462e,
        0x0e0a77c19a07df2f,
    ];

    const R2: [u64; 4] = [
        0x1bb8e645ae216da7,
        0x53fe3ab1e35c59e3,
        0x8c49833d53bb8085,
        0x0216d0b17f4e44a5,
    ];

    const INV: u64 = 0xc2e1f593efffffff;

    const NUM_BITS: u32 = 254;
}

/// BN254 scalar field element.
pub type BaseField = Fp<BaseFieldParams>;
