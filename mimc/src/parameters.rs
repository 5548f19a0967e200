use curve::PrimeField;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

/// Seed of the default round-constant chain.
pub const DEFAULT_SEED: &[u8] = b"seed";

/// Number of rounds for a 254-bit field with exponent 5.
pub const DEFAULT_ROUNDS: usize = 110;

/// Round constants of the MiMC-5 block cipher over `F`.
///
/// The constants form a hash chain: `h_0 = SHA3-256(seed)`,
/// `h_{i+1} = SHA3-256(h_i)` and `c_i = h_i mod p` read big-endian, with
/// `c_0 = 0`. The same value is shared by native hashing and by the
/// constraint gadget, so both evaluate identical rounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MimcParameters<F: PrimeField> {
    round_constants: Vec<F>,
}

impl<F: PrimeField> MimcParameters<F> {
    pub fn new(seed: &[u8], rounds: usize) -> Self {
        let mut round_constants = Vec::with_capacity(rounds);
        if rounds > 0 {
            round_constants.push(F::ZERO);
        }

        let mut digest = Sha3_256::digest(seed);
        for _ in 1..rounds {
            digest = Sha3_256::digest(digest);
            round_constants.push(F::from_be_bytes_mod_order(&digest));
        }

        MimcParameters { round_constants }
    }

    #[inline]
    pub fn rounds(&self) -> usize {
        self.round_constants.len()
    }

    #[inline]
    pub fn round_constants(&self) -> &[F] {
        &self.round_constants
    }
}

impl<F: PrimeField> Default for MimcParameters<F> {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, DEFAULT_ROUNDS)
    }
}
