use std::sync::Arc;

use curve::PrimeField;

use crate::parameters::MimcParameters;

/// A hash from a sequence of field elements to one field element.
pub trait FieldHasher<F: PrimeField> {
    fn hash(&self, inputs: &[F]) -> F;
}

/// MiMC-5 in Miyaguchi–Preneel mode.
///
/// Each block `m` updates the state `h` to `E_h(m) + h + m`, where `E_k` is
/// the MiMC block cipher keyed by `k`. The state starts at zero.
/// Parameters are reference counted so clones share the constant table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mimc<F: PrimeField> {
    params: Arc<MimcParameters<F>>,
}

impl<F: PrimeField> Mimc<F> {
    pub fn new(params: MimcParameters<F>) -> Self {
        Mimc {
            params: Arc::new(params),
        }
    }

    pub fn parameters(&self) -> &MimcParameters<F> {
        &self.params
    }

    /// One round: `x ↦ (x + key + c)^5`.
    #[inline]
    pub fn round(x: F, key: F, constant: F) -> F {
        let t = x + key + constant;
        let t2 = t.square();
        t2.square() * t
    }

    /// The MiMC block cipher `E_key(x)`.
    pub fn encrypt(&self, key: F, x: F) -> F {
        let state = self
            .params
            .round_constants()
            .iter()
            .fold(x, |state, c| Self::round(state, key, *c));
        state + key
    }

    /// Absorb one block into the chaining value.
    #[inline]
    pub fn compress(&self, state: F, block: F) -> F {
        self.encrypt(state, block) + state + block
    }
}

impl<F: PrimeField> Default for Mimc<F> {
    fn default() -> Self {
        Self::new(MimcParameters::default())
    }
}

impl<F: PrimeField> FieldHasher<F> for Mimc<F> {
    fn hash(&self, inputs: &[F]) -> F {
        inputs
            .iter()
            .fold(F::ZERO, |state, block| self.compress(state, *block))
    }
}
