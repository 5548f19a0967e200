//! Hash gadgets: the in-circuit counterpart of [`FieldHasher`].

use curve::PrimeField;
use mimc::{FieldHasher, Mimc, MimcParameters};

use crate::builder::CircuitBuilder;
use crate::constraint_system::LinearCombination;

type Lc<F> = LinearCombination<F>;

/// A hash that can be evaluated both natively and as constraints.
///
/// For every input, the wire returned by [`constrain_hash`] must solve to
/// the value [`FieldHasher::hash`] returns.
///
/// [`constrain_hash`]: Self::constrain_hash
pub trait HashGadget<F: PrimeField>: FieldHasher<F> {
    fn constrain_hash(&self, builder: &mut CircuitBuilder<F>, inputs: &[Lc<F>]) -> Lc<F>;
}

/// Constrain `E_key(x)` with the rounds of `params`: three multiplications
/// per round for `t^5`.
pub fn mimc_encrypt<F: PrimeField>(
    builder: &mut CircuitBuilder<F>,
    params: &MimcParameters<F>,
    key: &Lc<F>,
    x: &Lc<F>,
) -> Lc<F> {
    let mut state = x.clone();
    for constant in params.round_constants() {
        let t = state + key.clone() + Lc::constant(*constant);
        let t2 = builder.square(&t);
        let t4 = builder.square(&t2);
        state = builder.mul(&t4, &t);
    }
    state + key.clone()
}

impl<F: PrimeField> HashGadget<F> for Mimc<F> {
    fn constrain_hash(&self, builder: &mut CircuitBuilder<F>, inputs: &[Lc<F>]) -> Lc<F> {
        let params = self.parameters();
        builder.namespace("mimc", |builder| {
            inputs.iter().fold(Lc::zero(), |state, block| {
                let encrypted = mimc_encrypt(builder, params, &state, block);
                encrypted + state + block.clone()
            })
        })
    }
}
