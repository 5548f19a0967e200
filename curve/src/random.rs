use rand::distr::{Distribution, StandardUniform};
use rand::Rng;

use crate::field::{Fp, FpParams};

/// Helper trait for sampling uniformly random field elements.
pub trait RandomField: Sized {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl<P: FpParams> RandomField for Fp<P> {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardUniform.sample(rng)
    }
}
