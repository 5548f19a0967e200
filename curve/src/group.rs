use core::fmt::Debug;
use core::hash::Hash;

use crate::field::PrimeField;
use crate::random::RandomField;

/// Parameters of a twisted Edwards curve `a·x² + y² = 1 + d·x²·y²`.
///
/// The addition law used throughout the crate is complete only when `a` is
/// a square and `d` is not; implementations must pick parameters with that
/// property. `ScalarField` is the order of the subgroup generated by
/// [`generator`](Self::generator).
pub trait TwistedEdwardsConfig:
    'static + Copy + Default + Debug + Eq + Hash + Send + Sync
{
    /// Coordinate field.
    type BaseField: PrimeField;
    /// Integers modulo the prime subgroup order.
    type ScalarField: PrimeField + RandomField;

    fn coeff_a() -> Self::BaseField;
    fn coeff_d() -> Self::BaseField;

    /// Affine coordinates of the prime-order subgroup generator.
    fn generator() -> (Self::BaseField, Self::BaseField);
}
