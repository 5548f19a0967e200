use crate::field::PrimeField;
use crate::group::TwistedEdwardsConfig;
use crate::projective::Projective;

const WINDOW: usize = 4;
const TABLE_SIZE: usize = 1 << WINDOW;

fn window_table<C: TwistedEdwardsConfig>(point: &Projective<C>) -> [Projective<C>; TABLE_SIZE] {
    let mut table = [Projective::identity(); TABLE_SIZE];
    for i in 1..TABLE_SIZE {
        table[i] = table[i - 1] + *point;
    }
    table
}

/// Compute `a·B + b·P` with interleaved 4-bit windows, `B` being the
/// generator of `C`.
///
/// Runs in variable time: table lookups and additions are skipped for zero
/// windows. Use only when both scalars are public, as in verification.
pub fn double_scalar_mul_basepoint<C: TwistedEdwardsConfig>(
    a: &C::ScalarField,
    b: &C::ScalarField,
    point: &Projective<C>,
) -> Projective<C> {
    let base_table = window_table(&Projective::<C>::generator());
    let point_table = window_table(point);

    let a_limbs = a.to_canonical_limbs();
    let b_limbs = b.to_canonical_limbs();
    let mut result = Projective::identity();

    for limb_idx in (0..4).rev() {
        let a_limb = a_limbs[limb_idx];
        let b_limb = b_limbs[limb_idx];
        for shift in (0..64).step_by(WINDOW).rev() {
            for _ in 0..WINDOW {
                result = result.double();
            }

            let a_window = ((a_limb >> shift) & (TABLE_SIZE as u64 - 1)) as usize;
            if a_window != 0 {
                result += base_table[a_window];
            }

            let b_window = ((b_limb >> shift) & (TABLE_SIZE as u64 - 1)) as usize;
            if b_window != 0 {
                result += point_table[b_window];
            }
        }
    }

    result
}
