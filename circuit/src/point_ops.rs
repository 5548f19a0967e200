//! Twisted Edwards point gadgets.
//!
//! Points are pairs of linear combinations over the curve's base field,
//! which is also the constraint field, so each coordinate costs nothing to
//! carry around. The addition law is the complete twisted Edwards formula,
//! so none of the gadgets branch on special cases.

use core::marker::PhantomData;

use curve::{Affine, PrimeField, Projective, TwistedEdwardsConfig};

use crate::builder::CircuitBuilder;
use crate::constraint_system::{LinearCombination, Variable};

type Lc<F> = LinearCombination<F>;

/// A curve point in circuit representation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointVar<C: TwistedEdwardsConfig> {
    pub x: Lc<C::BaseField>,
    pub y: Lc<C::BaseField>,
    _curve: PhantomData<C>,
}

impl<C: TwistedEdwardsConfig> PointVar<C> {
    pub fn new(x: Lc<C::BaseField>, y: Lc<C::BaseField>) -> Self {
        PointVar {
            x,
            y,
            _curve: PhantomData,
        }
    }

    pub fn from_variables(x: Variable, y: Variable) -> Self {
        Self::new(x.into(), y.into())
    }

    /// A fixed point, carried as constants.
    pub fn constant(point: &Affine<C>) -> Self {
        Self::new(Lc::constant(point.x), Lc::constant(point.y))
    }

    pub fn identity() -> Self {
        Self::constant(&Affine::identity())
    }

    /// Enforce `a·x² + y² = 1 + d·x²·y²`.
    pub fn assert_on_curve(&self, builder: &mut CircuitBuilder<C::BaseField>) {
        let x2 = builder.square(&self.x);
        let y2 = builder.square(&self.y);
        let x2y2 = builder.mul(&x2, &y2);
        let lhs = x2.scale(C::coeff_a()) + y2;
        let rhs = Lc::constant(C::BaseField::ONE) + x2y2.scale(C::coeff_d());
        builder.assert_equal(&lhs, &rhs, "on_curve");
    }

    /// Complete addition:
    ///
    /// ```text
    /// β = x1·y2   γ = y1·x2   δ = (y1 - a·x1)·(x2 + y2)   τ = β·γ
    /// x3 = (β + γ) / (1 + d·τ)
    /// y3 = (δ + a·β - γ) / (1 - d·τ)
    /// ```
    pub fn add(&self, builder: &mut CircuitBuilder<C::BaseField>, other: &Self) -> Self {
        let a = C::coeff_a();
        let d = C::coeff_d();
        let one = Lc::constant(C::BaseField::ONE);

        let beta = builder.mul(&self.x, &other.y);
        let gamma = builder.mul(&self.y, &other.x);
        let delta = builder.mul(
            &(self.y.clone() - self.x.clone().scale(a)),
            &(other.x.clone() + other.y.clone()),
        );
        let tau = builder.mul(&beta, &gamma);

        let x_num = beta.clone() + gamma.clone();
        let x_den = one.clone() + tau.clone().scale(d);
        let y_num = delta + beta.scale(a) - gamma;
        let y_den = one - tau.scale(d);

        let x3 = builder.div(&x_num, &x_den);
        let y3 = builder.div(&y_num, &y_den);
        Self::new(x3, y3)
    }

    pub fn double(&self, builder: &mut CircuitBuilder<C::BaseField>) -> Self {
        self.add(builder, self)
    }

    /// `cond ? if_true : if_false` for a boolean `cond`.
    pub fn select(
        builder: &mut CircuitBuilder<C::BaseField>,
        cond: &Lc<C::BaseField>,
        if_true: &Self,
        if_false: &Self,
    ) -> Self {
        let x = builder.select(cond, &if_true.x, &if_false.x);
        let y = builder.select(cond, &if_true.y, &if_false.y);
        Self::new(x, y)
    }

    /// Enforce coordinate-wise equality.
    pub fn assert_equal(&self, builder: &mut CircuitBuilder<C::BaseField>, other: &Self) {
        builder.assert_equal(&self.x, &other.x, "equal_x");
        builder.assert_equal(&self.y, &other.y, "equal_y");
    }
}

/// `Σ bits[i]·2^i·base` for a fixed `base`.
///
/// The multiples `2^i·base` are computed natively, so each bit costs one
/// selection between two constants (free) and one addition.
pub fn fixed_base_mul<C: TwistedEdwardsConfig>(
    builder: &mut CircuitBuilder<C::BaseField>,
    bits: &[Variable],
    base: &Affine<C>,
) -> PointVar<C> {
    let mut powers = Vec::with_capacity(bits.len());
    let mut power = Projective::from_affine(base);
    for _ in bits {
        powers.push(power);
        power = power.double();
    }
    let multiples = Projective::batch_normalize(&powers);

    let identity = PointVar::identity();
    let mut acc = PointVar::identity();
    for (bit, multiple) in bits.iter().zip(&multiples) {
        let multiple = PointVar::constant(multiple);
        let term = PointVar::select(builder, &(*bit).into(), &multiple, &identity);
        acc = acc.add(builder, &term);
    }
    acc
}

/// `Σ bits[i]·2^i·point` for a point held in wires.
///
/// Double-and-add from the most significant bit. Every bit performs the
/// same doubling, addition and selection, so the constraint count depends
/// only on `bits.len()`.
pub fn variable_base_mul<C: TwistedEdwardsConfig>(
    builder: &mut CircuitBuilder<C::BaseField>,
    bits: &[Variable],
    point: &PointVar<C>,
) -> PointVar<C> {
    let mut acc = PointVar::identity();
    for bit in bits.iter().rev() {
        let doubled = acc.double(builder);
        let added = doubled.add(builder, point);
        acc = PointVar::select(builder, &(*bit).into(), &added, &doubled);
    }
    acc
}
