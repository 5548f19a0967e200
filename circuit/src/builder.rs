//! Incremental construction of constraint systems.

use curve::PrimeField;

use crate::constraint_system::{Constraint, ConstraintSystem, Hint, LinearCombination, Variable};

type Lc<F> = LinearCombination<F>;

/// Records inputs, internal wires and constraints, then freezes them into a
/// [`ConstraintSystem`].
///
/// Gadget methods fold constants: multiplying by a constant combination
/// emits no constraint, so gadgets fed with fixed points cost only what
/// their variable parts need. Constraint labels are prefixed with the
/// current namespace path.
#[derive(Debug)]
pub struct CircuitBuilder<F: PrimeField> {
    public_names: Vec<String>,
    secret_names: Vec<String>,
    hints: Vec<Hint<F>>,
    constraints: Vec<Constraint<F>>,
    labels: Vec<String>,
    namespace: Vec<String>,
}

impl<F: PrimeField> Default for CircuitBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PrimeField> CircuitBuilder<F> {
    pub fn new() -> Self {
        CircuitBuilder {
            public_names: Vec::new(),
            secret_names: Vec::new(),
            hints: Vec::new(),
            constraints: Vec::new(),
            labels: Vec::new(),
            namespace: Vec::new(),
        }
    }

    pub fn public_input(&mut self, name: &str) -> Variable {
        self.public_names.push(self.qualified(name));
        Variable::Public(self.public_names.len() as u32 - 1)
    }

    pub fn secret_input(&mut self, name: &str) -> Variable {
        self.secret_names.push(self.qualified(name));
        Variable::Secret(self.secret_names.len() as u32 - 1)
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Run `f` with `name` pushed onto the namespace path.
    pub fn namespace<T>(&mut self, name: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        self.namespace.push(name.to_owned());
        let out = f(self);
        self.namespace.pop();
        out
    }

    /// Emit `a · b = c`.
    pub fn enforce(&mut self, a: Lc<F>, b: Lc<F>, c: Lc<F>, label: &str) {
        self.constraints.push(Constraint { a, b, c });
        self.labels.push(self.qualified(label));
    }

    /// Allocate an internal wire computed by `hint`.
    pub fn alloc(&mut self, hint: Hint<F>) -> Variable {
        self.hints.push(hint);
        Variable::Internal(self.hints.len() as u32 - 1)
    }

    pub fn mul(&mut self, a: &Lc<F>, b: &Lc<F>) -> Lc<F> {
        if let Some(k) = a.as_constant() {
            return b.clone().scale(k);
        }
        if let Some(k) = b.as_constant() {
            return a.clone().scale(k);
        }
        let out = self.alloc(Hint::Product(a.clone(), b.clone()));
        self.enforce(a.clone(), b.clone(), out.into(), "mul");
        out.into()
    }

    pub fn square(&mut self, a: &Lc<F>) -> Lc<F> {
        self.mul(a, a)
    }

    /// `a / b`, constrained as `out · b = a`. A zero divisor leaves the
    /// constraint unsatisfiable unless `a` is zero too.
    pub fn div(&mut self, a: &Lc<F>, b: &Lc<F>) -> Lc<F> {
        if let Some(inv) = b.as_constant().and_then(|k| k.inverse()) {
            return a.clone().scale(inv);
        }
        let out = self.alloc(Hint::Quotient {
            numerator: a.clone(),
            denominator: b.clone(),
        });
        self.enforce(out.into(), b.clone(), a.clone(), "div");
        out.into()
    }

    pub fn assert_equal(&mut self, a: &Lc<F>, b: &Lc<F>, label: &str) {
        self.enforce(
            a.clone() - b.clone(),
            Lc::constant(F::ONE),
            Lc::zero(),
            label,
        );
    }

    pub fn assert_bool(&mut self, v: &Lc<F>) {
        self.enforce(
            v.clone(),
            Lc::constant(F::ONE) - v.clone(),
            Lc::zero(),
            "boolean",
        );
    }

    /// `cond ? if_true : if_false` for a boolean `cond`, as
    /// `if_false + cond · (if_true - if_false)`.
    pub fn select(&mut self, cond: &Lc<F>, if_true: &Lc<F>, if_false: &Lc<F>) -> Lc<F> {
        let delta = if_true.clone() - if_false.clone();
        let picked = self.mul(cond, &delta);
        if_false.clone() + picked
    }

    /// Decompose `value` into `num_bits` little-endian boolean wires that
    /// recompose to it.
    ///
    /// With `num_bits` at or above the field size the decomposition of a
    /// value is not unique; pair it with [`assert_le_constant`] to pin the
    /// canonical one.
    ///
    /// [`assert_le_constant`]: Self::assert_le_constant
    pub fn to_bits_le(&mut self, value: &Lc<F>, num_bits: usize) -> Vec<Variable> {
        let bits: Vec<Variable> = (0..num_bits)
            .map(|index| {
                self.alloc(Hint::Bit {
                    value: value.clone(),
                    index: index as u32,
                })
            })
            .collect();

        let mut recomposed = Lc::zero();
        let mut weight = F::ONE;
        for bit in &bits {
            self.assert_bool(&(*bit).into());
            recomposed += Lc::from(*bit).scale(weight);
            weight = weight.double();
        }
        self.assert_equal(&recomposed, value, "recompose");
        bits
    }

    /// Constrain the little-endian `bits` to encode an integer no larger
    /// than `bound` (also little-endian limbs).
    ///
    /// Walking from the most significant bit, `prefix` is one while every
    /// higher bit equals the bound. Where the bound has a zero bit, the
    /// value's bit must be zero whenever the prefix still matches.
    pub fn assert_le_constant(&mut self, bits: &[Variable], bound: &[u64; 4]) {
        let mut prefix = Lc::constant(F::ONE);
        for (i, bit) in bits.iter().enumerate().rev() {
            let bit_lc: Lc<F> = (*bit).into();
            let bound_bit = i < 256 && (bound[i / 64] >> (i % 64)) & 1 == 1;
            if bound_bit {
                prefix = self.mul(&prefix, &bit_lc);
            } else {
                self.enforce(bit_lc, prefix.clone(), Lc::zero(), "bound");
            }
        }
    }

    pub fn build(self) -> ConstraintSystem<F> {
        ConstraintSystem {
            public_names: self.public_names,
            secret_names: self.secret_names,
            hints: self.hints,
            constraints: self.constraints,
            labels: self.labels,
        }
    }

    fn qualified(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            name.to_owned()
        } else {
            format!("{}/{}", self.namespace.join("/"), name)
        }
    }
}
