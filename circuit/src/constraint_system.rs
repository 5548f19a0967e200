//! Rank-1 constraint systems and their solver.
//!
//! A [`ConstraintSystem`] is a list of constraints `⟨a, w⟩ · ⟨b, w⟩ = ⟨c, w⟩`
//! over a vector `w` made of the constant one, public inputs, secret inputs
//! and internal wires. Every internal wire carries a [`Hint`] that computes
//! it from earlier values, so a full [`Witness`] is solved deterministically
//! from the inputs alone. Solving never fails on bad values; whether the
//! values are consistent is a separate question answered by
//! [`ConstraintSystem::check`].

use core::fmt::{self, Display, Formatter};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use curve::PrimeField;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use tracing::debug;

use crate::errors::{ArtifactError, SolveError};
use crate::signature_witness::WitnessAssignment;

/// A slot of the witness vector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Variable {
    /// The constant one.
    One,
    Public(u32),
    Secret(u32),
    Internal(u32),
}

/// A sparse linear combination of variables.
///
/// Terms are kept sorted by variable with no duplicates and no zero
/// coefficients, so structurally equal combinations compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct LinearCombination<F: PrimeField> {
    terms: Vec<(Variable, F)>,
}

impl<F: PrimeField> LinearCombination<F> {
    pub fn zero() -> Self {
        LinearCombination { terms: Vec::new() }
    }

    pub fn constant(value: F) -> Self {
        Self::from_terms(vec![(Variable::One, value)])
    }

    pub fn from_terms(terms: Vec<(Variable, F)>) -> Self {
        let mut lc = LinearCombination { terms };
        lc.normalize();
        lc
    }

    pub fn terms(&self) -> &[(Variable, F)] {
        &self.terms
    }

    /// `Some(k)` if the combination is the constant `k`.
    pub fn as_constant(&self) -> Option<F> {
        match self.terms.as_slice() {
            [] => Some(F::ZERO),
            [(Variable::One, k)] => Some(*k),
            _ => None,
        }
    }

    pub fn scale(mut self, factor: F) -> Self {
        if factor.is_zero() {
            return Self::zero();
        }
        for (_, coeff) in self.terms.iter_mut() {
            *coeff *= factor;
        }
        self
    }

    /// Evaluate with `value` supplying each variable.
    pub fn evaluate(&self, value: impl Fn(Variable) -> F) -> F {
        self.terms
            .iter()
            .map(|(var, coeff)| match var {
                Variable::One => *coeff,
                _ => value(*var) * *coeff,
            })
            .sum()
    }

    fn normalize(&mut self) {
        self.terms.sort_by_key(|(var, _)| *var);
        let mut merged: Vec<(Variable, F)> = Vec::with_capacity(self.terms.len());
        for (var, coeff) in self.terms.drain(..) {
            match merged.last_mut() {
                Some((last, acc)) if *last == var => *acc += coeff,
                _ => merged.push((var, coeff)),
            }
        }
        merged.retain(|(_, coeff)| !coeff.is_zero());
        self.terms = merged;
    }
}

impl<F: PrimeField> From<Variable> for LinearCombination<F> {
    fn from(var: Variable) -> Self {
        LinearCombination {
            terms: vec![(var, F::ONE)],
        }
    }
}

impl<F: PrimeField> Add for LinearCombination<F> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self.terms.extend(rhs.terms);
        self.normalize();
        self
    }
}

impl<F: PrimeField> Add<Variable> for LinearCombination<F> {
    type Output = Self;

    fn add(self, rhs: Variable) -> Self {
        self + Self::from(rhs)
    }
}

impl<F: PrimeField> AddAssign for LinearCombination<F> {
    fn add_assign(&mut self, rhs: Self) {
        self.terms.extend(rhs.terms);
        self.normalize();
    }
}

impl<F: PrimeField> Sub for LinearCombination<F> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl<F: PrimeField> SubAssign for LinearCombination<F> {
    fn sub_assign(&mut self, rhs: Self) {
        *self += -rhs;
    }
}

impl<F: PrimeField> Neg for LinearCombination<F> {
    type Output = Self;

    fn neg(mut self) -> Self {
        for (_, coeff) in self.terms.iter_mut() {
            *coeff = -*coeff;
        }
        self
    }
}

impl<F: PrimeField> Mul<F> for LinearCombination<F> {
    type Output = Self;

    fn mul(self, rhs: F) -> Self {
        self.scale(rhs)
    }
}

/// One rank-1 constraint `a · b = c`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Constraint<F: PrimeField> {
    pub a: LinearCombination<F>,
    pub b: LinearCombination<F>,
    pub c: LinearCombination<F>,
}

impl<F: PrimeField> Constraint<F> {
    pub fn is_satisfied_by(&self, value: impl Fn(Variable) -> F + Copy) -> bool {
        self.a.evaluate(value) * self.b.evaluate(value) == self.c.evaluate(value)
    }
}

/// How the solver computes an internal wire from earlier values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum Hint<F: PrimeField> {
    Linear(LinearCombination<F>),
    Product(LinearCombination<F>, LinearCombination<F>),
    /// `numerator / denominator`, or zero when the denominator is zero.
    Quotient {
        numerator: LinearCombination<F>,
        denominator: LinearCombination<F>,
    },
    /// Bit `index` of the canonical value.
    Bit {
        value: LinearCombination<F>,
        index: u32,
    },
}

impl<F: PrimeField> Hint<F> {
    fn evaluate(&self, value: impl Fn(Variable) -> F + Copy) -> F {
        match self {
            Hint::Linear(lc) => lc.evaluate(value),
            Hint::Product(a, b) => a.evaluate(value) * b.evaluate(value),
            Hint::Quotient {
                numerator,
                denominator,
            } => {
                let inv = denominator.evaluate(value).inverse().unwrap_or(F::ZERO);
                numerator.evaluate(value) * inv
            }
            Hint::Bit { value: lc, index } => {
                let limbs = lc.evaluate(value).to_canonical_limbs();
                let i = *index as usize;
                if i >= 256 || (limbs[i / 64] >> (i % 64)) & 1 == 0 {
                    F::ZERO
                } else {
                    F::ONE
                }
            }
        }
    }

    fn linear_combinations(&self) -> Vec<&LinearCombination<F>> {
        match self {
            Hint::Linear(lc) => vec![lc],
            Hint::Product(a, b) => vec![a, b],
            Hint::Quotient {
                numerator,
                denominator,
            } => vec![numerator, denominator],
            Hint::Bit { value, .. } => vec![value],
        }
    }
}

/// Index of a constraint in its system.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConstraintId(pub u32);

impl Display for ConstraintId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of checking a witness against a constraint system.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Satisfaction {
    Satisfied,
    /// The first constraint, in system order, that does not hold.
    Unsatisfied(ConstraintId),
}

impl Satisfaction {
    #[inline]
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Satisfaction::Satisfied)
    }
}

/// A full assignment of every variable of a constraint system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Witness<F: PrimeField> {
    public: Vec<F>,
    secret: Vec<F>,
    internal: Vec<F>,
}

impl<F: PrimeField> Witness<F> {
    pub fn value(&self, var: Variable) -> F {
        lookup(&self.public, &self.secret, &self.internal, var)
    }

    pub fn public_inputs(&self) -> &[F] {
        &self.public
    }

    pub fn num_internal(&self) -> usize {
        self.internal.len()
    }
}

fn lookup<F: PrimeField>(public: &[F], secret: &[F], internal: &[F], var: Variable) -> F {
    let slot = match var {
        Variable::One => return F::ONE,
        Variable::Public(i) => public.get(i as usize),
        Variable::Secret(i) => secret.get(i as usize),
        Variable::Internal(i) => internal.get(i as usize),
    };
    slot.copied().unwrap_or(F::ZERO)
}

/// An immutable, compiled rank-1 constraint system.
///
/// Produced by [`CircuitBuilder::build`](crate::CircuitBuilder::build) and
/// safe to share between threads; solving and checking take `&self`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ConstraintSystem<F: PrimeField> {
    pub(crate) public_names: Vec<String>,
    pub(crate) secret_names: Vec<String>,
    pub(crate) hints: Vec<Hint<F>>,
    pub(crate) constraints: Vec<Constraint<F>>,
    pub(crate) labels: Vec<String>,
}

impl<F: PrimeField> ConstraintSystem<F> {
    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    #[inline]
    pub fn num_public_inputs(&self) -> usize {
        self.public_names.len()
    }

    #[inline]
    pub fn num_secret_inputs(&self) -> usize {
        self.secret_names.len()
    }

    #[inline]
    pub fn num_internal(&self) -> usize {
        self.hints.len()
    }

    /// Total witness length, including the constant one.
    pub fn num_variables(&self) -> usize {
        1 + self.num_public_inputs() + self.num_secret_inputs() + self.num_internal()
    }

    pub fn public_input_names(&self) -> &[String] {
        &self.public_names
    }

    pub fn secret_input_names(&self) -> &[String] {
        &self.secret_names
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint<F>> {
        self.constraints.get(id.0 as usize)
    }

    /// Namespaced label recorded when the constraint was emitted.
    pub fn constraint_label(&self, id: ConstraintId) -> Option<&str> {
        self.labels.get(id.0 as usize).map(String::as_str)
    }

    /// Compute every internal wire from the inputs.
    pub fn solve(&self, assignment: &WitnessAssignment<F>) -> Result<Witness<F>, SolveError> {
        if assignment.public.len() != self.num_public_inputs() {
            return Err(SolveError::PublicInputCount {
                expected: self.num_public_inputs(),
                actual: assignment.public.len(),
            });
        }
        if assignment.secret.len() != self.num_secret_inputs() {
            return Err(SolveError::SecretInputCount {
                expected: self.num_secret_inputs(),
                actual: assignment.secret.len(),
            });
        }

        let public = assignment.public.clone();
        let secret = assignment.secret.clone();
        let mut internal = Vec::with_capacity(self.hints.len());
        for hint in &self.hints {
            let next = hint.evaluate(|var| lookup(&public, &secret, &internal, var));
            internal.push(next);
        }

        debug!(
            internal = internal.len(),
            public = public.len(),
            secret = secret.len(),
            "solved witness"
        );
        Ok(Witness {
            public,
            secret,
            internal,
        })
    }

    /// Check every constraint in order and report the first violation.
    pub fn check(&self, witness: &Witness<F>) -> Satisfaction {
        let value = |var: Variable| witness.value(var);
        match self
            .constraints
            .iter()
            .position(|constraint| !constraint.is_satisfied_by(value))
        {
            None => Satisfaction::Satisfied,
            Some(index) => {
                let id = ConstraintId(index as u32);
                debug!(
                    constraint = index,
                    label = self.labels.get(index).map(String::as_str).unwrap_or(""),
                    "constraint not satisfied"
                );
                Satisfaction::Unsatisfied(id)
            }
        }
    }

    /// Solve and check in one step.
    pub fn is_satisfied(&self, assignment: &WitnessAssignment<F>) -> Result<Satisfaction, SolveError> {
        Ok(self.check(&self.solve(assignment)?))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Decode and validate a serialized system.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let cs: Self = postcard::from_bytes(bytes)?;
        cs.validate()?;
        Ok(cs)
    }

    /// SHA3-256 over the structure: input names, hints, constraints and
    /// labels in order. Equal systems have equal digests.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha3_256::new();
        absorb_names(&mut hasher, &self.public_names);
        absorb_names(&mut hasher, &self.secret_names);

        hasher.update((self.hints.len() as u64).to_le_bytes());
        for hint in &self.hints {
            let (tag, extra) = match hint {
                Hint::Linear(_) => (0u8, 0u32),
                Hint::Product(..) => (1, 0),
                Hint::Quotient { .. } => (2, 0),
                Hint::Bit { index, .. } => (3, *index),
            };
            hasher.update([tag]);
            hasher.update(extra.to_le_bytes());
            for lc in hint.linear_combinations() {
                absorb_lc(&mut hasher, lc);
            }
        }

        hasher.update((self.constraints.len() as u64).to_le_bytes());
        for constraint in &self.constraints {
            absorb_lc(&mut hasher, &constraint.a);
            absorb_lc(&mut hasher, &constraint.b);
            absorb_lc(&mut hasher, &constraint.c);
        }
        absorb_names(&mut hasher, &self.labels);

        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        out
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        if self.labels.len() != self.constraints.len() {
            return Err(ArtifactError::Malformed("label count differs from constraint count"));
        }

        let public = self.num_public_inputs();
        let secret = self.num_secret_inputs();
        let in_range = |lc: &LinearCombination<F>, internal: usize| {
            lc.terms().iter().all(|(var, _)| match var {
                Variable::One => true,
                Variable::Public(i) => (*i as usize) < public,
                Variable::Secret(i) => (*i as usize) < secret,
                Variable::Internal(i) => (*i as usize) < internal,
            })
        };

        for (index, hint) in self.hints.iter().enumerate() {
            if !hint.linear_combinations().into_iter().all(|lc| in_range(lc, index)) {
                return Err(ArtifactError::Malformed("hint reads a later or unknown wire"));
            }
        }

        let internal = self.num_internal();
        for constraint in &self.constraints {
            if ![&constraint.a, &constraint.b, &constraint.c]
                .into_iter()
                .all(|lc| in_range(lc, internal))
            {
                return Err(ArtifactError::Malformed("constraint reads an unknown variable"));
            }
        }
        Ok(())
    }
}

fn absorb_names(hasher: &mut Sha3_256, names: &[String]) {
    hasher.update((names.len() as u64).to_le_bytes());
    for name in names {
        hasher.update((name.len() as u64).to_le_bytes());
        hasher.update(name.as_bytes());
    }
}

fn absorb_lc<F: PrimeField>(hasher: &mut Sha3_256, lc: &LinearCombination<F>) {
    hasher.update((lc.terms.len() as u64).to_le_bytes());
    for (var, coeff) in &lc.terms {
        let (tag, index) = match var {
            Variable::One => (0u8, 0u32),
            Variable::Public(i) => (1, *i),
            Variable::Secret(i) => (2, *i),
            Variable::Internal(i) => (3, *i),
        };
        hasher.update([tag]);
        hasher.update(index.to_le_bytes());
        hasher.update(coeff.to_le_bytes());
    }
}
