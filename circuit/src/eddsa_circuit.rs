//! The EdDSA verification predicate as a constraint system.

use core::marker::PhantomData;

use curve::{Affine, PrimeField, TwistedEdwardsConfig};
use eddsa::{Message, VerifyingKey};
use mimc::Mimc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::builder::CircuitBuilder;
use crate::constraint_system::{ConstraintSystem, LinearCombination, Variable};
use crate::errors::EncodingError;
use crate::mimc_gadget::HashGadget;
use crate::point_ops::{fixed_base_mul, variable_base_mul, PointVar};
use crate::signature_witness::{statement_values, SignatureWitness, WitnessAssignment};

/// Which side of the public/secret partition the signature lands on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureVisibility {
    /// `R` and `S` are secret inputs; only the public key and the message
    /// are revealed.
    #[default]
    Private,
    /// `R` and `S` are appended to the public inputs. Opt-in only.
    Public,
}

/// EdDSA verification over curve `C` with challenge hash `H`.
///
/// Public inputs are `[A.x, A.y, M]`, followed by `[R.x, R.y, S]` in
/// [`SignatureVisibility::Public`] mode; otherwise `[R.x, R.y, S]` are the
/// secret inputs. The compiled system checks, in order:
///
/// 1. `A` and `R` are on the curve,
/// 2. `c = H(R.x, R.y, A.x, A.y, M)`,
/// 3. `S < l` and `c < p` through canonical bit decompositions,
/// 4. `S·B == R + c·A`, coordinate by coordinate.
///
/// Because the curve checks come first, a witness with a malformed `R`
/// fails at `r/on_curve` rather than somewhere inside the scalar
/// multiplications.
#[derive(Clone, Debug)]
pub struct EddsaCircuit<C: TwistedEdwardsConfig, H> {
    hasher: H,
    visibility: SignatureVisibility,
    _curve: PhantomData<C>,
}

impl<C: TwistedEdwardsConfig> Default for EddsaCircuit<C, Mimc<C::BaseField>> {
    fn default() -> Self {
        Self::new(Mimc::default())
    }
}

impl<C, H> EddsaCircuit<C, H>
where
    C: TwistedEdwardsConfig,
    H: HashGadget<C::BaseField>,
{
    pub fn new(hasher: H) -> Self {
        EddsaCircuit {
            hasher,
            visibility: SignatureVisibility::Private,
            _curve: PhantomData,
        }
    }

    pub fn with_visibility(mut self, visibility: SignatureVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[inline]
    pub fn visibility(&self) -> SignatureVisibility {
        self.visibility
    }

    #[inline]
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Emit the verification predicate into `builder`.
    pub fn define(&self, builder: &mut CircuitBuilder<C::BaseField>) {
        let pk_x = builder.public_input("pk.x");
        let pk_y = builder.public_input("pk.y");
        let msg: LinearCombination<_> = builder.public_input("message").into();

        let [r_x, r_y, s] = ["r.x", "r.y", "s"].map(|name| match self.visibility {
            SignatureVisibility::Private => builder.secret_input(name),
            SignatureVisibility::Public => builder.public_input(name),
        });

        let pk = PointVar::<C>::from_variables(pk_x, pk_y);
        let r = PointVar::<C>::from_variables(r_x, r_y);

        builder.namespace("pk", |b| pk.assert_on_curve(b));
        builder.namespace("r", |b| r.assert_on_curve(b));

        let challenge = builder.namespace("challenge", |b| {
            let transcript = [r.x.clone(), r.y.clone(), pk.x.clone(), pk.y.clone(), msg];
            self.hasher.constrain_hash(b, &transcript)
        });

        let s_bits = builder.namespace("s_bits", |b| {
            canonical_bits(b, &s.into(), C::ScalarField::NUM_BITS, C::ScalarField::modulus_limbs())
        });
        let c_bits = builder.namespace("c_bits", |b| {
            canonical_bits(b, &challenge, C::BaseField::NUM_BITS, C::BaseField::modulus_limbs())
        });

        let lhs = builder.namespace("s_mul_base", |b| {
            fixed_base_mul(b, &s_bits, &Affine::<C>::generator())
        });
        let rhs = builder.namespace("c_mul_pk", |b| {
            let c_pk = variable_base_mul(b, &c_bits, &pk);
            c_pk.add(b, &r)
        });

        builder.namespace("verify", |b| lhs.assert_equal(b, &rhs));
    }

    pub fn compile(&self) -> ConstraintSystem<C::BaseField> {
        let mut builder = CircuitBuilder::new();
        self.define(&mut builder);
        let cs = builder.build();
        info!(
            constraints = cs.num_constraints(),
            public = cs.num_public_inputs(),
            secret = cs.num_secret_inputs(),
            internal = cs.num_internal(),
            visibility = ?self.visibility,
            "compiled eddsa verification circuit"
        );
        cs
    }

    /// Encode a triple into the input layout of [`compile`](Self::compile).
    ///
    /// The public key arrives already validated. Signature words only need
    /// to be canonical field elements; a signature that is well-formed
    /// bytes but invalid still encodes and is caught by the constraints.
    pub fn assign(
        &self,
        pk: &VerifyingKey<C>,
        msg: &Message<C::BaseField>,
        sig: &[u8],
    ) -> Result<WitnessAssignment<C::BaseField>, EncodingError> {
        let signature = SignatureWitness::<C>::from_bytes(sig)?;
        let mut public = statement_values(pk, msg).to_vec();
        let mut secret = Vec::new();
        match self.visibility {
            SignatureVisibility::Private => secret.extend(signature.values()),
            SignatureVisibility::Public => public.extend(signature.values()),
        }
        debug!(public = public.len(), secret = secret.len(), "encoded witness");
        Ok(WitnessAssignment::new(public, secret))
    }

    /// Like [`assign`](Self::assign), decoding the public key strictly
    /// first: it must be on the curve, in the prime-order subgroup and not
    /// the identity.
    pub fn assign_bytes(
        &self,
        pk: &[u8],
        msg: &Message<C::BaseField>,
        sig: &[u8],
    ) -> Result<WitnessAssignment<C::BaseField>, EncodingError> {
        let pk = VerifyingKey::from_bytes(pk).map_err(EncodingError::PublicKey)?;
        self.assign(&pk, msg, sig)
    }

    /// Reduce message bytes with this circuit's hash.
    pub fn message(&self, bytes: &[u8]) -> Message<C::BaseField> {
        Message::from_bytes(bytes, &self.hasher)
    }

    /// A message given directly as a little-endian field element.
    pub fn message_element(&self, bytes: &[u8]) -> Result<Message<C::BaseField>, EncodingError> {
        Message::from_element_bytes(bytes).map_err(EncodingError::Message)
    }

    /// The native predicate, independent of any constraint system.
    pub fn native_verify(&self, pk: &VerifyingKey<C>, msg: &Message<C::BaseField>, sig: &[u8]) -> bool {
        pk.verify_bytes(&self.hasher, msg, sig)
    }
}

/// Bits of `value` constrained to encode an integer below `modulus`.
fn canonical_bits<F: PrimeField>(
    builder: &mut CircuitBuilder<F>,
    value: &LinearCombination<F>,
    num_bits: u32,
    modulus: [u64; 4],
) -> Vec<Variable> {
    let bits = builder.to_bits_le(value, num_bits as usize);
    let mut bound = modulus;
    // Moduli are odd, so the low limb never borrows.
    bound[0] -= 1;
    builder.assert_le_constant(&bits, &bound);
    bits
}
