//! # EdDSA Signature Verification as a Constraint System
//!
//! Rank-1 constraint systems that check an EdDSA signature over Baby Jubjub
//! with a MiMC challenge, plus the witness encoding and a proving-system
//! seam to hand them to a SNARK.
//!
//! ## Overview
//!
//! The curve's base field is the BN254 scalar field, which is also the
//! constraint field, so point coordinates are single wires and the curve
//! arithmetic is native. The statement is
//!
//! ```text
//! public:  A.x, A.y, M            (public key, message)
//! secret:  R.x, R.y, S            (signature)
//! check:   S·B == R + H(R.x, R.y, A.x, A.y, M)·A
//! ```
//!
//! The signature can be moved into the public inputs with
//! [`SignatureVisibility::Public`]; keeping it secret is the default.
//!
//! ## Quick Start
//!
//! ```
//! use circuit::{compile_verification_circuit, encode_witness, native_verify, Satisfaction};
//! use circuit::{BaseField, Message, Mimc, SigningKey};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mimc = Mimc::<BaseField>::default();
//! let sk: SigningKey = SigningKey::random(&mut rng);
//! let pk = sk.verifying_key();
//!
//! let msg = Message::from_bytes(&[0xde, 0xad, 0xf0, 0x0d], &mimc);
//! let sig = sk.sign(&mimc, &msg).to_bytes();
//! assert!(native_verify(&pk, &msg, &sig));
//!
//! let cs = compile_verification_circuit();
//! let witness = encode_witness(&pk, &msg, &sig).unwrap();
//! assert_eq!(cs.is_satisfied(&witness).unwrap(), Satisfaction::Satisfied);
//! ```
//!
//! ## Failure classes
//!
//! - Bytes that cannot be field elements: [`EncodingError`].
//! - A signature that does not verify: `false` from [`native_verify`].
//! - A witness that violates the system: [`Satisfaction::Unsatisfied`],
//!   naming the first failing [`ConstraintId`]; through a backend,
//!   [`ProveError::Unsatisfied`].
//! - Backend failures: the backend's own error types, unchanged.
//!
//! A tampered but well-formed signature is never an encoding error. It
//! encodes, and the constraints reject it.
//!
//! ## Components
//!
//! - [`CircuitBuilder`] records constraints under namespaced labels and
//!   produces an immutable [`ConstraintSystem`].
//! - [`PointVar`], [`fixed_base_mul`] and [`variable_base_mul`] are the
//!   twisted Edwards gadgets.
//! - [`HashGadget`] is the in-circuit side of [`FieldHasher`]; MiMC
//!   implements both from one [`MimcParameters`] value.
//! - [`EddsaCircuit`] assembles the verification predicate.
//! - [`ProvingSystem`] is the backend seam, with [`CheckingBackend`] as a
//!   proof-by-checking stand-in.

mod backend;
mod builder;
mod constraint_system;
mod eddsa_circuit;
mod errors;
mod mimc_gadget;
mod point_ops;
mod signature_witness;

pub use backend::{
    CheckingBackend, CheckingProof, CheckingProvingKey, CheckingVerifyingKey, ProvingSystem,
};
pub use builder::CircuitBuilder;
pub use constraint_system::{
    Constraint, ConstraintId, ConstraintSystem, Hint, LinearCombination, Satisfaction, Variable,
    Witness,
};
pub use eddsa_circuit::{EddsaCircuit, SignatureVisibility};
pub use errors::{ArtifactError, EncodingError, ProveError, SolveError, VerifyError};
pub use mimc_gadget::{mimc_encrypt, HashGadget};
pub use point_ops::{fixed_base_mul, variable_base_mul, PointVar};
pub use signature_witness::{SignatureWitness, WitnessAssignment};

// Re-export commonly used types
pub use curve::{Affine, BabyJubjub, BaseField, PrimeField, ScalarField};
pub use eddsa::{Message, Signature, SigningKey, VerifyingKey};
pub use mimc::{FieldHasher, Mimc, MimcParameters};

/// EdDSA over Baby Jubjub with the default MiMC parameters.
pub type BabyJubjubCircuit = EddsaCircuit<BabyJubjub, Mimc<BaseField>>;

/// The verification circuit with the signature kept secret.
///
/// Compilation is deterministic: two calls produce identical systems.
pub fn compile_verification_circuit() -> ConstraintSystem<BaseField> {
    BabyJubjubCircuit::default().compile()
}

/// Encode a triple into the input layout of [`compile_verification_circuit`].
pub fn encode_witness(
    pk: &VerifyingKey<BabyJubjub>,
    msg: &Message<BaseField>,
    sig: &[u8],
) -> Result<WitnessAssignment<BaseField>, EncodingError> {
    BabyJubjubCircuit::default().assign(pk, msg, sig)
}

/// Check a signature natively. Undecodable signature bytes verify as `false`.
pub fn native_verify(pk: &VerifyingKey<BabyJubjub>, msg: &Message<BaseField>, sig: &[u8]) -> bool {
    BabyJubjubCircuit::default().native_verify(pk, msg, sig)
}
