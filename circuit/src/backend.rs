//! The proving-system seam.
//!
//! A real SNARK (Groth16, PLONK, ...) plugs in behind [`ProvingSystem`].
//! Keys are ordinary values returned from `setup` and threaded through by
//! the caller; nothing is cached globally. Backend errors surface through
//! the associated error types unchanged.

use curve::PrimeField;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constraint_system::{ConstraintSystem, Satisfaction};
use crate::errors::{ProveError, VerifyError};
use crate::signature_witness::WitnessAssignment;

/// Setup, prove and verify over constraint systems in field `F`.
pub trait ProvingSystem<F: PrimeField> {
    type ProvingKey;
    type VerifyingKey;
    type Proof;
    type SetupError: std::error::Error;
    type ProveError: std::error::Error;
    type VerifyError: std::error::Error;

    fn setup(
        &self,
        cs: &ConstraintSystem<F>,
    ) -> Result<(Self::ProvingKey, Self::VerifyingKey), Self::SetupError>;

    /// Fails when the witness does not satisfy `cs`.
    fn prove(
        &self,
        cs: &ConstraintSystem<F>,
        pk: &Self::ProvingKey,
        witness: &WitnessAssignment<F>,
    ) -> Result<Self::Proof, Self::ProveError>;

    fn verify(
        &self,
        proof: &Self::Proof,
        vk: &Self::VerifyingKey,
        public_inputs: &[F],
    ) -> Result<bool, Self::VerifyError>;
}

/// A backend that proves by checking.
///
/// `prove` solves the witness and checks every constraint; `verify`
/// compares the proof's circuit digest and public inputs against the key.
/// Proofs reveal nothing beyond the public inputs only because they carry
/// nothing else: there is no cryptographic soundness or zero knowledge
/// here. Useful for tests, demos and as the reference behaviour a real
/// backend must match on satisfiability.
#[derive(Copy, Clone, Debug, Default)]
pub struct CheckingBackend;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckingProvingKey {
    pub circuit_digest: [u8; 32],
    pub num_public_inputs: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckingVerifyingKey {
    pub circuit_digest: [u8; 32],
    pub num_public_inputs: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CheckingProof<F: PrimeField> {
    pub circuit_digest: [u8; 32],
    pub public_inputs: Vec<F>,
}

impl<F: PrimeField> ProvingSystem<F> for CheckingBackend {
    type ProvingKey = CheckingProvingKey;
    type VerifyingKey = CheckingVerifyingKey;
    type Proof = CheckingProof<F>;
    type SetupError = core::convert::Infallible;
    type ProveError = ProveError;
    type VerifyError = VerifyError;

    fn setup(
        &self,
        cs: &ConstraintSystem<F>,
    ) -> Result<(CheckingProvingKey, CheckingVerifyingKey), Self::SetupError> {
        let circuit_digest = cs.digest();
        let num_public_inputs = cs.num_public_inputs();
        info!(constraints = cs.num_constraints(), "setup");
        Ok((
            CheckingProvingKey {
                circuit_digest,
                num_public_inputs,
            },
            CheckingVerifyingKey {
                circuit_digest,
                num_public_inputs,
            },
        ))
    }

    fn prove(
        &self,
        cs: &ConstraintSystem<F>,
        pk: &CheckingProvingKey,
        witness: &WitnessAssignment<F>,
    ) -> Result<CheckingProof<F>, ProveError> {
        if pk.circuit_digest != cs.digest() {
            return Err(ProveError::KeyMismatch);
        }

        let solved = cs.solve(witness)?;
        match cs.check(&solved) {
            Satisfaction::Satisfied => {
                info!(public = solved.public_inputs().len(), "proof generated");
                Ok(CheckingProof {
                    circuit_digest: pk.circuit_digest,
                    public_inputs: solved.public_inputs().to_vec(),
                })
            }
            Satisfaction::Unsatisfied(constraint) => {
                let label = cs.constraint_label(constraint).unwrap_or_default().to_owned();
                debug!(%constraint, %label, "proof generation failed");
                Err(ProveError::Unsatisfied { constraint, label })
            }
        }
    }

    fn verify(
        &self,
        proof: &CheckingProof<F>,
        vk: &CheckingVerifyingKey,
        public_inputs: &[F],
    ) -> Result<bool, VerifyError> {
        if public_inputs.len() != vk.num_public_inputs {
            return Err(VerifyError::PublicInputCount {
                expected: vk.num_public_inputs,
                actual: public_inputs.len(),
            });
        }
        let valid =
            proof.circuit_digest == vk.circuit_digest && proof.public_inputs == public_inputs;
        debug!(valid, "verified proof");
        Ok(valid)
    }
}
