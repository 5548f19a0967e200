//! EdDSA signatures over twisted Edwards curves with a field-native hash.
//!
//! This library implements EdDSA using:
//! - The Baby Jubjub curve over the BN254 scalar field (any
//!   [`TwistedEdwardsConfig`](curve::TwistedEdwardsConfig) works)
//! - MiMC, or any [`FieldHasher`](mimc::FieldHasher), for nonce derivation
//!   and the Fiat-Shamir challenge
//! - Messages hashed, with their length, to a single base field element
//!
//! Signing is deterministic. Verification is cofactorless: it checks
//! `S·B == R + c·A` for a public key `A` of prime order.
//!
//! # Example
//!
//! ```
//! use curve::BaseField;
//! use eddsa::{Message, SigningKey, VerifyingKey};
//! use mimc::Mimc;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mimc = Mimc::<BaseField>::default();
//!
//! let signing_key: SigningKey = SigningKey::random(&mut rng);
//! let verifying_key = VerifyingKey::from(&signing_key);
//!
//! let message = Message::from_bytes(&[0xde, 0xad, 0xf0, 0x0d], &mimc);
//! let signature = signing_key.sign(&mimc, &message);
//!
//! assert!(verifying_key.verify(&mimc, &message, &signature));
//! assert!(verifying_key.verify_bytes(&mimc, &message, &signature.to_bytes()));
//! ```

mod constants;
mod errors;
mod keys;
mod message;
mod signatures;

#[cfg(test)]
mod tests;

pub use constants::{PK_SIZE, SIG_SIZE, SK_SIZE};
pub use errors::EddsaError;
pub use keys::{SigningKey, VerifyingKey};
pub use message::Message;
pub use signatures::{Signature, challenge_element};
