//! MiMC hash over prime fields.
//!
//! Provides the MiMC-5 block cipher and a Miyaguchi–Preneel hash built on
//! it. Round constants live in a [`MimcParameters`] value so that the
//! constraint gadget in the `circuit` crate can evaluate exactly the same
//! rounds as [`Mimc`].
//!
//! ```
//! use curve::{BaseField, PrimeField};
//! use mimc::{FieldHasher, Mimc};
//!
//! let mimc = Mimc::<BaseField>::default();
//! let digest = mimc.hash(&[BaseField::from_u64(1), BaseField::from_u64(2)]);
//! assert_ne!(digest, BaseField::ZERO);
//! ```

mod hasher;
mod parameters;

pub use hasher::{FieldHasher, Mimc};
pub use parameters::{MimcParameters, DEFAULT_ROUNDS, DEFAULT_SEED};
