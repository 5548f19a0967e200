//! Reduction of byte messages to a single field element.

use curve::{FIELD_BYTES, PrimeField};
use mimc::FieldHasher;
use serde::{Deserialize, Serialize};

use crate::constants::MESSAGE_CHUNK_BYTES;
use crate::errors::EddsaError;

/// A message as it enters both the native verifier and the constraint
/// system: exactly one field element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Message<F: PrimeField>(F);

impl<F: PrimeField> Message<F> {
    pub fn new(element: F) -> Self {
        Message(element)
    }

    #[inline]
    pub fn element(&self) -> F {
        self.0
    }

    /// Reduce `bytes` to one field element.
    ///
    /// Every message, short or long, is split into 31-byte big-endian
    /// chunks and hashed after its byte length. The length fixes the chunk
    /// boundaries and each chunk is below the modulus, so distinct byte
    /// strings hash distinct block sequences.
    pub fn from_bytes<H: FieldHasher<F>>(bytes: &[u8], hasher: &H) -> Self {
        let mut blocks = Vec::with_capacity(1 + bytes.len().div_ceil(MESSAGE_CHUNK_BYTES));
        blocks.push(F::from_u64(bytes.len() as u64));
        blocks.extend(
            bytes
                .chunks(MESSAGE_CHUNK_BYTES)
                .map(F::from_be_bytes_mod_order),
        );
        Message(hasher.hash(&blocks))
    }

    /// A message that already is a field element, given as 32 little-endian
    /// bytes below the modulus. Not hashed.
    pub fn from_element_bytes(bytes: &[u8]) -> Result<Self, EddsaError> {
        let le: &[u8; FIELD_BYTES] = bytes.try_into().map_err(|_| EddsaError::InvalidLength {
            expected: FIELD_BYTES,
            actual: bytes.len(),
        })?;
        F::from_le_bytes(le)
            .map(Message)
            .ok_or(EddsaError::MessageOutOfRange)
    }
}

impl<F: PrimeField> From<F> for Message<F> {
    fn from(element: F) -> Self {
        Message(element)
    }
}
