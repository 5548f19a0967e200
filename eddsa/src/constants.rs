//! Sizes of the byte encodings used by the EdDSA scheme.

/// Size of a serialized public verifying key in bytes.
///
/// A verifying key is an uncompressed curve point `x || y`.
pub const PK_SIZE: usize = 64;

/// Size of a serialized secret signing key in bytes.
///
/// The secret scalar (32 bytes) followed by the 32-byte nonce prefix.
pub const SK_SIZE: usize = 64;

/// Size of a serialized signature in bytes.
///
/// A signature consists of:
/// - the x-coordinate of R (32 bytes)
/// - the y-coordinate of R (32 bytes)
/// - the scalar S (32 bytes)
///
/// Total: 96 bytes
pub const SIG_SIZE: usize = 96;

/// Chunk length used when a message is compressed with the hash.
/// 31 bytes always fit below a 254-bit modulus.
pub(crate) const MESSAGE_CHUNK_BYTES: usize = 31;

/// Size of the nonce prefix stored in the signing key.
pub(crate) const PREFIX_SIZE: usize = 32;
