//! Error types shared by the SealVote crates

use crate::types::{CiphertextHandle, FheType};
use thiserror::Error;

/// Result type alias for runtime operations
pub type Result<T> = std::result::Result<T, SealVoteError>;

/// Errors raised by encoding, decoding and FHE execution
#[derive(Debug, Error)]
pub enum SealVoteError {
    /// Bytes that do not follow the expected wire layout
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Serialization or deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The executor has no ciphertext behind this handle
    #[error("Unknown ciphertext handle {0}")]
    UnknownHandle(CiphertextHandle),

    /// Operand type does not match what the operation expects
    #[error("Ciphertext {handle} is not of type {expected:?}")]
    TypeMismatch { handle: CiphertextHandle, expected: FheType },

    /// Handle was never marked for public decryption
    #[error("Ciphertext {0} is not publicly decryptable")]
    NotDecryptable(CiphertextHandle),

    /// Plaintext outside the range an input proof can attest
    #[error("Value {value} is outside the attested range [0, {bound})")]
    OutOfRange { value: u32, bound: u32 },

    /// Other errors not covered by specific variants
    #[error("{0}")]
    Other(String),
}

impl SealVoteError {
    pub fn invalid_encoding(msg: impl Into<String>) -> Self {
        Self::InvalidEncoding(msg.into())
    }

    pub fn serialization_error(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
