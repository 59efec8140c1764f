//! Wire format of signature bundles
//!
//! Input proofs and decryption proofs share one layout: a postcard-encoded list
//! of `(signer public key, signature)` pairs. Checking the signatures is the
//! engine's job; this module only moves bytes.

use crate::error::{Result, SealVoteError};
use serde::{Deserialize, Serialize};

/// Length of an ed25519 public key
pub const SIGNER_KEY_LEN: usize = 32;

/// Length of an ed25519 signature
pub const SIGNATURE_LEN: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignatureEntry {
    pub signer: [u8; SIGNER_KEY_LEN],
    /// Raw signature bytes, expected to be `SIGNATURE_LEN` long
    pub signature: Vec<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignatureBundle {
    pub entries: Vec<SignatureEntry>,
}

impl SignatureBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, signer: [u8; SIGNER_KEY_LEN], signature: [u8; SIGNATURE_LEN]) {
        self.entries.push(SignatureEntry { signer, signature: signature.to_vec() });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        postcard::to_allocvec(self)
            .map_err(|e| SealVoteError::serialization_error(format!("signature bundle: {}", e)))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        postcard::from_bytes(bytes)
            .map_err(|e| SealVoteError::serialization_error(format!("signature bundle: {}", e)))
    }
}
