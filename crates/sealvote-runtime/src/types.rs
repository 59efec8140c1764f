//! Core types for SealVote
//!
//! Handles, account addresses and the two opaque proof artifacts that cross the
//! boundary between the ballot engine and its external collaborators.

use crate::error::{Result, SealVoteError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Byte length of a ciphertext handle
pub const HANDLE_LEN: usize = 32;

/// Byte length of an account address
pub const ADDRESS_LEN: usize = 20;

/// Position of the FHE type tag inside a handle
const TYPE_BYTE: usize = 30;

/// Encrypted value types the ballot engine works with
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FheType {
    Bool,
    Uint32,
}

impl FheType {
    pub fn tag(self) -> u8 {
        match self {
            FheType::Bool => 0,
            FheType::Uint32 => 4,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(FheType::Bool),
            4 => Some(FheType::Uint32),
            _ => None,
        }
    }
}

/// Opaque reference to an encrypted value
///
/// A handle carries no cleartext. It is a plain value: the tally, the finalize
/// request and the oracle may all hold copies of the same handle.
///
/// # Examples
///
/// ```
/// use sealvote_runtime::{CiphertextHandle, FheType};
///
/// let handle = CiphertextHandle::new([7u8; 32]).with_type(FheType::Uint32);
/// assert_eq!(handle.fhe_type(), Some(FheType::Uint32));
/// ```
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(into = "String", try_from = "String")]
pub struct CiphertextHandle([u8; HANDLE_LEN]);

impl CiphertextHandle {
    pub fn new(bytes: [u8; HANDLE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HANDLE_LEN] {
        &self.0
    }

    /// Returns a copy tagged with the given FHE type
    pub fn with_type(mut self, fhe_type: FheType) -> Self {
        self.0[TYPE_BYTE] = fhe_type.tag();
        self
    }

    pub fn fhe_type(&self) -> Option<FheType> {
        FheType::from_tag(self.0[TYPE_BYTE])
    }
}

impl fmt::Display for CiphertextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for CiphertextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CiphertextHandle({})", self)
    }
}

impl FromStr for CiphertextHandle {
    type Err = SealVoteError;

    fn from_str(s: &str) -> Result<Self> {
        decode_fixed(s).map(Self)
    }
}

impl From<CiphertextHandle> for String {
    fn from(handle: CiphertextHandle) -> Self {
        handle.to_string()
    }
}

impl TryFrom<String> for CiphertextHandle {
    type Error = SealVoteError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Account identity of a caller (creator, voter or submitter)
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(into = "String", try_from = "String")]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    pub fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = SealVoteError;

    fn from_str(s: &str) -> Result<Self> {
        decode_fixed(s).map(Self)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

impl TryFrom<String> for Address {
    type Error = SealVoteError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Validity proof accompanying an encrypted ballot choice
///
/// Produced by the client-side encryption subsystem; attests that the
/// ciphertext encodes an option index in range without revealing it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputProof {
    proof_data: Vec<u8>,
}

impl InputProof {
    pub fn new(proof_data: Vec<u8>) -> Self {
        Self { proof_data }
    }

    pub fn size(&self) -> usize {
        self.proof_data.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.proof_data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.proof_data
    }
}

/// Signature bundle returned by the decryption oracle alongside cleartexts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecryptionProof {
    proof_data: Vec<u8>,
}

impl DecryptionProof {
    pub fn new(proof_data: Vec<u8>) -> Self {
        Self { proof_data }
    }

    pub fn size(&self) -> usize {
        self.proof_data.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.proof_data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.proof_data
    }
}

/// Parses a `0x`-prefixed (or bare) hex string of exactly `N` bytes
pub fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N]> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let mut out = [0u8; N];
    hex::decode_to_slice(digits, &mut out).map_err(|e| {
        SealVoteError::invalid_encoding(format!("expected {} hex bytes in '{}': {}", N, s, e))
    })?;
    Ok(out)
}
