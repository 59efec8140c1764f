//! Engine configuration

use crate::error::{BallotError, Result};
use crate::signers::SignerSet;
use sealvote_runtime::Address;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A set of ed25519 verifying keys and how many of them must sign
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignerSetConfig {
    /// Hex-encoded verifying keys
    pub signers: Vec<String>,
    pub threshold: usize,
}

impl SignerSetConfig {
    pub fn new(signers: Vec<String>, threshold: usize) -> Self {
        Self { signers, threshold }
    }

    /// Every listed signer must sign
    pub fn unanimous(signers: Vec<String>) -> Self {
        let threshold = signers.len();
        Self { signers, threshold }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Identifies the FHE protocol deployment; mixed into every signed digest
    pub protocol_id: u64,
    /// Address of this ballot instance; mixed into every signed digest
    pub ballot_address: Address,
    /// Coprocessor signers attesting encrypted inputs
    pub input_signers: SignerSetConfig,
    /// KMS signers attesting public decryptions
    pub kms_signers: SignerSetConfig,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| BallotError::invalid_config(format!("failed to parse config: {}", e)))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            BallotError::invalid_config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BallotError::invalid_config(format!("failed to serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        self.signer_sets().map(|_| ())
    }

    /// Decodes both signer sets, rejecting anything `validate` would
    pub(crate) fn signer_sets(&self) -> Result<(SignerSet, SignerSet)> {
        let input = SignerSet::from_config("input", &self.input_signers)?;
        let kms = SignerSet::from_config("kms", &self.kms_signers)?;
        Ok((input, kms))
    }
}
