//! Threshold verification of signature bundles
//!
//! Used for both input attestations and KMS decryption proofs. A bundle is
//! accepted only if every entry is a valid signature from a distinct, known
//! signer and there are at least `threshold` of them.

use crate::config::SignerSetConfig;
use crate::error::{BallotError, Result, SignerError};
use ed25519_dalek::{Signature, VerifyingKey};
use sealvote_runtime::{bundle::SIGNATURE_LEN, types::decode_fixed, SignatureBundle};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
pub struct SignerSet {
    keys: BTreeMap<[u8; 32], VerifyingKey>,
    threshold: usize,
}

impl SignerSet {
    /// Decodes a configured signer set; `role` only appears in error messages
    pub fn from_config(role: &str, config: &SignerSetConfig) -> Result<Self> {
        if config.signers.is_empty() {
            return Err(BallotError::invalid_config(format!("{} signer set is empty", role)));
        }
        if config.threshold == 0 || config.threshold > config.signers.len() {
            return Err(BallotError::invalid_config(format!(
                "{} threshold {} must be between 1 and {}",
                role,
                config.threshold,
                config.signers.len()
            )));
        }

        let mut keys = BTreeMap::new();
        for encoded in &config.signers {
            let bytes: [u8; 32] = decode_fixed(encoded).map_err(|e| {
                BallotError::invalid_config(format!("{} signer {}: {}", role, encoded, e))
            })?;
            let key = VerifyingKey::from_bytes(&bytes).map_err(|e| {
                BallotError::invalid_config(format!("{} signer {}: {}", role, encoded, e))
            })?;
            if keys.insert(bytes, key).is_some() {
                return Err(BallotError::invalid_config(format!(
                    "{} signer {} listed twice",
                    role, encoded
                )));
            }
        }

        Ok(Self { keys, threshold: config.threshold })
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Checks `bundle_bytes` against `digest`, returning the number of valid signatures
    pub fn verify(
        &self,
        digest: &[u8; 32],
        bundle_bytes: &[u8],
    ) -> std::result::Result<usize, SignerError> {
        let bundle = SignatureBundle::from_bytes(bundle_bytes)
            .map_err(|e| SignerError::Malformed(e.to_string()))?;

        let mut seen = BTreeSet::new();
        for entry in &bundle.entries {
            let signer = hex::encode(entry.signer);
            if !seen.insert(entry.signer) {
                return Err(SignerError::DuplicateSigner(signer));
            }
            let key = self
                .keys
                .get(&entry.signer)
                .ok_or_else(|| SignerError::UnknownSigner(signer.clone()))?;

            let raw: [u8; SIGNATURE_LEN] = entry
                .signature
                .as_slice()
                .try_into()
                .map_err(|_| SignerError::BadSignature(signer.clone()))?;
            key.verify_strict(digest, &Signature::from_bytes(&raw))
                .map_err(|_| SignerError::BadSignature(signer))?;
        }

        let valid = bundle.len();
        if valid < self.threshold {
            return Err(SignerError::BelowThreshold { valid, threshold: self.threshold });
        }
        Ok(valid)
    }
}
