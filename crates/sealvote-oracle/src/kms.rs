//! Mock key management service
//!
//! Serves public decryption for handles the coprocessor has released. The
//! response carries the cleartexts in the engine's word encoding and a
//! signature bundle over the decryption digest.

use crate::coprocessor::MockCoprocessor;
use crate::keys::{sign_bundle, verifying_key_hex};
use ed25519_dalek::SigningKey;
use sealvote_runtime::{
    codec::encode_cleartexts, digest::decryption_digest, Address, CiphertextHandle,
    DecryptionProof, Result, SealVoteError,
};
use tracing::{debug, info};

/// Result of a public decryption, ready for `submit_decryption`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicDecryption {
    pub handles: Vec<CiphertextHandle>,
    pub clear_values: Vec<u32>,
    pub abi_encoded_cleartexts: Vec<u8>,
    pub proof: DecryptionProof,
}

pub struct MockKms {
    signers: Vec<SigningKey>,
    protocol_id: u64,
    ballot: Address,
}

impl MockKms {
    pub fn new(signers: Vec<SigningKey>, protocol_id: u64, ballot: Address) -> Self {
        Self { signers, protocol_id, ballot }
    }

    /// Verifying keys to put in the engine's `kms_signers` config
    pub fn verifying_keys_hex(&self) -> Vec<String> {
        self.signers.iter().map(verifying_key_hex).collect()
    }

    /// Decrypts `handles` in order and signs the result with every KMS key
    pub fn public_decrypt(
        &self,
        coprocessor: &MockCoprocessor,
        handles: &[CiphertextHandle],
    ) -> Result<PublicDecryption> {
        self.public_decrypt_with(self.signers.len(), coprocessor, handles)
    }

    /// Same as [`MockKms::public_decrypt`] but signs with only the first `count` keys
    pub fn public_decrypt_with(
        &self,
        count: usize,
        coprocessor: &MockCoprocessor,
        handles: &[CiphertextHandle],
    ) -> Result<PublicDecryption> {
        let clear_values = handles
            .iter()
            .map(|handle| coprocessor.public_plaintext(handle))
            .collect::<Result<Vec<_>>>()?;
        let abi_encoded_cleartexts = encode_cleartexts(&clear_values);
        let proof = self.sign_with(count, handles, &abi_encoded_cleartexts)?;

        info!(handles = handles.len(), signers = count, "served public decryption");
        Ok(PublicDecryption { handles: handles.to_vec(), clear_values, abi_encoded_cleartexts, proof })
    }

    /// Signs arbitrary cleartexts for `handles`, true or not
    pub fn sign(&self, handles: &[CiphertextHandle], cleartexts: &[u8]) -> Result<DecryptionProof> {
        self.sign_with(self.signers.len(), handles, cleartexts)
    }

    pub fn sign_with(
        &self,
        count: usize,
        handles: &[CiphertextHandle],
        cleartexts: &[u8],
    ) -> Result<DecryptionProof> {
        if count > self.signers.len() {
            return Err(SealVoteError::other(format!(
                "requested {} KMS signatures but only {} keys are loaded",
                count,
                self.signers.len()
            )));
        }
        let digest = decryption_digest(self.protocol_id, &self.ballot, handles, cleartexts);
        let bundle = sign_bundle(&self.signers[..count], &digest);
        debug!(signatures = bundle.len(), "signed decryption digest");
        Ok(DecryptionProof::new(bundle.to_bytes()?))
    }
}
