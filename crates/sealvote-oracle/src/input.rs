//! Client-side input encryption
//!
//! Plays the role of the browser encryption library together with the
//! coprocessor's input verifier: the choice is registered as an `euint32`
//! ciphertext and the coprocessor signers attest that it is a valid input for
//! this voter on this ballot.

use crate::coprocessor::MockCoprocessor;
use crate::keys::{sign_bundle, verifying_key_hex};
use ed25519_dalek::SigningKey;
use sealvote_runtime::{
    digest::input_attestation_digest, Address, CiphertextHandle, InputProof, Result,
    SealVoteError,
};
use tracing::debug;

/// Handle and validity proof as handed to `cast_vote`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedInput {
    pub handle: CiphertextHandle,
    pub proof: InputProof,
}

pub struct InputSigner {
    keys: Vec<SigningKey>,
}

impl InputSigner {
    pub fn new(keys: Vec<SigningKey>) -> Self {
        Self { keys }
    }

    /// Verifying keys to put in the engine's `input_signers` config
    pub fn verifying_keys_hex(&self) -> Vec<String> {
        self.keys.iter().map(verifying_key_hex).collect()
    }

    /// Encrypts `choice` for `voter` and attests it lies in `[0, bound)`
    pub fn encrypt_choice(
        &self,
        coprocessor: &mut MockCoprocessor,
        protocol_id: u64,
        ballot: &Address,
        voter: &Address,
        bound: u32,
        choice: u32,
    ) -> Result<EncryptedInput> {
        if choice >= bound {
            return Err(SealVoteError::OutOfRange { value: choice, bound });
        }

        let handle = coprocessor.encrypt_input(choice);
        let proof = self.attest(protocol_id, ballot, voter, &handle, bound)?;
        debug!(%voter, %handle, bound, "encrypted ballot choice");
        Ok(EncryptedInput { handle, proof })
    }

    /// Signs the attestation for an already registered handle
    ///
    /// Does not look at the plaintext; tests use it to attest arbitrary handles.
    pub fn attest(
        &self,
        protocol_id: u64,
        ballot: &Address,
        voter: &Address,
        handle: &CiphertextHandle,
        bound: u32,
    ) -> Result<InputProof> {
        let digest = input_attestation_digest(protocol_id, ballot, voter, handle, bound);
        let bundle = sign_bundle(&self.keys, &digest);
        Ok(InputProof::new(bundle.to_bytes()?))
    }
}
