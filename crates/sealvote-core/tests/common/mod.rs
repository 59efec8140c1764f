//! Shared fixtures for sealvote-core integration tests

#![allow(dead_code)]

use sealvote_core::{
    BallotEngine, CallContext, EngineConfig, ProposalId, SignerSetConfig,
};
use sealvote_oracle::{seeded_signing_keys, EncryptedInput, InputSigner, MockCoprocessor, MockKms};
use sealvote_runtime::Address;

pub const PROTOCOL_ID: u64 = 12_345;
pub const START: u64 = 1_000;
pub const END: u64 = 2_000;

pub fn ballot_address() -> Address {
    Address::new([0xB0; 20])
}

pub fn account(byte: u8) -> Address {
    Address::new([byte; 20])
}

pub fn options(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

/// Engine backed by the mock coprocessor, plus the oracles that talk to it
pub struct Harness {
    pub engine: BallotEngine<MockCoprocessor>,
    pub signer: InputSigner,
    pub kms: MockKms,
}

impl Harness {
    /// One input signer, two KMS signers, KMS threshold 2
    pub fn new() -> Self {
        Self::with_kms_threshold(2)
    }

    pub fn with_kms_threshold(threshold: usize) -> Self {
        let signer = InputSigner::new(seeded_signing_keys(1, 1));
        let kms = MockKms::new(seeded_signing_keys(2, 2), PROTOCOL_ID, ballot_address());
        let config = EngineConfig {
            protocol_id: PROTOCOL_ID,
            ballot_address: ballot_address(),
            input_signers: SignerSetConfig::unanimous(signer.verifying_keys_hex()),
            kms_signers: SignerSetConfig::new(kms.verifying_keys_hex(), threshold),
        };
        let engine = BallotEngine::new(config, MockCoprocessor::new())
            .expect("harness config should be valid");
        Self { engine, signer, kms }
    }

    /// Creates a proposal open over `[START, END]`
    pub fn create(&mut self, labels: &[&str]) -> ProposalId {
        self.engine
            .create_proposal(&CallContext::new(account(0xCC), START), "Proposal", options(labels), START, END)
            .expect("proposal creation should succeed")
    }

    pub fn encrypt(&mut self, proposal_id: ProposalId, voter: Address, choice: u32) -> EncryptedInput {
        let bound = self.engine.proposal(proposal_id).expect("proposal exists").option_count();
        self.signer
            .encrypt_choice(
                self.engine.executor_mut(),
                PROTOCOL_ID,
                &ballot_address(),
                &voter,
                bound,
                choice,
            )
            .expect("choice should encrypt")
    }

    pub fn vote(&mut self, proposal_id: ProposalId, voter: Address, choice: u32) {
        self.try_vote(proposal_id, voter, choice).expect("vote should be admitted");
    }

    pub fn try_vote(
        &mut self,
        proposal_id: ProposalId,
        voter: Address,
        choice: u32,
    ) -> sealvote_core::Result<()> {
        let input = self.encrypt(proposal_id, voter, choice);
        self.engine.cast_vote(&CallContext::new(voter, START + 1), proposal_id, input.handle, &input.proof)
    }

    /// Runs the full request, decrypt, submit handshake after the window
    pub fn finalize(&mut self, proposal_id: ProposalId) -> Vec<u32> {
        let ctx = CallContext::new(account(0xEE), END + 1);
        let handles = self.engine.request_finalize(&ctx, proposal_id).expect("request should succeed");
        let decryption = self
            .kms
            .public_decrypt(self.engine.executor(), &handles)
            .expect("KMS should decrypt published handles");
        self.engine
            .submit_decryption(&ctx, proposal_id, &decryption.abi_encoded_cleartexts, &decryption.proof)
            .expect("decryption should verify")
    }

    /// Plaintext of every counter, read straight from the mock coprocessor
    pub fn peek_tally(&self, proposal_id: ProposalId) -> Vec<u32> {
        self.engine
            .get_encrypted_counts(proposal_id)
            .expect("proposal exists")
            .iter()
            .map(|h| self.engine.executor().plaintext(h).expect("tally handle exists"))
            .collect()
    }
}
