//! Two-phase finalization
//!
//! `request_finalize` publishes the tally handles for public decryption and
//! marks the proposal pending. `submit_decryption` later checks the KMS
//! signatures over those exact handles and commits the plaintext result.
//! A pending request never expires.

use crate::engine::{BallotEngine, CallContext};
use crate::error::{BallotError, Result};
use crate::events::BallotEvent;
use crate::proposal::{ProposalId, ProposalStatus};
use sealvote_runtime::{
    codec::decode_cleartexts, digest::decryption_digest, CiphertextHandle, DecryptionProof,
    FheExecutor,
};
use tracing::{info, warn};

impl<F: FheExecutor> BallotEngine<F> {
    /// Releases the tally of an ended proposal for public decryption
    ///
    /// Returns the handles in option order. `AlreadyFinalized` means the
    /// results are already available through `get_results`.
    pub fn request_finalize(
        &mut self,
        ctx: &CallContext,
        proposal_id: ProposalId,
    ) -> Result<Vec<CiphertextHandle>> {
        let proposal = self.state.registry.get_mut(proposal_id)?;
        match proposal.status(ctx.timestamp) {
            ProposalStatus::Finalized => return Err(BallotError::AlreadyFinalized(proposal_id)),
            ProposalStatus::PendingDecryption => {
                return Err(BallotError::FinalizationPending(proposal_id))
            }
            ProposalStatus::NotStarted | ProposalStatus::Open => {
                return Err(BallotError::VotingNotEnded {
                    proposal_id,
                    end_time: proposal.end_time(),
                    now: ctx.timestamp,
                })
            }
            ProposalStatus::Closed => {}
        }

        let handles = proposal.tally().to_vec();
        self.fhe.make_publicly_decryptable(&handles)?;
        proposal.mark_pending();

        info!(proposal_id, requester = %ctx.caller, handles = handles.len(), "finalization requested");
        self.events.push(BallotEvent::FinalizeRequested { proposal_id, handles: handles.clone() });
        Ok(handles)
    }

    /// Verifies a KMS response for the pending request and commits the results
    ///
    /// Signature and encoding failures leave the request pending, so the
    /// caller may retry with a corrected response.
    pub fn submit_decryption(
        &mut self,
        ctx: &CallContext,
        proposal_id: ProposalId,
        cleartexts: &[u8],
        proof: &DecryptionProof,
    ) -> Result<Vec<u32>> {
        let proposal = self.state.registry.get_mut(proposal_id)?;
        if proposal.is_finalized() {
            return Err(BallotError::AlreadyFinalized(proposal_id));
        }
        if !proposal.is_pending() {
            return Err(BallotError::FinalizationNotRequested(proposal_id));
        }

        let digest = decryption_digest(
            self.config.protocol_id,
            &self.config.ballot_address,
            proposal.tally(),
            cleartexts,
        );
        if let Err(source) = self.kms_signers.verify(&digest, proof.as_bytes()) {
            warn!(proposal_id, error = %source, "rejected KMS decryption proof");
            return Err(BallotError::InvalidKmsSignatures { proposal_id, source });
        }

        let results = decode_cleartexts(cleartexts, proposal.options().len()).map_err(|source| {
            warn!(proposal_id, error = %source, "malformed cleartexts");
            BallotError::MalformedCleartexts { proposal_id, source }
        })?;

        let handles = proposal.tally().to_vec();
        proposal.commit_results(results.clone());

        info!(proposal_id, submitter = %ctx.caller, ?results, "proposal finalized");
        self.events.push(BallotEvent::PublicDecryptionVerified {
            handles,
            cleartexts: cleartexts.to_vec(),
        });
        self.events.push(BallotEvent::DecryptionSubmitted { proposal_id, submitter: ctx.caller });
        self.events.push(BallotEvent::Finalized { proposal_id, results: results.clone() });
        Ok(results)
    }
}
