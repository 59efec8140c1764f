//! Read-only projections of engine state

use crate::engine::BallotEngine;
use crate::error::{BallotError, Result};
use crate::proposal::{Proposal, ProposalId, ProposalStatus};
use sealvote_runtime::{Address, CiphertextHandle, FheExecutor};
use serde::{Deserialize, Serialize};

/// Summary returned by `get_proposal`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalView {
    pub id: ProposalId,
    pub title: String,
    pub options: Vec<String>,
    pub start_time: u64,
    pub end_time: u64,
    pub finalized: bool,
    pub pending: bool,
}

/// Summary returned by `get_vote_info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteInfo {
    pub title: String,
    pub options: Vec<String>,
    pub start_time: u64,
    pub end_time: u64,
    pub creator: Address,
    pub is_decrypted: bool,
}

impl From<&Proposal> for ProposalView {
    fn from(p: &Proposal) -> Self {
        Self {
            id: p.id(),
            title: p.title().to_string(),
            options: p.options().to_vec(),
            start_time: p.start_time(),
            end_time: p.end_time(),
            finalized: p.is_finalized(),
            pending: p.is_pending(),
        }
    }
}

impl From<&Proposal> for VoteInfo {
    fn from(p: &Proposal) -> Self {
        Self {
            title: p.title().to_string(),
            options: p.options().to_vec(),
            start_time: p.start_time(),
            end_time: p.end_time(),
            creator: *p.creator(),
            is_decrypted: p.is_finalized(),
        }
    }
}

impl<F: FheExecutor> BallotEngine<F> {
    pub fn proposal(&self, proposal_id: ProposalId) -> Result<&Proposal> {
        self.state.registry.get(proposal_id)
    }

    pub fn proposals(&self) -> impl Iterator<Item = &Proposal> {
        self.state.registry.iter()
    }

    pub fn get_proposal(&self, proposal_id: ProposalId) -> Result<ProposalView> {
        self.proposal(proposal_id).map(ProposalView::from)
    }

    pub fn get_proposal_count(&self) -> u64 {
        self.state.registry.len()
    }

    /// Number of ballots created so far
    pub fn get_total_votes(&self) -> u64 {
        self.state.registry.len()
    }

    pub fn get_vote_info(&self, proposal_id: ProposalId) -> Result<VoteInfo> {
        self.proposal(proposal_id).map(VoteInfo::from)
    }

    /// False for unknown proposals as well
    pub fn has_voted(&self, proposal_id: ProposalId, voter: &Address) -> bool {
        self.state.ledger.has_voted(proposal_id, voter)
    }

    pub fn get_voter_count(&self, proposal_id: ProposalId) -> Result<u64> {
        self.proposal(proposal_id)?;
        Ok(self.state.ledger.voter_count(proposal_id))
    }

    pub fn get_encrypted_count(
        &self,
        proposal_id: ProposalId,
        index: usize,
    ) -> Result<CiphertextHandle> {
        let tally = self.proposal(proposal_id)?.tally();
        tally.get(index).copied().ok_or(BallotError::IndexOutOfRange {
            proposal_id,
            index,
            options: tally.len(),
        })
    }

    pub fn get_encrypted_counts(&self, proposal_id: ProposalId) -> Result<Vec<CiphertextHandle>> {
        Ok(self.proposal(proposal_id)?.tally().to_vec())
    }

    pub fn get_results(&self, proposal_id: ProposalId) -> Result<Vec<u32>> {
        self.proposal(proposal_id)?
            .results()
            .map(<[u32]>::to_vec)
            .ok_or(BallotError::NotFinalized(proposal_id))
    }

    pub fn status(&self, proposal_id: ProposalId, now: u64) -> Result<ProposalStatus> {
        Ok(self.proposal(proposal_id)?.status(now))
    }

    pub fn confidential_protocol_id(&self) -> u64 {
        self.config.protocol_id
    }
}
