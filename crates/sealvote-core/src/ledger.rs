//! Record of who has voted on which proposal
//!
//! Presence only. The ledger never learns what anybody voted for.

use crate::error::{BallotError, Result};
use crate::proposal::ProposalId;
use sealvote_runtime::Address;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteLedger {
    voters: BTreeMap<ProposalId, BTreeSet<Address>>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_voted(&self, proposal_id: ProposalId, voter: &Address) -> bool {
        self.voters.get(&proposal_id).is_some_and(|set| set.contains(voter))
    }

    pub fn voter_count(&self, proposal_id: ProposalId) -> u64 {
        self.voters.get(&proposal_id).map_or(0, |set| set.len() as u64)
    }

    /// Fails with `AlreadyVoted` if `voter` is already recorded
    pub(crate) fn ensure_admissible(&self, proposal_id: ProposalId, voter: &Address) -> Result<()> {
        if self.has_voted(proposal_id, voter) {
            return Err(BallotError::AlreadyVoted { proposal_id, voter: *voter });
        }
        Ok(())
    }

    pub(crate) fn record(&mut self, proposal_id: ProposalId, voter: Address) {
        self.voters.entry(proposal_id).or_default().insert(voter);
    }

    /// Proposals that have at least one recorded voter
    pub(crate) fn proposal_ids(&self) -> impl Iterator<Item = &ProposalId> {
        self.voters.keys()
    }
}
