//! Proposal records and the registry that owns them

use crate::error::{BallotError, Result};
use sealvote_runtime::{Address, CiphertextHandle};
use serde::{Deserialize, Serialize};

/// Sequential, zero-based proposal identifier
pub type ProposalId = u64;

/// Minimum number of options on a proposal
pub const MIN_OPTIONS: usize = 2;

/// Lifecycle state derived from the clock and the two stored flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    NotStarted,
    Open,
    Closed,
    PendingDecryption,
    Finalized,
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::NotStarted => "not started",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::PendingDecryption => "pending decryption",
            Self::Finalized => "finalized",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    id: ProposalId,
    title: String,
    options: Vec<String>,
    start_time: u64,
    end_time: u64,
    creator: Address,
    finalized: bool,
    pending: bool,
    /// One encrypted counter per option, in option order
    tally: Vec<CiphertextHandle>,
    results: Option<Vec<u32>>,
}

impl Proposal {
    pub fn id(&self) -> ProposalId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Option count as attested by input proofs; bounded to `u32` at creation
    pub fn option_count(&self) -> u32 {
        self.options.len() as u32
    }

    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    pub fn end_time(&self) -> u64 {
        self.end_time
    }

    pub fn creator(&self) -> &Address {
        &self.creator
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn tally(&self) -> &[CiphertextHandle] {
        &self.tally
    }

    pub fn results(&self) -> Option<&[u32]> {
        self.results.as_deref()
    }

    pub fn status(&self, now: u64) -> ProposalStatus {
        if self.finalized {
            ProposalStatus::Finalized
        } else if self.pending {
            ProposalStatus::PendingDecryption
        } else if now < self.start_time {
            ProposalStatus::NotStarted
        } else if now < self.end_time {
            ProposalStatus::Open
        } else {
            ProposalStatus::Closed
        }
    }

    /// Whether `now` lies in the inclusive voting window
    pub fn in_voting_window(&self, now: u64) -> bool {
        self.start_time <= now && now <= self.end_time
    }

    pub(crate) fn replace_tally(&mut self, tally: Vec<CiphertextHandle>) {
        debug_assert_eq!(tally.len(), self.options.len());
        self.tally = tally;
    }

    pub(crate) fn mark_pending(&mut self) {
        self.pending = true;
    }

    pub(crate) fn commit_results(&mut self, results: Vec<u32>) {
        self.results = Some(results);
        self.finalized = true;
        self.pending = false;
    }

    fn check_consistency(&self, expected_id: ProposalId) -> Result<()> {
        let problem = if self.id != expected_id {
            Some(format!("proposal at position {} has id {}", expected_id, self.id))
        } else if self.options.len() < MIN_OPTIONS || u32::try_from(self.options.len()).is_err() {
            Some(format!("proposal {} has {} options", self.id, self.options.len()))
        } else if self.tally.len() != self.options.len() {
            Some(format!("proposal {} tally does not match its options", self.id))
        } else if self.finalized && self.pending {
            Some(format!("proposal {} is both finalized and pending", self.id))
        } else if self.finalized != self.results.is_some() {
            Some(format!("proposal {} results do not match its finalized flag", self.id))
        } else if self.results.as_ref().is_some_and(|r| r.len() != self.options.len()) {
            Some(format!("proposal {} results do not match its options", self.id))
        } else {
            None
        };
        match problem {
            Some(msg) => Err(BallotError::invalid_state(msg)),
            None => Ok(()),
        }
    }
}

/// Fields of a proposal being registered
pub(crate) struct NewProposal {
    pub title: String,
    pub options: Vec<String>,
    pub start_time: u64,
    pub end_time: u64,
    pub creator: Address,
    pub tally: Vec<CiphertextHandle>,
}

/// Append-only proposal store; a proposal's id is its position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    proposals: Vec<Proposal>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> u64 {
        self.proposals.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    pub fn get(&self, id: ProposalId) -> Result<&Proposal> {
        usize::try_from(id)
            .ok()
            .and_then(|index| self.proposals.get(index))
            .ok_or(BallotError::NotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: ProposalId) -> Result<&mut Proposal> {
        usize::try_from(id)
            .ok()
            .and_then(|index| self.proposals.get_mut(index))
            .ok_or(BallotError::NotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.iter()
    }

    pub(crate) fn insert(&mut self, new: NewProposal) -> ProposalId {
        let id = self.len();
        self.proposals.push(Proposal {
            id,
            title: new.title,
            options: new.options,
            start_time: new.start_time,
            end_time: new.end_time,
            creator: new.creator,
            finalized: false,
            pending: false,
            tally: new.tally,
            results: None,
        });
        id
    }

    /// Checks invariants of a registry loaded from storage
    pub fn validate(&self) -> Result<()> {
        for (index, proposal) in self.proposals.iter().enumerate() {
            proposal.check_consistency(index as ProposalId)?;
        }
        Ok(())
    }
}
