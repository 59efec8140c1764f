//! Ballot engine error types

use crate::proposal::ProposalId;
use sealvote_runtime::{Address, SealVoteError};
use thiserror::Error;

/// Why a signature bundle was refused
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignerError {
    #[error("Malformed signature bundle: {0}")]
    Malformed(String),

    #[error("Signature from unknown signer {0}")]
    UnknownSigner(String),

    #[error("Signer {0} appears more than once")]
    DuplicateSigner(String),

    #[error("Invalid signature from signer {0}")]
    BadSignature(String),

    #[error("Only {valid} valid signatures, threshold is {threshold}")]
    BelowThreshold { valid: usize, threshold: usize },
}

#[derive(Debug, Error)]
pub enum BallotError {
    #[error("Invalid option count {count}: a proposal needs at least 2 options")]
    InvalidOptions { count: usize },

    #[error("Invalid schedule: start {start_time}, end {end_time}, current time {now}")]
    InvalidSchedule { start_time: u64, end_time: u64, now: u64 },

    #[error("Proposal {0} not found")]
    NotFound(ProposalId),

    #[error("Option {index} out of range for proposal {proposal_id} ({options} options)")]
    IndexOutOfRange { proposal_id: ProposalId, index: usize, options: usize },

    #[error("Voting on proposal {proposal_id} is closed at time {now}")]
    VotingClosed { proposal_id: ProposalId, now: u64 },

    #[error("Voting on proposal {proposal_id} runs until {end_time}, current time {now}")]
    VotingNotEnded { proposal_id: ProposalId, end_time: u64, now: u64 },

    #[error("{voter} already voted on proposal {proposal_id}")]
    AlreadyVoted { proposal_id: ProposalId, voter: Address },

    #[error("Invalid input proof from {voter} on proposal {proposal_id}: {reason}")]
    InvalidProof { proposal_id: ProposalId, voter: Address, reason: String },

    #[error("Proposal {0} is already finalized")]
    AlreadyFinalized(ProposalId),

    #[error("Proposal {0} already has a pending decryption request")]
    FinalizationPending(ProposalId),

    #[error("Proposal {0} has not been finalized")]
    NotFinalized(ProposalId),

    #[error("Proposal {0} has no pending decryption request")]
    FinalizationNotRequested(ProposalId),

    #[error("KMS signatures rejected for proposal {proposal_id}")]
    InvalidKmsSignatures {
        proposal_id: ProposalId,
        #[source]
        source: SignerError,
    },

    #[error("Malformed cleartexts for proposal {proposal_id}")]
    MalformedCleartexts {
        proposal_id: ProposalId,
        #[source]
        source: SealVoteError,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid ballot state: {0}")]
    InvalidState(String),

    #[error(transparent)]
    Fhe(#[from] SealVoteError),
}

impl BallotError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Proposal the error refers to, if any
    pub fn proposal_id(&self) -> Option<ProposalId> {
        match self {
            Self::NotFound(id)
            | Self::AlreadyFinalized(id)
            | Self::FinalizationPending(id)
            | Self::NotFinalized(id)
            | Self::FinalizationNotRequested(id) => Some(*id),
            Self::IndexOutOfRange { proposal_id, .. }
            | Self::VotingClosed { proposal_id, .. }
            | Self::VotingNotEnded { proposal_id, .. }
            | Self::AlreadyVoted { proposal_id, .. }
            | Self::InvalidProof { proposal_id, .. }
            | Self::InvalidKmsSignatures { proposal_id, .. }
            | Self::MalformedCleartexts { proposal_id, .. } => Some(*proposal_id),
            Self::InvalidOptions { .. }
            | Self::InvalidSchedule { .. }
            | Self::InvalidConfig(_)
            | Self::InvalidState(_)
            | Self::Fhe(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BallotError>;
