//! SealVote Core
//!
//! Confidential ballot engine. Proposals collect one encrypted choice per
//! voter, tallies are accumulated homomorphically through an [`FheExecutor`],
//! and results are only ever revealed through a KMS-signed public decryption
//! of the final tally.

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod finalize;
pub mod ledger;
pub mod proposal;
pub mod query;
pub mod signers;
mod tally;

pub use config::{EngineConfig, SignerSetConfig};
pub use engine::{BallotEngine, BallotState, CallContext};
pub use error::{BallotError, Result, SignerError};
pub use events::BallotEvent;
pub use ledger::VoteLedger;
pub use proposal::{Proposal, ProposalId, ProposalStatus, Registry};
pub use query::{ProposalView, VoteInfo};
pub use signers::SignerSet;

// Re-export runtime types for convenience
pub use sealvote_runtime::{
    Address, CiphertextHandle, DecryptionProof, FheExecutor, FheType, InputProof,
};
