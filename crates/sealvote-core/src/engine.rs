//! The ballot engine
//!
//! Every state-changing call takes `&mut self` and is all-or-nothing: all
//! fallible work (proof checks, executor calls) happens before the first
//! write to engine state.
//!
//! # Examples
//!
//! ```rust
//! use sealvote_core::{BallotEngine, CallContext, EngineConfig, SignerSetConfig};
//! use sealvote_oracle::{seeded_signing_keys, InputSigner, MockCoprocessor, MockKms};
//! use sealvote_runtime::Address;
//!
//! let ballot = Address::new([0xB0; 20]);
//! let signer = InputSigner::new(seeded_signing_keys(1, 1));
//! let kms = MockKms::new(seeded_signing_keys(2, 1), 7, ballot);
//! let config = EngineConfig {
//!     protocol_id: 7,
//!     ballot_address: ballot,
//!     input_signers: SignerSetConfig::unanimous(signer.verifying_keys_hex()),
//!     kms_signers: SignerSetConfig::unanimous(kms.verifying_keys_hex()),
//! };
//! let mut engine = BallotEngine::new(config, MockCoprocessor::new()).unwrap();
//!
//! let alice = Address::new([1; 20]);
//! let id = engine
//!     .create_proposal(&CallContext::new(alice, 10), "Lunch", vec!["Pizza".into(), "Sushi".into()], 10, 20)
//!     .unwrap();
//!
//! let input = signer.encrypt_choice(engine.executor_mut(), 7, &ballot, &alice, 2, 1).unwrap();
//! engine.cast_vote(&CallContext::new(alice, 15), id, input.handle, &input.proof).unwrap();
//!
//! let handles = engine.request_finalize(&CallContext::new(alice, 20), id).unwrap();
//! let decryption = kms.public_decrypt(engine.executor(), &handles).unwrap();
//! let results = engine
//!     .submit_decryption(&CallContext::new(alice, 21), id, &decryption.abi_encoded_cleartexts, &decryption.proof)
//!     .unwrap();
//! assert_eq!(results, vec![0, 1]);
//! ```

use crate::config::EngineConfig;
use crate::error::{BallotError, Result};
use crate::events::BallotEvent;
use crate::ledger::VoteLedger;
use crate::proposal::{NewProposal, ProposalId, Registry, MIN_OPTIONS};
use crate::signers::SignerSet;
use crate::tally;
use sealvote_runtime::{
    digest::input_attestation_digest, Address, CiphertextHandle, FheExecutor, FheType, InputProof,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Who is calling and when
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Address,
    /// Unix seconds
    pub timestamp: u64,
}

impl CallContext {
    pub fn new(caller: Address, timestamp: u64) -> Self {
        Self { caller, timestamp }
    }
}

/// Persistent engine state: proposals and the vote ledger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotState {
    pub(crate) registry: Registry,
    pub(crate) ledger: VoteLedger,
}

impl BallotState {
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    pub fn validate(&self) -> Result<()> {
        self.registry.validate()?;
        if let Some(id) = self.ledger.proposal_ids().find(|id| self.registry.get(**id).is_err()) {
            return Err(BallotError::invalid_state(format!(
                "vote ledger references unknown proposal {}",
                id
            )));
        }
        Ok(())
    }
}

pub struct BallotEngine<F: FheExecutor> {
    pub(crate) config: EngineConfig,
    pub(crate) input_signers: SignerSet,
    pub(crate) kms_signers: SignerSet,
    pub(crate) state: BallotState,
    pub(crate) fhe: F,
    pub(crate) events: Vec<BallotEvent>,
}

impl<F: FheExecutor> BallotEngine<F> {
    pub fn new(config: EngineConfig, fhe: F) -> Result<Self> {
        Self::with_state(config, BallotState::default(), fhe)
    }

    /// Resumes an engine from previously persisted state
    pub fn with_state(config: EngineConfig, state: BallotState, fhe: F) -> Result<Self> {
        let (input_signers, kms_signers) = config.signer_sets()?;
        state.validate()?;
        Ok(Self { config, input_signers, kms_signers, state, fhe, events: Vec::new() })
    }

    pub fn into_parts(self) -> (BallotState, F) {
        (self.state, self.fhe)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &BallotState {
        &self.state
    }

    pub fn executor(&self) -> &F {
        &self.fhe
    }

    /// Mutable access to the executor, for collaborators that register inputs
    pub fn executor_mut(&mut self) -> &mut F {
        &mut self.fhe
    }

    pub fn events(&self) -> &[BallotEvent] {
        &self.events
    }

    /// Drains the events emitted so far
    pub fn take_events(&mut self) -> Vec<BallotEvent> {
        std::mem::take(&mut self.events)
    }

    /// Registers a proposal with an encrypted zero tally per option
    pub fn create_proposal(
        &mut self,
        ctx: &CallContext,
        title: impl Into<String>,
        options: Vec<String>,
        start_time: u64,
        end_time: u64,
    ) -> Result<ProposalId> {
        if options.len() < MIN_OPTIONS || u32::try_from(options.len()).is_err() {
            return Err(BallotError::InvalidOptions { count: options.len() });
        }
        if start_time < ctx.timestamp || end_time <= start_time {
            return Err(BallotError::InvalidSchedule { start_time, end_time, now: ctx.timestamp });
        }

        let tally = tally::zero_tally(&mut self.fhe, options.len())?;
        let title = title.into();
        let id = self.state.registry.insert(NewProposal {
            title: title.clone(),
            options: options.clone(),
            start_time,
            end_time,
            creator: ctx.caller,
            tally,
        });

        info!(proposal_id = id, creator = %ctx.caller, options = options.len(), "proposal created");
        self.events.push(BallotEvent::ProposalCreated {
            proposal_id: id,
            title,
            options,
            start_time,
            end_time,
            creator: ctx.caller,
        });
        Ok(id)
    }

    /// Same as [`BallotEngine::create_proposal`]; ballots are also called votes
    pub fn create_vote(
        &mut self,
        ctx: &CallContext,
        title: impl Into<String>,
        options: Vec<String>,
        start_time: u64,
        end_time: u64,
    ) -> Result<ProposalId> {
        self.create_proposal(ctx, title, options, start_time, end_time)
    }

    /// Admits one encrypted choice from `ctx.caller` and folds it into the tally
    pub fn cast_vote(
        &mut self,
        ctx: &CallContext,
        proposal_id: ProposalId,
        choice: CiphertextHandle,
        proof: &InputProof,
    ) -> Result<()> {
        let voter = ctx.caller;
        let proposal = self.state.registry.get(proposal_id)?;
        if proposal.is_finalized() {
            return Err(BallotError::AlreadyFinalized(proposal_id));
        }
        if proposal.is_pending() {
            return Err(BallotError::FinalizationPending(proposal_id));
        }
        if !proposal.in_voting_window(ctx.timestamp) {
            return Err(BallotError::VotingClosed { proposal_id, now: ctx.timestamp });
        }
        self.state.ledger.ensure_admissible(proposal_id, &voter)?;

        let reason = if choice.fhe_type() != Some(FheType::Uint32) {
            Some("encrypted choice is not a euint32 handle".to_string())
        } else {
            let digest = input_attestation_digest(
                self.config.protocol_id,
                &self.config.ballot_address,
                &voter,
                &choice,
                proposal.option_count(),
            );
            self.input_signers.verify(&digest, proof.as_bytes()).err().map(|e| e.to_string())
        };
        if let Some(reason) = reason {
            warn!(proposal_id, %voter, %reason, "rejected input proof");
            return Err(BallotError::InvalidProof { proposal_id, voter, reason });
        }

        let next = tally::accumulate(&mut self.fhe, proposal.tally(), choice)?;

        self.state.registry.get_mut(proposal_id)?.replace_tally(next);
        self.state.ledger.record(proposal_id, voter);

        info!(proposal_id, %voter, "vote cast");
        self.events.push(BallotEvent::Voted { proposal_id, voter });
        Ok(())
    }
}
