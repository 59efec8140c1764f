//! Devnet command implementations
//!
//! Each command works on an open [`Session`] and prints a human-readable
//! report. Engine calls are atomic, so the session is safe to persist even
//! when a command fails halfway through a multi-step flow.

use crate::devnet::Session;
use anyhow::{Context, Result};
use sealvote_core::{BallotError, BallotEvent, CallContext, ProposalId};
use sealvote_runtime::Address;
use tracing::info;

pub fn create(
    session: &mut Session,
    ctx: &CallContext,
    title: &str,
    options: Vec<String>,
    start_time: u64,
    end_time: u64,
) -> Result<ProposalId> {
    let id = session
        .engine
        .create_proposal(ctx, title, options, start_time, end_time)
        .context("Failed to create proposal")?;

    println!("✅ Proposal {} created", id);
    println!("   Title: {}", title);
    println!("   Voting window: {} .. {}", start_time, end_time);
    Ok(id)
}

pub fn vote(
    session: &mut Session,
    ctx: &CallContext,
    proposal_id: ProposalId,
    choice: u32,
) -> Result<()> {
    let config = session.engine.config().clone();
    let bound = session.engine.proposal(proposal_id)?.option_count();

    println!("🔐 Encrypting choice...");
    let input = session
        .signer
        .encrypt_choice(
            session.engine.executor_mut(),
            config.protocol_id,
            &config.ballot_address,
            &ctx.caller,
            bound,
            choice,
        )
        .context("Failed to encrypt choice")?;

    session
        .engine
        .cast_vote(ctx, proposal_id, input.handle, &input.proof)
        .with_context(|| format!("Vote on proposal {} rejected", proposal_id))?;

    println!("✅ Vote cast by {}", ctx.caller);
    println!("   Handle: {}", input.handle);
    println!("   Proof size: {} bytes", input.proof.size());
    Ok(())
}

/// Requests finalization, runs the mock KMS and submits its answer
///
/// An already finalized proposal just reports its results. A pending one
/// skips the request and goes straight to submission. `kms_signers` limits
/// how many KMS keys sign the response.
pub fn finalize(
    session: &mut Session,
    ctx: &CallContext,
    proposal_id: ProposalId,
    kms_signers: Option<usize>,
) -> Result<Vec<u32>> {
    let handles = match session.engine.request_finalize(ctx, proposal_id) {
        Ok(handles) => {
            println!("📤 Finalization requested, {} handles published", handles.len());
            handles
        }
        Err(BallotError::AlreadyFinalized(_)) => {
            println!("ℹ️  Proposal {} is already finalized", proposal_id);
            return results(session, proposal_id);
        }
        Err(BallotError::FinalizationPending(_)) => {
            println!("ℹ️  Decryption already requested, continuing with submission");
            session.engine.get_encrypted_counts(proposal_id)?
        }
        Err(e) => return Err(e).context("Failed to request finalization"),
    };

    println!("🔓 Requesting public decryption from the KMS...");
    let count = kms_signers.unwrap_or(session.engine.config().kms_signers.signers.len());
    let decryption = session
        .kms
        .public_decrypt_with(count, session.engine.executor(), &handles)
        .context("KMS public decryption failed")?;

    let values = session
        .engine
        .submit_decryption(ctx, proposal_id, &decryption.abi_encoded_cleartexts, &decryption.proof)
        .context("Decryption submission rejected")?;
    info!(proposal_id, "finalized through devnet");

    println!("✅ Proposal {} finalized", proposal_id);
    print_results(session, proposal_id, &values)?;
    Ok(values)
}

pub fn show(session: &Session, proposal_id: ProposalId, now: u64) -> Result<()> {
    let proposal = session.engine.proposal(proposal_id)?;
    let voters = session.engine.get_voter_count(proposal_id)?;

    println!("📋 Proposal {}: {}", proposal.id(), proposal.title());
    println!("   Creator: {}", proposal.creator());
    println!("   Window: {} .. {}", proposal.start_time(), proposal.end_time());
    println!("   Status: {}", proposal.status(now));
    println!("   Voters: {}", voters);
    match proposal.results() {
        Some(results) => {
            for (index, (label, count)) in proposal.options().iter().zip(results).enumerate() {
                println!("   [{}] {:<16} {}", index, label, count);
            }
        }
        None => {
            for (index, (label, handle)) in proposal.options().iter().zip(proposal.tally()).enumerate()
            {
                println!("   [{}] {:<16} {}", index, label, handle);
            }
        }
    }
    Ok(())
}

pub fn list(session: &Session, now: u64) {
    if session.engine.get_proposal_count() == 0 {
        println!("No proposals yet");
        return;
    }
    for proposal in session.engine.proposals() {
        let voters = session.engine.state().ledger().voter_count(proposal.id());
        println!(
            "{:>4}  {:<20} {:<19} {} voters",
            proposal.id(),
            proposal.title(),
            proposal.status(now),
            voters
        );
    }
}

pub fn results(session: &Session, proposal_id: ProposalId) -> Result<Vec<u32>> {
    let values = session.engine.get_results(proposal_id)?;
    print_results(session, proposal_id, &values)?;
    Ok(values)
}

/// Mock-only: reads one encrypted counter without going through the KMS
pub fn decrypt_option(session: &Session, proposal_id: ProposalId, index: usize) -> Result<u32> {
    let handle = session.engine.get_encrypted_count(proposal_id, index)?;
    let value = session
        .engine
        .executor()
        .plaintext(&handle)
        .context("Mock coprocessor has no plaintext for this handle")?;

    println!("🔍 Option {} of proposal {}: {}", index, proposal_id, value);
    println!("   Handle: {}", handle);
    Ok(value)
}

pub fn events(session: &Session, proposal_id: Option<ProposalId>) {
    for event in session.events() {
        if proposal_id.is_some() && event_proposal(event) != proposal_id {
            continue;
        }
        match serde_json::to_string(event) {
            Ok(json) => println!("{}", json),
            Err(_) => println!("{}", event.name()),
        }
    }
}

pub fn address(name: &str, address: &Address) {
    println!("{} = {}", name, address);
}

fn event_proposal(event: &BallotEvent) -> Option<ProposalId> {
    match event {
        BallotEvent::ProposalCreated { proposal_id, .. }
        | BallotEvent::Voted { proposal_id, .. }
        | BallotEvent::FinalizeRequested { proposal_id, .. }
        | BallotEvent::DecryptionSubmitted { proposal_id, .. }
        | BallotEvent::Finalized { proposal_id, .. } => Some(*proposal_id),
        BallotEvent::PublicDecryptionVerified { .. } => None,
    }
}

fn print_results(session: &Session, proposal_id: ProposalId, values: &[u32]) -> Result<()> {
    let proposal = session.engine.proposal(proposal_id)?;
    println!("📊 Results for \"{}\"", proposal.title());
    for (label, count) in proposal.options().iter().zip(values) {
        println!("   {:<16} {}", label, count);
    }
    Ok(())
}
