//! Proposal creation, vote admission and query tests

mod common;

use common::{account, ballot_address, options, Harness, END, PROTOCOL_ID, START};
use sealvote_core::{BallotError, BallotEvent, CallContext, ProposalStatus};
use sealvote_runtime::{CiphertextHandle, FheType, InputProof};

#[test]
fn test_create_proposal_assigns_sequential_ids() {
    let mut h = Harness::new();
    let first = h.create(&["Yes", "No"]);
    let second = h.create(&["A", "B", "C"]);

    assert_eq!((first, second), (0, 1));
    assert_eq!(h.engine.get_proposal_count(), 2);
    assert_eq!(h.engine.get_total_votes(), 2);

    let view = h.engine.get_proposal(1).unwrap();
    assert_eq!(view.options, options(&["A", "B", "C"]));
    assert!(!view.finalized);
    assert!(!view.pending);
    assert_eq!(h.peek_tally(1), vec![0, 0, 0]);
}

#[test]
fn test_create_vote_is_an_alias() {
    let mut h = Harness::new();
    let ctx = CallContext::new(account(1), START);
    let id = h.engine.create_vote(&ctx, "Alias", options(&["A", "B"]), START, END).unwrap();

    let info = h.engine.get_vote_info(id).unwrap();
    assert_eq!(info.title, "Alias");
    assert_eq!(info.creator, account(1));
    assert!(!info.is_decrypted);
}

#[test]
fn test_create_rejects_too_few_options() {
    let mut h = Harness::new();
    let ctx = CallContext::new(account(1), START);

    let result = h.engine.create_proposal(&ctx, "Solo", options(&["Only"]), START, END);
    assert!(matches!(result, Err(BallotError::InvalidOptions { count: 1 })));
    assert_eq!(h.engine.get_proposal_count(), 0);
    assert!(h.engine.executor().is_empty());
}

#[test]
fn test_create_rejects_bad_schedule() {
    let mut h = Harness::new();
    let ctx = CallContext::new(account(1), START);
    let opts = options(&["A", "B"]);

    let in_the_past = h.engine.create_proposal(&ctx, "t", opts.clone(), START - 1, END);
    assert!(matches!(in_the_past, Err(BallotError::InvalidSchedule { .. })));

    let empty_window = h.engine.create_proposal(&ctx, "t", opts.clone(), START, START);
    assert!(matches!(empty_window, Err(BallotError::InvalidSchedule { .. })));

    let inverted = h.engine.create_proposal(&ctx, "t", opts, END, START);
    assert!(matches!(inverted, Err(BallotError::InvalidSchedule { .. })));

    assert_eq!(h.engine.get_proposal_count(), 0);
    // a failed creation does not burn an id
    assert_eq!(h.create(&["A", "B"]), 0);
}

#[test]
fn test_created_event() {
    let mut h = Harness::new();
    let id = h.create(&["A", "B"]);

    let events = h.engine.take_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        BallotEvent::ProposalCreated { proposal_id, start_time, end_time, .. }
            if *proposal_id == id && *start_time == START && *end_time == END
    ));
    assert!(h.engine.take_events().is_empty());
}

#[test]
fn test_vote_updates_tally_and_ledger() {
    let mut h = Harness::new();
    let id = h.create(&["A", "B", "C"]);
    let alice = account(1);

    assert!(!h.engine.has_voted(id, &alice));
    h.vote(id, alice, 2);

    assert!(h.engine.has_voted(id, &alice));
    assert_eq!(h.engine.get_voter_count(id).unwrap(), 1);
    assert_eq!(h.peek_tally(id), vec![0, 0, 1]);
    assert!(h
        .engine
        .events()
        .iter()
        .any(|e| matches!(e, BallotEvent::Voted { voter, .. } if *voter == alice)));
}

#[test]
fn test_every_counter_changes_on_every_vote() {
    let mut h = Harness::new();
    let id = h.create(&["A", "B", "C"]);
    let before = h.engine.get_encrypted_counts(id).unwrap();

    h.vote(id, account(1), 0);
    let after = h.engine.get_encrypted_counts(id).unwrap();

    for (old, new) in before.iter().zip(&after) {
        assert_ne!(old, new);
    }
}

#[test]
fn test_second_vote_is_rejected() {
    let mut h = Harness::new();
    let id = h.create(&["A", "B"]);
    let alice = account(1);
    h.vote(id, alice, 0);
    let tally = h.engine.get_encrypted_counts(id).unwrap();

    let result = h.try_vote(id, alice, 1);
    assert!(matches!(result, Err(BallotError::AlreadyVoted { proposal_id: 0, voter }) if voter == alice));
    assert_eq!(h.engine.get_voter_count(id).unwrap(), 1);
    assert_eq!(h.engine.get_encrypted_counts(id).unwrap(), tally);
    assert_eq!(h.peek_tally(id), vec![1, 0]);
}

#[test]
fn test_voter_count_matches_admitted_votes() {
    let mut h = Harness::new();
    let id = h.create(&["A", "B"]);
    for byte in 1..=5 {
        h.vote(id, account(byte), u32::from(byte % 2));
    }
    let _ = h.try_vote(id, account(3), 0);

    assert_eq!(h.engine.get_voter_count(id).unwrap(), 5);
    assert_eq!(h.peek_tally(id), vec![2, 3]);
}

#[test]
fn test_votes_on_different_proposals_are_independent() {
    let mut h = Harness::new();
    let first = h.create(&["A", "B"]);
    let second = h.create(&["A", "B"]);
    let alice = account(1);

    h.vote(first, alice, 0);
    h.vote(second, alice, 1);

    assert_eq!(h.peek_tally(first), vec![1, 0]);
    assert_eq!(h.peek_tally(second), vec![0, 1]);
}

#[test]
fn test_vote_outside_window() {
    let mut h = Harness::new();
    let id = h.create(&["A", "B"]);
    let alice = account(1);
    let input = h.encrypt(id, alice, 0);

    let early = h.engine.cast_vote(&CallContext::new(alice, START - 1), id, input.handle, &input.proof);
    assert!(matches!(early, Err(BallotError::VotingClosed { .. })));

    let late = h.engine.cast_vote(&CallContext::new(alice, END + 1), id, input.handle, &input.proof);
    assert!(matches!(late, Err(BallotError::VotingClosed { .. })));

    // both window edges are inclusive
    h.engine.cast_vote(&CallContext::new(alice, END), id, input.handle, &input.proof).unwrap();
    assert!(!h.engine.has_voted(id, &account(2)));
    assert!(h.engine.has_voted(id, &alice));
}

#[test]
fn test_vote_on_unknown_proposal() {
    let mut h = Harness::new();
    h.create(&["A", "B"]);
    let input = h.encrypt(0, account(1), 0);

    let result = h.engine.cast_vote(&CallContext::new(account(1), START), 9, input.handle, &input.proof);
    assert!(matches!(result, Err(BallotError::NotFound(9))));
}

#[test]
fn test_forged_proof_leaves_state_unchanged() {
    let mut h = Harness::new();
    let id = h.create(&["A", "B"]);
    let alice = account(1);
    let input = h.encrypt(id, alice, 1);
    let tally = h.engine.get_encrypted_counts(id).unwrap();
    let ctx = CallContext::new(alice, START);

    let mut forged = input.proof.clone().into_bytes();
    let last = forged.len() - 1;
    forged[last] ^= 0x01;
    let result = h.engine.cast_vote(&ctx, id, input.handle, &InputProof::new(forged));
    assert!(matches!(result, Err(BallotError::InvalidProof { .. })));

    let garbage = h.engine.cast_vote(&ctx, id, input.handle, &InputProof::new(vec![0xFF; 3]));
    assert!(matches!(garbage, Err(BallotError::InvalidProof { .. })));

    assert!(!h.engine.has_voted(id, &alice));
    assert_eq!(h.engine.get_voter_count(id).unwrap(), 0);
    assert_eq!(h.engine.get_encrypted_counts(id).unwrap(), tally);
    assert!(!h.engine.events().iter().any(|e| matches!(e, BallotEvent::Voted { .. })));
}

#[test]
fn test_proof_is_bound_to_voter() {
    let mut h = Harness::new();
    let id = h.create(&["A", "B"]);
    let input = h.encrypt(id, account(1), 1);

    let result = h.engine.cast_vote(&CallContext::new(account(2), START), id, input.handle, &input.proof);
    assert!(matches!(result, Err(BallotError::InvalidProof { voter, .. }) if voter == account(2)));
}

#[test]
fn test_proof_is_bound_to_option_count() {
    let mut h = Harness::new();
    let id = h.create(&["A", "B"]);
    let alice = account(1);

    // attested for a three-option range, so it cannot be used on a two-option proposal
    let handle = h.engine.executor_mut().encrypt_input(2);
    let proof = h.signer.attest(PROTOCOL_ID, &ballot_address(), &alice, &handle, 3).unwrap();

    let result = h.engine.cast_vote(&CallContext::new(alice, START), id, handle, &proof);
    assert!(matches!(result, Err(BallotError::InvalidProof { .. })));
}

#[test]
fn test_non_uint32_handle_is_rejected() {
    let mut h = Harness::new();
    let id = h.create(&["A", "B"]);
    let alice = account(1);
    let handle = CiphertextHandle::new([4; 32]).with_type(FheType::Bool);
    let proof = h.signer.attest(PROTOCOL_ID, &ballot_address(), &alice, &handle, 2).unwrap();

    let result = h.engine.cast_vote(&CallContext::new(alice, START), id, handle, &proof);
    assert!(matches!(result, Err(BallotError::InvalidProof { .. })));
}

#[test]
fn test_unknown_handle_surfaces_executor_error() {
    let mut h = Harness::new();
    let id = h.create(&["A", "B"]);
    let alice = account(1);
    let handle = CiphertextHandle::new([4; 32]).with_type(FheType::Uint32);
    let proof = h.signer.attest(PROTOCOL_ID, &ballot_address(), &alice, &handle, 2).unwrap();
    let tally = h.engine.get_encrypted_counts(id).unwrap();

    let result = h.engine.cast_vote(&CallContext::new(alice, START), id, handle, &proof);
    assert!(matches!(result, Err(BallotError::Fhe(_))));
    assert!(!h.engine.has_voted(id, &alice));
    assert_eq!(h.engine.get_encrypted_counts(id).unwrap(), tally);
}

#[test]
fn test_encrypted_count_queries() {
    let mut h = Harness::new();
    let id = h.create(&["A", "B"]);

    let counts = h.engine.get_encrypted_counts(id).unwrap();
    assert_eq!(h.engine.get_encrypted_count(id, 1).unwrap(), counts[1]);
    assert!(matches!(
        h.engine.get_encrypted_count(id, 2),
        Err(BallotError::IndexOutOfRange { index: 2, options: 2, .. })
    ));
    assert!(matches!(h.engine.get_encrypted_counts(5), Err(BallotError::NotFound(5))));
}

#[test]
fn test_queries_on_unknown_and_empty_proposals() {
    let mut h = Harness::new();
    assert!(matches!(h.engine.get_proposal(0), Err(BallotError::NotFound(0))));
    assert!(matches!(h.engine.get_vote_info(0), Err(BallotError::NotFound(0))));
    assert!(matches!(h.engine.get_voter_count(0), Err(BallotError::NotFound(0))));
    assert!(!h.engine.has_voted(0, &account(1)));

    let id = h.create(&["A", "B"]);
    assert_eq!(h.engine.get_voter_count(id).unwrap(), 0);
    assert!(matches!(h.engine.get_results(id), Err(BallotError::NotFinalized(0))));
}

#[test]
fn test_status_follows_the_clock() {
    let mut h = Harness::new();
    let id = h.create(&["A", "B"]);

    assert_eq!(h.engine.status(id, START - 1).unwrap(), ProposalStatus::NotStarted);
    assert_eq!(h.engine.status(id, START).unwrap(), ProposalStatus::Open);
    assert_eq!(h.engine.status(id, END).unwrap(), ProposalStatus::Closed);
    assert!(h.engine.status(7, START).is_err());
}

#[test]
fn test_confidential_protocol_id() {
    let h = Harness::new();
    assert_eq!(h.engine.confidential_protocol_id(), PROTOCOL_ID);
}

#[test]
fn test_state_resumes_from_json() {
    let mut h = Harness::new();
    let id = h.create(&["A", "B"]);
    h.vote(id, account(1), 1);
    let config = h.engine.config().clone();

    let (state, cop) = h.engine.into_parts();
    let json = serde_json::to_string(&state).unwrap();
    let restored = serde_json::from_str(&json).unwrap();

    let mut engine = sealvote_core::BallotEngine::with_state(config, restored, cop).unwrap();
    assert!(engine.has_voted(id, &account(1)));
    assert_eq!(engine.get_voter_count(id).unwrap(), 1);

    let ctx = CallContext::new(account(9), START);
    assert_eq!(engine.create_proposal(&ctx, "Next", options(&["A", "B"]), START, END).unwrap(), 1);
}
