//! SealVote Ballot Demo
//!
//! Walks one proposal through its whole life against the mock coprocessor:
//! 1. Create a proposal with three options
//! 2. Cast encrypted votes from four accounts
//! 3. Request finalization once voting has ended
//! 4. Have the mock KMS publicly decrypt the tally
//! 5. Submit the signed cleartexts and read the results

use sealvote_core::{BallotEngine, CallContext, EngineConfig, SignerSetConfig};
use sealvote_oracle::{seeded_signing_keys, InputSigner, MockCoprocessor, MockKms};
use sealvote_runtime::Address;

const PROTOCOL_ID: u64 = 1;

fn main() {
    println!("\n=== SealVote Ballot Demo ===\n");

    let ballot = Address::new([0xB0; 20]);
    let signer = InputSigner::new(seeded_signing_keys(1, 1));
    let kms = MockKms::new(seeded_signing_keys(2, 3), PROTOCOL_ID, ballot);
    let config = EngineConfig {
        protocol_id: PROTOCOL_ID,
        ballot_address: ballot,
        input_signers: SignerSetConfig::unanimous(signer.verifying_keys_hex()),
        kms_signers: SignerSetConfig::new(kms.verifying_keys_hex(), 2),
    };
    let mut engine =
        BallotEngine::new(config, MockCoprocessor::new()).expect("Failed to build engine");

    println!("STEP 1: Create proposal");
    println!("───────────────────────");
    let creator = Address::new([0xAA; 20]);
    let options: Vec<String> = ["Pizza", "Sushi", "Tacos"].iter().map(|s| s.to_string()).collect();
    let id = engine
        .create_proposal(&CallContext::new(creator, 100), "Team lunch", options.clone(), 100, 200)
        .expect("Failed to create proposal");
    println!("  Proposal {} with options {:?}", id, options);
    println!();

    println!("STEP 2: Cast encrypted votes");
    println!("────────────────────────────");
    for (byte, choice) in [(1u8, 1u32), (2, 0), (3, 1), (4, 2)] {
        let voter = Address::new([byte; 20]);
        let input = signer
            .encrypt_choice(engine.executor_mut(), PROTOCOL_ID, &ballot, &voter, 3, choice)
            .expect("Failed to encrypt choice");
        engine
            .cast_vote(&CallContext::new(voter, 150), id, input.handle, &input.proof)
            .expect("Vote rejected");
        println!("  {} voted with handle {}", voter, input.handle);
    }
    println!("  Voters: {}", engine.get_voter_count(id).expect("proposal exists"));
    println!();

    println!("STEP 3: Request finalization");
    println!("────────────────────────────");
    let after = CallContext::new(creator, 201);
    let handles = engine.request_finalize(&after, id).expect("Failed to request finalization");
    for handle in &handles {
        println!("  published {}", handle);
    }
    println!();

    println!("STEP 4: Public decryption");
    println!("─────────────────────────");
    let decryption = kms.public_decrypt(engine.executor(), &handles).expect("KMS failed");
    println!("  Cleartexts: {:?}", decryption.clear_values);
    println!("  Proof size: {} bytes", decryption.proof.size());
    println!();

    println!("STEP 5: Submit and read results");
    println!("───────────────────────────────");
    let results = engine
        .submit_decryption(&after, id, &decryption.abi_encoded_cleartexts, &decryption.proof)
        .expect("Decryption rejected");
    for (label, count) in options.iter().zip(&results) {
        println!("  {:<6} {}", label, count);
    }
    println!("\nEvents emitted: {}", engine.take_events().len());
}
