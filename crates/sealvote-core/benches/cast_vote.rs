//! Benchmark for vote admission and tally accumulation.
//!
//! Runs against the mock coprocessor, so the numbers measure engine overhead
//! and signature checks, not real FHE evaluation.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sealvote_core::{BallotEngine, CallContext, EngineConfig, SignerSetConfig};
use sealvote_oracle::{seeded_signing_keys, InputSigner, MockCoprocessor};
use sealvote_runtime::Address;

fn bench_cast_vote(c: &mut Criterion) {
    let ballot = Address::new([0xB0; 20]);
    let signer = InputSigner::new(seeded_signing_keys(1, 1));
    let kms_keys: Vec<String> = seeded_signing_keys(2, 1)
        .iter()
        .map(sealvote_oracle::keys::verifying_key_hex)
        .collect();
    let config = EngineConfig {
        protocol_id: 1,
        ballot_address: ballot,
        input_signers: SignerSetConfig::unanimous(signer.verifying_keys_hex()),
        kms_signers: SignerSetConfig::unanimous(kms_keys),
    };

    let mut group = c.benchmark_group("cast_vote");
    for option_count in [2u32, 8, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(option_count), &option_count, |b, &n| {
            let mut engine = BallotEngine::new(config.clone(), MockCoprocessor::new()).unwrap();
            let options = (0..n).map(|i| format!("option {}", i)).collect();
            let id = engine
                .create_proposal(&CallContext::new(ballot, 0), "bench", options, 0, u64::MAX)
                .unwrap();
            let mut next_voter: u64 = 0;

            b.iter(|| {
                next_voter += 1;
                let mut bytes = [0u8; 20];
                bytes[12..].copy_from_slice(&next_voter.to_be_bytes());
                let voter = Address::new(bytes);
                let input = signer
                    .encrypt_choice(engine.executor_mut(), 1, &ballot, &voter, n, n - 1)
                    .unwrap();
                engine.cast_vote(&CallContext::new(voter, 1), id, input.handle, &input.proof).unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cast_vote);
criterion_main!(benches);
