//! Signed message digests
//!
//! Both external attestations (input validity and public decryption) are
//! signatures over a BLAKE2b-256 digest. Signers and the engine must agree on
//! the exact byte layout, so it lives here.

use crate::types::{Address, CiphertextHandle};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

const INPUT_DOMAIN: &[u8] = b"sealvote/input-attestation/v1";
const DECRYPTION_DOMAIN: &[u8] = b"sealvote/public-decryption/v1";

/// Digest signed by coprocessor input signers for one encrypted choice
///
/// Binds the handle to the ballot, the voter and the exclusive upper bound
/// of the attested range, so a proof cannot be replayed by another voter or
/// against a proposal with more options.
pub fn input_attestation_digest(
    protocol_id: u64,
    ballot: &Address,
    voter: &Address,
    handle: &CiphertextHandle,
    bound: u32,
) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(INPUT_DOMAIN);
    hasher.update(protocol_id.to_be_bytes());
    hasher.update(ballot.as_bytes());
    hasher.update(voter.as_bytes());
    hasher.update(handle.as_bytes());
    hasher.update(bound.to_be_bytes());
    hasher.finalize().into()
}

/// Digest signed by KMS signers for a public decryption result
///
/// Covers the ordered handle list and the encoded cleartexts, so reordering
/// either side invalidates every signature.
pub fn decryption_digest(
    protocol_id: u64,
    ballot: &Address,
    handles: &[CiphertextHandle],
    cleartexts: &[u8],
) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(DECRYPTION_DOMAIN);
    hasher.update(protocol_id.to_be_bytes());
    hasher.update(ballot.as_bytes());
    hasher.update((handles.len() as u64).to_be_bytes());
    for handle in handles {
        hasher.update(handle.as_bytes());
    }
    hasher.update((cleartexts.len() as u64).to_be_bytes());
    hasher.update(cleartexts);
    hasher.finalize().into()
}

/// BLAKE2b-256 of arbitrary labelled input
pub fn hash_labelled(label: &[u8], parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(label);
    for part in parts {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part);
    }
    hasher.finalize().into()
}
