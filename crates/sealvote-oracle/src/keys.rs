//! Signing key management for the mock coprocessor and KMS
//!
//! Keys are plain ed25519 keys. Devnets persist them as hex so the same
//! signer set survives between CLI invocations.

use ed25519_dalek::{Signer, SigningKey};
use rand::{
    rngs::{OsRng, StdRng},
    SeedableRng,
};
use sealvote_runtime::{types::decode_fixed, Result, SignatureBundle};

/// Fresh keys from OS randomness
pub fn generate_signing_keys(count: usize) -> Vec<SigningKey> {
    let mut rng = OsRng;
    (0..count).map(|_| SigningKey::generate(&mut rng)).collect()
}

/// Reproducible keys for tests and demos
pub fn seeded_signing_keys(seed: u64, count: usize) -> Vec<SigningKey> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| SigningKey::generate(&mut rng)).collect()
}

pub fn signing_key_to_hex(key: &SigningKey) -> String {
    hex::encode(key.to_bytes())
}

pub fn signing_key_from_hex(s: &str) -> Result<SigningKey> {
    let bytes: [u8; 32] = decode_fixed(s)?;
    Ok(SigningKey::from_bytes(&bytes))
}

/// Hex of the public half, in the form engine configs expect
pub fn verifying_key_hex(key: &SigningKey) -> String {
    hex::encode(key.verifying_key().to_bytes())
}

/// Signs `digest` with every key, in order
pub fn sign_bundle(keys: &[SigningKey], digest: &[u8; 32]) -> SignatureBundle {
    let mut bundle = SignatureBundle::new();
    for key in keys {
        let signature = key.sign(digest);
        bundle.push(key.verifying_key().to_bytes(), signature.to_bytes());
    }
    bundle
}
