//! Mock-mode collaborators for the SealVote ballot engine
//!
//! Stands in for the parts of an FHE deployment that live outside the ballot
//! engine: the coprocessor that evaluates encrypted operations, the client
//! library that encrypts and attests inputs, and the KMS that serves public
//! decryptions. Nothing here is confidential; it exists so the full
//! vote-to-result handshake can run in tests and on a local devnet.

pub mod coprocessor;
pub mod input;
pub mod keys;
pub mod kms;

pub use coprocessor::MockCoprocessor;
pub use input::{EncryptedInput, InputSigner};
pub use keys::{generate_signing_keys, seeded_signing_keys};
pub use kms::{MockKms, PublicDecryption};
