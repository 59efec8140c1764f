//! SealVote devnet CLI
//!
//! Drives a [`sealvote_core::BallotEngine`] backed by the mock coprocessor and
//! KMS from a JSON state file, so proposals can be created, voted on and
//! finalized from the shell.

pub mod accounts;
pub mod commands;
pub mod devnet;

pub use devnet::{Devnet, DevnetOptions, Session};
