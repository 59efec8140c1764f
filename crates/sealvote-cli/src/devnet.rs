//! Devnet state file
//!
//! A devnet is one JSON document holding the engine config, the mock signer
//! keys, the ballot state, the mock coprocessor and the event log. Every CLI
//! invocation opens it, applies one command and writes it back.

use anyhow::{bail, Context, Result};
use sealvote_core::{BallotEngine, BallotEvent, BallotState, EngineConfig, SignerSetConfig};
use sealvote_oracle::{
    generate_signing_keys,
    keys::{signing_key_from_hex, signing_key_to_hex},
    seeded_signing_keys, InputSigner, MockCoprocessor, MockKms,
};
use sealvote_runtime::Address;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Parameters for a fresh devnet
#[derive(Debug, Clone)]
pub struct DevnetOptions {
    pub protocol_id: u64,
    pub ballot_address: Address,
    pub input_signers: usize,
    pub kms_signers: usize,
    pub kms_threshold: usize,
    /// Derive keys from a seed instead of OS randomness
    pub seed: Option<u64>,
}

impl Default for DevnetOptions {
    fn default() -> Self {
        Self {
            protocol_id: 1,
            ballot_address: crate::accounts::account_address("ballot"),
            input_signers: 1,
            kms_signers: 3,
            kms_threshold: 2,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Devnet {
    pub config: EngineConfig,
    /// Hex-encoded coprocessor signing keys
    pub input_keys: Vec<String>,
    /// Hex-encoded KMS signing keys
    pub kms_keys: Vec<String>,
    pub state: BallotState,
    pub coprocessor: MockCoprocessor,
    #[serde(default)]
    pub events: Vec<BallotEvent>,
}

impl Devnet {
    pub fn create(options: &DevnetOptions) -> Result<Self> {
        let (input, kms) = match options.seed {
            Some(seed) => (
                seeded_signing_keys(seed, options.input_signers),
                seeded_signing_keys(seed.wrapping_add(1), options.kms_signers),
            ),
            None => (
                generate_signing_keys(options.input_signers),
                generate_signing_keys(options.kms_signers),
            ),
        };

        let signer = InputSigner::new(input.clone());
        let oracle = MockKms::new(kms.clone(), options.protocol_id, options.ballot_address);
        let config = EngineConfig {
            protocol_id: options.protocol_id,
            ballot_address: options.ballot_address,
            input_signers: SignerSetConfig::unanimous(signer.verifying_keys_hex()),
            kms_signers: SignerSetConfig::new(oracle.verifying_keys_hex(), options.kms_threshold),
        };
        config.validate().context("Invalid devnet parameters")?;

        Ok(Self {
            config,
            input_keys: input.iter().map(signing_key_to_hex).collect(),
            kms_keys: kms.iter().map(signing_key_to_hex).collect(),
            state: BallotState::default(),
            coprocessor: MockCoprocessor::new(),
            events: Vec::new(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| {
            format!("Failed to read devnet file {:?} (run `sealvote init` first)", path)
        })?;
        let devnet = serde_json::from_str(&content).context("Failed to parse devnet JSON")?;
        debug!(path = %path.display(), "loaded devnet");
        Ok(devnet)
    }

    /// Writes the devnet, replacing any existing file only if `overwrite` is set
    pub fn save(&self, path: &Path, overwrite: bool) -> Result<()> {
        if !overwrite && path.exists() {
            bail!("Devnet file {:?} already exists (use --force to replace it)", path);
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize devnet")?;
        fs::write(path, json).with_context(|| format!("Failed to write devnet file {:?}", path))?;
        debug!(path = %path.display(), "saved devnet");
        Ok(())
    }

    /// Rebuilds the engine and the mock oracles from the stored state
    pub fn open(self) -> Result<Session> {
        let input = self
            .input_keys
            .iter()
            .map(|k| signing_key_from_hex(k))
            .collect::<sealvote_runtime::Result<Vec<_>>>()
            .context("Invalid input signer key in devnet file")?;
        let kms = self
            .kms_keys
            .iter()
            .map(|k| signing_key_from_hex(k))
            .collect::<sealvote_runtime::Result<Vec<_>>>()
            .context("Invalid KMS key in devnet file")?;

        let oracle = MockKms::new(kms, self.config.protocol_id, self.config.ballot_address);
        let engine = BallotEngine::with_state(self.config, self.state, self.coprocessor)
            .context("Failed to restore ballot engine")?;
        info!(proposals = engine.get_proposal_count(), "devnet opened");

        Ok(Session {
            engine,
            signer: InputSigner::new(input),
            kms: oracle,
            input_keys: self.input_keys,
            kms_keys: self.kms_keys,
            events: self.events,
        })
    }
}

/// A devnet opened for one command
pub struct Session {
    pub engine: BallotEngine<MockCoprocessor>,
    pub signer: InputSigner,
    pub kms: MockKms,
    input_keys: Vec<String>,
    kms_keys: Vec<String>,
    events: Vec<BallotEvent>,
}

impl Session {
    /// Event log including events emitted during this session
    pub fn events(&self) -> impl Iterator<Item = &BallotEvent> {
        self.events.iter().chain(self.engine.events())
    }

    pub fn close(mut self) -> Devnet {
        self.events.extend(self.engine.take_events());
        let config = self.engine.config().clone();
        let (state, coprocessor) = self.engine.into_parts();
        Devnet {
            config,
            input_keys: self.input_keys,
            kms_keys: self.kms_keys,
            state,
            coprocessor,
            events: self.events,
        }
    }
}
