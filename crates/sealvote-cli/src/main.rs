//! SealVote Devnet CLI
//!
//! Create proposals, cast encrypted votes and finalize tallies against a
//! local mock FHE devnet stored in a JSON file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sealvote_cli::{accounts, commands, Devnet, DevnetOptions};
use sealvote_core::{CallContext, ProposalId};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sealvote")]
#[command(about = "Confidential ballots on a local mock FHE devnet", long_about = None)]
struct Cli {
    /// Devnet state file
    #[arg(long, global = true, default_value = "sealvote-devnet.json")]
    devnet: PathBuf,

    /// Current time in unix seconds (defaults to the system clock)
    #[arg(long, global = true)]
    now: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a fresh devnet with new signer keys
    Init {
        /// Protocol identifier mixed into every signed digest
        #[arg(long, default_value = "1")]
        protocol_id: u64,

        /// Number of KMS signers
        #[arg(long, default_value = "3")]
        kms_signers: usize,

        /// KMS signatures required to accept a decryption
        #[arg(long, default_value = "2")]
        kms_threshold: usize,

        /// Derive keys from this seed instead of OS randomness
        #[arg(long)]
        seed: Option<u64>,

        /// Replace an existing devnet file
        #[arg(long)]
        force: bool,
    },

    /// Create a proposal
    Create {
        /// Creator account name or 0x address
        #[arg(long, default_value = "deployer")]
        from: String,

        #[arg(short, long)]
        title: String,

        /// Option label, in order (repeat at least twice)
        #[arg(short, long = "option", required = true)]
        options: Vec<String>,

        /// Voting start in unix seconds (defaults to now)
        #[arg(long)]
        start: Option<u64>,

        /// Voting end in unix seconds
        #[arg(long)]
        end: u64,
    },

    /// Encrypt a choice and cast it
    Vote {
        #[arg(long)]
        from: String,

        #[arg(short, long)]
        proposal: ProposalId,

        /// Zero-based option index
        #[arg(short, long)]
        choice: u32,
    },

    /// Request decryption, run the KMS and submit the result
    Finalize {
        #[arg(long, default_value = "deployer")]
        from: String,

        #[arg(short, long)]
        proposal: ProposalId,

        /// Number of KMS keys that sign the response (defaults to all)
        #[arg(long)]
        kms_signers: Option<usize>,
    },

    /// Show one proposal
    Show {
        #[arg(short, long)]
        proposal: ProposalId,
    },

    /// List all proposals
    List,

    /// Print the results of a finalized proposal
    Results {
        #[arg(short, long)]
        proposal: ProposalId,
    },

    /// Read one encrypted counter straight from the mock coprocessor
    DecryptOption {
        #[arg(short, long)]
        proposal: ProposalId,

        #[arg(short, long)]
        index: usize,
    },

    /// Print the event log as JSON lines
    Events {
        #[arg(short, long)]
        proposal: Option<ProposalId>,
    },

    /// Print the address of an account name
    Address { name: String },
}

fn current_time(now: Option<u64>) -> Result<u64> {
    match now {
        Some(now) => Ok(now),
        None => Ok(SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("System clock is before the unix epoch")?
            .as_secs()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let now = current_time(cli.now)?;

    match cli.command {
        Commands::Init { protocol_id, kms_signers, kms_threshold, seed, force } => {
            let options = DevnetOptions {
                protocol_id,
                kms_signers,
                kms_threshold,
                seed,
                ..DevnetOptions::default()
            };
            let devnet = Devnet::create(&options)?;
            devnet.save(&cli.devnet, force)?;

            println!("🚀 SealVote devnet initialized");
            println!("   File: {:?}", cli.devnet);
            println!("   Ballot: {}", devnet.config.ballot_address);
            println!("   KMS threshold: {} of {}", kms_threshold, kms_signers);
        }
        Commands::Address { name } => {
            commands::address(&name, &accounts::resolve(&name)?);
        }
        command => {
            let mut session = Devnet::load(&cli.devnet)?.open()?;
            let outcome = run(&mut session, command, now);
            session.close().save(&cli.devnet, true)?;
            outcome?;
        }
    }

    Ok(())
}

fn run(session: &mut sealvote_cli::Session, command: Commands, now: u64) -> Result<()> {
    match command {
        Commands::Create { from, title, options, start, end } => {
            let ctx = CallContext::new(accounts::resolve(&from)?, now);
            commands::create(session, &ctx, &title, options, start.unwrap_or(now), end)?;
        }
        Commands::Vote { from, proposal, choice } => {
            let ctx = CallContext::new(accounts::resolve(&from)?, now);
            commands::vote(session, &ctx, proposal, choice)?;
        }
        Commands::Finalize { from, proposal, kms_signers } => {
            let ctx = CallContext::new(accounts::resolve(&from)?, now);
            commands::finalize(session, &ctx, proposal, kms_signers)?;
        }
        Commands::Show { proposal } => commands::show(session, proposal, now)?,
        Commands::List => commands::list(session, now),
        Commands::Results { proposal } => {
            commands::results(session, proposal)?;
        }
        Commands::DecryptOption { proposal, index } => {
            commands::decrypt_option(session, proposal, index)?;
        }
        Commands::Events { proposal } => commands::events(session, proposal),
        Commands::Init { .. } | Commands::Address { .. } => {
            anyhow::bail!("Command does not operate on an open devnet")
        }
    }
    Ok(())
}
