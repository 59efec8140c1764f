//! Events emitted by state-changing engine calls

use crate::proposal::ProposalId;
use sealvote_runtime::{Address, CiphertextHandle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum BallotEvent {
    ProposalCreated {
        proposal_id: ProposalId,
        title: String,
        options: Vec<String>,
        start_time: u64,
        end_time: u64,
        creator: Address,
    },
    Voted {
        proposal_id: ProposalId,
        voter: Address,
    },
    FinalizeRequested {
        proposal_id: ProposalId,
        handles: Vec<CiphertextHandle>,
    },
    PublicDecryptionVerified {
        handles: Vec<CiphertextHandle>,
        #[serde(with = "hex_bytes")]
        cleartexts: Vec<u8>,
    },
    DecryptionSubmitted {
        proposal_id: ProposalId,
        submitter: Address,
    },
    Finalized {
        proposal_id: ProposalId,
        results: Vec<u32>,
    },
}

impl BallotEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProposalCreated { .. } => "ProposalCreated",
            Self::Voted { .. } => "Voted",
            Self::FinalizeRequested { .. } => "FinalizeRequested",
            Self::PublicDecryptionVerified { .. } => "PublicDecryptionVerified",
            Self::DecryptionSubmitted { .. } => "DecryptionSubmitted",
            Self::Finalized { .. } => "Finalized",
        }
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)
    }
}
