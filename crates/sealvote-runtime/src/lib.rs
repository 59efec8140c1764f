//! SealVote Runtime
//!
//! Shared runtime types for the SealVote workspace: ciphertext handles,
//! addresses, proof artifacts, the cleartext codec, signed digests and the
//! FHE executor interface. The ballot engine and the oracle crates both build
//! on these so they agree on every byte that crosses their boundary.

pub mod bundle;
pub mod codec;
pub mod digest;
pub mod error;
pub mod fhe;
pub mod types;

// Re-export core types for convenience
pub use bundle::{SignatureBundle, SignatureEntry};
pub use error::{Result, SealVoteError};
pub use fhe::FheExecutor;
pub use types::{Address, CiphertextHandle, DecryptionProof, FheType, InputProof};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_proof_basic_constructor() {
        let proof = InputProof::new(vec![]);
        assert_eq!(proof.size(), 0);
    }

    #[test]
    fn test_handle_debug_trait() {
        let handle = CiphertextHandle::new([1; 32]);
        let debug_str = format!("{:?}", handle);
        assert!(debug_str.contains("CiphertextHandle"));
    }

    #[test]
    fn test_address_ordering() {
        let low = Address::new([0; 20]);
        let high = Address::new([1; 20]);
        assert!(low < high);
        assert_eq!(low, Address::ZERO);
    }

    #[test]
    fn test_proof_equality() {
        let proof1 = DecryptionProof::new(vec![1, 2, 3]);
        let proof2 = DecryptionProof::new(vec![1, 2, 3]);
        let proof3 = DecryptionProof::new(vec![4, 5, 6]);

        assert_eq!(proof1, proof2);
        assert_ne!(proof1, proof3);
    }
}
