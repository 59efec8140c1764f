//! Mock FHE coprocessor
//!
//! Evaluates FHE operations symbolically: every result gets a fresh handle and
//! the cleartext is kept in a private map. Nothing is actually encrypted. This
//! mirrors the mock mode FHE toolchains ship for local testing, and is what the
//! mock KMS reads when it serves a public decryption.

use sealvote_runtime::{
    digest::hash_labelled, CiphertextHandle, FheExecutor, FheType, Result, SealVoteError,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

const HANDLE_LABEL: &[u8] = b"sealvote/mock-handle/v1";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
struct Ciphertext {
    fhe_type: FheType,
    /// Booleans are stored as 0 or 1
    value: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockCoprocessor {
    ciphertexts: BTreeMap<CiphertextHandle, Ciphertext>,
    public: BTreeSet<CiphertextHandle>,
    nonce: u64,
}

impl MockCoprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ciphertexts the coprocessor knows about
    pub fn len(&self) -> usize {
        self.ciphertexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ciphertexts.is_empty()
    }

    pub fn contains(&self, handle: &CiphertextHandle) -> bool {
        self.ciphertexts.contains_key(handle)
    }

    pub fn is_publicly_decryptable(&self, handle: &CiphertextHandle) -> bool {
        self.public.contains(handle)
    }

    /// Registers a client-side encrypted `euint32` input
    pub fn encrypt_input(&mut self, value: u32) -> CiphertextHandle {
        self.store(b"input", &[], Ciphertext { fhe_type: FheType::Uint32, value })
    }

    /// Cleartext behind a handle, ignoring the public-decryption ACL
    ///
    /// Stands in for user-scoped decryption in local tooling.
    pub fn plaintext(&self, handle: &CiphertextHandle) -> Result<u32> {
        self.ciphertexts
            .get(handle)
            .map(|ct| ct.value)
            .ok_or(SealVoteError::UnknownHandle(*handle))
    }

    /// Cleartext behind a handle that has been released for public decryption
    pub fn public_plaintext(&self, handle: &CiphertextHandle) -> Result<u32> {
        if !self.is_publicly_decryptable(handle) {
            return Err(SealVoteError::NotDecryptable(*handle));
        }
        self.plaintext(handle)
    }

    fn store(&mut self, op: &[u8], inputs: &[&[u8]], ciphertext: Ciphertext) -> CiphertextHandle {
        let nonce = self.nonce.to_be_bytes();
        let mut parts: Vec<&[u8]> = vec![op, &nonce[..]];
        parts.extend_from_slice(inputs);

        let handle =
            CiphertextHandle::new(hash_labelled(HANDLE_LABEL, &parts)).with_type(ciphertext.fhe_type);
        self.nonce += 1;
        self.ciphertexts.insert(handle, ciphertext);
        handle
    }

    fn load(&self, handle: CiphertextHandle, expected: FheType) -> Result<u32> {
        let ciphertext =
            self.ciphertexts.get(&handle).ok_or(SealVoteError::UnknownHandle(handle))?;
        if ciphertext.fhe_type != expected {
            return Err(SealVoteError::TypeMismatch { handle, expected });
        }
        Ok(ciphertext.value)
    }
}

impl FheExecutor for MockCoprocessor {
    fn trivial_encrypt(&mut self, value: u32) -> Result<CiphertextHandle> {
        let handle = self.store(
            b"trivial_encrypt",
            &[&value.to_be_bytes()[..]],
            Ciphertext { fhe_type: FheType::Uint32, value },
        );
        debug!(%handle, "trivial_encrypt");
        Ok(handle)
    }

    fn eq_scalar(&mut self, lhs: CiphertextHandle, rhs: u32) -> Result<CiphertextHandle> {
        let value = self.load(lhs, FheType::Uint32)?;
        let handle = self.store(
            b"eq_scalar",
            &[&lhs.as_bytes()[..], &rhs.to_be_bytes()[..]],
            Ciphertext { fhe_type: FheType::Bool, value: u32::from(value == rhs) },
        );
        debug!(%lhs, rhs, %handle, "eq_scalar");
        Ok(handle)
    }

    fn select(
        &mut self,
        cond: CiphertextHandle,
        if_true: CiphertextHandle,
        if_false: CiphertextHandle,
    ) -> Result<CiphertextHandle> {
        let flag = self.load(cond, FheType::Bool)?;
        let a = self.load(if_true, FheType::Uint32)?;
        let b = self.load(if_false, FheType::Uint32)?;
        let value = if flag == 1 { a } else { b };
        let handle = self.store(
            b"select",
            &[&cond.as_bytes()[..], &if_true.as_bytes()[..], &if_false.as_bytes()[..]],
            Ciphertext { fhe_type: FheType::Uint32, value },
        );
        debug!(%cond, %handle, "select");
        Ok(handle)
    }

    fn add(&mut self, lhs: CiphertextHandle, rhs: CiphertextHandle) -> Result<CiphertextHandle> {
        let a = self.load(lhs, FheType::Uint32)?;
        let b = self.load(rhs, FheType::Uint32)?;
        let handle = self.store(
            b"add",
            &[&lhs.as_bytes()[..], &rhs.as_bytes()[..]],
            Ciphertext { fhe_type: FheType::Uint32, value: a.wrapping_add(b) },
        );
        debug!(%lhs, %rhs, %handle, "add");
        Ok(handle)
    }

    fn make_publicly_decryptable(&mut self, handles: &[CiphertextHandle]) -> Result<()> {
        if let Some(missing) = handles.iter().find(|h| !self.ciphertexts.contains_key(*h)) {
            return Err(SealVoteError::UnknownHandle(*missing));
        }
        self.public.extend(handles.iter().copied());
        debug!(count = handles.len(), "marked handles publicly decryptable");
        Ok(())
    }
}
