//! FHE executor interface
//!
//! The ballot engine never touches ciphertext material. It asks an executor to
//! evaluate operations symbolically and gets fresh handles back, the way a
//! contract talks to an FHE coprocessor.

use crate::error::Result;
use crate::types::CiphertextHandle;

pub trait FheExecutor {
    /// Encrypts a public constant (`euint32`)
    fn trivial_encrypt(&mut self, value: u32) -> Result<CiphertextHandle>;

    /// Encrypted equality against a plaintext constant (`ebool`)
    fn eq_scalar(&mut self, lhs: CiphertextHandle, rhs: u32) -> Result<CiphertextHandle>;

    /// Encrypted multiplexer: `cond ? if_true : if_false` (`euint32`)
    fn select(
        &mut self,
        cond: CiphertextHandle,
        if_true: CiphertextHandle,
        if_false: CiphertextHandle,
    ) -> Result<CiphertextHandle>;

    /// Encrypted addition (`euint32`, wrapping)
    fn add(&mut self, lhs: CiphertextHandle, rhs: CiphertextHandle) -> Result<CiphertextHandle>;

    /// Grants the decryption oracle permission to reveal these handles
    ///
    /// Either every handle is marked or none is.
    fn make_publicly_decryptable(&mut self, handles: &[CiphertextHandle]) -> Result<()>;
}
