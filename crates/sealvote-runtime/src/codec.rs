//! Cleartext codec for decryption results
//!
//! The oracle returns one 32-byte big-endian word per decrypted handle, in the
//! order the handles were requested. Decoding is strictly positional.

use crate::error::{Result, SealVoteError};

/// Width of one encoded cleartext word
pub const WORD_LEN: usize = 32;

/// Encodes `u32` cleartexts as consecutive 32-byte big-endian words
pub fn encode_cleartexts(values: &[u32]) -> Vec<u8> {
    let mut out = vec![0u8; values.len() * WORD_LEN];
    for (word, value) in out.chunks_exact_mut(WORD_LEN).zip(values) {
        word[WORD_LEN - 4..].copy_from_slice(&value.to_be_bytes());
    }
    out
}

/// Decodes exactly `expected` words back into `u32` values, preserving order
pub fn decode_cleartexts(bytes: &[u8], expected: usize) -> Result<Vec<u32>> {
    if bytes.len() != expected * WORD_LEN {
        return Err(SealVoteError::invalid_encoding(format!(
            "expected {} cleartext words ({} bytes), got {} bytes",
            expected,
            expected * WORD_LEN,
            bytes.len()
        )));
    }

    bytes
        .chunks_exact(WORD_LEN)
        .enumerate()
        .map(|(index, word)| {
            let (high, low) = word.split_at(WORD_LEN - 4);
            if high.iter().any(|b| *b != 0) {
                return Err(SealVoteError::invalid_encoding(format!(
                    "cleartext word {} does not fit in u32",
                    index
                )));
            }
            let mut value = [0u8; 4];
            value.copy_from_slice(low);
            Ok(u32::from_be_bytes(value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let encoded = encode_cleartexts(&[1, 0x0102_0304]);
        assert_eq!(encoded.len(), 64);
        assert_eq!(encoded[31], 1);
        assert!(encoded[..31].iter().all(|b| *b == 0));
        assert_eq!(&encoded[60..64], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_decode_preserves_order() {
        let encoded = encode_cleartexts(&[1, 2, 0]);
        assert_eq!(decode_cleartexts(&encoded, 3).unwrap(), vec![1, 2, 0]);
    }

    #[test]
    fn test_decode_rejects_count_mismatch() {
        let encoded = encode_cleartexts(&[1, 2]);
        assert!(decode_cleartexts(&encoded, 3).is_err());
        assert!(decode_cleartexts(&encoded[..40], 2).is_err());
    }

    #[test]
    fn test_decode_rejects_overflowing_word() {
        let mut encoded = encode_cleartexts(&[5]);
        encoded[0] = 1;
        let err = decode_cleartexts(&encoded, 1).unwrap_err();
        assert!(err.to_string().contains("does not fit in u32"));
    }

    #[test]
    fn test_empty_roundtrip() {
        assert!(encode_cleartexts(&[]).is_empty());
        assert!(decode_cleartexts(&[], 0).unwrap().is_empty());
    }
}
