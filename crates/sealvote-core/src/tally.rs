//! Homomorphic tally accumulation
//!
//! A vote adds `select(choice == j, 1, 0)` to every counter `j`. The same
//! sequence of executor calls runs whatever the choice is, and the engine
//! never branches on anything derived from it.

use crate::error::Result;
use sealvote_runtime::{CiphertextHandle, FheExecutor};

/// Encrypted zero counters, one per option
pub(crate) fn zero_tally<F: FheExecutor>(
    fhe: &mut F,
    options: usize,
) -> Result<Vec<CiphertextHandle>> {
    let mut tally = Vec::with_capacity(options);
    for _ in 0..options {
        tally.push(fhe.trivial_encrypt(0)?);
    }
    Ok(tally)
}

/// Computes the next tally vector without touching the current one
pub(crate) fn accumulate<F: FheExecutor>(
    fhe: &mut F,
    current: &[CiphertextHandle],
    choice: CiphertextHandle,
) -> Result<Vec<CiphertextHandle>> {
    let one = fhe.trivial_encrypt(1)?;
    let zero = fhe.trivial_encrypt(0)?;

    let mut next = Vec::with_capacity(current.len());
    for (index, counter) in (0u32..).zip(current) {
        let is_choice = fhe.eq_scalar(choice, index)?;
        let increment = fhe.select(is_choice, one, zero)?;
        next.push(fhe.add(*counter, increment)?);
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealvote_oracle::MockCoprocessor;

    fn plaintexts(cop: &MockCoprocessor, tally: &[CiphertextHandle]) -> Vec<u32> {
        tally.iter().map(|h| cop.plaintext(h).unwrap()).collect()
    }

    #[test]
    fn test_accumulate_increments_only_the_choice() {
        let mut cop = MockCoprocessor::new();
        let tally = zero_tally(&mut cop, 3).unwrap();
        let choice = cop.encrypt_input(1);

        let next = accumulate(&mut cop, &tally, choice).unwrap();

        assert_eq!(plaintexts(&cop, &tally), vec![0, 0, 0]);
        assert_eq!(plaintexts(&cop, &next), vec![0, 1, 0]);
    }

    #[test]
    fn test_accumulate_work_is_independent_of_choice() {
        let mut first = MockCoprocessor::new();
        let tally = zero_tally(&mut first, 4).unwrap();
        let choice = first.encrypt_input(0);
        accumulate(&mut first, &tally, choice).unwrap();

        let mut second = MockCoprocessor::new();
        let tally = zero_tally(&mut second, 4).unwrap();
        let choice = second.encrypt_input(3);
        accumulate(&mut second, &tally, choice).unwrap();

        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn test_out_of_range_choice_adds_nothing() {
        let mut cop = MockCoprocessor::new();
        let tally = zero_tally(&mut cop, 2).unwrap();
        let choice = cop.encrypt_input(7);

        let next = accumulate(&mut cop, &tally, choice).unwrap();
        assert_eq!(plaintexts(&cop, &next), vec![0, 0]);
    }
}
