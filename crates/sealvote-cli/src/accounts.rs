//! Named devnet accounts
//!
//! The devnet has no wallets. An account is a name, and its address is the
//! last 20 bytes of a labelled BLAKE2b hash of that name. A literal hex
//! address is accepted as well.

use anyhow::{bail, Context, Result};
use sealvote_runtime::{digest::hash_labelled, Address};

const ACCOUNT_LABEL: &[u8] = b"sealvote/devnet-account/v1";

pub fn account_address(name: &str) -> Address {
    let digest = hash_labelled(ACCOUNT_LABEL, &[name.as_bytes()]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[12..]);
    Address::new(bytes)
}

/// Resolves `0x`-prefixed hex as an address, anything else as an account name
pub fn resolve(account: &str) -> Result<Address> {
    if account.starts_with("0x") {
        return account.parse::<Address>().with_context(|| format!("Invalid address {}", account));
    }
    if account.is_empty() {
        bail!("Account name must not be empty");
    }
    Ok(account_address(account))
}
