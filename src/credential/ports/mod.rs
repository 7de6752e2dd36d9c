//! Port contracts for credential storage.
//!
//! The core never chooses an encryption scheme. Adapters own sealing and
//! must make `put` atomic per tenant/service pair, with `get` returning the
//! most recent successful `put`.

pub mod vault;

pub use vault::{VaultAdapter, VaultError, VaultResult};

#[cfg(test)]
pub use vault::MockVaultAdapter;
