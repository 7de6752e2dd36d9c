//! In-memory adapters for tests and local runs.

mod vault;

pub use vault::InMemoryVault;
