//! Opaque vault record reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference to ciphertext held by a vault adapter.
///
/// The contents are chosen by the adapter; the core only stores and
/// compares them. `version` increases with every successful write to the
/// same tenant/service pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedRecord {
    reference: String,
    version: u64,
    sealed_at: DateTime<Utc>,
}

impl SealedRecord {
    /// Creates a sealed record reference.
    #[must_use]
    pub fn new(reference: impl Into<String>, version: u64, sealed_at: DateTime<Utc>) -> Self {
        Self {
            reference: reference.into(),
            version,
            sealed_at,
        }
    }

    /// Returns the adapter-defined reference.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the per-pair write version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns when the adapter sealed the value.
    #[must_use]
    pub const fn sealed_at(&self) -> DateTime<Utc> {
        self.sealed_at
    }
}
