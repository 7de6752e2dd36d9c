//! Vault port for sealing and reading tenant credentials.

use crate::credential::domain::{ApiKey, CredentialKey, SealedRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

/// Secret storage contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VaultAdapter: Send + Sync {
    /// Seals and stores `plaintext` for the pair, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError`] when the value could not be sealed or stored.
    async fn put(&self, key: &CredentialKey, plaintext: &ApiKey) -> VaultResult<SealedRecord>;

    /// Reads and unseals the current value for the pair.
    ///
    /// Returns `None` when nothing is stored.
    async fn get(&self, key: &CredentialKey) -> VaultResult<Option<ApiKey>>;

    /// Describes the current sealed value for the pair without unsealing it.
    ///
    /// Returns `None` when nothing is stored. Values written by earlier
    /// processes are described like any other.
    async fn record(&self, key: &CredentialKey) -> VaultResult<Option<SealedRecord>>;

    /// Removes the value for the pair.
    ///
    /// Returns whether a value existed.
    async fn delete(&self, key: &CredentialKey) -> VaultResult<bool>;
}

/// Errors returned by vault adapters.
///
/// All variants are treated as transient; retrying is the caller's choice.
#[derive(Debug, Clone, Error)]
pub enum VaultError {
    /// The storage backend is unreachable or refused the operation.
    #[error("vault unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// A stored value could not be unsealed into a usable key.
    #[error("vault record for {0} is corrupted")]
    Corrupted(CredentialKey),
}

impl VaultError {
    /// Wraps a storage backend error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
