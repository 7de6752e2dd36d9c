//! In-memory vault adapter.

use crate::credential::{
    domain::{ApiKey, CredentialKey, SealedRecord},
    ports::{VaultAdapter, VaultError, VaultResult},
};
use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Thread-safe in-memory vault.
///
/// Values are kept unencrypted in process memory, so this adapter is only
/// suitable for tests and local deterministic flows. It can be switched
/// into an unavailable state to exercise transient-failure handling.
/// Sealed records are stamped from the injected clock.
pub struct InMemoryVault<C: Clock + Send + Sync = DefaultClock> {
    state: Arc<RwLock<InMemoryVaultState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryVaultState {
    entries: HashMap<CredentialKey, StoredValue>,
    versions: HashMap<CredentialKey, u64>,
    unavailable: Option<String>,
}

#[derive(Debug)]
struct StoredValue {
    plaintext: String,
    record: SealedRecord,
}

impl InMemoryVault<DefaultClock> {
    /// Creates an empty in-memory vault stamped by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryVault<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock + Send + Sync> Clone for InMemoryVault<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C: Clock + Send + Sync> fmt::Debug for InMemoryVault<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryVault").finish_non_exhaustive()
    }
}

impl<C: Clock + Send + Sync> InMemoryVault<C> {
    /// Creates an empty in-memory vault stamped by `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryVaultState::default())),
            clock,
        }
    }

    /// Makes every subsequent operation fail with
    /// [`VaultError::Unavailable`] until [`Self::restore`] is called.
    ///
    /// # Errors
    ///
    /// Returns vault errors when lock acquisition fails.
    pub fn set_unavailable(&self, message: impl Into<String>) -> VaultResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.unavailable = Some(message.into());
        Ok(())
    }

    /// Clears an unavailable state.
    ///
    /// # Errors
    ///
    /// Returns vault errors when lock acquisition fails.
    pub fn restore(&self) -> VaultResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.unavailable = None;
        Ok(())
    }

    /// Returns the number of stored values.
    ///
    /// # Errors
    ///
    /// Returns vault errors when lock acquisition fails.
    pub fn stored_count(&self) -> VaultResult<usize> {
        Ok(self.state.read().map_err(lock_error)?.entries.len())
    }
}

fn lock_error(err: impl ToString) -> VaultError {
    VaultError::unavailable(std::io::Error::other(err.to_string()))
}

fn ensure_available(state: &InMemoryVaultState) -> VaultResult<()> {
    state.unavailable.as_ref().map_or(Ok(()), |message| {
        Err(VaultError::unavailable(std::io::Error::other(
            message.clone(),
        )))
    })
}

#[async_trait]
impl<C: Clock + Send + Sync> VaultAdapter for InMemoryVault<C> {
    async fn put(&self, key: &CredentialKey, plaintext: &ApiKey) -> VaultResult<SealedRecord> {
        let mut state = self.state.write().map_err(lock_error)?;
        ensure_available(&state)?;

        let version = state
            .versions
            .get(key)
            .copied()
            .unwrap_or_default()
            .saturating_add(1);
        let record = SealedRecord::new(Uuid::new_v4().to_string(), version, self.clock.utc());

        state.versions.insert(key.clone(), version);
        state.entries.insert(
            key.clone(),
            StoredValue {
                plaintext: plaintext.expose().to_owned(),
                record: record.clone(),
            },
        );
        Ok(record)
    }

    async fn get(&self, key: &CredentialKey) -> VaultResult<Option<ApiKey>> {
        let state = self.state.read().map_err(lock_error)?;
        ensure_available(&state)?;

        state
            .entries
            .get(key)
            .map(|stored| {
                ApiKey::new(stored.plaintext.clone())
                    .map_err(|_| VaultError::Corrupted(key.clone()))
            })
            .transpose()
    }

    async fn record(&self, key: &CredentialKey) -> VaultResult<Option<SealedRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        ensure_available(&state)?;
        Ok(state.entries.get(key).map(|stored| stored.record.clone()))
    }

    async fn delete(&self, key: &CredentialKey) -> VaultResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        ensure_available(&state)?;
        Ok(state.entries.remove(key).is_some())
    }
}
