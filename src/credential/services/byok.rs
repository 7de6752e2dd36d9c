//! Bring-your-own-key credential manager.
//!
//! Provides [`ByokManager`], a thin deterministic layer between callers,
//! the [`ServiceCatalog`] and a [`VaultAdapter`]. It performs no retries.

use crate::credential::{
    domain::{
        ApiKey, Credential, CredentialDomainError, CredentialHandle, CredentialKey, KeyFingerprint,
        SealedRecord, TenantId, calculate_key_strength, mask_api_key,
    },
    ports::{VaultAdapter, VaultError},
};
use crate::service_catalog::{
    domain::{KeyFormatViolation, ServiceCatalogEntry, ServiceCategory, ServiceId},
    services::ServiceCatalog,
};
use mockable::Clock;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, RwLock};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors returned by BYOK manager operations.
#[derive(Debug, Error)]
pub enum ByokError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CredentialDomainError),

    /// The catalogue has no entry for the service.
    #[error("unknown service: {0}")]
    UnknownService(ServiceId),

    /// The key does not satisfy the catalogue format for the service.
    #[error("invalid key format for service {service_id}: {violation}")]
    InvalidFormat {
        /// Service the key was submitted for.
        service_id: ServiceId,
        /// Failed rule.
        violation: KeyFormatViolation,
    },

    /// No credential is stored for the tenant/service pair.
    #[error("no credential stored for {0}")]
    NotFound(CredentialKey),

    /// The vault adapter failed; callers may retry.
    #[error(transparent)]
    Vault(#[from] VaultError),

    /// A manager lock was poisoned.
    #[error("credential index lock poisoned: {0}")]
    LockPoisoned(String),
}

impl ByokError {
    /// Returns whether the caller must correct its input before retrying.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::UnknownService(_) | Self::InvalidFormat { .. } | Self::NotFound(_)
        )
    }

    /// Returns whether the failure is transient and may succeed on retry.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Vault(_))
    }
}

/// Result type for BYOK manager operations.
pub type ByokResult<T> = Result<T, ByokError>;

/// Tenant credential lifecycle over a catalogue and a vault.
///
/// The vault holds the source of truth. The manager keeps a metadata index
/// as a cache and rebuilds entries from the vault when the index is missing
/// or stale, so a fresh manager over a populated vault sees every stored
/// key. Writes for the same tenant/service pair are serialised through a
/// per-pair async mutex; writes for different pairs proceed independently.
pub struct ByokManager<V, C>
where
    V: VaultAdapter,
    C: Clock + Send + Sync,
{
    catalog: Arc<ServiceCatalog>,
    vault: Arc<V>,
    clock: Arc<C>,
    records: RwLock<HashMap<CredentialKey, Credential>>,
    write_locks: Mutex<HashMap<CredentialKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl<V, C> ByokManager<V, C>
where
    V: VaultAdapter,
    C: Clock + Send + Sync,
{
    /// Creates a BYOK manager.
    #[must_use]
    pub fn new(catalog: Arc<ServiceCatalog>, vault: Arc<V>, clock: Arc<C>) -> Self {
        Self {
            catalog,
            vault,
            clock,
            records: RwLock::new(HashMap::new()),
            write_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the catalogue the manager validates against.
    #[must_use]
    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Checks a raw key against the catalogue format for a service.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ByokError::UnknownService`] when the catalogue has no entry
    /// for the service, or [`ByokError::InvalidFormat`] when the key breaks
    /// one of its rules.
    pub fn validate_key_format(&self, service_id: &ServiceId, raw_key: &str) -> ByokResult<()> {
        let entry = self.service_entry(service_id)?;
        check_format(entry, raw_key.trim())
    }

    /// Validates, scores, masks and seals a key, replacing any prior
    /// credential for the pair.
    ///
    /// Strength is informational; a weak key is stored like any other.
    ///
    /// # Errors
    ///
    /// Returns [`ByokError::Domain`] for a blank key,
    /// [`ByokError::UnknownService`] or [`ByokError::InvalidFormat`] for
    /// client errors, and [`ByokError::Vault`] when sealing fails.
    pub async fn store_credential(
        &self,
        tenant_id: &TenantId,
        service_id: &ServiceId,
        raw_key: impl Into<String>,
    ) -> ByokResult<Credential> {
        let api_key = ApiKey::new(raw_key)?;
        let entry = self.service_entry(service_id)?;
        check_format(entry, api_key.expose())?;

        let strength = calculate_key_strength(api_key.expose());
        let masked_key = mask_api_key(api_key.expose());
        let fingerprint = KeyFingerprint::of(&api_key);
        let key = CredentialKey::new(tenant_id.clone(), service_id.clone());

        let pair_lock = self.write_lock(&key)?;
        let _guard = pair_lock.lock().await;

        let sealed = self.vault.put(&key, &api_key).await.inspect_err(|err| {
            warn!(%tenant_id, %service_id, error = %err, "vault rejected credential write");
        })?;
        drop(api_key);

        let credential = Credential::new(
            key.clone(),
            sealed,
            masked_key,
            fingerprint,
            strength,
            self.clock.utc(),
        );
        let previous = self.records_write()?.insert(key, credential.clone());
        let replaced = previous.is_some();
        let unchanged = previous
            .is_some_and(|prior| prior.fingerprint() == credential.fingerprint());

        info!(
            tenant_id = %tenant_id,
            service_id = %service_id,
            strength = strength.score(),
            masked_key = %credential.masked_key(),
            replaced,
            unchanged,
            "credential stored"
        );
        Ok(credential)
    }

    /// Reads the decrypted credential for immediate use.
    ///
    /// The returned handle must be dropped once the call that needed it
    /// completes.
    ///
    /// # Errors
    ///
    /// Returns [`ByokError::UnknownService`] when the catalogue has no entry
    /// for the service, [`ByokError::NotFound`] when nothing is stored, or
    /// [`ByokError::Vault`] when the vault read fails.
    pub async fn get_credential(
        &self,
        tenant_id: &TenantId,
        service_id: &ServiceId,
    ) -> ByokResult<CredentialHandle> {
        self.service_entry(service_id)?;
        let key = CredentialKey::new(tenant_id.clone(), service_id.clone());
        match self.vault.get(&key).await? {
            Some(secret) => Ok(CredentialHandle::new(key, secret)),
            None => Err(ByokError::NotFound(key)),
        }
    }

    /// Removes the credential for a pair.
    ///
    /// Returns whether a credential existed.
    ///
    /// # Errors
    ///
    /// Returns [`ByokError::UnknownService`] when the catalogue has no entry
    /// for the service, or [`ByokError::Vault`] when the vault delete fails.
    pub async fn delete_credential(
        &self,
        tenant_id: &TenantId,
        service_id: &ServiceId,
    ) -> ByokResult<bool> {
        self.service_entry(service_id)?;
        let key = CredentialKey::new(tenant_id.clone(), service_id.clone());
        let pair_lock = self.write_lock(&key)?;
        let _guard = pair_lock.lock().await;

        let existed = self.vault.delete(&key).await?;
        self.records_write()?.remove(&key);
        info!(tenant_id = %tenant_id, service_id = %service_id, existed, "credential deleted");
        Ok(existed)
    }

    /// Re-reads a stored key, checks it against the current catalogue rule
    /// and refreshes its validation timestamp and strength.
    ///
    /// Keys sealed by an earlier manager over the same vault are picked up.
    ///
    /// # Errors
    ///
    /// Returns [`ByokError::NotFound`] when nothing is stored,
    /// [`ByokError::InvalidFormat`] when the stored key no longer matches,
    /// or [`ByokError::Vault`] when the vault read fails.
    pub async fn revalidate_credential(
        &self,
        tenant_id: &TenantId,
        service_id: &ServiceId,
    ) -> ByokResult<Credential> {
        let entry = self.service_entry(service_id)?;
        let key = CredentialKey::new(tenant_id.clone(), service_id.clone());
        let pair_lock = self.write_lock(&key)?;
        let _guard = pair_lock.lock().await;

        let secret = self
            .vault
            .get(&key)
            .await?
            .ok_or_else(|| ByokError::NotFound(key.clone()))?;
        check_format(entry, secret.expose())?;
        let strength = calculate_key_strength(secret.expose());
        drop(secret);

        let mut record = self
            .sync_locked(&key)
            .await?
            .ok_or_else(|| ByokError::NotFound(key.clone()))?;
        record.mark_validated(strength, self.clock.utc());
        self.records_write()?.insert(key, record.clone());
        Ok(record)
    }

    /// Returns credential metadata for a pair, if stored.
    ///
    /// The vault is authoritative: values it holds are described even when
    /// this manager never wrote them.
    ///
    /// # Errors
    ///
    /// Returns [`ByokError::UnknownService`] when the catalogue has no entry
    /// for the service, or [`ByokError::Vault`] when the vault read fails.
    pub async fn credential_metadata(
        &self,
        tenant_id: &TenantId,
        service_id: &ServiceId,
    ) -> ByokResult<Option<Credential>> {
        self.service_entry(service_id)?;
        let key = CredentialKey::new(tenant_id.clone(), service_id.clone());
        self.current_metadata(&key).await
    }

    /// Lists a tenant's credential metadata ordered by service identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ByokError::Vault`] when a vault read fails.
    pub async fn list_credentials(&self, tenant_id: &TenantId) -> ByokResult<Vec<Credential>> {
        let keys: Vec<CredentialKey> = self
            .catalog
            .iter()
            .map(|entry| CredentialKey::new(tenant_id.clone(), entry.service_id().clone()))
            .collect();

        let mut owned = Vec::new();
        for key in &keys {
            if let Some(credential) = self.current_metadata(key).await? {
                owned.push(credential);
            }
        }
        owned.sort_by(|a, b| a.service_id().cmp(b.service_id()));
        Ok(owned)
    }

    /// Returns the catalogue's service categories.
    #[must_use]
    pub fn get_service_categories(&self) -> BTreeSet<ServiceCategory> {
        self.catalog.get_service_categories()
    }

    /// Returns catalogue entries in a category.
    #[must_use]
    pub fn get_services_by_category(&self, category: &ServiceCategory) -> Vec<&ServiceCatalogEntry> {
        self.catalog.get_services_by_category(category)
    }

    fn service_entry(&self, service_id: &ServiceId) -> ByokResult<&ServiceCatalogEntry> {
        self.catalog
            .get_service_info(service_id)
            .map_err(|_| ByokError::UnknownService(service_id.clone()))
    }

    /// Returns metadata for the pair as the vault currently holds it.
    async fn current_metadata(&self, key: &CredentialKey) -> ByokResult<Option<Credential>> {
        let Some(sealed) = self.vault.record(key).await? else {
            self.records_write()?.remove(key);
            return Ok(None);
        };
        if let Some(indexed) = self.indexed(key, &sealed)? {
            return Ok(Some(indexed));
        }

        let pair_lock = self.write_lock(key)?;
        let _guard = pair_lock.lock().await;
        self.sync_locked(key).await
    }

    /// Brings the index entry for `key` in line with the vault.
    ///
    /// Callers hold the pair lock.
    async fn sync_locked(&self, key: &CredentialKey) -> ByokResult<Option<Credential>> {
        let sealed = self.vault.record(key).await?;
        let secret = match sealed {
            Some(ref sealed) => {
                if let Some(indexed) = self.indexed(key, sealed)? {
                    return Ok(Some(indexed));
                }
                self.vault.get(key).await?
            }
            None => None,
        };
        let (Some(sealed), Some(secret)) = (sealed, secret) else {
            self.records_write()?.remove(key);
            return Ok(None);
        };

        let sealed_at = sealed.sealed_at();
        let rebuilt = Credential::new(
            key.clone(),
            sealed,
            mask_api_key(secret.expose()),
            KeyFingerprint::of(&secret),
            calculate_key_strength(secret.expose()),
            sealed_at,
        );
        drop(secret);
        self.records_write()?.insert(key.clone(), rebuilt.clone());
        debug!(
            tenant_id = %key.tenant_id(),
            service_id = %key.service_id(),
            "credential metadata rebuilt from vault"
        );
        Ok(Some(rebuilt))
    }

    fn indexed(
        &self,
        key: &CredentialKey,
        sealed: &SealedRecord,
    ) -> ByokResult<Option<Credential>> {
        Ok(self
            .records_read()?
            .get(key)
            .filter(|credential| credential.sealed() == sealed)
            .cloned())
    }

    /// Returns the async mutex for a pair, pruning locks nobody holds.
    fn write_lock(&self, key: &CredentialKey) -> ByokResult<Arc<tokio::sync::Mutex<()>>> {
        let mut locks = self
            .write_locks
            .lock()
            .map_err(|err| ByokError::LockPoisoned(err.to_string()))?;
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Ok(Arc::clone(locks.entry(key.clone()).or_default()))
    }

    #[cfg(test)]
    pub(crate) fn tracked_write_locks(&self) -> usize {
        self.write_locks.lock().map_or(0, |locks| locks.len())
    }

    fn records_read(
        &self,
    ) -> ByokResult<std::sync::RwLockReadGuard<'_, HashMap<CredentialKey, Credential>>> {
        self.records
            .read()
            .map_err(|err| ByokError::LockPoisoned(err.to_string()))
    }

    fn records_write(
        &self,
    ) -> ByokResult<std::sync::RwLockWriteGuard<'_, HashMap<CredentialKey, Credential>>> {
        self.records
            .write()
            .map_err(|err| ByokError::LockPoisoned(err.to_string()))
    }
}

fn check_format(entry: &ServiceCatalogEntry, key: &str) -> ByokResult<()> {
    entry
        .key_format()
        .matches(key)
        .map_err(|violation| ByokError::InvalidFormat {
            service_id: entry.service_id().clone(),
            violation,
        })
}
