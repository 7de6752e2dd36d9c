//! Stored credential metadata.

use super::{KeyFingerprint, KeyStrength, MaskedKey, SealedRecord, TenantId};
use crate::service_catalog::domain::ServiceId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tenant/service pair identifying at most one live credential.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CredentialKey {
    tenant_id: TenantId,
    service_id: ServiceId,
}

impl CredentialKey {
    /// Creates a credential key.
    #[must_use]
    pub const fn new(tenant_id: TenantId, service_id: ServiceId) -> Self {
        Self {
            tenant_id,
            service_id,
        }
    }

    /// Returns the tenant.
    #[must_use]
    pub const fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// Returns the service.
    #[must_use]
    pub const fn service_id(&self) -> &ServiceId {
        &self.service_id
    }
}

impl fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tenant_id, self.service_id)
    }
}

/// Metadata for the live credential of a tenant/service pair.
///
/// Holds no plaintext: the value itself is behind [`SealedRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    key: CredentialKey,
    sealed: SealedRecord,
    masked_key: MaskedKey,
    fingerprint: KeyFingerprint,
    strength: KeyStrength,
    created_at: DateTime<Utc>,
    last_validated_at: DateTime<Utc>,
}

impl Credential {
    /// Creates the record for a freshly validated and sealed key.
    #[must_use]
    pub const fn new(
        key: CredentialKey,
        sealed: SealedRecord,
        masked_key: MaskedKey,
        fingerprint: KeyFingerprint,
        strength: KeyStrength,
        validated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            key,
            sealed,
            masked_key,
            fingerprint,
            strength,
            created_at: validated_at,
            last_validated_at: validated_at,
        }
    }

    /// Returns the tenant/service pair.
    #[must_use]
    pub const fn key(&self) -> &CredentialKey {
        &self.key
    }

    /// Returns the tenant.
    #[must_use]
    pub const fn tenant_id(&self) -> &TenantId {
        self.key.tenant_id()
    }

    /// Returns the service.
    #[must_use]
    pub const fn service_id(&self) -> &ServiceId {
        self.key.service_id()
    }

    /// Returns the vault's opaque record reference.
    #[must_use]
    pub const fn sealed(&self) -> &SealedRecord {
        &self.sealed
    }

    /// Returns the display-safe masked key.
    #[must_use]
    pub const fn masked_key(&self) -> &MaskedKey {
        &self.masked_key
    }

    /// Returns the truncated key digest.
    #[must_use]
    pub const fn fingerprint(&self) -> &KeyFingerprint {
        &self.fingerprint
    }

    /// Returns the strength score computed at write time.
    #[must_use]
    pub const fn strength(&self) -> KeyStrength {
        self.strength
    }

    /// Returns when this record was written.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the key last passed format validation.
    #[must_use]
    pub const fn last_validated_at(&self) -> DateTime<Utc> {
        self.last_validated_at
    }

    /// Records a successful re-validation.
    pub const fn mark_validated(&mut self, strength: KeyStrength, validated_at: DateTime<Utc>) {
        self.strength = strength;
        self.last_validated_at = validated_at;
    }
}
