//! Tenant identifier.

use super::CredentialDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_TENANT_ID_LENGTH: usize = 128;

/// Opaque identifier of the tenant an operation acts for.
///
/// Tenant identity is established upstream; this type only guards against
/// blank or malformed values reaching storage keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    /// Creates a validated tenant identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialDomainError::EmptyTenantId`] for blank input,
    /// [`CredentialDomainError::TenantIdTooLong`] beyond 128 characters, or
    /// [`CredentialDomainError::InvalidTenantId`] when the trimmed value
    /// contains whitespace or control characters.
    pub fn new(value: impl Into<String>) -> Result<Self, CredentialDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(CredentialDomainError::EmptyTenantId);
        }
        if trimmed.chars().count() > MAX_TENANT_ID_LENGTH {
            return Err(CredentialDomainError::TenantIdTooLong);
        }
        if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(CredentialDomainError::InvalidTenantId(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TenantId {
    type Error = CredentialDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TenantId> for String {
    fn from(value: TenantId) -> Self {
        value.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
