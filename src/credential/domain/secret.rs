//! Plaintext key containers.

use super::{CredentialDomainError, CredentialKey};
use std::fmt;

/// Plaintext API key.
///
/// Deliberately implements neither `Clone`, `Display` nor `Serialize`, and
/// its `Debug` output is redacted. The buffer is overwritten on drop.
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw key, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialDomainError::EmptyKey`] when nothing remains after
    /// trimming.
    pub fn new(raw: impl Into<String>) -> Result<Self, CredentialDomainError> {
        let mut value = raw.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            scrub(&mut value);
            return Err(CredentialDomainError::EmptyKey);
        }
        if trimmed.len() != value.len() {
            let owned = trimmed.to_owned();
            scrub(&mut value);
            return Ok(Self(owned));
        }
        Ok(Self(value))
    }

    /// Returns the plaintext. Callers must not retain or log it.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns the key length in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

fn scrub(value: &mut String) {
    let mut bytes = std::mem::take(value).into_bytes();
    bytes.fill(0);
    std::hint::black_box(&bytes);
}

impl Drop for ApiKey {
    fn drop(&mut self) {
        scrub(&mut self.0);
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Short-lived access to a tenant's decrypted credential.
///
/// Produced by the BYOK manager for a single agent invocation and dropped
/// when that invocation ends.
#[derive(Debug)]
pub struct CredentialHandle {
    key: CredentialKey,
    secret: ApiKey,
}

impl CredentialHandle {
    /// Pairs a decrypted key with the credential it was read for.
    #[must_use]
    pub const fn new(key: CredentialKey, secret: ApiKey) -> Self {
        Self { key, secret }
    }

    /// Returns the tenant/service pair the credential belongs to.
    #[must_use]
    pub const fn credential_key(&self) -> &CredentialKey {
        &self.key
    }

    /// Returns the plaintext. Callers must not retain or log it.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.secret.expose()
    }
}
