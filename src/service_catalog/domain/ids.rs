//! Identifier types for the service catalogue domain.

use super::CatalogDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for service identifiers and categories.
const MAX_ID_LENGTH: usize = 64;

fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'
}

/// Validated identifier of an external service (e.g. `openai`, `slack`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceId(String);

impl ServiceId {
    /// Creates a validated service identifier.
    ///
    /// The input is trimmed and lowercased. Only characters in `[a-z0-9_-]`
    /// are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::EmptyServiceId`] when the value is empty
    /// after trimming, [`CatalogDomainError::ServiceIdTooLong`] when it
    /// exceeds 64 characters, or [`CatalogDomainError::InvalidServiceId`] when
    /// it contains characters outside `[a-z0-9_-]`.
    pub fn new(value: impl Into<String>) -> Result<Self, CatalogDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(CatalogDomainError::EmptyServiceId);
        }
        if normalized.len() > MAX_ID_LENGTH {
            return Err(CatalogDomainError::ServiceIdTooLong(raw));
        }
        if !normalized.chars().all(is_slug_char) {
            return Err(CatalogDomainError::InvalidServiceId(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ServiceId {
    type Error = CatalogDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ServiceId> for String {
    fn from(value: ServiceId) -> Self {
        value.0
    }
}

impl AsRef<str> for ServiceId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Grouping label for catalogue entries (e.g. `ai_models`, `communication`).
///
/// Service categories are open-ended; any slug is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceCategory(String);

impl ServiceCategory {
    /// Creates a validated service category.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::EmptyCategory`] when the value is empty
    /// after trimming, or [`CatalogDomainError::InvalidCategory`] when it is
    /// too long or contains characters outside `[a-z0-9_-]`.
    pub fn new(value: impl Into<String>) -> Result<Self, CatalogDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(CatalogDomainError::EmptyCategory);
        }
        if normalized.len() > MAX_ID_LENGTH || !normalized.chars().all(is_slug_char) {
            return Err(CatalogDomainError::InvalidCategory(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the category as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ServiceCategory {
    type Error = CatalogDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ServiceCategory> for String {
    fn from(value: ServiceCategory) -> Self {
        value.0
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
