//! Service catalogue entry.

use super::{CatalogDomainError, KeyFormat, KeyFormatDefinition, ServiceCategory, ServiceId};
use serde::{Deserialize, Serialize};

/// Immutable description of one supported external service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCatalogEntry {
    service_id: ServiceId,
    display_name: String,
    category: ServiceCategory,
    key_format: KeyFormat,
    docs_url: Option<String>,
}

/// Serialised shape of a catalogue entry inside a registry document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceDefinition {
    /// Unique service identifier.
    pub service_id: String,
    /// Human-readable service name.
    pub display_name: String,
    /// Grouping category.
    pub category: String,
    /// Credential shape rules.
    #[serde(default)]
    pub key_format: KeyFormatDefinition,
    /// Link to the provider's key management documentation.
    #[serde(default)]
    pub docs_url: Option<String>,
}

impl ServiceCatalogEntry {
    /// Creates a validated catalogue entry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::EmptyDisplayName`] when the display name
    /// is blank, or [`CatalogDomainError::InvalidDocsUrl`] when a
    /// documentation URL is not HTTP(S).
    pub fn new(
        service_id: ServiceId,
        raw_display_name: impl Into<String>,
        category: ServiceCategory,
        key_format: KeyFormat,
        docs_url: Option<String>,
    ) -> Result<Self, CatalogDomainError> {
        let display_name = raw_display_name.into().trim().to_owned();
        if display_name.is_empty() {
            return Err(CatalogDomainError::EmptyDisplayName);
        }

        let trimmed_url = docs_url
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty());
        if let Some(url) = trimmed_url.as_deref()
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(CatalogDomainError::InvalidDocsUrl(url.to_owned()));
        }

        Ok(Self {
            service_id,
            display_name,
            category,
            key_format,
            docs_url: trimmed_url,
        })
    }

    /// Returns the service identifier.
    #[must_use]
    pub const fn service_id(&self) -> &ServiceId {
        &self.service_id
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the grouping category.
    #[must_use]
    pub const fn category(&self) -> &ServiceCategory {
        &self.category
    }

    /// Returns the credential shape rules.
    #[must_use]
    pub const fn key_format(&self) -> &KeyFormat {
        &self.key_format
    }

    /// Returns the documentation URL, if declared.
    #[must_use]
    pub fn docs_url(&self) -> Option<&str> {
        self.docs_url.as_deref()
    }
}

impl TryFrom<ServiceDefinition> for ServiceCatalogEntry {
    type Error = CatalogDomainError;

    fn try_from(definition: ServiceDefinition) -> Result<Self, Self::Error> {
        let ServiceDefinition {
            service_id,
            display_name,
            category,
            key_format,
            docs_url,
        } = definition;

        Self::new(
            ServiceId::new(service_id)?,
            display_name,
            ServiceCategory::new(category)?,
            KeyFormat::try_from(key_format)?,
            docs_url,
        )
    }
}

impl From<&ServiceCatalogEntry> for ServiceDefinition {
    fn from(entry: &ServiceCatalogEntry) -> Self {
        Self {
            service_id: entry.service_id.as_str().to_owned(),
            display_name: entry.display_name.clone(),
            category: entry.category.as_str().to_owned(),
            key_format: KeyFormatDefinition::from(&entry.key_format),
            docs_url: entry.docs_url.clone(),
        }
    }
}
