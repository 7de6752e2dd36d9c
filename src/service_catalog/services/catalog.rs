//! Immutable, indexed service catalogue.
//!
//! Provides [`ServiceCatalog`], built once from a sequence of entries and
//! exposed only through read accessors.

use crate::service_catalog::domain::{ServiceCatalogEntry, ServiceCategory, ServiceId};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Errors returned by catalogue construction and lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two entries declare the same service identifier.
    #[error("duplicate service identifier in catalog: {0}")]
    DuplicateServiceId(ServiceId),

    /// No entry exists for the service identifier.
    #[error("service not found: {0}")]
    NotFound(ServiceId),
}

/// Result type for catalogue operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Arena of catalogue entries indexed by service identifier.
///
/// Entries keep their load order, which is the order returned by listing
/// operations.
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    entries: Vec<ServiceCatalogEntry>,
    index: HashMap<ServiceId, usize>,
}

impl ServiceCatalog {
    /// Builds a catalogue from entries in load order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateServiceId`] when two entries share a
    /// service identifier.
    pub fn new(entries: impl IntoIterator<Item = ServiceCatalogEntry>) -> CatalogResult<Self> {
        let mut catalog = Self::default();
        for entry in entries {
            let service_id = entry.service_id().clone();
            if catalog.index.contains_key(&service_id) {
                return Err(CatalogError::DuplicateServiceId(service_id));
            }
            catalog.index.insert(service_id, catalog.entries.len());
            catalog.entries.push(entry);
        }
        Ok(catalog)
    }

    /// Returns the entry for a service.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no entry has the identifier.
    pub fn get_service_info(&self, service_id: &ServiceId) -> CatalogResult<&ServiceCatalogEntry> {
        self.index
            .get(service_id)
            .and_then(|&position| self.entries.get(position))
            .ok_or_else(|| CatalogError::NotFound(service_id.clone()))
    }

    /// Returns entries in a category, in load order.
    #[must_use]
    pub fn get_services_by_category(&self, category: &ServiceCategory) -> Vec<&ServiceCatalogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.category() == category)
            .collect()
    }

    /// Returns the set of categories present in the catalogue.
    #[must_use]
    pub fn get_service_categories(&self) -> BTreeSet<ServiceCategory> {
        self.entries
            .iter()
            .map(|entry| entry.category().clone())
            .collect()
    }

    /// Returns whether an entry exists for the service.
    #[must_use]
    pub fn contains(&self, service_id: &ServiceId) -> bool {
        self.index.contains_key(service_id)
    }

    /// Iterates over entries in load order.
    pub fn iter(&self) -> impl Iterator<Item = &ServiceCatalogEntry> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
