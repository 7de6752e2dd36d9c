//! Read-only services over the service catalogue.

mod catalog;

pub use catalog::{CatalogError, CatalogResult, ServiceCatalog};
