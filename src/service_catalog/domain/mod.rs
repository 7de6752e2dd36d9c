//! Domain model for the service catalogue.
//!
//! Catalogue entries and their key format rules are plain values. Loading
//! them from a registry document happens outside the domain boundary.

mod entry;
mod error;
mod ids;
mod key_format;

pub use entry::{ServiceCatalogEntry, ServiceDefinition};
pub use error::CatalogDomainError;
pub use ids::{ServiceCategory, ServiceId};
pub use key_format::{
    Charset, KeyFormat, KeyFormatDefinition, KeyFormatViolation, KeyPattern, KeyRule, LengthRule,
};
