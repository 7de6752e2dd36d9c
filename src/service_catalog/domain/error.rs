//! Error types for service catalogue domain validation.

use thiserror::Error;

/// Errors returned while constructing service catalogue domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogDomainError {
    /// The service identifier is empty after trimming.
    #[error("service identifier must not be empty")]
    EmptyServiceId,

    /// The service identifier contains characters outside `[a-z0-9_-]`.
    #[error(
        "service identifier '{0}' contains invalid characters (only lowercase alphanumeric, dashes and underscores allowed)"
    )]
    InvalidServiceId(String),

    /// The service identifier exceeds the 64-character limit.
    #[error("service identifier exceeds 64 character limit: {0}")]
    ServiceIdTooLong(String),

    /// The service category is empty after trimming.
    #[error("service category must not be empty")]
    EmptyCategory,

    /// The service category contains characters outside `[a-z0-9_-]`.
    #[error("service category '{0}' contains invalid characters")]
    InvalidCategory(String),

    /// The display name is empty after trimming.
    #[error("service display name must not be empty")]
    EmptyDisplayName,

    /// The documentation URL does not have an `http://` or `https://` prefix.
    #[error("documentation URL '{0}' must start with 'http://' or 'https://'")]
    InvalidDocsUrl(String),

    /// A key format pattern failed to compile.
    #[error("key format pattern '{pattern}' is invalid: {reason}")]
    InvalidKeyPattern {
        /// Pattern source text.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A key format length range has `min` greater than `max`.
    #[error("key length range is empty: min {min} exceeds max {max}")]
    EmptyLengthRange {
        /// Lower bound.
        min: usize,
        /// Upper bound.
        max: usize,
    },

    /// A key format declares an empty prefix.
    #[error("key prefix must not be empty when declared")]
    EmptyKeyPrefix,
}
