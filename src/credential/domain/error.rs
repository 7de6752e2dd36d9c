//! Error types for credential domain validation.

use thiserror::Error;

/// Errors returned while constructing credential domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialDomainError {
    /// The tenant identifier is empty after trimming.
    #[error("tenant identifier must not be empty")]
    EmptyTenantId,

    /// The tenant identifier contains whitespace or control characters.
    #[error("tenant identifier '{0}' contains whitespace or control characters")]
    InvalidTenantId(String),

    /// The tenant identifier exceeds the 128-character limit.
    #[error("tenant identifier exceeds 128 character limit")]
    TenantIdTooLong,

    /// The API key is empty after trimming.
    #[error("API key must not be empty")]
    EmptyKey,
}
