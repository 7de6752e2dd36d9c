//! Error types for agent domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing agent domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentDomainError {
    /// The agent identifier is empty after trimming.
    #[error("agent identifier must not be empty")]
    EmptyAgentId,

    /// The agent identifier contains characters outside `[a-z0-9_-]`.
    #[error(
        "agent identifier '{0}' contains invalid characters (only lowercase alphanumeric, dashes and underscores allowed)"
    )]
    InvalidAgentId(String),

    /// The agent identifier exceeds the 100-character limit.
    #[error("agent identifier exceeds 100 character limit: {0}")]
    AgentIdTooLong(String),

    /// The agent name is empty after trimming.
    #[error("agent name must not be empty")]
    EmptyAgentName,

    /// A capability tag is empty after trimming.
    #[error("capability tags must not be empty")]
    EmptyCapability,

    /// The agent category is not one of the supported values.
    #[error(transparent)]
    Category(#[from] ParseAgentCategoryError),

    /// The agent status is not one of the supported values.
    #[error(transparent)]
    Status(#[from] ParseAgentStatusError),

    /// The required service identifier is malformed.
    #[error("invalid required service: {0}")]
    InvalidRequiredService(String),
}

/// Error returned while parsing an agent category.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown agent category: {0}")]
pub struct ParseAgentCategoryError(pub String);

/// Error returned while parsing an agent status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown agent status: {0}")]
pub struct ParseAgentStatusError(pub String);
