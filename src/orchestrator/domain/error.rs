//! Error types for orchestration domain values.

use super::AgentCallState;
use crate::agent_registry::domain::AgentDomainError;
use thiserror::Error;

/// Errors returned while constructing orchestration requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrchestratorDomainError {
    /// The category or capability filter failed agent validation.
    #[error(transparent)]
    Agent(#[from] AgentDomainError),

    /// The dispatch mode name is not supported.
    #[error("unknown dispatch mode: {0}")]
    UnknownMode(String),
}

/// A call state change outside the permitted lifecycle.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("illegal agent call transition from {from} to {to}")]
pub struct InvalidCallTransition {
    /// State the call was in.
    pub from: AgentCallState,
    /// Requested state.
    pub to: AgentCallState,
}
