//! Transport port for invoking agents.

use crate::agent_registry::domain::Agent;
use crate::credential::domain::{CredentialHandle, TenantId};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Everything a transport needs to perform one agent call.
///
/// The credential handle is dropped with the invocation, so the plaintext
/// lives only as long as the call.
#[derive(Debug)]
pub struct AgentInvocation {
    dispatch_id: Uuid,
    tenant_id: TenantId,
    agent: Agent,
    payload: Value,
    credential: Option<CredentialHandle>,
}

impl AgentInvocation {
    /// Creates an invocation.
    #[must_use]
    pub const fn new(
        dispatch_id: Uuid,
        tenant_id: TenantId,
        agent: Agent,
        payload: Value,
        credential: Option<CredentialHandle>,
    ) -> Self {
        Self {
            dispatch_id,
            tenant_id,
            agent,
            payload,
            credential,
        }
    }

    /// Returns the dispatch correlation identifier.
    #[must_use]
    pub const fn dispatch_id(&self) -> Uuid {
        self.dispatch_id
    }

    /// Returns the tenant the call acts for.
    #[must_use]
    pub const fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// Returns a snapshot of the agent being called.
    #[must_use]
    pub const fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Returns the request payload.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }

    /// Returns the tenant credential for the agent's required service.
    #[must_use]
    pub const fn credential(&self) -> Option<&CredentialHandle> {
        self.credential.as_ref()
    }
}

/// Agent invocation contract.
///
/// Implementations speak whatever protocol the agent needs; the orchestrator
/// only sees JSON in and JSON out. Timeouts are enforced by the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgentTransport: Send + Sync {
    /// Performs one agent call.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the agent cannot be reached, refuses
    /// the request or answers with unusable output.
    async fn invoke(&self, invocation: AgentInvocation) -> TransportResult<Value>;
}

/// Errors returned by agent transports.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The agent refused the request.
    #[error("agent rejected the request: {0}")]
    Rejected(String),

    /// The agent answered with output that could not be used.
    #[error("agent returned an invalid response: {0}")]
    InvalidResponse(String),

    /// The agent could not be reached.
    #[error("agent unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wraps a connectivity error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
