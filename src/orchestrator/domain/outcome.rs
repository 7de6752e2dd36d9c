//! Per-agent outcomes and the aggregated dispatch result.

use super::{AgentCallState, DispatchMode};
use crate::agent_registry::domain::AgentId;
use crate::credential::domain::TenantId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Coarse status reported for each agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The agent produced output.
    Succeeded,
    /// The agent was attempted and did not produce output.
    Failed,
    /// The agent was not attempted.
    Skipped,
}

/// Why an agent call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The call exceeded its per-agent timeout.
    Timeout,
    /// The vault could not be read for the agent's credential.
    CredentialUnavailable,
    /// No transport is configured for the agent's category.
    TransportUnavailable,
    /// The agent refused the request.
    AgentRejected,
    /// The agent could not be reached.
    AgentUnavailable,
    /// The agent answered with output that could not be used.
    InvalidResponse,
    /// The agent task panicked or was cancelled.
    Internal,
}

impl ErrorKind {
    /// Returns whether a caller may reasonably retry the agent.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::CredentialUnavailable | Self::AgentUnavailable
        )
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::CredentialUnavailable => "credential_unavailable",
            Self::TransportUnavailable => "transport_unavailable",
            Self::AgentRejected => "agent_rejected",
            Self::AgentUnavailable => "agent_unavailable",
            Self::InvalidResponse => "invalid_response",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an agent was not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The explicitly requested agent is inactive.
    AgentInactive,
    /// The tenant has no credential for the agent's required service.
    MissingCredential,
}

/// Result of one agent call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOutcome {
    agent_id: AgentId,
    state: AgentCallState,
    output: Option<Value>,
    error_kind: Option<ErrorKind>,
    error_message: Option<String>,
    skip_reason: Option<SkipReason>,
    elapsed: Duration,
}

impl AgentOutcome {
    /// Records a successful call.
    #[must_use]
    pub const fn succeeded(agent_id: AgentId, output: Value, elapsed: Duration) -> Self {
        Self {
            agent_id,
            state: AgentCallState::Succeeded,
            output: Some(output),
            error_kind: None,
            error_message: None,
            skip_reason: None,
            elapsed,
        }
    }

    /// Records a failed call.
    #[must_use]
    pub fn failed(
        agent_id: AgentId,
        kind: ErrorKind,
        message: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            agent_id,
            state: AgentCallState::Failed,
            output: None,
            error_kind: Some(kind),
            error_message: Some(message.into()),
            skip_reason: None,
            elapsed,
        }
    }

    /// Records a call cut off by its timeout.
    #[must_use]
    pub fn timed_out(agent_id: AgentId, timeout: Duration) -> Self {
        Self {
            agent_id,
            state: AgentCallState::TimedOut,
            output: None,
            error_kind: Some(ErrorKind::Timeout),
            error_message: Some(format!("no response within {} ms", timeout.as_millis())),
            skip_reason: None,
            elapsed: timeout,
        }
    }

    /// Records an agent that was not attempted.
    #[must_use]
    pub const fn skipped(agent_id: AgentId, reason: SkipReason) -> Self {
        Self {
            agent_id,
            state: AgentCallState::Skipped,
            output: None,
            error_kind: None,
            error_message: None,
            skip_reason: Some(reason),
            elapsed: Duration::ZERO,
        }
    }

    /// Returns the agent identifier.
    #[must_use]
    pub const fn agent_id(&self) -> &AgentId {
        &self.agent_id
    }

    /// Returns the reported status. Timed-out calls report
    /// [`OutcomeStatus::Failed`].
    #[must_use]
    pub const fn status(&self) -> OutcomeStatus {
        match self.state {
            AgentCallState::Succeeded => OutcomeStatus::Succeeded,
            AgentCallState::Skipped => OutcomeStatus::Skipped,
            _ => OutcomeStatus::Failed,
        }
    }

    /// Returns the terminal call state.
    #[must_use]
    pub const fn state(&self) -> AgentCallState {
        self.state
    }

    /// Returns the agent output; present only on success.
    #[must_use]
    pub const fn output(&self) -> Option<&Value> {
        self.output.as_ref()
    }

    /// Returns the failure kind; present only on failure.
    #[must_use]
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }

    /// Returns the failure description; present only on failure.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns the skip reason; present only when skipped.
    #[must_use]
    pub const fn skip_reason(&self) -> Option<SkipReason> {
        self.skip_reason
    }

    /// Returns time spent on the call.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Ordered outcomes of one dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationResult {
    dispatch_id: Uuid,
    tenant_id: TenantId,
    mode: DispatchMode,
    outcomes: Vec<AgentOutcome>,
}

impl OrchestrationResult {
    /// Creates a result. `outcomes` must already be in candidate order.
    #[must_use]
    pub const fn new(
        dispatch_id: Uuid,
        tenant_id: TenantId,
        mode: DispatchMode,
        outcomes: Vec<AgentOutcome>,
    ) -> Self {
        Self {
            dispatch_id,
            tenant_id,
            mode,
            outcomes,
        }
    }

    /// Returns the correlation identifier used in logs.
    #[must_use]
    pub const fn dispatch_id(&self) -> Uuid {
        self.dispatch_id
    }

    /// Returns the tenant the dispatch acted for.
    #[must_use]
    pub const fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// Returns the dispatch mode.
    #[must_use]
    pub const fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Returns every outcome in candidate order.
    #[must_use]
    pub fn outcomes(&self) -> &[AgentOutcome] {
        &self.outcomes
    }

    /// Returns successful outcomes in candidate order.
    pub fn succeeded(&self) -> impl Iterator<Item = &AgentOutcome> {
        self.with_status(OutcomeStatus::Succeeded)
    }

    /// Returns failed outcomes, timeouts included, in candidate order.
    pub fn failed(&self) -> impl Iterator<Item = &AgentOutcome> {
        self.with_status(OutcomeStatus::Failed)
    }

    /// Returns skipped outcomes in candidate order.
    pub fn skipped(&self) -> impl Iterator<Item = &AgentOutcome> {
        self.with_status(OutcomeStatus::Skipped)
    }

    /// Returns agents whose failure kind is worth retrying.
    #[must_use]
    pub fn retryable_agent_ids(&self) -> Vec<&AgentId> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.error_kind.is_some_and(ErrorKind::is_retryable))
            .map(AgentOutcome::agent_id)
            .collect()
    }

    fn with_status(&self, status: OutcomeStatus) -> impl Iterator<Item = &AgentOutcome> {
        self.outcomes
            .iter()
            .filter(move |outcome| outcome.status() == status)
    }
}
