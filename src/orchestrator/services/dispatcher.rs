//! Scatter/gather dispatch of tenant requests to agents.

use crate::agent_registry::{
    domain::{Agent, AgentCategory, AgentId},
    services::{AgentRegistry, RegistryError},
};
use crate::config::{ConfigError, OrchestratorSettings};
use crate::credential::{
    domain::{CredentialHandle, TenantId},
    ports::VaultAdapter,
    services::{ByokError, ByokManager},
};
use crate::orchestrator::{
    domain::{
        AgentCallState, AgentOutcome, AgentSelector, DispatchMode, ErrorKind,
        InvalidCallTransition, OrchestrationRequest, OrchestrationResult,
        OrchestratorDomainError, SkipReason,
    },
    ports::{AgentInvocation, AgentTransport, TransportError},
    services::TransportRouter,
};
use mockable::Clock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Structural problems that prevent a dispatch from running at all.
///
/// Per-agent failures never surface here; they are reported as outcomes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The explicitly requested agent does not exist.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// No active agent in the category has every requested capability.
    #[error("no active agents match category {category}")]
    NoMatchingAgents {
        /// Requested category.
        category: AgentCategory,
    },

    /// The effective per-agent timeout is zero.
    #[error("per-agent timeout must be greater than zero")]
    ZeroTimeout,

    /// The request could not be built.
    #[error(transparent)]
    InvalidRequest(#[from] OrchestratorDomainError),

    /// The registry could not be read.
    #[error(transparent)]
    Registry(RegistryError),
}

impl From<RegistryError> for DispatchError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => Self::AgentNotFound(id),
            other => Self::Registry(other),
        }
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// A resolved candidate: either an agent to call or an outcome decided up
/// front.
enum Candidate {
    Call(Agent),
    Decided(AgentOutcome),
}

impl Candidate {
    fn agent_id(&self) -> AgentId {
        match self {
            Self::Call(agent) => agent.id().clone(),
            Self::Decided(outcome) => outcome.agent_id().clone(),
        }
    }
}

/// Shared inputs for every agent call in one dispatch.
struct CallContext<V, C>
where
    V: VaultAdapter + 'static,
    C: Clock + Send + Sync + 'static,
{
    dispatch_id: Uuid,
    tenant_id: TenantId,
    payload: Value,
    timeout: Duration,
    byok: Arc<ByokManager<V, C>>,
    semaphore: Arc<Semaphore>,
}

/// Routes tenant requests to agents and gathers their outcomes.
///
/// Fan-out calls run as independent tasks, at most
/// [`OrchestratorSettings::max_concurrency`] at a time. Each call resolves
/// its credential, then invokes its transport under the request timeout. A
/// slow, failing or panicking agent only affects its own outcome. Outcomes
/// are returned in candidate order regardless of completion order.
pub struct AgentOrchestrator<V, C>
where
    V: VaultAdapter + 'static,
    C: Clock + Send + Sync + 'static,
{
    registry: Arc<AgentRegistry<C>>,
    byok: Arc<ByokManager<V, C>>,
    router: TransportRouter,
    settings: OrchestratorSettings,
}

impl<V, C> AgentOrchestrator<V, C>
where
    V: VaultAdapter + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates an orchestrator.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the settings have a zero timeout or a
    /// zero concurrency limit.
    pub fn new(
        registry: Arc<AgentRegistry<C>>,
        byok: Arc<ByokManager<V, C>>,
        router: TransportRouter,
        settings: OrchestratorSettings,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            registry,
            byok,
            router,
            settings,
        })
    }

    /// Returns the active settings.
    #[must_use]
    pub const fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    /// Runs a request and returns one outcome per selected candidate.
    ///
    /// No call is retried.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::AgentNotFound`] for an unknown explicit
    /// agent, [`DispatchError::NoMatchingAgents`] when a category selector
    /// matches nothing, [`DispatchError::ZeroTimeout`] for a zero timeout,
    /// or [`DispatchError::Registry`] when the registry cannot be read.
    pub async fn dispatch(
        &self,
        request: &OrchestrationRequest,
    ) -> DispatchResult<OrchestrationResult> {
        let timeout = request
            .timeout_per_agent()
            .unwrap_or(self.settings.default_timeout);
        if timeout.is_zero() {
            return Err(DispatchError::ZeroTimeout);
        }

        let mut candidates = self.resolve_candidates(request.selector())?;
        if request.mode() == DispatchMode::Single {
            candidates.truncate(1);
        }

        let dispatch_id = Uuid::new_v4();
        info!(
            %dispatch_id,
            tenant_id = %request.tenant_id(),
            mode = %request.mode(),
            candidates = candidates.len(),
            "dispatch started"
        );

        let context = Arc::new(CallContext {
            dispatch_id,
            tenant_id: request.tenant_id().clone(),
            payload: request.payload().clone(),
            timeout,
            byok: Arc::clone(&self.byok),
            semaphore: Arc::new(Semaphore::new(self.settings.max_concurrency)),
        });
        let outcomes = self.gather(&context, candidates).await;

        let result = OrchestrationResult::new(
            dispatch_id,
            request.tenant_id().clone(),
            request.mode(),
            outcomes,
        );
        info!(
            %dispatch_id,
            succeeded = result.succeeded().count(),
            failed = result.failed().count(),
            skipped = result.skipped().count(),
            "dispatch finished"
        );
        Ok(result)
    }

    fn resolve_candidates(&self, selector: &AgentSelector) -> DispatchResult<Vec<Candidate>> {
        match selector {
            AgentSelector::Agent(id) => {
                let agent = self.registry.get_agent_by_id(id)?;
                if agent.is_active() {
                    Ok(vec![Candidate::Call(agent)])
                } else {
                    Ok(vec![Candidate::Decided(AgentOutcome::skipped(
                        id.clone(),
                        SkipReason::AgentInactive,
                    ))])
                }
            }
            AgentSelector::Category {
                category,
                capabilities,
            } => {
                let matching: Vec<Candidate> = self
                    .registry
                    .get_agents_by_category(*category)?
                    .into_iter()
                    .filter(|agent| {
                        agent.is_active() && agent.capabilities().contains_all(capabilities)
                    })
                    .map(Candidate::Call)
                    .collect();
                if matching.is_empty() {
                    return Err(DispatchError::NoMatchingAgents {
                        category: *category,
                    });
                }
                Ok(matching)
            }
        }
    }

    async fn gather(
        &self,
        context: &Arc<CallContext<V, C>>,
        candidates: Vec<Candidate>,
    ) -> Vec<AgentOutcome> {
        let agent_ids: Vec<AgentId> = candidates.iter().map(Candidate::agent_id).collect();
        let mut slots: Vec<Option<AgentOutcome>> = vec![None; candidates.len()];
        let mut positions = HashMap::new();
        let mut tasks = JoinSet::new();

        for (position, candidate) in candidates.into_iter().enumerate() {
            match candidate {
                Candidate::Decided(outcome) => fill(&mut slots, position, outcome),
                Candidate::Call(agent) => {
                    let transport = self.router.resolve(agent.category());
                    let task_context = Arc::clone(context);
                    let handle = tasks.spawn(async move {
                        (position, call_agent(&task_context, transport, agent).await)
                    });
                    positions.insert(handle.id(), position);
                }
            }
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((_, (position, outcome))) => fill(&mut slots, position, outcome),
                Err(join_error) => {
                    let Some(&position) = positions.get(&join_error.id()) else {
                        continue;
                    };
                    if let Some(agent_id) = agent_ids.get(position) {
                        warn!(
                            dispatch_id = %context.dispatch_id,
                            agent_id = %agent_id,
                            error = %join_error,
                            "agent task aborted"
                        );
                        let outcome = AgentOutcome::failed(
                            agent_id.clone(),
                            ErrorKind::Internal,
                            "agent task panicked or was cancelled",
                            Duration::ZERO,
                        );
                        fill(&mut slots, position, outcome);
                    }
                }
            }
        }

        slots
            .into_iter()
            .zip(agent_ids)
            .map(|(slot, agent_id)| {
                slot.unwrap_or_else(|| {
                    AgentOutcome::failed(
                        agent_id,
                        ErrorKind::Internal,
                        "agent task did not report an outcome",
                        Duration::ZERO,
                    )
                })
            })
            .collect()
    }
}

fn fill(slots: &mut [Option<AgentOutcome>], position: usize, outcome: AgentOutcome) {
    if let Some(slot) = slots.get_mut(position) {
        *slot = Some(outcome);
    }
}

/// Tracks one call through [`AgentCallState`], logging each step.
struct CallTracker {
    dispatch_id: Uuid,
    agent_id: AgentId,
    state: AgentCallState,
}

impl CallTracker {
    const fn new(dispatch_id: Uuid, agent_id: AgentId) -> Self {
        Self {
            dispatch_id,
            agent_id,
            state: AgentCallState::Pending,
        }
    }

    fn enter(&mut self, next: AgentCallState) -> Result<(), InvalidCallTransition> {
        self.state = self.state.transition(next)?;
        debug!(
            dispatch_id = %self.dispatch_id,
            agent_id = %self.agent_id,
            state = %self.state,
            "agent call state changed"
        );
        Ok(())
    }
}

async fn call_agent<V, C>(
    context: &CallContext<V, C>,
    transport: Option<Arc<dyn AgentTransport>>,
    agent: Agent,
) -> AgentOutcome
where
    V: VaultAdapter + 'static,
    C: Clock + Send + Sync + 'static,
{
    let agent_id = agent.id().clone();
    let Ok(_permit) = Arc::clone(&context.semaphore).acquire_owned().await else {
        return AgentOutcome::failed(
            agent_id,
            ErrorKind::Internal,
            "dispatch concurrency limiter closed",
            Duration::ZERO,
        );
    };

    let mut tracker = CallTracker::new(context.dispatch_id, agent_id.clone());
    let outcome = run_call(context, transport, agent, &mut tracker)
        .await
        .unwrap_or_else(|err| {
            AgentOutcome::failed(agent_id, ErrorKind::Internal, err.to_string(), Duration::ZERO)
        });

    if let Some(kind) = outcome.error_kind() {
        warn!(
            dispatch_id = %context.dispatch_id,
            agent_id = %outcome.agent_id(),
            error_kind = %kind,
            state = %outcome.state(),
            "agent call failed"
        );
    }
    outcome
}

async fn run_call<V, C>(
    context: &CallContext<V, C>,
    transport: Option<Arc<dyn AgentTransport>>,
    agent: Agent,
    tracker: &mut CallTracker,
) -> Result<AgentOutcome, InvalidCallTransition>
where
    V: VaultAdapter + 'static,
    C: Clock + Send + Sync + 'static,
{
    let agent_id = agent.id().clone();
    let started = Instant::now();

    let Some(route) = transport else {
        tracker.enter(AgentCallState::Failed)?;
        return Ok(AgentOutcome::failed(
            agent_id,
            ErrorKind::TransportUnavailable,
            format!("no transport for category {}", agent.category()),
            started.elapsed(),
        ));
    };

    let credential = match resolve_credential(context, &agent, tracker).await? {
        CredentialStep::Ready(handle) => handle,
        CredentialStep::Finished(outcome) => return Ok(outcome),
    };

    tracker.enter(AgentCallState::Invoking)?;
    let invocation = AgentInvocation::new(
        context.dispatch_id,
        context.tenant_id.clone(),
        agent,
        context.payload.clone(),
        credential,
    );
    let reply = tokio::time::timeout(context.timeout, route.invoke(invocation)).await;

    match reply {
        Ok(Ok(output)) => {
            tracker.enter(AgentCallState::Succeeded)?;
            Ok(AgentOutcome::succeeded(agent_id, output, started.elapsed()))
        }
        Ok(Err(err)) => {
            tracker.enter(AgentCallState::Failed)?;
            Ok(AgentOutcome::failed(
                agent_id,
                transport_error_kind(&err),
                err.to_string(),
                started.elapsed(),
            ))
        }
        Err(_elapsed) => {
            tracker.enter(AgentCallState::TimedOut)?;
            Ok(AgentOutcome::timed_out(agent_id, context.timeout))
        }
    }
}

/// Where credential resolution left a call.
enum CredentialStep {
    /// Proceed to the transport with this credential, if one is needed.
    Ready(Option<CredentialHandle>),
    /// The call ended while resolving.
    Finished(AgentOutcome),
}

async fn resolve_credential<V, C>(
    context: &CallContext<V, C>,
    agent: &Agent,
    tracker: &mut CallTracker,
) -> Result<CredentialStep, InvalidCallTransition>
where
    V: VaultAdapter + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Some(service_id) = agent.required_service() else {
        return Ok(CredentialStep::Ready(None));
    };

    tracker.enter(AgentCallState::CredentialResolving)?;
    match context
        .byok
        .get_credential(&context.tenant_id, service_id)
        .await
    {
        Ok(handle) => Ok(CredentialStep::Ready(Some(handle))),
        Err(ByokError::NotFound(_)) => {
            tracker.enter(AgentCallState::Skipped)?;
            Ok(CredentialStep::Finished(AgentOutcome::skipped(
                agent.id().clone(),
                SkipReason::MissingCredential,
            )))
        }
        Err(err) => {
            tracker.enter(AgentCallState::Failed)?;
            Ok(CredentialStep::Finished(AgentOutcome::failed(
                agent.id().clone(),
                ErrorKind::CredentialUnavailable,
                err.to_string(),
                Duration::ZERO,
            )))
        }
    }
}

const fn transport_error_kind(err: &TransportError) -> ErrorKind {
    match err {
        TransportError::Rejected(_) => ErrorKind::AgentRejected,
        TransportError::InvalidResponse(_) => ErrorKind::InvalidResponse,
        TransportError::Unavailable(_) => ErrorKind::AgentUnavailable,
    }
}
