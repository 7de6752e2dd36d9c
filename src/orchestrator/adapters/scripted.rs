//! Scripted agent transport.

use crate::agent_registry::domain::AgentId;
use crate::credential::domain::{CredentialKey, TenantId};
use crate::orchestrator::ports::{AgentInvocation, AgentTransport, TransportError, TransportResult};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// One call observed by a [`ScriptedAgentTransport`].
///
/// Only the credential's identity is recorded, never its value.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedInvocation {
    /// Agent that was called.
    pub agent_id: AgentId,
    /// Tenant the call acted for.
    pub tenant_id: TenantId,
    /// Payload forwarded to the agent.
    pub payload: Value,
    /// Credential passed to the agent, if any.
    pub credential: Option<CredentialKey>,
}

#[derive(Debug, Clone)]
enum Reply {
    Respond(Value),
    Fail(TransportError),
}

#[derive(Debug, Clone)]
struct Script {
    delay: Duration,
    reply: Reply,
}

#[derive(Debug, Default)]
struct ScriptedState {
    scripts: HashMap<AgentId, Script>,
    calls: Vec<RecordedInvocation>,
}

/// Transport whose replies are configured per agent.
///
/// Unscripted agents echo their payload back as
/// `{"agent_id": ..., "echo": <payload>}`. Suitable for tests and
/// deterministic local flows.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAgentTransport {
    state: Arc<RwLock<ScriptedState>>,
}

impl ScriptedAgentTransport {
    /// Creates a transport with no scripts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the agent reply with `output`.
    #[must_use]
    pub fn respond(self, agent_id: AgentId, output: Value) -> Self {
        self.script(agent_id, Duration::ZERO, Reply::Respond(output))
    }

    /// Makes the agent fail with `error`.
    #[must_use]
    pub fn fail(self, agent_id: AgentId, error: TransportError) -> Self {
        self.script(agent_id, Duration::ZERO, Reply::Fail(error))
    }

    /// Makes the agent reply with `output` after `delay`.
    #[must_use]
    pub fn respond_after(self, agent_id: AgentId, delay: Duration, output: Value) -> Self {
        self.script(agent_id, delay, Reply::Respond(output))
    }

    /// Returns every call received so far, in arrival order.
    #[must_use]
    pub fn invocations(&self) -> Vec<RecordedInvocation> {
        self.state
            .read()
            .map(|state| state.calls.clone())
            .unwrap_or_default()
    }

    fn script(self, agent_id: AgentId, delay: Duration, reply: Reply) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.scripts.insert(agent_id, Script { delay, reply });
        }
        self
    }
}

fn lock_error(err: impl ToString) -> TransportError {
    TransportError::unavailable(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AgentTransport for ScriptedAgentTransport {
    async fn invoke(&self, invocation: AgentInvocation) -> TransportResult<Value> {
        let agent_id = invocation.agent().id().clone();
        let script = {
            let mut state = self.state.write().map_err(lock_error)?;
            state.calls.push(RecordedInvocation {
                agent_id: agent_id.clone(),
                tenant_id: invocation.tenant_id().clone(),
                payload: invocation.payload().clone(),
                credential: invocation
                    .credential()
                    .map(|handle| handle.credential_key().clone()),
            });
            state.scripts.get(&agent_id).cloned()
        };

        let Some(Script { delay, reply }) = script else {
            return Ok(json!({
                "agent_id": agent_id.as_str(),
                "echo": invocation.payload(),
            }));
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match reply {
            Reply::Respond(output) => Ok(output),
            Reply::Fail(error) => Err(error),
        }
    }
}
