//! Orchestration requests.

use super::OrchestratorDomainError;
use crate::agent_registry::domain::{AgentCategory, AgentDomainError, AgentId, CapabilitySet};
use crate::credential::domain::TenantId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// How many candidates a request is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// The first candidate only.
    #[default]
    Single,
    /// Every candidate, concurrently.
    FanOut,
}

impl DispatchMode {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::FanOut => "fan_out",
        }
    }
}

impl TryFrom<&str> for DispatchMode {
    type Error = OrchestratorDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "fan_out" | "fan-out" | "fanout" => Ok(Self::FanOut),
            _ => Err(OrchestratorDomainError::UnknownMode(value.to_owned())),
        }
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which agents a request targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentSelector {
    /// One named agent.
    Agent(AgentId),
    /// Active agents of a category that have every listed capability.
    Category {
        /// Target category.
        category: AgentCategory,
        /// Capabilities each candidate must have; empty matches all.
        capabilities: CapabilitySet,
    },
}

impl AgentSelector {
    /// Selects every active agent in a category.
    #[must_use]
    pub const fn category(category: AgentCategory) -> Self {
        Self::Category {
            category,
            capabilities: CapabilitySet::empty(),
        }
    }

    /// Parses a category name and capability filter.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorDomainError::Agent`] when the category is not
    /// recognised or a capability tag is blank.
    pub fn parse_category<I, S>(
        name: &str,
        capabilities: I,
    ) -> Result<Self, OrchestratorDomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let category = AgentCategory::try_from(name).map_err(AgentDomainError::from)?;
        Ok(Self::Category {
            category,
            capabilities: CapabilitySet::new(capabilities)?,
        })
    }
}

/// A tenant's request to run agents against a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestrationRequest {
    tenant_id: TenantId,
    selector: AgentSelector,
    payload: Value,
    mode: DispatchMode,
    timeout_per_agent: Option<Duration>,
}

impl OrchestrationRequest {
    /// Creates a single-mode request using the orchestrator's default
    /// timeout.
    #[must_use]
    pub const fn new(tenant_id: TenantId, selector: AgentSelector, payload: Value) -> Self {
        Self {
            tenant_id,
            selector,
            payload,
            mode: DispatchMode::Single,
            timeout_per_agent: None,
        }
    }

    /// Sets the dispatch mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the per-agent timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_per_agent = Some(timeout);
        self
    }

    /// Returns the tenant the request acts for.
    #[must_use]
    pub const fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// Returns the agent selector.
    #[must_use]
    pub const fn selector(&self) -> &AgentSelector {
        &self.selector
    }

    /// Returns the opaque payload forwarded to each agent.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }

    /// Returns the dispatch mode.
    #[must_use]
    pub const fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Returns the explicit per-agent timeout, if set.
    #[must_use]
    pub const fn timeout_per_agent(&self) -> Option<Duration> {
        self.timeout_per_agent
    }
}
