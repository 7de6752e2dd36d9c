//! Agent aggregate root.

use super::{AgentCategory, AgentDomainError, AgentId, AgentName, AgentStatus, CapabilitySet};
use crate::service_catalog::domain::ServiceId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A unit of automated capability exposed to orchestration.
///
/// Identity, category, capabilities and the required service are fixed for
/// the lifetime of the process. Only [`AgentStatus`] changes, through
/// [`Agent::activate`] and [`Agent::deactivate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agent {
    id: AgentId,
    name: AgentName,
    category: AgentCategory,
    capabilities: CapabilitySet,
    required_service: Option<ServiceId>,
    description: Option<String>,
    status: AgentStatus,
    updated_at: DateTime<Utc>,
}

/// Serialised shape of an agent inside a registry document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentDefinition {
    /// Unique agent identifier.
    pub agent_id: String,
    /// Human-readable name.
    pub name: String,
    /// Category name, one of [`AgentCategory::ALL`].
    pub category: String,
    /// Capability tags.
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Catalogue service the agent needs a tenant credential for.
    #[serde(default)]
    pub required_service_id: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Initial status; defaults to `active`.
    #[serde(default)]
    pub status: Option<String>,
}

impl Agent {
    /// Creates an active agent with no required service.
    #[must_use]
    pub fn new(
        id: AgentId,
        name: AgentName,
        category: AgentCategory,
        capabilities: CapabilitySet,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id,
            name,
            category,
            capabilities,
            required_service: None,
            description: None,
            status: AgentStatus::Active,
            updated_at: clock.utc(),
        }
    }

    /// Builds an agent from its registry document shape.
    ///
    /// # Errors
    ///
    /// Returns [`AgentDomainError`] when any field fails validation.
    pub fn from_definition(
        definition: AgentDefinition,
        clock: &impl Clock,
    ) -> Result<Self, AgentDomainError> {
        let AgentDefinition {
            agent_id,
            name,
            category,
            capabilities,
            required_service_id,
            description,
            status,
        } = definition;

        let mut agent = Self::new(
            AgentId::new(agent_id)?,
            AgentName::new(name)?,
            AgentCategory::try_from(category.as_str())?,
            CapabilitySet::new(capabilities)?,
            clock,
        );
        if let Some(raw_service) = required_service_id {
            let service_id = ServiceId::new(raw_service)
                .map_err(|err| AgentDomainError::InvalidRequiredService(err.to_string()))?;
            agent = agent.with_required_service(service_id);
        }
        if let Some(text) = description {
            agent = agent.with_description(text);
        }
        if let Some(raw_status) = status {
            agent.status = AgentStatus::try_from(raw_status.as_str())?;
        }
        Ok(agent)
    }

    /// Sets the catalogue service this agent needs a credential for.
    #[must_use]
    pub fn with_required_service(mut self, service_id: ServiceId) -> Self {
        self.required_service = Some(service_id);
        self
    }

    /// Sets the free-text description. Blank text clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let text = description.into().trim().to_owned();
        self.description = (!text.is_empty()).then_some(text);
        self
    }

    /// Returns the agent identifier.
    #[must_use]
    pub const fn id(&self) -> &AgentId {
        &self.id
    }

    /// Returns the agent name.
    #[must_use]
    pub const fn name(&self) -> &AgentName {
        &self.name
    }

    /// Returns the agent category.
    #[must_use]
    pub const fn category(&self) -> AgentCategory {
        self.category
    }

    /// Returns the capability tags.
    #[must_use]
    pub const fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Returns the service a credential is required for, if any.
    #[must_use]
    pub const fn required_service(&self) -> Option<&ServiceId> {
        self.required_service.as_ref()
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> AgentStatus {
        self.status
    }

    /// Returns whether the agent is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_dispatchable()
    }

    /// Returns the latest status change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Deactivates the agent, setting status to [`AgentStatus::Inactive`].
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.status = AgentStatus::Inactive;
        self.touch(clock);
    }

    /// Activates the agent, setting status to [`AgentStatus::Active`].
    pub fn activate(&mut self, clock: &impl Clock) {
        self.status = AgentStatus::Active;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

impl From<&Agent> for AgentDefinition {
    fn from(agent: &Agent) -> Self {
        Self {
            agent_id: agent.id.as_str().to_owned(),
            name: agent.name.as_str().to_owned(),
            category: agent.category.as_str().to_owned(),
            capabilities: agent.capabilities.iter().map(str::to_owned).collect(),
            required_service_id: agent
                .required_service
                .as_ref()
                .map(|id| id.as_str().to_owned()),
            description: agent.description.clone(),
            status: Some(agent.status.as_str().to_owned()),
        }
    }
}
