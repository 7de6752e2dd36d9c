//! Start-up wiring of the catalogue, registry, BYOK manager and
//! orchestrator.

use crate::agent_registry::{
    domain::{Agent, AgentDomainError, AgentId},
    services::{AgentRegistry, RegistryError},
};
use crate::config::{ConfigError, OrchestratorSettings};
use crate::credential::{ports::VaultAdapter, services::ByokManager};
use crate::orchestrator::services::{AgentOrchestrator, TransportRouter};
use crate::registry_source::{RegistrySnapshot, RegistrySource, RegistrySourceError};
use crate::service_catalog::{
    domain::{CatalogDomainError, ServiceCatalogEntry, ServiceId},
    services::{CatalogError, ServiceCatalog},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that abort start-up.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The registry snapshot could not be loaded.
    #[error(transparent)]
    Source(#[from] RegistrySourceError),

    /// A service definition failed validation.
    #[error("invalid service definition '{service_id}': {source}")]
    InvalidService {
        /// Identifier as written in the document.
        service_id: String,
        /// Validation failure.
        #[source]
        source: CatalogDomainError,
    },

    /// An agent definition failed validation.
    #[error("invalid agent definition '{agent_id}': {source}")]
    InvalidAgent {
        /// Identifier as written in the document.
        agent_id: String,
        /// Validation failure.
        #[source]
        source: AgentDomainError,
    },

    /// The catalogue could not be built, for example on a duplicate id.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The registry could not be built, for example on a duplicate id.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// An agent requires a service the catalogue does not list.
    #[error("agent {agent_id} requires unknown service {service_id}")]
    UnknownRequiredService {
        /// Offending agent.
        agent_id: AgentId,
        /// Missing service.
        service_id: ServiceId,
    },

    /// The orchestrator settings are unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The assembled core, ready to serve tenant requests.
pub struct Platform<V, C>
where
    V: VaultAdapter + 'static,
    C: Clock + Send + Sync + 'static,
{
    catalog: Arc<ServiceCatalog>,
    registry: Arc<AgentRegistry<C>>,
    byok: Arc<ByokManager<V, C>>,
    orchestrator: AgentOrchestrator<V, C>,
}

impl<V, C> Platform<V, C>
where
    V: VaultAdapter + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Loads the registry snapshot once and wires every component.
    ///
    /// Orchestrator settings come from the snapshot, falling back to
    /// defaults, with environment overrides applied on top.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] when the snapshot cannot be loaded, a
    /// definition is invalid, identifiers collide, an agent references an
    /// unknown service, or the settings are unusable.
    pub fn bootstrap(
        source: &impl RegistrySource,
        vault: Arc<V>,
        router: TransportRouter,
        clock: Arc<C>,
    ) -> Result<Self, BootstrapError> {
        let RegistrySnapshot {
            services,
            agents,
            orchestrator,
        } = source.load()?;

        let entries = services
            .into_iter()
            .map(|definition| {
                let service_id = definition.service_id.clone();
                ServiceCatalogEntry::try_from(definition)
                    .map_err(|source| BootstrapError::InvalidService { service_id, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let catalog = Arc::new(ServiceCatalog::new(entries)?);

        let loaded_agents = agents
            .into_iter()
            .map(|definition| {
                let agent_id = definition.agent_id.clone();
                Agent::from_definition(definition, clock.as_ref())
                    .map_err(|source| BootstrapError::InvalidAgent { agent_id, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        ensure_required_services(&catalog, &loaded_agents)?;
        let registry = Arc::new(AgentRegistry::new(loaded_agents, Arc::clone(&clock))?);

        let settings = orchestrator
            .unwrap_or_default()
            .with_env_overrides()?;
        let byok = Arc::new(ByokManager::new(Arc::clone(&catalog), vault, clock));
        let orchestrator = AgentOrchestrator::new(
            Arc::clone(&registry),
            Arc::clone(&byok),
            router,
            settings,
        )?;

        info!(
            services = catalog.len(),
            agents = registry.agent_count()?,
            default_timeout = ?settings.default_timeout,
            max_concurrency = settings.max_concurrency,
            "platform bootstrapped"
        );
        Ok(Self {
            catalog,
            registry,
            byok,
            orchestrator,
        })
    }

    /// Returns the service catalogue.
    #[must_use]
    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Returns the agent registry.
    #[must_use]
    pub fn registry(&self) -> &AgentRegistry<C> {
        &self.registry
    }

    /// Returns the BYOK manager.
    #[must_use]
    pub fn byok(&self) -> &ByokManager<V, C> {
        &self.byok
    }

    /// Returns the orchestrator.
    #[must_use]
    pub const fn orchestrator(&self) -> &AgentOrchestrator<V, C> {
        &self.orchestrator
    }

    /// Returns the effective orchestrator settings.
    #[must_use]
    pub const fn settings(&self) -> &OrchestratorSettings {
        self.orchestrator.settings()
    }
}

fn ensure_required_services(
    catalog: &ServiceCatalog,
    agents: &[Agent],
) -> Result<(), BootstrapError> {
    agents.iter().try_for_each(|agent| match agent.required_service() {
        Some(service_id) if !catalog.contains(service_id) => {
            Err(BootstrapError::UnknownRequiredService {
                agent_id: agent.id().clone(),
                service_id: service_id.clone(),
            })
        }
        _ => Ok(()),
    })
}
