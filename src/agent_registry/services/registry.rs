//! In-process agent registry.
//!
//! Provides [`AgentRegistry`], an arena of agents indexed by
//! [`AgentId`]. Reads clone a snapshot under a shared lock; status toggles
//! take the exclusive lock, so a reader never sees a half-updated agent and
//! every read after a toggle observes it.

use crate::agent_registry::domain::{Agent, AgentCategory, AgentId, AgentStatus};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::info;

/// Errors returned by agent registry operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two agents declare the same identifier.
    #[error("duplicate agent identifier in registry: {0}")]
    DuplicateAgentId(AgentId),

    /// No agent exists with the identifier.
    #[error("agent not found: {0}")]
    NotFound(AgentId),

    /// The registry lock was poisoned by a panicking writer.
    #[error("agent registry lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result type for agent registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, Default)]
struct RegistryArena {
    agents: Vec<Agent>,
    index: HashMap<AgentId, usize>,
}

impl RegistryArena {
    fn get(&self, id: &AgentId) -> Option<&Agent> {
        self.index
            .get(id)
            .and_then(|&position| self.agents.get(position))
    }

    fn get_mut(&mut self, id: &AgentId) -> Option<&mut Agent> {
        let position = *self.index.get(id)?;
        self.agents.get_mut(position)
    }
}

/// Agent catalogue with synchronised administrative updates.
pub struct AgentRegistry<C>
where
    C: Clock + Send + Sync,
{
    state: RwLock<RegistryArena>,
    clock: Arc<C>,
}

impl<C> AgentRegistry<C>
where
    C: Clock + Send + Sync,
{
    /// Builds a registry from agents in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateAgentId`] when two agents share an
    /// identifier.
    pub fn new(agents: impl IntoIterator<Item = Agent>, clock: Arc<C>) -> RegistryResult<Self> {
        let mut arena = RegistryArena::default();
        for agent in agents {
            let id = agent.id().clone();
            if arena.index.contains_key(&id) {
                return Err(RegistryError::DuplicateAgentId(id));
            }
            arena.index.insert(id, arena.agents.len());
            arena.agents.push(agent);
        }
        Ok(Self {
            state: RwLock::new(arena),
            clock,
        })
    }

    fn read(&self) -> RegistryResult<RwLockReadGuard<'_, RegistryArena>> {
        self.state
            .read()
            .map_err(|err| RegistryError::LockPoisoned(err.to_string()))
    }

    fn write(&self) -> RegistryResult<RwLockWriteGuard<'_, RegistryArena>> {
        self.state
            .write()
            .map_err(|err| RegistryError::LockPoisoned(err.to_string()))
    }

    fn collect(&self, predicate: impl Fn(&Agent) -> bool) -> RegistryResult<Vec<Agent>> {
        let state = self.read()?;
        Ok(state
            .agents
            .iter()
            .filter(|agent| predicate(*agent))
            .cloned()
            .collect())
    }

    /// Returns a snapshot of one agent.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no agent has the identifier.
    pub fn get_agent_by_id(&self, id: &AgentId) -> RegistryResult<Agent> {
        let state = self.read()?;
        state
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.clone()))
    }

    /// Returns agents in a category in insertion order, inactive included.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::LockPoisoned`] when the lock is poisoned.
    pub fn get_agents_by_category(&self, category: AgentCategory) -> RegistryResult<Vec<Agent>> {
        self.collect(|agent| agent.category() == category)
    }

    /// Returns active agents in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::LockPoisoned`] when the lock is poisoned.
    pub fn get_active_agents(&self) -> RegistryResult<Vec<Agent>> {
        self.collect(Agent::is_active)
    }

    /// Returns every agent in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::LockPoisoned`] when the lock is poisoned.
    pub fn get_all_agents(&self) -> RegistryResult<Vec<Agent>> {
        self.collect(|_| true)
    }

    /// Searches agents by name and capability tags.
    ///
    /// Matching is a case-insensitive substring test. Agents whose name
    /// matches come first, followed by agents matched only through a
    /// capability; each group keeps insertion order. A blank query returns
    /// no agents. Surrounding whitespace in a non-blank query is significant.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::LockPoisoned`] when the lock is poisoned.
    pub fn search_agents(&self, query: &str) -> RegistryResult<Vec<Agent>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let needle = query.to_lowercase();

        let state = self.read()?;
        let mut by_name = Vec::new();
        let mut by_capability = Vec::new();
        for agent in &state.agents {
            if agent.name().as_str().to_lowercase().contains(&needle) {
                by_name.push(agent.clone());
            } else if agent.capabilities().any_contains(&needle) {
                by_capability.push(agent.clone());
            }
        }
        by_name.append(&mut by_capability);
        Ok(by_name)
    }

    /// Activates an agent and returns the updated snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no agent has the identifier.
    pub fn activate(&self, id: &AgentId) -> RegistryResult<Agent> {
        self.set_status(id, AgentStatus::Active)
    }

    /// Deactivates an agent and returns the updated snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no agent has the identifier.
    pub fn deactivate(&self, id: &AgentId) -> RegistryResult<Agent> {
        self.set_status(id, AgentStatus::Inactive)
    }

    fn set_status(&self, id: &AgentId, status: AgentStatus) -> RegistryResult<Agent> {
        let mut state = self.write()?;
        let agent = state
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;
        match status {
            AgentStatus::Active => agent.activate(&*self.clock),
            AgentStatus::Inactive => agent.deactivate(&*self.clock),
        }
        info!(agent_id = %id, %status, "agent status changed");
        Ok(agent.clone())
    }

    /// Returns the number of registered agents.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::LockPoisoned`] when the lock is poisoned.
    pub fn agent_count(&self) -> RegistryResult<usize> {
        Ok(self.read()?.agents.len())
    }
}
