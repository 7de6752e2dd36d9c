//! Serialised registry document.

use crate::agent_registry::domain::AgentDefinition;
use crate::config::OrchestratorSettings;
use crate::service_catalog::domain::ServiceDefinition;
use serde::{Deserialize, Serialize};

/// Unvalidated catalogue and registry definitions read at start-up.
///
/// ```json
/// {
///   "services": [
///     {
///       "service_id": "openai",
///       "display_name": "OpenAI",
///       "category": "ai_models",
///       "key_format": { "prefix": "sk-", "length": { "exact": 48 } }
///     }
///   ],
///   "agents": [
///     {
///       "agent_id": "web_researcher",
///       "name": "Web Researcher",
///       "category": "research",
///       "capabilities": ["search", "summarise"],
///       "required_service_id": "openai"
///     }
///   ],
///   "orchestrator": { "default_timeout_ms": 30000, "max_concurrency": 8 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySnapshot {
    /// Service catalogue entries in load order.
    #[serde(default)]
    pub services: Vec<ServiceDefinition>,
    /// Agents in load order.
    #[serde(default)]
    pub agents: Vec<AgentDefinition>,
    /// Orchestrator settings; defaults apply when absent.
    #[serde(default)]
    pub orchestrator: Option<OrchestratorSettings>,
}
