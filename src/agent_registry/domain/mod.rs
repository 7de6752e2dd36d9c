//! Domain model for agent registration and discovery.
//!
//! The agent domain models identity, category, capability tags, the
//! optional external service an agent needs a credential for, and the
//! administrative lifecycle status.

mod agent;
mod capabilities;
mod category;
mod error;
mod ids;
mod status;

pub use agent::{Agent, AgentDefinition};
pub use capabilities::CapabilitySet;
pub use category::AgentCategory;
pub use error::{AgentDomainError, ParseAgentCategoryError, ParseAgentStatusError};
pub use ids::{AgentId, AgentName};
pub use status::AgentStatus;
