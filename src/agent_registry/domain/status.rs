//! Agent availability.

use super::ParseAgentStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an agent may be picked by the orchestrator.
///
/// Registry documents omit the status for agents that start active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Eligible for category selection and explicit dispatch.
    #[default]
    Active,
    /// Reported as skipped when requested by id; never selected by category.
    Inactive,
}

impl AgentStatus {
    /// Returns whether agents with this status may be invoked.
    #[must_use]
    pub const fn is_dispatchable(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns the lowercase name used in registry documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        if self.is_dispatchable() {
            "active"
        } else {
            "inactive"
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AgentStatus {
    type Error = ParseAgentStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        [Self::Active, Self::Inactive]
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ParseAgentStatusError(value.to_owned()))
    }
}
