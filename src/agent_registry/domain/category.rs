//! Fixed enumeration of agent categories.

use super::ParseAgentCategoryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Functional area an agent belongs to.
///
/// Requests can target a category instead of a specific agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentCategory {
    /// Information gathering and summarisation.
    Research,
    /// Copywriting, drafting and editing.
    Content,
    /// Reporting and data analysis.
    Analytics,
    /// Email, chat and messaging.
    Communication,
    /// Workflow and integration automation.
    Automation,
    /// Code generation and review.
    Development,
    /// Customer support.
    Support,
}

impl AgentCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Research,
        Self::Content,
        Self::Analytics,
        Self::Communication,
        Self::Automation,
        Self::Development,
        Self::Support,
    ];

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Research => "research",
            Self::Content => "content",
            Self::Analytics => "analytics",
            Self::Communication => "communication",
            Self::Automation => "automation",
            Self::Development => "development",
            Self::Support => "support",
        }
    }
}

impl fmt::Display for AgentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AgentCategory {
    type Error = ParseAgentCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ParseAgentCategoryError(value.to_owned()))
    }
}
