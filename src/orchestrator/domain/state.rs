//! Per-agent call lifecycle.

use super::InvalidCallTransition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of one agent call within a dispatch.
///
/// ```text
/// Pending ─┬─> CredentialResolving ─┬─> Invoking ─┬─> Succeeded
///          │                        ├─> Skipped   ├─> Failed
///          │                        └─> Failed    └─> TimedOut
///          ├─> Invoking
///          ├─> Skipped
///          └─> Failed
/// ```
///
/// Agents without a required service go straight from `Pending` to
/// `Invoking`. `Pending -> Failed` covers calls that cannot be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentCallState {
    /// Not yet started.
    #[default]
    Pending,
    /// Reading the tenant credential.
    CredentialResolving,
    /// Waiting on the transport.
    Invoking,
    /// The transport returned output.
    Succeeded,
    /// The call failed.
    Failed,
    /// The call exceeded its timeout.
    TimedOut,
    /// The call was not attempted.
    Skipped,
}

impl AgentCallState {
    /// Returns whether the state ends the call.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::Failed | Self::TimedOut | Self::Skipped
        )
    }

    /// Returns whether moving to `next` is permitted.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (
                Self::Pending,
                Self::CredentialResolving | Self::Invoking | Self::Skipped | Self::Failed
            ) | (
                Self::CredentialResolving,
                Self::Invoking | Self::Skipped | Self::Failed
            ) | (
                Self::Invoking,
                Self::Succeeded | Self::Failed | Self::TimedOut
            )
        )
    }

    /// Moves to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCallTransition`] when the lifecycle does not permit
    /// the change.
    pub const fn transition(self, next: Self) -> Result<Self, InvalidCallTransition> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(InvalidCallTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::CredentialResolving => "credential_resolving",
            Self::Invoking => "invoking",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::TimedOut => "timed_out",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for AgentCallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
