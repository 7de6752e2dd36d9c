//! Domain model for orchestration requests, call states and outcomes.

mod error;
mod outcome;
mod request;
mod state;

pub use error::{InvalidCallTransition, OrchestratorDomainError};
pub use outcome::{AgentOutcome, ErrorKind, OrchestrationResult, OutcomeStatus, SkipReason};
pub use request::{AgentSelector, DispatchMode, OrchestrationRequest};
pub use state::AgentCallState;
