//! Orchestration services.

mod dispatcher;
mod router;

pub use dispatcher::{AgentOrchestrator, DispatchError, DispatchResult};
pub use router::TransportRouter;
