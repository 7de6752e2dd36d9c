//! Port contracts for reaching agents.

pub mod transport;

pub use transport::{AgentInvocation, AgentTransport, TransportError, TransportResult};

#[cfg(test)]
pub use transport::MockAgentTransport;
