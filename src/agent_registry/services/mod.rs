//! Application services for agent discovery and administration.

mod registry;

pub use registry::{AgentRegistry, RegistryError, RegistryResult};
