//! Transport adapter implementations.

pub mod scripted;

pub use scripted::{RecordedInvocation, ScriptedAgentTransport};
