//! Registry of automated agents available to tenants.
//!
//! Agents are loaded once at start-up from a registry source and identified
//! by a stable [`domain::AgentId`]. Only their lifecycle status may change
//! afterwards, through the synchronised update path on
//! [`services::AgentRegistry`]. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - The registry service in [`services`]

pub mod domain;
pub mod services;
