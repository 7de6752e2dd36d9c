//! Gatehouse: tenant agent registry, bring-your-own-key credentials and
//! agent dispatch.
//!
//! This crate lets tenants register their own API keys for external
//! services, discover the automated agents available to them, and run
//! requests against one agent or fan them out to many, with each agent
//! receiving the tenant's credential for the service it needs.
//!
//! # Architecture
//!
//! Gatehouse follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for secret storage and agent
//!   transports
//! - **Adapters**: Concrete implementations of ports (in-memory vault,
//!   scripted transport)
//!
//! # Modules
//!
//! - [`service_catalog`]: Supported external services and their key formats
//! - [`agent_registry`]: Agents, categories, capabilities and search
//! - [`credential`]: Vault port and the BYOK credential manager
//! - [`orchestrator`]: Single and fan-out dispatch with per-agent outcomes
//! - [`registry_source`]: Start-up registry documents
//! - [`platform`]: Start-up wiring
//! - [`config`]: Orchestrator settings

pub mod agent_registry;
pub mod config;
pub mod credential;
pub mod orchestrator;
pub mod platform;
pub mod registry_source;
pub mod service_catalog;
