//! Agent orchestration for tenant requests.
//!
//! A request names one agent or a category with a capability filter, and is
//! dispatched to one candidate or fanned out to all of them. Each candidate
//! resolves the tenant's credential for its required service, then invokes
//! its transport under a per-agent timeout. Per-agent failures become
//! outcomes; only structural problems fail the dispatch. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Transport contract in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Routing and dispatch in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
