//! Catalogue of external services a tenant may bring credentials for.
//!
//! Each entry describes one third-party service: its display metadata, the
//! category it is grouped under, and the [`domain::KeyFormat`] its API keys
//! must satisfy. The catalogue is built once at start-up and is read-only
//! afterwards. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - The read-only catalogue service in [`services`]

pub mod domain;
pub mod services;
