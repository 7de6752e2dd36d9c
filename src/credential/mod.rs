//! Bring-your-own-key credential management.
//!
//! Tenants store API keys for catalogue services. Keys are validated
//! against the catalogue's [`KeyFormat`](crate::service_catalog::domain::KeyFormat),
//! scored, masked for display and sealed through a [`ports::VaultAdapter`].
//! Plaintext only lives inside [`domain::ApiKey`] values for the duration of
//! the call that needs it. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The BYOK manager in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
