//! Shared world state for credential storage BDD scenarios.

use std::sync::Arc;

use gatehouse::credential::{
    adapters::memory::InMemoryVault,
    domain::{Credential, CredentialHandle, TenantId},
    services::{ByokError, ByokManager},
};
use gatehouse::service_catalog::domain::ServiceId;
use mockable::DefaultClock;
use rstest::fixture;

/// Manager type used by the BDD world.
pub type TestByokManager = ByokManager<InMemoryVault, DefaultClock>;

/// Scenario world for credential storage behaviour tests.
#[derive(Default)]
pub struct CredentialWorld {
    pub vault: Arc<InMemoryVault>,
    pub manager: Option<TestByokManager>,
    pub last_store: Option<Result<Credential, ByokError>>,
    pub last_read: Option<Result<CredentialHandle, ByokError>>,
}

impl CredentialWorld {
    /// Returns the manager built by the catalogue step.
    pub fn manager(&self) -> Result<&TestByokManager, eyre::Report> {
        self.manager
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no catalogue configured in scenario world"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CredentialWorld {
    CredentialWorld::default()
}

/// Parses a tenant identifier from step text.
pub fn tenant(raw: &str) -> Result<TenantId, eyre::Report> {
    TenantId::new(raw).map_err(|err| eyre::eyre!("invalid tenant in scenario: {err}"))
}

/// Parses a service identifier from step text.
pub fn service(raw: &str) -> Result<ServiceId, eyre::Report> {
    ServiceId::new(raw).map_err(|err| eyre::eyre!("invalid service in scenario: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
