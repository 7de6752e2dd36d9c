//! Shared fixtures for in-memory platform tests.

use crate::test_helpers::EnvVarGuard;
use camino::Utf8PathBuf;
use gatehouse::config::{DEFAULT_TIMEOUT_ENV, MAX_CONCURRENCY_ENV};
use gatehouse::agent_registry::domain::AgentId;
use gatehouse::credential::{adapters::memory::InMemoryVault, domain::TenantId};
use gatehouse::orchestrator::{adapters::ScriptedAgentTransport, services::TransportRouter};
use gatehouse::platform::{BootstrapError, Platform};
use gatehouse::registry_source::{JsonFileRegistrySource, RegistrySource};
use gatehouse::service_catalog::domain::ServiceId;
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Platform type used across the in-memory tests.
pub type TestPlatform = Platform<InMemoryVault, DefaultClock>;

/// An OpenAI-shaped key that passes the fixture format.
pub const OPENAI_KEY: &str = "sk-proj0123456789abcdefghijABCDEFGHIJklmn";

/// A second OpenAI-shaped key used for rotation.
pub const ROTATED_OPENAI_KEY: &str = "sk-proj9876543210zyxwvutsrqZYXWVUTSRQponm";

/// An Anthropic-shaped key that passes the fixture format.
pub const ANTHROPIC_KEY: &str = "sk-ant-REDACTED";

/// Directory holding the registry fixture documents.
#[must_use]
pub fn fixtures_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Opens the bundled registry document.
#[fixture]
pub fn registry_document() -> JsonFileRegistrySource {
    JsonFileRegistrySource::open(&fixtures_dir(), "registry.json")
        .expect("fixtures directory should open")
}

/// Wires a platform over a fresh vault with every category routed to
/// `transport`, ignoring any settings overrides in the environment.
///
/// # Errors
///
/// Returns the bootstrap failure unchanged.
pub fn bootstrap_with(
    source: &impl RegistrySource,
    transport: &ScriptedAgentTransport,
) -> Result<TestPlatform, BootstrapError> {
    let _env = EnvVarGuard::cleared(&[DEFAULT_TIMEOUT_ENV, MAX_CONCURRENCY_ENV]);
    bootstrap_in_current_env(source, transport)
}

/// Like [`bootstrap_with`] but reads the environment as it is.
///
/// Callers must hold an [`EnvVarGuard`].
///
/// # Errors
///
/// Returns the bootstrap failure unchanged.
pub fn bootstrap_in_current_env(
    source: &impl RegistrySource,
    transport: &ScriptedAgentTransport,
) -> Result<TestPlatform, BootstrapError> {
    Platform::bootstrap(
        source,
        Arc::new(InMemoryVault::new()),
        TransportRouter::uniform(Arc::new(transport.clone())),
        Arc::new(DefaultClock),
    )
}

/// Returns a tenant identifier, panicking on invalid test input.
#[must_use]
pub fn tenant(raw: &str) -> TenantId {
    TenantId::new(raw).expect("valid tenant id")
}

/// Returns a service identifier, panicking on invalid test input.
#[must_use]
pub fn service(raw: &str) -> ServiceId {
    ServiceId::new(raw).expect("valid service id")
}

/// Returns an agent identifier, panicking on invalid test input.
#[must_use]
pub fn agent(raw: &str) -> AgentId {
    AgentId::new(raw).expect("valid agent id")
}
