//! Shared world state for dispatch BDD scenarios.

use std::sync::Arc;

use camino::Utf8PathBuf;
use gatehouse::agent_registry::domain::AgentId;
use gatehouse::credential::adapters::memory::InMemoryVault;
use gatehouse::orchestrator::{
    adapters::ScriptedAgentTransport,
    domain::{AgentOutcome, OrchestrationResult},
    services::{DispatchError, TransportRouter},
};
use gatehouse::platform::Platform;
use gatehouse::registry_source::JsonFileRegistrySource;
use mockable::DefaultClock;
use rstest::fixture;

/// Platform type used by the BDD world.
pub type TestPlatform = Platform<InMemoryVault, DefaultClock>;

/// Scenario world for dispatch behaviour tests.
///
/// The platform is wired on first use so that given steps can script the
/// transport before any agent is called.
#[derive(Default)]
pub struct DispatchWorld {
    pub registry_loaded: bool,
    pub transport: ScriptedAgentTransport,
    pub platform: Option<TestPlatform>,
    pub last_dispatch: Option<Result<OrchestrationResult, DispatchError>>,
}

impl DispatchWorld {
    /// Returns the platform, bootstrapping it from the bundled document on
    /// first call.
    pub fn platform(&mut self) -> Result<&TestPlatform, eyre::Report> {
        if !self.registry_loaded {
            return Err(eyre::eyre!("no registry loaded in scenario world"));
        }
        if self.platform.is_none() {
            let dir = Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
            let source = JsonFileRegistrySource::open(&dir, "registry.json")?;
            let platform = Platform::bootstrap(
                &source,
                Arc::new(InMemoryVault::new()),
                TransportRouter::uniform(Arc::new(self.transport.clone())),
                Arc::new(DefaultClock),
            )?;
            self.platform = Some(platform);
        }
        self.platform
            .as_ref()
            .ok_or_else(|| eyre::eyre!("platform was not bootstrapped"))
    }

    /// Returns the outcome for an agent in the last successful dispatch.
    pub fn outcome(&self, raw_agent_id: &str) -> Result<&AgentOutcome, eyre::Report> {
        let agent_id = AgentId::new(raw_agent_id)?;
        self.result()?
            .outcomes()
            .iter()
            .find(|outcome| outcome.agent_id() == &agent_id)
            .ok_or_else(|| eyre::eyre!("no outcome for agent {agent_id}"))
    }

    /// Returns the last dispatch result, failing when it was rejected.
    pub fn result(&self) -> Result<&OrchestrationResult, eyre::Report> {
        match self.last_dispatch.as_ref() {
            Some(Ok(result)) => Ok(result),
            Some(Err(err)) => Err(eyre::eyre!("dispatch was rejected: {err}")),
            None => Err(eyre::eyre!("missing dispatch result")),
        }
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DispatchWorld {
    DispatchWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
