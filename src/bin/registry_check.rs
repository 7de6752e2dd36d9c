//! Validates a registry document and reports what it declares.
//!
//! Usage:
//!
//! ```text
//! gatehouse-registry-check <dir> <file>
//! ```
//!
//! `file` is read relative to `dir`. The document is validated exactly as
//! at platform start-up: definitions must parse, identifiers must be
//! unique, and every agent's required service must exist in the catalogue.
//! Logging verbosity follows `RUST_LOG` (default `info`).

use camino::Utf8PathBuf;
use gatehouse::agent_registry::domain::AgentCategory;
use gatehouse::credential::adapters::memory::InMemoryVault;
use gatehouse::orchestrator::services::TransportRouter;
use gatehouse::platform::{BootstrapError, Platform};
use gatehouse::registry_source::{JsonFileRegistrySource, RegistrySourceError};
use mockable::DefaultClock;
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Errors that can occur while checking a registry document.
#[derive(Debug, Error)]
enum CheckError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Source(#[from] RegistrySourceError),
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(env::args_os().map(|arg| arg.into_string())) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "registry check failed");
            ExitCode::FAILURE
        }
    }
}

fn run(
    args: impl Iterator<Item = Result<String, std::ffi::OsString>>,
) -> Result<(), CheckError> {
    let (dir, file) = parse_args(args)?;
    let source = JsonFileRegistrySource::open(&dir, file)?;
    let platform = Platform::bootstrap(
        &source,
        Arc::new(InMemoryVault::new()),
        TransportRouter::new(),
        Arc::new(DefaultClock),
    )?;
    report(&platform)
}

fn parse_args(
    mut args: impl Iterator<Item = Result<String, std::ffi::OsString>>,
) -> Result<(Utf8PathBuf, Utf8PathBuf), CheckError> {
    let _program = args.next();
    let mut next_path = |name: &str| -> Result<Utf8PathBuf, CheckError> {
        args.next()
            .ok_or_else(|| CheckError::InvalidArgs(format!("missing {name} argument")))?
            .map(Utf8PathBuf::from)
            .map_err(|_| CheckError::InvalidArgs(format!("{name} is not valid UTF-8")))
    };
    let dir = next_path("directory")?;
    let file = next_path("file")?;
    if file.is_absolute() {
        return Err(CheckError::InvalidArgs(format!(
            "file must be relative to the directory: {file}"
        )));
    }
    if let Some(extra) = args.next() {
        let shown = extra.unwrap_or_else(|raw| raw.to_string_lossy().into_owned());
        return Err(CheckError::InvalidArgs(format!(
            "unexpected extra argument: {shown}"
        )));
    }
    Ok((dir, file))
}

fn report(
    platform: &Platform<InMemoryVault, DefaultClock>,
) -> Result<(), CheckError> {
    let registry = platform.registry();
    for category in platform.catalog().get_service_categories() {
        let services: Vec<&str> = platform
            .catalog()
            .get_services_by_category(&category)
            .into_iter()
            .map(|entry| entry.service_id().as_str())
            .collect();
        info!(category = %category, services = ?services, "service category");
    }
    for category in AgentCategory::ALL {
        let agents = registry
            .get_agents_by_category(category)
            .map_err(BootstrapError::from)?;
        if agents.is_empty() {
            continue;
        }
        let active = agents.iter().filter(|agent| agent.is_active()).count();
        info!(
            category = %category,
            agents = agents.len(),
            active,
            "agent category"
        );
    }
    info!(
        services = platform.catalog().len(),
        agents = registry.agent_count().map_err(BootstrapError::from)?,
        "registry document is valid"
    );
    Ok(())
}
