//! Environment overrides applied during bootstrap.

use super::helpers::{bootstrap_in_current_env, registry_document};
use crate::test_helpers::EnvVarGuard;
use gatehouse::config::{ConfigError, DEFAULT_TIMEOUT_ENV, MAX_CONCURRENCY_ENV};
use gatehouse::orchestrator::adapters::ScriptedAgentTransport;
use gatehouse::platform::BootstrapError;
use gatehouse::registry_source::JsonFileRegistrySource;
use rstest::rstest;
use std::time::Duration;

#[rstest]
fn environment_overrides_document_settings(registry_document: JsonFileRegistrySource) {
    let _env = EnvVarGuard::apply(&[
        (DEFAULT_TIMEOUT_ENV, None),
        (MAX_CONCURRENCY_ENV, Some("2")),
    ]);

    let platform = bootstrap_in_current_env(&registry_document, &ScriptedAgentTransport::new())
        .expect("bootstrap with overrides");

    assert_eq!(
        platform.settings().default_timeout,
        Duration::from_millis(2000)
    );
    assert_eq!(platform.settings().max_concurrency, 2);
}

#[rstest]
fn timeout_override_is_read_in_milliseconds(registry_document: JsonFileRegistrySource) {
    let _env = EnvVarGuard::apply(&[
        (DEFAULT_TIMEOUT_ENV, Some("750")),
        (MAX_CONCURRENCY_ENV, None),
    ]);

    let platform = bootstrap_in_current_env(&registry_document, &ScriptedAgentTransport::new())
        .expect("bootstrap with overrides");

    assert_eq!(
        platform.settings().default_timeout,
        Duration::from_millis(750)
    );
    assert_eq!(platform.settings().max_concurrency, 4);
}

#[rstest]
#[case(DEFAULT_TIMEOUT_ENV, "0")]
#[case(MAX_CONCURRENCY_ENV, "many")]
fn malformed_override_aborts_bootstrap(
    registry_document: JsonFileRegistrySource,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let changes: Vec<(&'static str, Option<&str>)> = [DEFAULT_TIMEOUT_ENV, MAX_CONCURRENCY_ENV]
        .into_iter()
        .map(|var| (var, (var == name).then_some(value)))
        .collect();
    let _env = EnvVarGuard::apply(&changes);

    let result = bootstrap_in_current_env(&registry_document, &ScriptedAgentTransport::new());

    assert!(matches!(
        result,
        Err(BootstrapError::Config(ConfigError::InvalidEnv { name: reported, .. }))
            if reported == name
    ));
}
