//! Start-up tests: registry documents in, wired platform or error out.

use super::helpers::{agent, bootstrap_with, fixtures_dir, registry_document, service};
use gatehouse::agent_registry::{
    domain::{AgentCategory, AgentDefinition, AgentDomainError},
    services::RegistryError,
};
use gatehouse::orchestrator::adapters::ScriptedAgentTransport;
use gatehouse::platform::BootstrapError;
use gatehouse::registry_source::{
    JsonFileRegistrySource, RegistrySnapshot, RegistrySourceError, StaticRegistrySource,
};
use gatehouse::service_catalog::{
    domain::{ServiceCategory, ServiceDefinition},
    services::CatalogError,
};
use rstest::rstest;
use std::time::Duration;

fn service_definition(service_id: &str, category: &str) -> ServiceDefinition {
    ServiceDefinition {
        service_id: service_id.to_owned(),
        display_name: service_id.to_uppercase(),
        category: category.to_owned(),
        key_format: Default::default(),
        docs_url: None,
    }
}

fn agent_definition(agent_id: &str, category: &str, required: Option<&str>) -> AgentDefinition {
    AgentDefinition {
        agent_id: agent_id.to_owned(),
        name: agent_id.replace('_', " "),
        category: category.to_owned(),
        capabilities: vec!["summarize".to_owned()],
        required_service_id: required.map(str::to_owned),
        description: None,
        status: None,
    }
}

fn bootstrap_snapshot(snapshot: RegistrySnapshot) -> Result<(), BootstrapError> {
    bootstrap_with(
        &StaticRegistrySource::new(snapshot),
        &ScriptedAgentTransport::new(),
    )
    .map(drop)
}

#[rstest]
fn bundled_document_wires_catalog_registry_and_settings(
    registry_document: JsonFileRegistrySource,
) {
    let platform = bootstrap_with(&registry_document, &ScriptedAgentTransport::new())
        .expect("bundled document should bootstrap");

    assert_eq!(platform.catalog().len(), 4);
    let categories: Vec<String> = platform
        .catalog()
        .get_service_categories()
        .iter()
        .map(|category| category.as_str().to_owned())
        .collect();
    assert_eq!(categories, ["ai_models", "communication", "search"]);

    let ai_models = ServiceCategory::new("ai_models").expect("valid category");
    assert_eq!(
        platform.byok().get_services_by_category(&ai_models).len(),
        2
    );

    let registry = platform.registry();
    assert_eq!(registry.agent_count().expect("count"), 6);
    assert_eq!(registry.get_active_agents().expect("active").len(), 5);
    let research = registry
        .get_agents_by_category(AgentCategory::Research)
        .expect("research agents");
    assert_eq!(research.len(), 4);

    let researcher = registry
        .get_agent_by_id(&agent("web_researcher"))
        .expect("web researcher registered");
    assert_eq!(researcher.required_service(), Some(&service("openai")));

    assert_eq!(
        platform.settings().default_timeout,
        Duration::from_millis(2000)
    );
    assert_eq!(platform.settings().max_concurrency, 4);
}

#[rstest]
fn search_matches_names_and_capabilities(registry_document: JsonFileRegistrySource) {
    let platform = bootstrap_with(&registry_document, &ScriptedAgentTransport::new())
        .expect("bundled document should bootstrap");

    let by_name = platform.registry().search_agents("researcher").expect("search");
    let ids: Vec<&str> = by_name.iter().map(|a| a.id().as_str()).collect();
    assert_eq!(ids, ["web_researcher"]);

    let by_capability = platform.registry().search_agents("NOTIFY").expect("search");
    assert_eq!(by_capability.len(), 1);
}

#[rstest]
fn document_without_settings_uses_defaults() {
    let snapshot = RegistrySnapshot {
        services: vec![service_definition("openai", "ai_models")],
        agents: vec![agent_definition("writer", "content", Some("openai"))],
        orchestrator: None,
    };
    let platform = bootstrap_with(
        &StaticRegistrySource::new(snapshot),
        &ScriptedAgentTransport::new(),
    )
    .expect("snapshot should bootstrap");

    assert_eq!(platform.settings().default_timeout, Duration::from_secs(30));
    assert_eq!(platform.settings().max_concurrency, 8);
}

#[rstest]
fn agent_requiring_unlisted_service_is_rejected() {
    let snapshot = RegistrySnapshot {
        services: vec![service_definition("openai", "ai_models")],
        agents: vec![agent_definition("billing_bot", "automation", Some("stripe"))],
        orchestrator: None,
    };

    let result = bootstrap_snapshot(snapshot);

    match result {
        Err(BootstrapError::UnknownRequiredService {
            agent_id,
            service_id,
        }) => {
            assert_eq!(agent_id, agent("billing_bot"));
            assert_eq!(service_id, service("stripe"));
        }
        other => panic!("expected UnknownRequiredService, got {other:?}"),
    }
}

#[rstest]
fn duplicate_service_ids_are_rejected() {
    let snapshot = RegistrySnapshot {
        services: vec![
            service_definition("openai", "ai_models"),
            service_definition("OpenAI", "ai_models"),
        ],
        ..RegistrySnapshot::default()
    };

    let result = bootstrap_snapshot(snapshot);

    assert!(matches!(
        result,
        Err(BootstrapError::Catalog(CatalogError::DuplicateServiceId(ref id))) if id.as_str() == "openai"
    ));
}

#[rstest]
fn duplicate_agent_ids_are_rejected() {
    let snapshot = RegistrySnapshot {
        agents: vec![
            agent_definition("scout", "research", None),
            agent_definition("scout", "analytics", None),
        ],
        ..RegistrySnapshot::default()
    };

    let result = bootstrap_snapshot(snapshot);

    assert!(matches!(
        result,
        Err(BootstrapError::Registry(RegistryError::DuplicateAgentId(ref id))) if id.as_str() == "scout"
    ));
}

#[rstest]
fn unknown_agent_category_names_the_agent() {
    let snapshot = RegistrySnapshot {
        agents: vec![agent_definition("juggler", "circus", None)],
        ..RegistrySnapshot::default()
    };

    let result = bootstrap_snapshot(snapshot);

    assert!(matches!(
        result,
        Err(BootstrapError::InvalidAgent {
            ref agent_id,
            source: AgentDomainError::Category(_),
        }) if agent_id == "juggler"
    ));
}

#[rstest]
fn malformed_service_id_names_the_service() {
    let snapshot = RegistrySnapshot {
        services: vec![service_definition("open ai", "ai_models")],
        ..RegistrySnapshot::default()
    };

    let result = bootstrap_snapshot(snapshot);

    assert!(matches!(
        result,
        Err(BootstrapError::InvalidService { ref service_id, .. }) if service_id == "open ai"
    ));
}

#[rstest]
fn missing_document_surfaces_a_read_error() {
    let source = JsonFileRegistrySource::open(&fixtures_dir(), "absent.json")
        .expect("fixtures directory should open");

    let result = bootstrap_with(&source, &ScriptedAgentTransport::new());

    assert!(matches!(
        result,
        Err(BootstrapError::Source(RegistrySourceError::Read { .. }))
    ));
}
