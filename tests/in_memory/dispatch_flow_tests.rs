//! Dispatch through a bootstrapped platform.

use super::helpers::{
    ANTHROPIC_KEY, OPENAI_KEY, TestPlatform, agent, bootstrap_with, registry_document, service,
    tenant,
};
use gatehouse::agent_registry::domain::AgentCategory;
use gatehouse::orchestrator::{
    adapters::ScriptedAgentTransport,
    domain::{
        AgentSelector, DispatchMode, ErrorKind, OrchestrationRequest, OutcomeStatus, SkipReason,
    },
    services::DispatchError,
};
use gatehouse::registry_source::JsonFileRegistrySource;
use rstest::{fixture, rstest};
use serde_json::json;
use std::time::Duration;

struct Scene {
    platform: TestPlatform,
    transport: ScriptedAgentTransport,
}

impl Scene {
    async fn with_openai_key(self) -> Self {
        self.platform
            .byok()
            .store_credential(&tenant("acme"), &service("openai"), OPENAI_KEY)
            .await
            .expect("openai key stored");
        self
    }
}

#[fixture]
fn scene(registry_document: JsonFileRegistrySource) -> Scene {
    let transport = ScriptedAgentTransport::new();
    let platform =
        bootstrap_with(&registry_document, &transport).expect("bundled document should bootstrap");
    Scene {
        platform,
        transport,
    }
}

fn research_fan_out() -> OrchestrationRequest {
    OrchestrationRequest::new(
        tenant("acme"),
        AgentSelector::category(AgentCategory::Research),
        json!({ "topic": "battery recycling" }),
    )
    .with_mode(DispatchMode::FanOut)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fan_out_uses_stored_keys_and_skips_missing_ones(scene: Scene) {
    let scene = scene.with_openai_key().await;

    let result = scene
        .platform
        .orchestrator()
        .dispatch(&research_fan_out())
        .await
        .expect("dispatch succeeds");

    let summary: Vec<(&str, OutcomeStatus)> = result
        .outcomes()
        .iter()
        .map(|outcome| (outcome.agent_id().as_str(), outcome.status()))
        .collect();
    assert_eq!(
        summary,
        [
            ("web_researcher", OutcomeStatus::Succeeded),
            ("market_analyst", OutcomeStatus::Skipped),
            ("paper_digest", OutcomeStatus::Succeeded),
        ]
    );
    let analyst = result.outcomes().get(1).expect("analyst outcome");
    assert_eq!(analyst.skip_reason(), Some(SkipReason::MissingCredential));

    let calls = scene.transport.invocations();
    let researcher_call = calls
        .iter()
        .find(|call| call.agent_id == agent("web_researcher"))
        .expect("researcher was called");
    let key = researcher_call
        .credential
        .as_ref()
        .expect("researcher received a credential");
    assert_eq!(key.service_id(), &service("openai"));
    let digest_call = calls
        .iter()
        .find(|call| call.agent_id == agent("paper_digest"))
        .expect("digest was called");
    assert_eq!(digest_call.credential, None);
    assert!(calls.iter().all(|call| call.agent_id != agent("market_analyst")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn adding_the_missing_key_completes_the_fan_out(scene: Scene) {
    let scene = scene.with_openai_key().await;
    scene
        .platform
        .byok()
        .store_credential(&tenant("acme"), &service("anthropic"), ANTHROPIC_KEY)
        .await
        .expect("anthropic key stored");

    let result = scene
        .platform
        .orchestrator()
        .dispatch(&research_fan_out())
        .await
        .expect("dispatch succeeds");

    assert_eq!(result.succeeded().count(), 3);
    let analyst = result.outcomes().get(1).expect("analyst outcome");
    assert_eq!(
        analyst.output(),
        Some(&json!({
            "agent_id": "market_analyst",
            "echo": { "topic": "battery recycling" },
        }))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deactivated_agents_leave_the_fan_out(scene: Scene) {
    let scene = scene.with_openai_key().await;
    scene
        .platform
        .registry()
        .deactivate(&agent("web_researcher"))
        .expect("deactivate");

    let result = scene
        .platform
        .orchestrator()
        .dispatch(&research_fan_out())
        .await
        .expect("dispatch succeeds");

    let ids: Vec<&str> = result
        .outcomes()
        .iter()
        .map(|outcome| outcome.agent_id().as_str())
        .collect();
    assert_eq!(ids, ["market_analyst", "paper_digest"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn explicit_inactive_agent_is_reported_not_called(scene: Scene) {
    let request = OrchestrationRequest::new(
        tenant("acme"),
        AgentSelector::Agent(agent("legacy_crawler")),
        json!({}),
    );

    let result = scene
        .platform
        .orchestrator()
        .dispatch(&request)
        .await
        .expect("dispatch succeeds");

    let outcome = result.outcomes().first().expect("one outcome");
    assert_eq!(outcome.skip_reason(), Some(SkipReason::AgentInactive));
    assert!(scene.transport.invocations().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn slow_agent_times_out_and_is_retryable(registry_document: JsonFileRegistrySource) {
    let transport = ScriptedAgentTransport::new().respond_after(
        agent("paper_digest"),
        Duration::from_secs(5),
        json!({ "late": true }),
    );
    let platform =
        bootstrap_with(&registry_document, &transport).expect("bundled document should bootstrap");
    let request = OrchestrationRequest::new(
        tenant("acme"),
        AgentSelector::Agent(agent("paper_digest")),
        json!({}),
    )
    .with_timeout(Duration::from_millis(100));

    let result = platform
        .orchestrator()
        .dispatch(&request)
        .await
        .expect("dispatch succeeds");

    let outcome = result.outcomes().first().expect("one outcome");
    assert_eq!(outcome.error_kind(), Some(ErrorKind::Timeout));
    assert_eq!(result.retryable_agent_ids(), [&agent("paper_digest")]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn category_without_agents_is_an_error(scene: Scene) {
    let request = OrchestrationRequest::new(
        tenant("acme"),
        AgentSelector::category(AgentCategory::Support),
        json!({}),
    )
    .with_mode(DispatchMode::FanOut);

    let result = scene.platform.orchestrator().dispatch(&request).await;

    assert!(matches!(
        result,
        Err(DispatchError::NoMatchingAgents {
            category: AgentCategory::Support
        })
    ));
}
