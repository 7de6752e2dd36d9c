//! Then steps for dispatch BDD scenarios.

use super::world::DispatchWorld;
use gatehouse::orchestrator::{
    domain::{ErrorKind, OutcomeStatus, SkipReason},
    services::DispatchError,
};
use rstest_bdd_macros::then;

#[then(r#"the outcomes are for "{agent_ids}" in that order"#)]
fn outcomes_in_order(world: &DispatchWorld, agent_ids: String) -> Result<(), eyre::Report> {
    let found: Vec<&str> = world
        .result()?
        .outcomes()
        .iter()
        .map(|outcome| outcome.agent_id().as_str())
        .collect();
    let expected: Vec<&str> = agent_ids.split(',').map(str::trim).collect();
    if found != expected {
        return Err(eyre::eyre!("expected outcomes {expected:?}, found {found:?}"));
    }
    Ok(())
}

#[then(r#"agent "{agent_id}" succeeded"#)]
fn agent_succeeded(world: &DispatchWorld, agent_id: String) -> Result<(), eyre::Report> {
    let outcome = world.outcome(&agent_id)?;
    if outcome.status() != OutcomeStatus::Succeeded || outcome.output().is_none() {
        return Err(eyre::eyre!("expected {agent_id} to succeed, got {outcome:?}"));
    }
    Ok(())
}

#[then(r#"agent "{agent_id}" was skipped for a missing credential"#)]
fn agent_skipped(world: &DispatchWorld, agent_id: String) -> Result<(), eyre::Report> {
    let outcome = world.outcome(&agent_id)?;
    if outcome.skip_reason() != Some(SkipReason::MissingCredential) {
        return Err(eyre::eyre!(
            "expected {agent_id} to be skipped for a missing credential, got {outcome:?}"
        ));
    }
    Ok(())
}

#[then(r#"agent "{agent_id}" failed with "{kind}""#)]
fn agent_failed(world: &DispatchWorld, agent_id: String, kind: String) -> Result<(), eyre::Report> {
    let outcome = world.outcome(&agent_id)?;
    let found = outcome.error_kind().map(ErrorKind::as_str);
    if outcome.status() != OutcomeStatus::Failed || found != Some(kind.as_str()) {
        return Err(eyre::eyre!(
            "expected {agent_id} to fail with {kind}, got {outcome:?}"
        ));
    }
    Ok(())
}

#[then(r#"the retryable agents are "{agent_ids}""#)]
fn retryable_agents(world: &DispatchWorld, agent_ids: String) -> Result<(), eyre::Report> {
    let found: Vec<&str> = world
        .result()?
        .retryable_agent_ids()
        .into_iter()
        .map(|id| id.as_str())
        .collect();
    let expected: Vec<&str> = agent_ids.split(',').map(str::trim).collect();
    if found != expected {
        return Err(eyre::eyre!("expected retryable {expected:?}, found {found:?}"));
    }
    Ok(())
}

#[then("the dispatch is rejected because the agent does not exist")]
fn dispatch_rejected_unknown_agent(world: &DispatchWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_dispatch
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing dispatch result"))?;
    if !matches!(result, Err(DispatchError::AgentNotFound(_))) {
        return Err(eyre::eyre!("expected AgentNotFound, got {result:?}"));
    }
    Ok(())
}
