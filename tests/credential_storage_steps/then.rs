//! Then steps for credential storage BDD scenarios.

use super::world::{CredentialWorld, run_async, service, tenant};
use eyre::WrapErr;
use gatehouse::credential::{domain::Credential, services::ByokError};
use rstest_bdd_macros::then;

fn stored(world: &CredentialWorld) -> Result<&Credential, eyre::Report> {
    match world.last_store.as_ref() {
        Some(Ok(credential)) => Ok(credential),
        Some(Err(err)) => Err(eyre::eyre!("expected a stored credential, got {err}")),
        None => Err(eyre::eyre!("missing store result")),
    }
}

fn store_error(world: &CredentialWorld) -> Result<&ByokError, eyre::Report> {
    match world.last_store.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(credential)) => Err(eyre::eyre!(
            "expected the store to fail, stored {}",
            credential.masked_key()
        )),
        None => Err(eyre::eyre!("missing store result")),
    }
}

#[then(r#"the credential is stored with masked key "{masked}""#)]
fn credential_is_masked(world: &CredentialWorld, masked: String) -> Result<(), eyre::Report> {
    let credential = stored(world)?;
    if credential.masked_key().as_str() != masked {
        return Err(eyre::eyre!(
            "expected masked key {masked}, found {}",
            credential.masked_key()
        ));
    }
    Ok(())
}

#[then("the credential is at version {version:u64}")]
fn credential_version(world: &CredentialWorld, version: u64) -> Result<(), eyre::Report> {
    let found = stored(world)?.sealed().version();
    if found != version {
        return Err(eyre::eyre!("expected version {version}, found {found}"));
    }
    Ok(())
}

#[then(r#"tenant "{tenant_id}" reads back "{key}" for "{service_id}""#)]
fn tenant_reads_back(
    world: &CredentialWorld,
    tenant_id: String,
    key: String,
    service_id: String,
) -> Result<(), eyre::Report> {
    let handle = run_async(
        world
            .manager()?
            .get_credential(&tenant(&tenant_id)?, &service(&service_id)?),
    )
    .wrap_err("read credential back")?;
    if handle.expose() != key {
        return Err(eyre::eyre!("read back a different key than was stored"));
    }
    Ok(())
}

#[then(r#"tenant "{tenant_id}" has {count:usize} stored credentials"#)]
fn tenant_credential_count(
    world: &CredentialWorld,
    tenant_id: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let owner = tenant(&tenant_id)?;
    let listed = run_async(world.manager()?.list_credentials(&owner))
        .wrap_err("list credentials")?;
    if listed.len() != count {
        return Err(eyre::eyre!(
            "expected {count} credentials, found {}",
            listed.len()
        ));
    }
    Ok(())
}

#[then("the store fails with an invalid format error")]
fn store_fails_invalid_format(world: &CredentialWorld) -> Result<(), eyre::Report> {
    let err = store_error(world)?;
    if !matches!(err, ByokError::InvalidFormat { .. }) || !err.is_client_error() {
        return Err(eyre::eyre!("expected InvalidFormat error, got {err:?}"));
    }
    Ok(())
}

#[then("the store fails with an unknown service error")]
fn store_fails_unknown_service(world: &CredentialWorld) -> Result<(), eyre::Report> {
    let err = store_error(world)?;
    if !matches!(err, ByokError::UnknownService(_)) {
        return Err(eyre::eyre!("expected UnknownService error, got {err:?}"));
    }
    Ok(())
}

#[then("the store fails with a transient error")]
fn store_fails_transient(world: &CredentialWorld) -> Result<(), eyre::Report> {
    let err = store_error(world)?;
    if !err.is_transient() {
        return Err(eyre::eyre!("expected a transient error, got {err:?}"));
    }
    Ok(())
}

#[then("the read fails because no credential is stored")]
fn read_fails_not_found(world: &CredentialWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_read
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing read result"))?;
    if !matches!(result, Err(ByokError::NotFound(_))) {
        return Err(eyre::eyre!("expected NotFound error"));
    }
    Ok(())
}
