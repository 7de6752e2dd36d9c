//! Tenant credential lifecycle against the bundled catalogue.

use super::helpers::{
    ANTHROPIC_KEY, OPENAI_KEY, ROTATED_OPENAI_KEY, TestPlatform, bootstrap_with,
    registry_document, service, tenant,
};
use gatehouse::credential::services::ByokError;
use gatehouse::orchestrator::adapters::ScriptedAgentTransport;
use gatehouse::registry_source::JsonFileRegistrySource;
use gatehouse::service_catalog::domain::KeyFormatViolation;
use rstest::{fixture, rstest};

#[fixture]
fn platform(registry_document: JsonFileRegistrySource) -> TestPlatform {
    bootstrap_with(&registry_document, &ScriptedAgentTransport::new())
        .expect("bundled document should bootstrap")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_key_is_masked_and_readable(platform: TestPlatform) {
    let acme = tenant("acme");
    let openai = service("openai");

    let stored = platform
        .byok()
        .store_credential(&acme, &openai, OPENAI_KEY)
        .await
        .expect("valid key should be stored");
    assert_eq!(stored.masked_key().as_str(), "sk-pr****klmn");
    assert_eq!(stored.sealed().version(), 1);

    let handle = platform
        .byok()
        .get_credential(&acme, &openai)
        .await
        .expect("stored key should be readable");
    assert_eq!(handle.expose(), OPENAI_KEY);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn key_for_another_provider_is_rejected(platform: TestPlatform) {
    let result = platform
        .byok()
        .store_credential(&tenant("acme"), &service("anthropic"), OPENAI_KEY)
        .await;

    match result {
        Err(ByokError::InvalidFormat {
            service_id,
            violation: KeyFormatViolation::MissingPrefix { expected },
        }) => {
            assert_eq!(service_id, service("anthropic"));
            assert_eq!(expected, "sk-ant-");
        }
        other => panic!("expected a missing prefix violation, got {other:?}"),
    }
    assert!(
        platform
            .byok()
            .list_credentials(&tenant("acme"))
            .await
            .expect("list")
            .is_empty()
    );
}

#[rstest]
#[case("0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef", true)]
#[case("0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdeg", false)]
#[case("0123456789abcdef", false)]
fn hex_key_rules_are_enforced(
    platform: TestPlatform,
    #[case] key: &str,
    #[case] accepted: bool,
) {
    let result = platform
        .byok()
        .validate_key_format(&service("serpapi"), key);
    assert_eq!(result.is_ok(), accepted, "{result:?}");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rotation_replaces_the_current_key(platform: TestPlatform) {
    let acme = tenant("acme");
    let openai = service("openai");
    let first = platform
        .byok()
        .store_credential(&acme, &openai, OPENAI_KEY)
        .await
        .expect("first key stored");

    let rotated = platform
        .byok()
        .store_credential(&acme, &openai, ROTATED_OPENAI_KEY)
        .await
        .expect("rotated key stored");

    assert_eq!(rotated.sealed().version(), 2);
    assert_ne!(rotated.fingerprint(), first.fingerprint());
    let handle = platform
        .byok()
        .get_credential(&acme, &openai)
        .await
        .expect("rotated key readable");
    assert_eq!(handle.expose(), ROTATED_OPENAI_KEY);
    assert_eq!(platform.byok().list_credentials(&acme).await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tenants_never_see_each_others_keys(platform: TestPlatform) {
    platform
        .byok()
        .store_credential(&tenant("acme"), &service("openai"), OPENAI_KEY)
        .await
        .expect("acme key stored");

    let result = platform
        .byok()
        .get_credential(&tenant("globex"), &service("openai"))
        .await;

    assert!(matches!(result, Err(ByokError::NotFound(_))));
    assert!(
        platform
            .byok()
            .list_credentials(&tenant("globex"))
            .await
            .expect("list")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_is_ordered_by_service(platform: TestPlatform) {
    let acme = tenant("acme");
    platform
        .byok()
        .store_credential(&acme, &service("openai"), OPENAI_KEY)
        .await
        .expect("openai key stored");
    platform
        .byok()
        .store_credential(&acme, &service("anthropic"), ANTHROPIC_KEY)
        .await
        .expect("anthropic key stored");

    let listed = platform.byok().list_credentials(&acme).await.expect("list");
    let services: Vec<&str> = listed.iter().map(|c| c.service_id().as_str()).collect();
    assert_eq!(services, ["anthropic", "openai"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_key_is_gone(platform: TestPlatform) {
    let acme = tenant("acme");
    let openai = service("openai");
    platform
        .byok()
        .store_credential(&acme, &openai, OPENAI_KEY)
        .await
        .expect("key stored");

    let existed = platform
        .byok()
        .delete_credential(&acme, &openai)
        .await
        .expect("delete succeeds");
    let again = platform
        .byok()
        .delete_credential(&acme, &openai)
        .await
        .expect("second delete succeeds");

    assert!(existed);
    assert!(!again);
    assert!(matches!(
        platform.byok().get_credential(&acme, &openai).await,
        Err(ByokError::NotFound(_))
    ));
    assert_eq!(
        platform
            .byok()
            .credential_metadata(&acme, &openai)
            .await
            .expect("metadata"),
        None
    );
}
