use modindex_lib::api::{FetchError, FetchGateway, GatewayOptions, RepositoryGateway};
use modindex_lib::{run_validation, SilentProgressReporter, ValidationError, ValidatorConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn options() -> GatewayOptions {
    GatewayOptions {
        timeout: Duration::from_secs(5),
        max_retries: 2,
        retry_delay: Duration::from_millis(10),
    }
}

fn gateway(server: &MockServer) -> RepositoryGateway {
    let _ = env_logger::builder().is_test(true).try_init();
    RepositoryGateway::with_options(&format!("{}/mods", server.uri()), options()).unwrap()
}

fn index_json(identifiers: &[&str]) -> Value {
    json!({
        "indexVersion": "3.1.0",
        "identifiers": identifiers,
    })
}

fn manifest_json(generic: &str) -> Value {
    json!({
        "indexVersion": "3.1.0",
        "genericIdentifier": generic,
        "fancyName": "Example Mod",
        "author": "Example Author",
        "license": "MIT",
        "curseForgeId": 238222,
        "modrinthId": "AANobbMI",
        "links": {
            "issue": "https://github/example/mod/issues",
            "sourceControl": "https://github/example/mod",
            "others": [{ "linkName": "Wiki", "url": "https://wiki/example" }]
        },
        "files": [{
            "fileName": "example-mod-1",
            "mcVersions": ["1.20.1", "1.20.2-pre1"],
            "shortSha512Hash": "abc123def456789",
            "downloadUrls": ["https://cdn/example-mod"],
            "curseDownloadAvailable": true,
            "relationsToOtherMods": {
                "required": ["fabric:fabric-api"],
                "incompatible": []
            }
        }]
    })
}

async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetches_documents_by_path() {
    let server = MockServer::start().await;
    mount_json(&server, "/mods/index.json", index_json(&["fabric:sodium:0123456789abcde"])).await;
    mount_json(&server, "/mods/fabric/sodium.json", manifest_json("fabric:sodium")).await;

    let gateway = gateway(&server);
    let index = tokio_test::assert_ok!(gateway.fetch_index().await);
    assert_eq!(index.index_version, "3.1.0");
    assert_eq!(index.identifiers, vec!["fabric:sodium:0123456789abcde"]);

    let manifest = tokio_test::assert_ok!(gateway.fetch_manifest("fabric:sodium").await);
    assert_eq!(manifest.generic_identifier, "fabric:sodium");
    assert_eq!(manifest.curse_forge_id, Some(238222));
    assert_eq!(manifest.links.others[0].link_name, "Wiki");
    assert_eq!(
        manifest.files[0].relations_to_other_mods.required,
        vec!["fabric:fabric-api"]
    );
}

#[tokio::test]
async fn test_end_to_end_validation() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/mods/index.json",
        index_json(&[
            "fabric:sodium:0123456789abcde",
            "quilt:sodium:0123456789abcde",
            "forge:jei:abc123def456789",
        ]),
    )
    .await;
    for (route, generic) in [
        ("/mods/fabric/sodium.json", "fabric:sodium"),
        ("/mods/quilt/sodium.json", "quilt:sodium"),
        ("/mods/forge/jei.json", "forge:jei"),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(manifest_json(generic)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let summary = run_validation(
        &gateway(&server),
        &ValidatorConfig::default(),
        Arc::new(SilentProgressReporter),
    )
    .await
    .unwrap();
    assert_eq!(summary.identifiers, 3);
    assert_eq!(summary.manifests, 3);
}

#[tokio::test]
async fn test_invalid_index_requests_no_manifests() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/mods/index.json",
        json!({ "indexVersion": "1.2", "identifiers": ["fabric:sodium:0123456789abcde"] }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/mods/fabric/sodium.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(manifest_json("fabric:sodium")))
        .expect(0)
        .mount(&server)
        .await;

    let result = run_validation(
        &gateway(&server),
        &ValidatorConfig::default(),
        Arc::new(SilentProgressReporter),
    )
    .await;
    assert!(matches!(result, Err(ValidationError::FormatViolation { .. })));
}

#[tokio::test]
async fn test_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mods/index.json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .with_priority(1)
        .expect(2)
        .mount(&server)
        .await;
    mount_json(&server, "/mods/index.json", index_json(&[])).await;

    let index = gateway(&server).fetch_index().await.unwrap();
    assert!(index.identifiers.is_empty());
}

#[tokio::test]
async fn test_gives_up_after_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mods/index.json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let err = gateway(&server).fetch_index().await.unwrap_err();
    assert!(err.is_transient());
    assert!(matches!(err, FetchError::Status { status, .. } if status.as_u16() == 500));
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mods/fabric/missing.json"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = tokio_test::assert_err!(gateway(&server).fetch_manifest("fabric:missing").await);
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_malformed_manifest() {
    let server = MockServer::start().await;
    mount_json(&server, "/mods/index.json", index_json(&["fabric:broken:0123456789abcde"])).await;
    Mock::given(method("GET"))
        .and(path("/mods/fabric/broken.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ \"indexVersion\": "))
        .expect(1)
        .mount(&server)
        .await;

    let result = run_validation(
        &gateway(&server),
        &ValidatorConfig::default(),
        Arc::new(SilentProgressReporter),
    )
    .await;

    match result {
        Err(ValidationError::ManifestFetch { identifier, location, source }) => {
            assert_eq!(identifier, "fabric:broken");
            assert!(location.ends_with("/mods/"));
            assert!(source.is_deserialize());
        }
        other => panic!("expected a manifest fetch failure, got {other:?}"),
    }
}
