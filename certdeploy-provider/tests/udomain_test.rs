//! UDomain CDN Deployer 集成测试（wiremock）

mod common;

use certdeploy_provider::{DeployError, Deployer, UDomainConfig, UDomainDeployer};
use common::{domain_set, dummy_bundle, json_body};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "udomain-test-key";

fn deployer(server: &MockServer) -> UDomainDeployer {
    UDomainDeployer::builder(UDomainConfig {
        api_key: API_KEY.to_string(),
    })
    .endpoint(format!("{}/api", server.uri()))
    .build()
    .unwrap_or_else(|e| panic!("{e}"))
}

async fn mount_subdomains(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/c/v1/subdomain"))
        .and(header("Authorization", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "0",
            "message": "success",
            "payload": [
                {"subdomainID": 11, "subdomainName": "www.example.com", "subdomainStatus": "ACTIVE"},
                {"subdomainID": 12, "subdomainName": "img.example.com", "subdomainStatus": "PROCESSING"},
                {"subdomainID": 13, "subdomainName": "old.example.com", "subdomainStatus": "SUSPENDED"},
                {"subdomainID": 14, "subdomainName": "www.other.org", "subdomainStatus": "ACTIVE"}
            ]
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_udomain_uploads_once_and_binds_matches() {
    let server = MockServer::start().await;
    mount_subdomains(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/c/v1/certificate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "0",
            "message": "success",
            "payload": {"certificateID": 501}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/c/v1/configuration"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    require_ok!(
        deployer(&server)
            .deploy(&domain_set(&["*.example.com"]), &dummy_bundle())
            .await
    );

    let requests = server.received_requests().await.unwrap_or_default();
    let upload = require_some!(requests.iter().find(|r| r.url.path() == "/api/c/v1/certificate"));
    let upload = json_body(upload);
    let name = upload["certificateName"].as_str().unwrap_or_default();
    assert!(name.starts_with("*.example.com("), "{name}");
    assert_eq!(upload["publicKey"], dummy_bundle().cert_pem());

    let configured: Vec<serde_json::Value> = requests
        .iter()
        .filter(|r| r.url.path() == "/api/c/v1/configuration")
        .map(json_body)
        .collect();
    assert_eq!(
        configured,
        vec![
            json!({"configCategory": "HTTPS", "configItem": "CERTIFICATE", "configValue": {"certificateID": 501}, "subdomainID": 11}),
            json!({"configCategory": "HTTPS", "configItem": "CERTIFICATE", "configValue": {"certificateID": 501}, "subdomainID": 12}),
        ]
    );
}

#[tokio::test]
async fn test_udomain_no_match_skips_upload() {
    let server = MockServer::start().await;
    mount_subdomains(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/c/v1/certificate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    require_ok!(
        deployer(&server)
            .deploy(&domain_set(&["shop.example.net"]), &dummy_bundle())
            .await
    );
}

#[tokio::test]
async fn test_udomain_null_payload_means_no_subdomains() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/c/v1/subdomain"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "0",
            "message": "success",
            "payload": null
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/c/v1/certificate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    require_ok!(
        deployer(&server)
            .deploy(&domain_set(&["www.example.com"]), &dummy_bundle())
            .await
    );
}

#[tokio::test]
async fn test_udomain_envelope_error_is_api_error() {
    let server = MockServer::start().await;
    mount_subdomains(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/c/v1/certificate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "40001",
            "message": "certificate and key do not match",
            "payload": null
        })))
        .mount(&server)
        .await;

    let result = deployer(&server)
        .deploy(&domain_set(&["*.example.com"]), &dummy_bundle())
        .await;
    let Err(err) = result else {
        panic!("expected an error");
    };
    assert!(matches!(
        err.root_cause(),
        DeployError::Api { raw_code: Some(code), .. } if code == "40001"
    ));
    assert!(err.to_string().starts_with("upload certificate: "), "{err}");
}

#[tokio::test]
async fn test_udomain_put_checks_status_only() {
    let server = MockServer::start().await;
    mount_subdomains(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/c/v1/certificate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "0",
            "payload": {"certificateID": 7}
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/c/v1/configuration"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let result = deployer(&server)
        .deploy(&domain_set(&["*.example.com"]), &dummy_bundle())
        .await;
    let Err(err) = result else {
        panic!("expected an error");
    };
    assert!(
        err.to_string().starts_with("update domain www.example.com: "),
        "{err}"
    );
}
