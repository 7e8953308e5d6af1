//! Aliyun CDN Deployer 集成测试（wiremock）

mod common;

use certdeploy_provider::{AliyunConfig, AliyunDeployer, DeployError, Deployer};
use common::{domain_set, dummy_bundle, form_param};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const TOTAL: usize = 120;

fn deployer(server: &MockServer, update_only: bool) -> AliyunDeployer {
    AliyunDeployer::builder(AliyunConfig {
        access_key_id: "LTAI5tTestKey".to_string(),
        access_key_secret: "test-secret".to_string(),
        update_only,
        resource_group: None,
    })
    .endpoint(server.uri())
    .build()
    .unwrap_or_else(|e| panic!("{e}"))
}

/// 第 i 个域名：每 10 个有一个离线，每 4 个有一个开启 HTTPS
fn cdn_domain(i: usize) -> serde_json::Value {
    json!({
        "DomainName": format!("cdn{i}.example.com"),
        "DomainStatus": if i % 10 == 9 { "offline" } else { "online" },
        "SslProtocol": if i % 4 == 0 { "on" } else { "off" },
        "Cname": format!("cdn{i}.example.com.w.kunlunaq.com"),
    })
}

async fn mount_describe_pages(server: &MockServer) {
    for page in 1..=3usize {
        let start = (page - 1) * 50;
        let end = (start + 50).min(TOTAL);
        let page_data: Vec<_> = (start..end).map(cdn_domain).collect();
        Mock::given(method("POST"))
            .and(header("x-acs-action", "DescribeUserDomains"))
            .and(body_string_contains(format!("PageNumber={page}&")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "RequestId": format!("req-{page}"),
                "PageNumber": page,
                "PageSize": 50,
                "TotalCount": TOTAL,
                "Domains": {"PageData": page_data}
            })))
            .expect(1)
            .mount(server)
            .await;
    }
}

fn is_action(request: &Request, action: &str) -> bool {
    request
        .headers
        .get("x-acs-action")
        .and_then(|v| v.to_str().ok())
        == Some(action)
}

async fn batch_requests(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| is_action(r, "BatchSetCdnDomainServerCertificate"))
        .collect()
}

#[tokio::test]
async fn test_aliyun_update_only_pages_then_deploys_once() {
    let server = MockServer::start().await;
    mount_describe_pages(&server).await;
    Mock::given(method("POST"))
        .and(header("x-acs-action", "BatchSetCdnDomainServerCertificate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"RequestId": "batch"})))
        .expect(1)
        .mount(&server)
        .await;

    let deployer = deployer(&server, true);
    require_ok!(
        deployer
            .deploy(&domain_set(&["*.example.com"]), &dummy_bundle())
            .await
    );

    let batches = batch_requests(&server).await;
    assert_eq!(batches.len(), 1);
    let names = require_some!(form_param(&batches[0], "DomainName"));
    let names: Vec<&str> = names.split(',').collect();
    // i % 4 == 0 的 30 个域名均在线
    assert_eq!(names.len(), 30);
    assert_eq!(names[0], "cdn0.example.com");
    assert_eq!(names[29], "cdn116.example.com");
    assert_eq!(form_param(&batches[0], "CertType").as_deref(), Some("upload"));
    assert_eq!(form_param(&batches[0], "SSLProtocol").as_deref(), Some("on"));
    assert_eq!(
        form_param(&batches[0], "SSLPub").as_deref(),
        Some(dummy_bundle().cert_pem())
    );
    let cert_name = require_some!(form_param(&batches[0], "CertName"));
    assert!(cert_name.starts_with("example.com-"), "{cert_name}");
}

#[tokio::test]
async fn test_aliyun_without_update_only_chunks_by_fifty() {
    let server = MockServer::start().await;
    mount_describe_pages(&server).await;
    Mock::given(method("POST"))
        .and(header("x-acs-action", "BatchSetCdnDomainServerCertificate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"RequestId": "batch"})))
        .expect(3)
        .mount(&server)
        .await;

    let deployer = deployer(&server, false);
    require_ok!(
        deployer
            .deploy(&domain_set(&["*.example.com"]), &dummy_bundle())
            .await
    );

    let sizes: Vec<usize> = batch_requests(&server)
        .await
        .iter()
        .filter_map(|r| form_param(r, "DomainName"))
        .map(|names| names.split(',').count())
        .collect();
    // 120 个域名中 12 个离线
    assert_eq!(sizes, vec![50, 50, 8]);
}

#[tokio::test]
async fn test_aliyun_exact_domain_uses_full_match() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-acs-action", "DescribeUserDomains"))
        .and(body_string_contains("DomainSearchType=full_match"))
        .and(body_string_contains("DomainName=www.example.org&"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "TotalCount": 1,
            "Domains": {"PageData": [
                {"DomainName": "www.example.org", "DomainStatus": "configuring", "SslProtocol": "off"}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("x-acs-action", "BatchSetCdnDomainServerCertificate"))
        .and(body_string_contains("DomainName=www.example.org&"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"RequestId": "batch"})))
        .expect(1)
        .mount(&server)
        .await;

    let deployer = deployer(&server, false);
    require_ok!(
        deployer
            .deploy(&domain_set(&["www.example.org"]), &dummy_bundle())
            .await
    );
}

#[tokio::test]
async fn test_aliyun_no_match_makes_no_deploy_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-acs-action", "DescribeUserDomains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "TotalCount": 0,
            "Domains": {"PageData": []}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("x-acs-action", "BatchSetCdnDomainServerCertificate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let deployer = deployer(&server, false);
    require_ok!(
        deployer
            .deploy(&domain_set(&["*.example.com"]), &dummy_bundle())
            .await
    );
}

#[tokio::test]
async fn test_aliyun_rejected_key_is_credentials_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-acs-action", "DescribeUserDomains"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "RequestId": "r",
            "Code": "InvalidAccessKeyId.NotFound",
            "Message": "Specified access key is not found."
        })))
        .mount(&server)
        .await;

    let deployer = deployer(&server, false);
    let result = deployer
        .deploy(&domain_set(&["*.example.com"]), &dummy_bundle())
        .await;
    let Err(err) = result else {
        panic!("expected an error");
    };
    assert!(matches!(
        err.root_cause(),
        DeployError::InvalidCredentials { .. }
    ));
    assert!(
        err.to_string().starts_with("describe user domains *.example.com: page 1: "),
        "{err}"
    );
}
