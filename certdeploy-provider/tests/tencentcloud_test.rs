//! Tencent Cloud CDN Deployer 集成测试（wiremock）

mod common;

use certdeploy_provider::{Deployer, TencentCloudConfig, TencentCloudDeployer};
use common::{domain_set, dummy_bundle, json_body};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn deployer(server: &MockServer, update_only: bool) -> TencentCloudDeployer {
    TencentCloudDeployer::builder(TencentCloudConfig {
        secret_id: "AKIDtest".to_string(),
        secret_key: "test-key".to_string(),
        update_only,
    })
    .endpoint(server.uri())
    .build()
    .unwrap_or_else(|e| panic!("{e}"))
}

fn is_action(request: &Request, action: &str) -> bool {
    request
        .headers
        .get("x-tc-action")
        .and_then(|v| v.to_str().ok())
        == Some(action)
}

async fn update_bodies(server: &MockServer) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| is_action(r, "UpdateDomainConfig"))
        .map(json_body)
        .collect()
}

async fn mount_domains(server: &MockServer) {
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeDomainsConfig"))
        .and(body_partial_json(json!({
            "Offset": 0,
            "Limit": 1000,
            "Filters": [{"Name": "domain", "Value": [".example.com"], "Fuzzy": true}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": {
                "RequestId": "req-1",
                "TotalNumber": 4,
                "Domains": [
                    {
                        "Domain": "a.example.com",
                        "Status": "online",
                        "Https": {
                            "Switch": "on",
                            "Http2": "on",
                            "OcspStapling": "off",
                            "CertInfo": {"CertId": "old-cert", "ExpireTime": "2024-01-01 00:00:00"}
                        }
                    },
                    {
                        "Domain": "b.example.com",
                        "Status": "online",
                        "Https": {"Switch": "off", "Http2": "off"}
                    },
                    {"Domain": "c.example.com", "Status": "online", "Https": null},
                    {
                        "Domain": "x.y.example.com",
                        "Status": "online",
                        "Https": {"Switch": "on"}
                    }
                ]
            }
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_tencentcloud_merges_existing_https() {
    let server = MockServer::start().await;
    mount_domains(&server).await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "UpdateDomainConfig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": {"RequestId": "req-2"}
        })))
        .expect(2)
        .mount(&server)
        .await;

    let bundle = dummy_bundle();
    require_ok!(
        deployer(&server, false)
            .deploy(&domain_set(&["*.example.com"]), &bundle)
            .await
    );

    let bodies = update_bodies(&server).await;
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0]["Domain"], "a.example.com");
    assert_eq!(
        bodies[0]["Https"],
        json!({
            "Switch": "on",
            "Http2": "on",
            "OcspStapling": "off",
            "CertInfo": {
                "Certificate": bundle.cert_pem(),
                "PrivateKey": bundle.key_pem()
            }
        })
    );
    // 原本关闭 HTTPS 的域名被开启
    assert_eq!(bodies[1]["Domain"], "b.example.com");
    assert_eq!(bodies[1]["Https"]["Switch"], "on");
    assert_eq!(bodies[1]["Https"]["Http2"], "off");
}

#[tokio::test]
async fn test_tencentcloud_update_only_skips_https_off() {
    let server = MockServer::start().await;
    mount_domains(&server).await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "UpdateDomainConfig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": {"RequestId": "req-2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    require_ok!(
        deployer(&server, true)
            .deploy(&domain_set(&["*.example.com"]), &dummy_bundle())
            .await
    );

    let bodies = update_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["Domain"], "a.example.com");
}

#[tokio::test]
async fn test_tencentcloud_update_failure_names_domain() {
    let server = MockServer::start().await;
    mount_domains(&server).await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "UpdateDomainConfig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": {
                "RequestId": "req-2",
                "Error": {"Code": "InvalidParameter.CdnCertInfoNotFound", "Message": "cert not found"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = deployer(&server, false)
        .deploy(&domain_set(&["*.example.com"]), &dummy_bundle())
        .await;
    let Err(err) = result else {
        panic!("expected an error");
    };
    let message = err.to_string();
    assert!(message.contains("deploy domain a.example.com"), "{message}");
    assert!(message.contains("InvalidParameter.CdnCertInfoNotFound"), "{message}");
    // 首个失败后不再继续
    assert_eq!(update_bodies(&server).await.len(), 1);
}
