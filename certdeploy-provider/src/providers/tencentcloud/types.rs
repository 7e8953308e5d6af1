//! 腾讯云 CDN API 类型定义

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============ 响应信封 ============

/// 腾讯云通用响应信封
#[derive(Debug, Deserialize)]
pub struct TencentResponse {
    #[serde(rename = "Response")]
    pub response: Value,
}

/// 响应中的错误结构
#[derive(Debug, Deserialize)]
pub struct TencentError {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

// ============ DescribeDomainsConfig ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDomainsConfigRequest<'a> {
    pub offset: u64,
    pub limit: u32,
    pub filters: Vec<DomainFilter<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DomainFilter<'a> {
    pub name: &'a str,
    pub value: Vec<&'a str>,
    pub fuzzy: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDomainsConfigResponse {
    #[serde(default)]
    pub domains: Vec<DetailDomain>,
    #[serde(default)]
    pub total_number: u64,
}

/// CDN 加速域名详情（只解析用到的字段，`Https` 保持原样以便回写）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetailDomain {
    pub domain: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub https: Option<Map<String, Value>>,
}

impl DetailDomain {
    /// 仅处理已上线或部署中的域名
    pub fn is_deployable(&self) -> bool {
        matches!(self.status.as_deref(), Some("online" | "processing"))
    }

    pub fn https_enabled(&self) -> bool {
        self.https
            .as_ref()
            .and_then(|h| h.get("Switch"))
            .and_then(Value::as_str)
            == Some("on")
    }
}

/// 在现有 HTTPS 配置上开启 HTTPS 并换上新证书，其余字段保持不变
pub fn merge_https(existing: &Map<String, Value>, cert_pem: &str, key_pem: &str) -> Map<String, Value> {
    let mut https = existing.clone();
    https.insert("Switch".to_string(), Value::from("on"));

    let mut cert_info = Map::new();
    cert_info.insert("Certificate".to_string(), Value::from(cert_pem));
    cert_info.insert("PrivateKey".to_string(), Value::from(key_pem));
    https.insert("CertInfo".to_string(), Value::Object(cert_info));
    https
}

// ============ UpdateDomainConfig ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateDomainConfigRequest<'a> {
    pub domain: &'a str,
    pub https: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_unrelated_fields_and_replaces_cert() {
        let existing: Map<String, Value> = serde_json::from_str(
            r#"{"Switch":"off","Http2":"on","OcspStapling":"off",
                "CertInfo":{"CertId":"old-id","Certificate":"OLD"}}"#,
        )
        .unwrap_or_default();

        let merged = merge_https(&existing, "NEW-CERT", "NEW-KEY");
        assert_eq!(merged["Switch"], "on");
        assert_eq!(merged["Http2"], "on");
        assert_eq!(merged["OcspStapling"], "off");
        assert_eq!(merged["CertInfo"]["Certificate"], "NEW-CERT");
        assert_eq!(merged["CertInfo"]["PrivateKey"], "NEW-KEY");
        assert!(merged["CertInfo"].get("CertId").is_none());
    }

    #[test]
    fn detail_domain_flags() {
        let domain: DetailDomain = serde_json::from_str(
            r#"{"Domain":"a.example.com","Status":"processing","Https":{"Switch":"on"}}"#,
        )
        .unwrap_or_else(|e| panic!("{e}"));
        assert!(domain.is_deployable());
        assert!(domain.https_enabled());

        let offline: DetailDomain =
            serde_json::from_str(r#"{"Domain":"b.example.com","Status":"offline"}"#)
                .unwrap_or_else(|e| panic!("{e}"));
        assert!(!offline.is_deployable());
        assert!(!offline.https_enabled());
    }

    #[test]
    fn filter_serializes_pascal_case() {
        let req = DescribeDomainsConfigRequest {
            offset: 1000,
            limit: 1000,
            filters: vec![DomainFilter {
                name: "domain",
                value: vec![".example.com"],
                fuzzy: true,
            }],
        };
        let json = serde_json::to_value(&req).unwrap_or_default();
        assert_eq!(json["Offset"], 1000);
        assert_eq!(json["Filters"][0]["Name"], "domain");
        assert_eq!(json["Filters"][0]["Value"][0], ".example.com");
        assert_eq!(json["Filters"][0]["Fuzzy"], true);
    }
}
