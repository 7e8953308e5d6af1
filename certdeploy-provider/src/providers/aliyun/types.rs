//! 阿里云 CDN API 类型定义和辅助函数

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::error::{DeployError, Result};

// ============ RFC3986 URL 编码 ============

/// RFC3986 URL 编码
pub fn url_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(char::from(byte));
            }
            _ => {
                let _ = write!(result, "%{byte:02X}");
            }
        }
    }
    result
}

/// 将 `serde_json::Value` 展平为 key-value 对（RPC 风格参数，嵌套用 `.` 连接）
fn flatten_value(prefix: &str, value: &serde_json::Value, result: &mut BTreeMap<String, String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten_value(&key, v, result);
            }
        }
        serde_json::Value::Array(arr) => {
            for (i, v) in arr.iter().enumerate() {
                flatten_value(&format!("{}.{}", prefix, i + 1), v, result);
            }
        }
        serde_json::Value::String(s) => {
            result.insert(prefix.to_string(), s.clone());
        }
        serde_json::Value::Number(n) => {
            result.insert(prefix.to_string(), n.to_string());
        }
        serde_json::Value::Bool(b) => {
            result.insert(prefix.to_string(), b.to_string());
        }
        serde_json::Value::Null => {}
    }
}

/// 将请求结构体序列化为排序后的 form body
pub fn serialize_to_form<T: Serialize>(params: &T) -> Result<String> {
    let value = serde_json::to_value(params).map_err(|e| DeployError::SerializationError {
        provider: "aliyun".to_string(),
        detail: e.to_string(),
    })?;

    let mut flat_map = BTreeMap::new();
    flatten_value("", &value, &mut flat_map);

    Ok(flat_map
        .iter()
        .map(|(k, v)| format!("{}={}", url_encode(k), url_encode(v)))
        .collect::<Vec<_>>()
        .join("&"))
}

// ============ DescribeUserDomains ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeUserDomainsRequest<'a> {
    pub domain_name: &'a str,
    /// `full_match` 或 `suf_match`
    pub domain_search_type: &'a str,
    pub check_domain_show: bool,
    pub page_number: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeUserDomainsResponse {
    #[serde(default)]
    pub domains: Option<PageData>,
    #[serde(default)]
    pub total_count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageData {
    #[serde(default)]
    pub page_data: Vec<CdnDomain>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CdnDomain {
    pub domain_name: Option<String>,
    #[serde(default)]
    pub domain_status: Option<String>,
    /// `on` 表示已开启 HTTPS
    #[serde(default)]
    pub ssl_protocol: Option<String>,
}

impl CdnDomain {
    /// 仅处理在线或配置中的域名
    pub fn is_deployable(&self) -> bool {
        matches!(self.domain_status.as_deref(), Some("online" | "configuring"))
    }

    pub fn https_enabled(&self) -> bool {
        self.ssl_protocol.as_deref() == Some("on")
    }
}

// ============ BatchSetCdnDomainServerCertificate ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchSetCertificateRequest<'a> {
    /// 逗号分隔的域名列表
    pub domain_name: String,
    pub cert_name: &'a str,
    pub cert_type: &'a str,
    #[serde(rename = "SSLProtocol")]
    pub ssl_protocol: &'a str,
    #[serde(rename = "SSLPub")]
    pub ssl_pub: &'a str,
    #[serde(rename = "SSLPri")]
    pub ssl_pri: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchSetCertificateResponse {
    #[serde(default)]
    pub request_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encode_rfc3986() {
        assert_eq!(url_encode("a b+c/d"), "a%20b%2Bc%2Fd");
        assert_eq!(url_encode("-_.~"), "-_.~");
        assert_eq!(url_encode("证"), "%E8%AF%81");
    }

    #[test]
    fn form_is_sorted_and_skips_none() {
        let req = DescribeUserDomainsRequest {
            domain_name: ".example.com",
            domain_search_type: "suf_match",
            check_domain_show: false,
            page_number: 2,
            page_size: 50,
            resource_group_id: None,
        };
        let form = serialize_to_form(&req).unwrap_or_default();
        assert_eq!(
            form,
            "CheckDomainShow=false&DomainName=.example.com&DomainSearchType=suf_match&PageNumber=2&PageSize=50"
        );
    }

    #[test]
    fn certificate_form_encodes_pem() {
        let req = BatchSetCertificateRequest {
            domain_name: "a.example.com,b.example.com".to_string(),
            cert_name: "example.com-1700000000",
            cert_type: "upload",
            ssl_protocol: "on",
            ssl_pub: "-----BEGIN CERTIFICATE-----\nMII=\n",
            ssl_pri: "k",
        };
        let form = serialize_to_form(&req).unwrap_or_default();
        assert!(form.contains("DomainName=a.example.com%2Cb.example.com"));
        assert!(form.contains("SSLPub=-----BEGIN%20CERTIFICATE-----%0AMII%3D%0A"));
        assert!(form.contains("SSLProtocol=on"));
    }

    #[test]
    fn domain_filters() {
        let json = r#"{"DomainName":"a.example.com","DomainStatus":"offline","SslProtocol":"on"}"#;
        let domain: CdnDomain = serde_json::from_str(json).unwrap_or_else(|e| panic!("{e}"));
        assert!(!domain.is_deployable());
        assert!(domain.https_enabled());
    }
}
