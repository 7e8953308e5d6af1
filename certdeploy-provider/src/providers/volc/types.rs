//! 火山引擎 OpenAPI 类型定义

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============ 公共响应 ============

#[derive(Debug, Deserialize)]
pub struct VolcResponse {
    #[serde(rename = "ResponseMetadata")]
    pub response_metadata: ResponseMetadata,
    #[serde(rename = "Result", default)]
    pub result: Value,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMetadata {
    #[serde(rename = "RequestId", default)]
    pub request_id: String,
    #[serde(rename = "Error")]
    pub error: Option<VolcError>,
}

#[derive(Debug, Deserialize)]
pub struct VolcError {
    #[serde(rename = "Code", default)]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: String,
}

// ============ CDN ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddCdnCertificateRequest<'a> {
    pub certificate: CertificateBody<'a>,
    pub cert_info: CertInfo,
    pub source: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CertificateBody<'a> {
    pub certificate: &'a str,
    pub private_key: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CertInfo {
    pub desc: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeCertConfigRequest<'a> {
    pub cert_id: &'a str,
    pub status: &'static str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeCertConfigResponse {
    #[serde(default)]
    pub cert_not_config: Vec<DomainCertConfig>,
    #[serde(default)]
    pub other_cert_config: Vec<DomainCertConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DomainCertConfig {
    pub domain: String,
}

impl DescribeCertConfigResponse {
    /// 未配置证书和使用其他证书的域名
    pub fn candidate_domains(&self) -> impl Iterator<Item = &str> {
        self.cert_not_config
            .iter()
            .chain(&self.other_cert_config)
            .map(|c| c.domain.as_str())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchDeployCertRequest<'a> {
    pub cert_id: &'a str,
    /// 逗号分隔的域名列表
    pub domain: String,
}

// ============ DCDN ============

#[derive(Debug, Serialize)]
pub struct ListCertBindRequest {}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCertBindResponse {
    #[serde(default)]
    pub bind_list: Vec<CertBind>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CertBind {
    pub domain_id: String,
    /// 逗号分隔的域名组
    #[serde(default)]
    pub domain_name: String,
}

impl CertBind {
    /// 拆分 `DomainName`，去掉空白项
    pub fn domain_group(&self) -> Vec<&str> {
        self.domain_name
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .collect()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCertBindRequest<'a> {
    pub cert_id: &'a str,
    pub domain_ids: Vec<&'a str>,
    pub cert_source: &'static str,
}
