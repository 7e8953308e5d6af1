//! UDomain API 类型定义

use serde::{Deserialize, Serialize};

/// 通用响应信封，`code == "0"` 表示成功
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UDomainResponse<T> {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    pub payload: Option<T>,
}

impl<T> UDomainResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == "0"
    }
}

/// `GET /c/v1/subdomain` 列表项
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subdomain {
    #[serde(rename = "subdomainID")]
    pub subdomain_id: i64,
    pub subdomain_name: String,
    #[serde(default)]
    pub subdomain_status: String,
}

impl Subdomain {
    pub fn is_deployable(&self) -> bool {
        matches!(self.subdomain_status.as_str(), "ACTIVE" | "PROCESSING")
    }
}

/// `POST /c/v1/certificate`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadCertificateRequest<'a> {
    pub certificate_name: &'a str,
    pub private_key: &'a str,
    pub public_key: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct UploadedCertificate {
    #[serde(rename = "certificateID")]
    pub certificate_id: i64,
}

/// `PUT /c/v1/configuration`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationRequest<'a> {
    pub config_category: &'a str,
    pub config_item: &'a str,
    pub config_value: ConfigValue,
    #[serde(rename = "subdomainID")]
    pub subdomain_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ConfigValue {
    #[serde(rename = "certificateID")]
    pub certificate_id: i64,
}
