//! Azure 身份认证与 Key Vault 类型定义

use serde::{Deserialize, Serialize};

// ============ OAuth2 ============

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// `{"error": "invalid_client", "error_description": "..."}`
#[derive(Debug, Deserialize)]
pub struct TokenError {
    pub error: String,
    #[serde(default)]
    pub error_description: String,
}

// ============ Key Vault ============

#[derive(Debug, Deserialize)]
pub struct CertificateListResponse {
    #[serde(default)]
    pub value: Vec<CertificateItem>,
    #[serde(rename = "nextLink")]
    pub next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CertificateItem {
    pub id: String,
}

/// `GET /certificates/{name}`，`cer` 为 base64 编码的 DER
#[derive(Debug, Deserialize)]
pub struct KeyVaultCertificate {
    pub cer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportCertificateRequest<'a> {
    pub value: &'a str,
    pub policy: CertificatePolicy,
}

#[derive(Debug, Serialize)]
pub struct CertificatePolicy {
    pub secret_props: SecretProperties,
}

#[derive(Debug, Serialize)]
pub struct SecretProperties {
    #[serde(rename = "contentType")]
    pub content_type: &'static str,
}

impl ImportCertificateRequest<'_> {
    pub fn pkcs12(value: &str) -> ImportCertificateRequest<'_> {
        ImportCertificateRequest {
            value,
            policy: CertificatePolicy {
                secret_props: SecretProperties {
                    content_type: "application/x-pkcs12",
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct KeyVaultError {
    pub error: KeyVaultErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct KeyVaultErrorBody {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// 从 `https://{vault}/certificates/{name}[/{version}]` 中取证书名
pub fn certificate_name_from_id(id: &str) -> Option<&str> {
    let (_, rest) = id.split_once("/certificates/")?;
    rest.split('/').next().filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certificate_name_from_versioned_and_bare_ids() {
        assert_eq!(
            certificate_name_from_id("https://v.vault.azure.net/certificates/www-example"),
            Some("www-example")
        );
        assert_eq!(
            certificate_name_from_id("https://v.vault.azure.net/certificates/api/0f1e2d"),
            Some("api")
        );
        assert_eq!(certificate_name_from_id("https://v.vault.azure.net/keys/k"), None);
        assert_eq!(certificate_name_from_id("https://v.vault.azure.net/certificates/"), None);
    }

    #[test]
    fn import_request_shape() {
        let body = serde_json::to_value(ImportCertificateRequest::pkcs12("MIIK"))
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(
            body,
            serde_json::json!({
                "value": "MIIK",
                "policy": {"secret_props": {"contentType": "application/x-pkcs12"}}
            })
        );
    }

    #[test]
    fn list_response_reads_next_link() {
        let page: CertificateListResponse = serde_json::from_str(
            r#"{"value":[{"id":"https://v/certificates/a","attributes":{}}],"nextLink":"https://v/certificates?$skiptoken=x"}"#,
        )
        .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(page.value.len(), 1);
        assert!(page.next_link.is_some());
    }
}
