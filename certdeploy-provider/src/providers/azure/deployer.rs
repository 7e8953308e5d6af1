//! Azure Key Vault Deployer trait 实现

use std::collections::HashSet;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::{Method, Url};

use crate::certparser::{domains_from_der, pem_to_pkcs12};
use crate::error::{Result, ResultExt};
use crate::pagination::LinkCursor;
use crate::traits::{Deployer, ProviderErrorMapper};
use crate::types::{
    AzureConfig, CertificateBundle, DomainSet, FieldType, ProviderConfigField, ProviderMetadata,
    ProviderType,
};

use super::{
    AzureDeployer, CertificateListResponse, ImportCertificateRequest, KeyVaultCertificate,
    certificate_name_from_id,
};

/// Vault 中已存储的证书及其覆盖的域名
struct StoredCertificate {
    name: String,
    domains: DomainSet,
}

impl StoredCertificate {
    /// 与新证书域名有交集（不区分大小写的相等比较）
    fn overlaps(&self, domains: &DomainSet) -> bool {
        self.domains.iter().any(|d| domains.contains(d))
    }
}

impl AzureDeployer {
    /// 遍历 `GET /certificates`（跟随 `nextLink`），对每个证书名读取一次域名
    async fn stored_certificates(&self, token: &str) -> Result<Vec<StoredCertificate>> {
        let mut cursor = LinkCursor::new("azure");
        let mut url = self.vault_url("/certificates")?;
        let mut seen = HashSet::new();
        let mut stored = Vec::new();

        loop {
            let page: CertificateListResponse =
                self.send(token, Method::GET, url, None::<&()>).await?;

            for item in &page.value {
                let Some(name) = certificate_name_from_id(&item.id) else {
                    log::warn!("[azure] Ignoring unexpected certificate id {}", item.id);
                    continue;
                };
                if !seen.insert(name.to_string()) {
                    continue;
                }
                let domains = self
                    .certificate_domains(token, name)
                    .await
                    .with_context(|| format!("read certificate {name}"))?;
                log::debug!("[azure] Certificate {name} serves {domains}");
                stored.push(StoredCertificate {
                    name: name.to_string(),
                    domains,
                });
            }

            match cursor.next(page.next_link)? {
                Some(link) => {
                    url = Url::parse(&link).map_err(|e| self.parse_error(e))?;
                }
                None => break,
            }
        }

        Ok(stored)
    }

    async fn certificate_domains(&self, token: &str, name: &str) -> Result<DomainSet> {
        let url = self.vault_url(&format!("/certificates/{}", urlencoding::encode(name)))?;
        let certificate: KeyVaultCertificate =
            self.send(token, Method::GET, url, None::<&()>).await?;
        let cer = certificate
            .cer
            .ok_or_else(|| self.parse_error("响应中缺少 cer 字段"))?;
        let der = BASE64.decode(cer).map_err(|e| self.parse_error(e))?;
        domains_from_der(&der)
    }

    async fn import_certificate(&self, token: &str, name: &str, pkcs12: &str) -> Result<()> {
        let url = self.vault_url(&format!(
            "/certificates/{}/import",
            urlencoding::encode(name)
        ))?;
        let _: serde_json::Value = self
            .send(
                token,
                Method::POST,
                url,
                Some(&ImportCertificateRequest::pkcs12(pkcs12)),
            )
            .await?;
        Ok(())
    }
}

fn encode_pkcs12(bundle: &CertificateBundle) -> Result<String> {
    pem_to_pkcs12(bundle.cert_pem(), bundle.key_pem()).map(|der| BASE64.encode(der))
}

#[async_trait]
impl Deployer for AzureDeployer {
    fn name(&self) -> &'static str {
        "azure"
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Azure,
            name: "Azure Key Vault".to_string(),
            description: "Re-imports Key Vault certificates that serve the same domains"
                .to_string(),
            fields: vec![
                ProviderConfigField::required(
                    AzureConfig::VAULT_URI,
                    "Key Vault URI",
                    FieldType::Text,
                ),
                ProviderConfigField::required(AzureConfig::TENANT_ID, "Tenant ID", FieldType::Text),
                ProviderConfigField::required(AzureConfig::CLIENT_ID, "Client ID", FieldType::Text),
                ProviderConfigField::required(
                    AzureConfig::CLIENT_SECRET,
                    "Client Secret",
                    FieldType::Password,
                ),
            ],
        }
    }

    async fn deploy(&self, domains: &DomainSet, bundle: &CertificateBundle) -> Result<()> {
        let token = self.fetch_token().await.context("acquire access token")?;

        log::info!("[azure] Finding certificates in key vault to deploy");
        let stored = self
            .stored_certificates(&token)
            .await
            .context("list certificates")?;

        // PKCS#12 只在第一次命中时构建
        let mut pkcs12: Option<String> = None;
        let mut imported = 0usize;
        for certificate in stored.iter().filter(|c| c.overlaps(domains)) {
            let value = match pkcs12.take() {
                Some(value) => value,
                None => encode_pkcs12(bundle).context("build PKCS#12")?,
            };
            log::info!("[azure] Importing certificate to update {}", certificate.name);
            self.import_certificate(&token, &certificate.name, &value)
                .await
                .with_context(|| format!("import certificate {}", certificate.name))?;
            pkcs12 = Some(value);
            imported += 1;
        }

        if imported == 0 {
            log::warn!("[azure] Unable to find certificates in key vault to deploy");
        }
        Ok(())
    }
}
