//! UDomain Deployer trait 实现

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;

use crate::error::{Result, ResultExt};
use crate::traits::Deployer;
use crate::types::{
    CertificateBundle, DomainSet, FieldType, ProviderConfigField, ProviderMetadata, ProviderType,
    UDomainConfig,
};

use super::{
    ConfigValue, ConfigurationRequest, Subdomain, UDomainDeployer, UploadCertificateRequest,
    UploadedCertificate,
};

/// 证书名称：`{主域名}({UTC 日期})`
fn certificate_name(primary: &str) -> String {
    format!("{primary}({})", Utc::now().format("%Y-%m-%d"))
}

impl UDomainDeployer {
    /// 没有子域名时 `payload` 为 null
    async fn list_subdomains(&self) -> Result<Vec<Subdomain>> {
        self.send_optional(Method::GET, "/c/v1/subdomain", None::<&()>)
            .await
            .map(Option::unwrap_or_default)
    }

    async fn upload_certificate(&self, name: &str, bundle: &CertificateBundle) -> Result<i64> {
        let uploaded: UploadedCertificate = self
            .send(
                Method::POST,
                "/c/v1/certificate",
                Some(&UploadCertificateRequest {
                    certificate_name: name,
                    private_key: bundle.key_pem(),
                    public_key: bundle.cert_pem(),
                }),
            )
            .await?;
        Ok(uploaded.certificate_id)
    }

    async fn bind_certificate(&self, subdomain_id: i64, certificate_id: i64) -> Result<()> {
        self.put(
            "/c/v1/configuration",
            &ConfigurationRequest {
                config_category: "HTTPS",
                config_item: "CERTIFICATE",
                config_value: ConfigValue { certificate_id },
                subdomain_id,
            },
        )
        .await
    }
}

#[async_trait]
impl Deployer for UDomainDeployer {
    fn name(&self) -> &'static str {
        "udomain"
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Udomain,
            name: "UDomain CDN".to_string(),
            description: "UDomain CDN subdomains (HTTPS certificate configuration)".to_string(),
            fields: vec![ProviderConfigField::required(
                UDomainConfig::API_KEY,
                "API Key",
                FieldType::Password,
            )],
        }
    }

    async fn deploy(&self, domains: &DomainSet, bundle: &CertificateBundle) -> Result<()> {
        let subdomains = self.list_subdomains().await.context("list subdomains")?;

        let targets: Vec<&Subdomain> = subdomains
            .iter()
            .filter(|s| s.is_deployable() && domains.covers(&s.subdomain_name))
            .inspect(|s| {
                log::info!(
                    "[udomain] Queued domain {}(#{})",
                    s.subdomain_name,
                    s.subdomain_id
                );
            })
            .collect();

        let Some(primary) = domains.primary().filter(|_| !targets.is_empty()) else {
            log::warn!("[udomain] No subdomain is served by this certificate");
            return Ok(());
        };

        let name = certificate_name(primary);
        let certificate_id = self
            .upload_certificate(&name, bundle)
            .await
            .context("upload certificate")?;
        log::info!("[udomain] Uploaded certificate {name} as #{certificate_id}");

        for subdomain in targets {
            self.bind_certificate(subdomain.subdomain_id, certificate_id)
                .await
                .with_context(|| format!("update domain {}", subdomain.subdomain_name))?;
            log::info!(
                "[udomain] Updated domain {}(#{})",
                subdomain.subdomain_name,
                subdomain.subdomain_id
            );
        }
        Ok(())
    }
}
