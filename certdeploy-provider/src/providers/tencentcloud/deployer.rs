//! 腾讯云 Deployer trait 实现

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::{Result, ResultExt};
use crate::pagination::PageCursor;
use crate::providers::common::{is_suffix_search, wildcard_search_key};
use crate::traits::Deployer;
use crate::utils::log_sanitizer::mask_secret;
use crate::types::{
    CertificateBundle, DomainSet, FieldType, ProviderConfigField, ProviderMetadata, ProviderType,
    TencentCloudConfig,
};

use super::types::merge_https;
use super::{
    DOMAIN_PAGE_SIZE, DescribeDomainsConfigRequest, DescribeDomainsConfigResponse, DetailDomain,
    DomainFilter, TencentCloudDeployer, UpdateDomainConfigRequest,
};

impl TencentCloudDeployer {
    /// 判断加速域名是否需要部署，返回其现有 HTTPS 配置
    fn deployable_https<'a>(
        &self,
        domains: &DomainSet,
        detail: &'a DetailDomain,
    ) -> Option<(&'a str, &'a Map<String, Value>)> {
        let name = detail.domain.as_deref()?;
        if !detail.is_deployable() {
            log::debug!("[tencentcloud] Skipping {name}: status {:?}", detail.status);
            return None;
        }
        let Some(https) = detail.https.as_ref() else {
            log::debug!("[tencentcloud] Skipping {name}: no HTTPS configuration");
            return None;
        };
        if self.config.update_only && !detail.https_enabled() {
            log::debug!("[tencentcloud] Skipping {name}: HTTPS is off and update-only is set");
            return None;
        }
        if !domains.covers(name) {
            log::warn!("[tencentcloud] Skipping {name}: not covered by the certificate");
            return None;
        }
        Some((name, https))
    }

    async fn update_domain(
        &self,
        name: &str,
        https: &Map<String, Value>,
        bundle: &CertificateBundle,
    ) -> Result<()> {
        log::info!("[tencentcloud] Deploying certificate for domain {name}");
        let _: Value = self
            .request(
                "UpdateDomainConfig",
                &UpdateDomainConfigRequest {
                    domain: name,
                    https: merge_https(https, bundle.cert_pem(), bundle.key_pem()),
                },
            )
            .await?;
        Ok(())
    }

    /// 分页查询并在翻页过程中逐个部署
    async fn deploy_matching(
        &self,
        cert_domain: &str,
        domains: &DomainSet,
        bundle: &CertificateBundle,
    ) -> Result<()> {
        let search_key = wildcard_search_key(cert_domain).to_ascii_lowercase();
        let fuzzy = is_suffix_search(&search_key);
        let mut cursor = PageCursor::new("tencentcloud", DOMAIN_PAGE_SIZE);

        loop {
            log::info!(
                "[tencentcloud] Domain {search_key}, page {} ...",
                cursor.page_number()
            );
            let response: DescribeDomainsConfigResponse = self
                .request(
                    "DescribeDomainsConfig",
                    &DescribeDomainsConfigRequest {
                        offset: cursor.offset(),
                        limit: cursor.page_size(),
                        filters: vec![DomainFilter {
                            name: "domain",
                            value: vec![search_key.as_str()],
                            fuzzy,
                        }],
                    },
                )
                .await
                .with_context(|| format!("page {}", cursor.page_number()))?;

            for detail in &response.domains {
                if let Some((name, https)) = self.deployable_https(domains, detail) {
                    self.update_domain(name, https, bundle)
                        .await
                        .with_context(|| format!("deploy domain {name}"))?;
                }
            }

            if response.domains.is_empty() || !cursor.advance(response.total_number)? {
                return Ok(());
            }
        }
    }
}

#[async_trait]
impl Deployer for TencentCloudDeployer {
    fn name(&self) -> &'static str {
        "tencentcloud"
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Tencentcloud,
            name: "腾讯云 CDN".to_string(),
            description: "Tencent Cloud CDN domains (UpdateDomainConfig)".to_string(),
            fields: vec![
                ProviderConfigField::required(
                    TencentCloudConfig::SECRET_ID,
                    "SecretId",
                    FieldType::Text,
                ),
                ProviderConfigField::required(
                    TencentCloudConfig::SECRET_KEY,
                    "SecretKey",
                    FieldType::Password,
                ),
                ProviderConfigField::optional(
                    TencentCloudConfig::UPDATE_ONLY,
                    "Update only",
                    FieldType::Flag,
                    "仅更新已开启 HTTPS 的域名",
                ),
            ],
        }
    }

    async fn deploy(&self, domains: &DomainSet, bundle: &CertificateBundle) -> Result<()> {
        if domains.is_empty() {
            return Ok(());
        }

        log::info!(
            "[tencentcloud] Looking up CDN domains for {domains} (secret id {})",
            mask_secret(&self.config.secret_id)
        );
        for cert_domain in domains.iter() {
            self.deploy_matching(cert_domain, domains, bundle)
                .await
                .with_context(|| format!("cert domain {cert_domain}"))?;
        }
        Ok(())
    }
}
