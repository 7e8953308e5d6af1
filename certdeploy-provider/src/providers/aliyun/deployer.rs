//! 阿里云 Deployer trait 实现

use async_trait::async_trait;
use chrono::Utc;

use crate::batch::for_each_batch;
use crate::error::{Result, ResultExt};
use crate::pagination::{Page, collect_pages};
use crate::providers::common::{is_suffix_search, wildcard_search_key};
use crate::traits::Deployer;
use crate::utils::log_sanitizer::mask_secret;
use crate::types::{
    AliyunConfig, CertificateBundle, DomainSet, FieldType, ProviderConfigField, ProviderMetadata,
    ProviderType,
};

use super::types::CdnDomain;
use super::{
    AliyunDeployer, BatchSetCertificateRequest, BatchSetCertificateResponse, DEPLOY_BATCH_SIZE,
    DOMAIN_PAGE_SIZE, DescribeUserDomainsRequest, DescribeUserDomainsResponse,
};

impl AliyunDeployer {
    /// 按证书域名搜索 CDN 域名（通配符证书使用后缀匹配）
    async fn find_cdn_domains(&self, cert_domain: &str) -> Result<Vec<CdnDomain>> {
        let search_key = wildcard_search_key(cert_domain).to_ascii_lowercase();
        let search_type = if is_suffix_search(&search_key) {
            "suf_match"
        } else {
            "full_match"
        };
        let search_key = search_key.as_str();
        let resource_group = self.config.resource_group.as_deref();

        collect_pages("aliyun", DOMAIN_PAGE_SIZE, |page_number, page_size| async move {
            log::info!("[aliyun] Domain {search_key} {search_type}, page {page_number}");
            let response: DescribeUserDomainsResponse = self
                .request(
                    "DescribeUserDomains",
                    &DescribeUserDomainsRequest {
                        domain_name: search_key,
                        domain_search_type: search_type,
                        check_domain_show: false,
                        page_number,
                        page_size,
                        resource_group_id: resource_group,
                    },
                )
                .await?;
            Ok(Page {
                items: response.domains.unwrap_or_default().page_data,
                total: response.total_count,
            })
        })
        .await
    }

    /// 根据状态与 `update_only` 策略筛选，并用证书域名做最终校验
    fn select_targets(&self, domains: &DomainSet, found: Vec<CdnDomain>, targets: &mut Vec<String>) {
        for cdn_domain in found {
            let Some(name) = cdn_domain.domain_name.as_deref() else {
                continue;
            };
            if !cdn_domain.is_deployable() {
                log::debug!(
                    "[aliyun] Skipping {name}: status {:?}",
                    cdn_domain.domain_status
                );
                continue;
            }
            if self.config.update_only && !cdn_domain.https_enabled() {
                log::debug!("[aliyun] Skipping {name}: HTTPS is off and update-only is set");
                continue;
            }
            if !domains.covers(name) {
                log::warn!("[aliyun] Skipping {name}: not covered by the certificate");
                continue;
            }
            if !targets.iter().any(|t| t.eq_ignore_ascii_case(name)) {
                targets.push(name.to_string());
            }
        }
    }

    async fn deploy_batch(
        &self,
        batch: &[String],
        cert_name: &str,
        bundle: &CertificateBundle,
    ) -> Result<()> {
        log::info!("[aliyun] Deploying certificate to {} domains", batch.len());
        let response: BatchSetCertificateResponse = self
            .request(
                "BatchSetCdnDomainServerCertificate",
                &BatchSetCertificateRequest {
                    domain_name: batch.join(","),
                    cert_name,
                    cert_type: "upload",
                    ssl_protocol: "on",
                    ssl_pub: bundle.cert_pem(),
                    ssl_pri: bundle.key_pem(),
                },
            )
            .await?;
        log::debug!("[aliyun] Batch accepted, request id {:?}", response.request_id);
        Ok(())
    }
}

/// 证书名称：主域名 + 时间戳，同一次部署的所有批次共用
fn certificate_name(primary: &str) -> String {
    format!(
        "{}-{}",
        primary.trim_start_matches("*.").to_ascii_lowercase(),
        Utc::now().format("%Y%m%d%H%M%S")
    )
}

#[async_trait]
impl Deployer for AliyunDeployer {
    fn name(&self) -> &'static str {
        "aliyun"
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Aliyun,
            name: "阿里云 CDN".to_string(),
            description: "Aliyun CDN domains (BatchSetCdnDomainServerCertificate)".to_string(),
            fields: vec![
                ProviderConfigField::required(
                    AliyunConfig::ACCESS_KEY_ID,
                    "AccessKey ID",
                    FieldType::Text,
                ),
                ProviderConfigField::required(
                    AliyunConfig::ACCESS_KEY_SECRET,
                    "AccessKey Secret",
                    FieldType::Password,
                ),
                ProviderConfigField::optional(
                    AliyunConfig::UPDATE_ONLY,
                    "Update only",
                    FieldType::Flag,
                    "仅更新已开启 HTTPS 的域名",
                ),
                ProviderConfigField::optional(
                    AliyunConfig::RESOURCE_GROUP,
                    "Resource Group ID",
                    FieldType::Text,
                    "只搜索该资源组下的域名",
                ),
            ],
        }
    }

    async fn deploy(&self, domains: &DomainSet, bundle: &CertificateBundle) -> Result<()> {
        let Some(primary) = domains.primary() else {
            return Ok(());
        };

        log::info!(
            "[aliyun] Looking up CDN domains for {domains} (access key {})",
            mask_secret(&self.config.access_key_id)
        );
        let mut targets = Vec::new();
        for cert_domain in domains.iter() {
            let found = self
                .find_cdn_domains(cert_domain)
                .await
                .with_context(|| format!("describe user domains {cert_domain}"))?;
            self.select_targets(domains, found, &mut targets);
        }

        log::info!("[aliyun] Got {} domains to deploy", targets.len());
        if targets.is_empty() {
            return Ok(());
        }

        let cert_name = certificate_name(primary);
        for_each_batch(&targets, DEPLOY_BATCH_SIZE, |batch| {
            self.deploy_batch(batch, &cert_name, bundle)
        })
        .await
        .context("deploy certificate")
    }
}
