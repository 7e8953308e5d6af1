//! 火山引擎 Deployer trait 实现

use async_trait::async_trait;
use chrono::Local;
use serde_json::Value;

use crate::batch::for_each_batch;
use crate::error::{Result, ResultExt};
use crate::matcher::match_group;
use crate::traits::Deployer;
use crate::utils::log_sanitizer::mask_secret;
use crate::types::{
    CertificateBundle, DomainSet, FieldType, ProviderConfigField, ProviderMetadata, ProviderType,
    VolcConfig, VolcTarget,
};

use super::types::{CertInfo, CertificateBody};
use super::{
    AddCdnCertificateRequest, BatchDeployCertRequest, CDN, CertBind, CreateCertBindRequest, DCDN,
    DEPLOY_BATCH_SIZE, DescribeCertConfigRequest, DescribeCertConfigResponse, ListCertBindRequest,
    ListCertBindResponse, VolcDeployer,
};

impl VolcDeployer {
    /// 上传到证书中心，返回证书 ID
    async fn upload_certificate(&self, bundle: &CertificateBundle) -> Result<String> {
        self.request(
            CDN,
            "AddCdnCertificate",
            &AddCdnCertificateRequest {
                certificate: CertificateBody {
                    certificate: bundle.cert_pem(),
                    private_key: bundle.key_pem(),
                },
                cert_info: CertInfo {
                    desc: format!("certdeploy-{}", Local::now().format("%Y%m%d")),
                },
                source: "volc_cert_center",
            },
        )
        .await
    }

    async fn deploy_cdn(&self, domains: &DomainSet, cert_id: &str) -> Result<()> {
        let config: DescribeCertConfigResponse = self
            .request(
                CDN,
                "DescribeCertConfig",
                &DescribeCertConfigRequest {
                    cert_id,
                    status: "configuring,online",
                },
            )
            .await
            .context("describe cert config")?;

        let mut targets: Vec<String> = Vec::new();
        for name in config.candidate_domains() {
            if !domains.covers(name) {
                log::warn!("[volc] Skipping CDN domain {name}: not covered by the certificate");
                continue;
            }
            if !targets.iter().any(|t| t.eq_ignore_ascii_case(name)) {
                targets.push(name.to_string());
            }
        }

        log::info!("[volc] Got {} CDN domains to update", targets.len());
        for_each_batch(&targets, DEPLOY_BATCH_SIZE, |batch| async move {
            let domain = batch.join(",");
            log::info!("[volc] Deploying {domain}");
            let _: Value = self
                .request(
                    CDN,
                    "BatchDeployCert",
                    &BatchDeployCertRequest { cert_id, domain },
                )
                .await?;
            Ok(())
        })
        .await?;

        log::info!("[volc] CDN deploy finished");
        Ok(())
    }

    async fn deploy_dcdn(&self, domains: &DomainSet, cert_id: &str) -> Result<()> {
        let binds: ListCertBindResponse = self
            .request(DCDN, "ListCertBind", &ListCertBindRequest {})
            .await
            .context("list cert binds")?;

        let matched: Vec<&CertBind> = binds
            .bind_list
            .iter()
            .filter(|bind| {
                let group = bind.domain_group();
                if group.is_empty() {
                    return false;
                }
                let matched = match_group(domains.as_slice(), &group);
                log::info!("[volc] Checking DCDN domains {group:?}, matched: {matched}");
                matched
            })
            .collect();

        if matched.is_empty() {
            log::warn!("[volc] No DCDN domain is served by this certificate");
            return Ok(());
        }

        let domain_ids: Vec<&str> = matched.iter().map(|b| b.domain_id.as_str()).collect();
        log::info!("[volc] Binding DCDN domain ids {}", domain_ids.join(", "));
        let _: Value = self
            .request(
                DCDN,
                "CreateCertBind",
                &CreateCertBindRequest {
                    cert_id,
                    domain_ids,
                    cert_source: "volc",
                },
            )
            .await
            .context("create cert bind")?;
        Ok(())
    }
}

#[async_trait]
impl Deployer for VolcDeployer {
    fn name(&self) -> &'static str {
        "volc"
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Volc,
            name: "火山引擎".to_string(),
            description: "Volcengine CDN and DCDN (certificate center)".to_string(),
            fields: vec![
                ProviderConfigField::required(
                    VolcConfig::ACCESS_KEY_ID,
                    "Access Key ID",
                    FieldType::Text,
                ),
                ProviderConfigField::required(
                    VolcConfig::SECRET_ACCESS_KEY,
                    "Secret Access Key",
                    FieldType::Password,
                ),
                ProviderConfigField::optional(
                    VolcConfig::DEPLOY_TARGETS,
                    "Deploy targets",
                    FieldType::Text,
                    "逗号分隔：cdn,dcdn（默认两者）",
                ),
            ],
        }
    }

    async fn deploy(&self, domains: &DomainSet, bundle: &CertificateBundle) -> Result<()> {
        if self.config.targets.is_empty() {
            log::warn!("[volc] No deploy target configured");
            return Ok(());
        }

        log::info!(
            "[volc] Uploading certificate (access key {})",
            mask_secret(&self.config.access_key_id)
        );
        let cert_id = self
            .upload_certificate(bundle)
            .await
            .context("upload certificate")?;
        log::info!("[volc] Uploaded certificate {cert_id}");

        for target in &self.config.targets {
            match target {
                VolcTarget::Cdn => self
                    .deploy_cdn(domains, &cert_id)
                    .await
                    .context("deploy cdn")?,
                VolcTarget::Dcdn => self
                    .deploy_dcdn(domains, &cert_id)
                    .await
                    .context("deploy dcdn")?,
            }
        }
        Ok(())
    }
}
