//! 又拍云 Deployer trait 实现

use async_trait::async_trait;

use crate::error::{Result, ResultExt};
use crate::traits::Deployer;
use crate::types::{
    CertificateBundle, DomainSet, FieldType, ProviderConfigField, ProviderMetadata, ProviderType,
    UpyunConfig,
};

use super::{Session, UpyunDeployer};

#[async_trait]
impl Deployer for UpyunDeployer {
    fn name(&self) -> &'static str {
        "upyun"
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Upyun,
            name: "又拍云".to_string(),
            description: "Upyun console HTTPS certificate manager".to_string(),
            fields: vec![
                ProviderConfigField::required(UpyunConfig::USERNAME, "Username", FieldType::Text),
                ProviderConfigField::required(
                    UpyunConfig::PASSWORD,
                    "Password",
                    FieldType::Password,
                ),
            ],
        }
    }

    async fn deploy(&self, domains: &DomainSet, bundle: &CertificateBundle) -> Result<()> {
        log::info!("[upyun] Logging in");
        let session = Session::new(self)?.login().await.context("login")?;

        log::info!("[upyun] Uploading certificate");
        let session = session
            .upload_certificate(bundle)
            .await
            .context("upload certificate")?;

        log::info!(
            "[upyun] Certificate id {}, resolving domains",
            session.certificate_id()
        );
        let session = session.resolve_domains().await.context("resolve domains")?;

        let mut deployed = 0usize;
        for domain in session.domains() {
            if !domains.covers(domain) {
                log::warn!("[upyun] Skipping {domain}: not covered by the certificate");
                continue;
            }
            log::info!("[upyun] Deploying certificate for domain {domain}");
            session
                .bind(domain)
                .await
                .with_context(|| format!("set certificate for {domain}"))?;
            deployed += 1;
        }

        if deployed == 0 {
            log::warn!("[upyun] No domain is served by this certificate");
        }
        Ok(())
    }
}
