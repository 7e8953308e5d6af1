//! Azure Key Vault Deployer

mod deployer;
mod error;
mod http;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::{create_http_client, parse_endpoint};
use crate::types::AzureConfig;

pub(crate) use types::{
    CertificateListResponse, ImportCertificateRequest, KeyVaultCertificate, KeyVaultError,
    TokenError, TokenResponse, certificate_name_from_id,
};

pub(crate) const AZURE_LOGIN_BASE: &str = "https://login.microsoftonline.com";
pub(crate) const KEY_VAULT_SCOPE: &str = "https://vault.azure.net/.default";
pub(crate) const KEY_VAULT_API_VERSION: &str = "7.4";

/// Azure Key Vault deployer.
///
/// Re-imports every vault certificate whose stored domains overlap the new
/// certificate. Authenticates as a service principal (OAuth2 client
/// credentials); a fresh token is requested for each deploy.
pub struct AzureDeployer {
    pub(crate) client: Client,
    pub(crate) config: AzureConfig,
    /// Vault 基础地址（不带末尾 `/`）
    pub(crate) vault_base: String,
    /// 登录服务基础地址（不带末尾 `/`）
    pub(crate) login_base: String,
}

/// Builder for [`AzureDeployer`].
pub struct AzureDeployerBuilder {
    config: AzureConfig,
    endpoint: Option<String>,
    login_endpoint: String,
}

impl AzureDeployerBuilder {
    fn new(config: AzureConfig) -> Self {
        Self {
            config,
            endpoint: None,
            login_endpoint: AZURE_LOGIN_BASE.to_string(),
        }
    }

    /// Override the vault base URL (default: the configured vault URI).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Override the identity endpoint (default: `https://login.microsoftonline.com`).
    pub fn login_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.login_endpoint = endpoint.into();
        self
    }

    pub fn build(self) -> Result<AzureDeployer> {
        let vault = self
            .endpoint
            .unwrap_or_else(|| self.config.vault_uri.clone());
        parse_endpoint(&vault, "azure")?;
        parse_endpoint(&self.login_endpoint, "azure")?;
        Ok(AzureDeployer {
            client: create_http_client("azure")?,
            config: self.config,
            vault_base: vault.trim_end_matches('/').to_string(),
            login_base: self.login_endpoint.trim_end_matches('/').to_string(),
        })
    }
}

impl AzureDeployer {
    pub fn new(config: AzureConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: AzureConfig) -> AzureDeployerBuilder {
        AzureDeployerBuilder::new(config)
    }
}
