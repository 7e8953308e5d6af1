//! UDomain CDN Deployer

mod deployer;
mod error;
mod http;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::{create_http_client, parse_endpoint};
use crate::types::UDomainConfig;

pub(crate) use types::{
    ConfigValue, ConfigurationRequest, Subdomain, UDomainResponse, UploadCertificateRequest,
    UploadedCertificate,
};

pub(crate) const UDOMAIN_API_BASE: &str = "https://cdn.8338.hk/api";

/// UDomain CDN deployer.
///
/// Uploads the certificate once and points every matching subdomain at it.
/// Authenticates with the raw API key in the `Authorization` header.
pub struct UDomainDeployer {
    pub(crate) client: Client,
    pub(crate) config: UDomainConfig,
    /// API 基础地址（不带末尾 `/`）
    pub(crate) base_url: String,
}

/// Builder for [`UDomainDeployer`].
pub struct UDomainDeployerBuilder {
    config: UDomainConfig,
    endpoint: String,
}

impl UDomainDeployerBuilder {
    fn new(config: UDomainConfig) -> Self {
        Self {
            config,
            endpoint: UDOMAIN_API_BASE.to_string(),
        }
    }

    /// Override the API base URL (default: `https://cdn.8338.hk/api`).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn build(self) -> Result<UDomainDeployer> {
        parse_endpoint(&self.endpoint, "udomain")?;
        Ok(UDomainDeployer {
            client: create_http_client("udomain")?,
            config: self.config,
            base_url: self.endpoint.trim_end_matches('/').to_string(),
        })
    }
}

impl UDomainDeployer {
    pub fn new(config: UDomainConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: UDomainConfig) -> UDomainDeployerBuilder {
        UDomainDeployerBuilder::new(config)
    }
}
