//! 阿里云 CDN Deployer

mod deployer;
mod error;
mod http;
mod sign;
mod types;

use reqwest::{Client, Url};

use crate::error::Result;
use crate::providers::common::{create_http_client, parse_endpoint};
use crate::types::AliyunConfig;

pub(crate) use types::{
    BatchSetCertificateRequest, BatchSetCertificateResponse, DescribeUserDomainsRequest,
    DescribeUserDomainsResponse, serialize_to_form,
};

pub(crate) const ALIYUN_CDN_ENDPOINT: &str = "https://cdn.aliyuncs.com";
pub(crate) const ALIYUN_CDN_VERSION: &str = "2018-05-10";
/// `DescribeUserDomains` 单页记录数
pub(crate) const DOMAIN_PAGE_SIZE: u32 = 50;
/// `BatchSetCdnDomainServerCertificate` 单次最多域名数
pub(crate) const DEPLOY_BATCH_SIZE: usize = 50;

/// Aliyun CDN deployer.
///
/// Finds every CDN domain served by the certificate and installs the
/// certificate on them in batches. Authenticates with ACS3-HMAC-SHA256.
///
/// # Construction
///
/// ```rust,no_run
/// use certdeploy_provider::{AliyunConfig, AliyunDeployer};
///
/// let deployer = AliyunDeployer::new(AliyunConfig {
///     access_key_id: "your-access-key-id".to_string(),
///     access_key_secret: "your-access-key-secret".to_string(),
///     update_only: false,
///     resource_group: None,
/// })?;
/// # Ok::<(), certdeploy_provider::DeployError>(())
/// ```
pub struct AliyunDeployer {
    pub(crate) client: Client,
    pub(crate) config: AliyunConfig,
    pub(crate) endpoint: Url,
    /// `Host` value covered by the signature
    pub(crate) host: String,
}

/// Builder for [`AliyunDeployer`].
pub struct AliyunDeployerBuilder {
    config: AliyunConfig,
    endpoint: String,
}

impl AliyunDeployerBuilder {
    fn new(config: AliyunConfig) -> Self {
        Self {
            config,
            endpoint: ALIYUN_CDN_ENDPOINT.to_string(),
        }
    }

    /// Override the API endpoint (default: `https://cdn.aliyuncs.com`).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Build the [`AliyunDeployer`] instance.
    pub fn build(self) -> Result<AliyunDeployer> {
        let (endpoint, host) = parse_endpoint(&self.endpoint, "aliyun")?;
        Ok(AliyunDeployer {
            client: create_http_client("aliyun")?,
            config: self.config,
            endpoint,
            host,
        })
    }
}

impl AliyunDeployer {
    /// Creates a new Aliyun deployer against the public endpoint.
    pub fn new(config: AliyunConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Returns a builder for customizing the deployer.
    pub fn builder(config: AliyunConfig) -> AliyunDeployerBuilder {
        AliyunDeployerBuilder::new(config)
    }
}
