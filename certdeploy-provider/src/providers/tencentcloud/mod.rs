//! 腾讯云 CDN Deployer

mod deployer;
mod error;
mod http;
mod sign;
mod types;

use reqwest::{Client, Url};

use crate::error::Result;
use crate::providers::common::{create_http_client, parse_endpoint};
use crate::types::TencentCloudConfig;

pub(crate) use types::{
    DescribeDomainsConfigRequest, DescribeDomainsConfigResponse, DetailDomain, DomainFilter,
    TencentResponse, UpdateDomainConfigRequest,
};

pub(crate) const TENCENT_CDN_ENDPOINT: &str = "https://cdn.tencentcloudapi.com";
pub(crate) const TENCENT_CDN_SERVICE: &str = "cdn";
pub(crate) const TENCENT_CDN_VERSION: &str = "2018-06-06";
/// `DescribeDomainsConfig` 单页最大记录数
pub(crate) const DOMAIN_PAGE_SIZE: u32 = 1000;

/// 腾讯云 CDN Deployer
///
/// 按证书域名查询 CDN 加速域名，逐个调用 `UpdateDomainConfig` 替换 HTTPS 证书。
pub struct TencentCloudDeployer {
    pub(crate) client: Client,
    pub(crate) config: TencentCloudConfig,
    pub(crate) endpoint: Url,
    pub(crate) host: String,
}

/// [`TencentCloudDeployer`] Builder
pub struct TencentCloudDeployerBuilder {
    config: TencentCloudConfig,
    endpoint: String,
}

impl TencentCloudDeployerBuilder {
    fn new(config: TencentCloudConfig) -> Self {
        Self {
            config,
            endpoint: TENCENT_CDN_ENDPOINT.to_string(),
        }
    }

    /// 覆盖 API 地址（默认 `https://cdn.tencentcloudapi.com`）
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn build(self) -> Result<TencentCloudDeployer> {
        let (endpoint, host) = parse_endpoint(&self.endpoint, "tencentcloud")?;
        Ok(TencentCloudDeployer {
            client: create_http_client("tencentcloud")?,
            config: self.config,
            endpoint,
            host,
        })
    }
}

impl TencentCloudDeployer {
    pub fn new(config: TencentCloudConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: TencentCloudConfig) -> TencentCloudDeployerBuilder {
        TencentCloudDeployerBuilder::new(config)
    }
}
