//! 火山引擎 CDN / DCDN Deployer

mod deployer;
mod error;
mod http;
mod sign;
mod types;

use reqwest::{Client, Url};

use crate::error::Result;
use crate::providers::common::{create_http_client, parse_endpoint};
use crate::types::VolcConfig;

pub(crate) use types::{
    AddCdnCertificateRequest, BatchDeployCertRequest, CertBind, CreateCertBindRequest,
    DescribeCertConfigRequest, DescribeCertConfigResponse, ListCertBindRequest,
    ListCertBindResponse, VolcResponse,
};

pub(crate) const VOLC_ENDPOINT: &str = "https://open.volcengineapi.com";
/// `BatchDeployCert` 单次最多域名数
pub(crate) const DEPLOY_BATCH_SIZE: usize = 50;

/// 签名所需的服务信息
#[derive(Debug, Clone, Copy)]
pub(crate) struct VolcService {
    pub name: &'static str,
    pub region: &'static str,
    pub version: &'static str,
}

pub(crate) const CDN: VolcService = VolcService {
    name: "cdn",
    region: "cn-north-1",
    version: "2021-03-01",
};

pub(crate) const DCDN: VolcService = VolcService {
    name: "dcdn",
    region: "cn-beijing",
    version: "2021-04-01",
};

/// Volcengine deployer.
///
/// Uploads the certificate to the certificate center once, then updates the
/// configured product lines in order: CDN domains in batches, then DCDN
/// certificate bindings in a single call.
pub struct VolcDeployer {
    pub(crate) client: Client,
    pub(crate) config: VolcConfig,
    pub(crate) endpoint: Url,
    pub(crate) host: String,
}

/// Builder for [`VolcDeployer`].
pub struct VolcDeployerBuilder {
    config: VolcConfig,
    endpoint: String,
}

impl VolcDeployerBuilder {
    fn new(config: VolcConfig) -> Self {
        Self {
            config,
            endpoint: VOLC_ENDPOINT.to_string(),
        }
    }

    /// Override the OpenAPI endpoint (default: `https://open.volcengineapi.com`).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn build(self) -> Result<VolcDeployer> {
        let (endpoint, host) = parse_endpoint(&self.endpoint, "volc")?;
        Ok(VolcDeployer {
            client: create_http_client("volc")?,
            config: self.config,
            endpoint,
            host,
        })
    }
}

impl VolcDeployer {
    pub fn new(config: VolcConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: VolcConfig) -> VolcDeployerBuilder {
        VolcDeployerBuilder::new(config)
    }
}
