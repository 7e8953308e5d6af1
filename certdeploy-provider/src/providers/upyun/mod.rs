//! 又拍云 Deployer（控制台 API，Cookie 会话）

mod deployer;
mod error;
mod session;
mod types;

use reqwest::Url;

use crate::error::Result;
use crate::providers::common::parse_endpoint;
use crate::types::UpyunConfig;

pub(crate) use session::Session;

pub(crate) const UPYUN_CONSOLE_BASE: &str = "https://console.upyun.com";
/// 绑定时返回此错误码表示域名需走迁移接口
pub(crate) const MIGRATE_REQUIRED_CODE: &str = "21713";

/// Upyun deployer.
///
/// Logs into the console with the account password, uploads the certificate
/// and switches every domain the console associates with it to the new
/// certificate. Each [`deploy`](crate::Deployer::deploy) call opens its own
/// cookie session.
pub struct UpyunDeployer {
    pub(crate) config: UpyunConfig,
    pub(crate) base_url: Url,
}

/// Builder for [`UpyunDeployer`].
pub struct UpyunDeployerBuilder {
    config: UpyunConfig,
    endpoint: String,
}

impl UpyunDeployerBuilder {
    fn new(config: UpyunConfig) -> Self {
        Self {
            config,
            endpoint: UPYUN_CONSOLE_BASE.to_string(),
        }
    }

    /// Override the console base URL (default: `https://console.upyun.com`).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn build(self) -> Result<UpyunDeployer> {
        let (base_url, _) = parse_endpoint(&self.endpoint, "upyun")?;
        Ok(UpyunDeployer {
            config: self.config,
            base_url,
        })
    }
}

impl UpyunDeployer {
    pub fn new(config: UpyunConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: UpyunConfig) -> UpyunDeployerBuilder {
        UpyunDeployerBuilder::new(config)
    }
}
