//! Deployer implementations

/// Shared utilities used by deployer implementations.
pub mod common;

#[cfg(feature = "aliyun")]
mod aliyun;
#[cfg(feature = "azure")]
mod azure;
#[cfg(feature = "tencentcloud")]
mod tencentcloud;
#[cfg(feature = "udomain")]
mod udomain;
#[cfg(feature = "upyun")]
mod upyun;
#[cfg(feature = "volc")]
mod volc;

#[cfg(feature = "aliyun")]
pub use aliyun::{AliyunDeployer, AliyunDeployerBuilder};
#[cfg(feature = "azure")]
pub use azure::{AzureDeployer, AzureDeployerBuilder};
#[cfg(feature = "tencentcloud")]
pub use tencentcloud::{TencentCloudDeployer, TencentCloudDeployerBuilder};
#[cfg(feature = "udomain")]
pub use udomain::{UDomainDeployer, UDomainDeployerBuilder};
#[cfg(feature = "upyun")]
pub use upyun::{UpyunDeployer, UpyunDeployerBuilder};
#[cfg(feature = "volc")]
pub use volc::{VolcDeployer, VolcDeployerBuilder};
