//! # certdeploy-provider
//!
//! Push a freshly issued TLS certificate to every CDN / edge resource that
//! serves its domains.
//!
//! ## Supported Deployers
//!
//! | Deployer | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [Aliyun CDN](https://www.aliyun.com/product/cdn) | `aliyun` | ACS3-HMAC-SHA256 |
//! | [Tencent Cloud CDN](https://cloud.tencent.com/product/cdn) | `tencentcloud` | TC3-HMAC-SHA256 |
//! | [UDomain CDN](https://www.udomain.com.hk/) | `udomain` | API Key |
//! | [Upyun](https://www.upyun.com/) | `upyun` | Console login (cookie session) |
//! | [Azure Key Vault](https://azure.microsoft.com/products/key-vault) | `azure` | OAuth2 client credentials |
//! | [Volcengine CDN / DCDN](https://www.volcengine.com/product/cdn) | `volc` | HMAC-SHA256 (V4 style) |
//!
//! ## Feature Flags
//!
//! ### Deployer Selection
//!
//! - **`all-providers`** *(default)* — Enable all deployers listed above.
//! - **`aliyun`**, **`tencentcloud`**, **`udomain`**, **`upyun`**, **`azure`**,
//!   **`volc`** — Enable a single deployer. `azure` pulls in `openssl` for
//!   PKCS#12 packaging.
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! certdeploy-provider = { version = "0.1", default-features = false, features = ["aliyun", "rustls"] }
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use certdeploy_provider::{
//!     CertificateBundle, ConfigSource, DeployerRegistry, domains_from_certificate,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cert = std::fs::read_to_string("fullchain.pem")?;
//!     let key = std::fs::read_to_string("privkey.pem")?;
//!
//!     // 1. Domains the certificate covers (CN first, then SAN DNS names)
//!     let domains = domains_from_certificate(&cert)?;
//!
//!     // 2. Build a deployer from the environment
//!     let deployer = DeployerRegistry::with_builtin().create("aliyun", &ConfigSource::from_env())?;
//!
//!     // 3. Deploy
//!     deployer.deploy(&domains, &CertificateBundle::new(cert, key)).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, DeployError>`](DeployError). Failures
//! are wrapped in [`DeployError::Context`] layers naming the domain, page,
//! batch or stage that failed; [`DeployError::root_cause`] strips them.
//!
//! Nothing is retried. A deploy stops at the first failed request and leaves
//! already-applied changes in place. Finding no matching resource is not an
//! error.

mod batch;
mod certparser;
mod error;
mod factory;
mod http_client;
mod matcher;
mod pagination;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{DeployError, Result, ResultExt};

// Re-export registry and factory functions
pub use factory::{
    DeployerConstructor, DeployerRegistry, create_deployer, deploy, get_all_deployer_metadata,
};

// Re-export core trait only (internal traits are not exported)
pub use traits::Deployer;

// Re-export types
pub use types::{
    CertificateBundle, ConfigSource, CredentialValidationError, DomainSet, FieldType,
    ProviderConfig, ProviderConfigField, ProviderMetadata, ProviderType,
};

#[cfg(feature = "aliyun")]
pub use types::AliyunConfig;
#[cfg(feature = "azure")]
pub use types::AzureConfig;
#[cfg(feature = "tencentcloud")]
pub use types::TencentCloudConfig;
#[cfg(feature = "udomain")]
pub use types::UDomainConfig;
#[cfg(feature = "upyun")]
pub use types::UpyunConfig;
#[cfg(feature = "volc")]
pub use types::{VolcConfig, VolcTarget};

// Re-export building blocks
pub use batch::{chunk, for_each_batch};
#[cfg(feature = "azure")]
pub use certparser::pem_to_pkcs12;
pub use certparser::{
    certificates_from_pem, domains_from_certificate, domains_from_der, private_key_from_pem,
};
pub use matcher::{match_group, matches, matches_any};
pub use pagination::{LinkCursor, MAX_PAGES, Page, PageCursor, collect_pages};

// Re-export utils module
pub use utils::log_sanitizer;

// Re-export concrete deployers (behind feature flags)
#[cfg(feature = "aliyun")]
pub use providers::{AliyunDeployer, AliyunDeployerBuilder};

#[cfg(feature = "tencentcloud")]
pub use providers::{TencentCloudDeployer, TencentCloudDeployerBuilder};

#[cfg(feature = "udomain")]
pub use providers::{UDomainDeployer, UDomainDeployerBuilder};

#[cfg(feature = "upyun")]
pub use providers::{UpyunDeployer, UpyunDeployerBuilder};

#[cfg(feature = "azure")]
pub use providers::{AzureDeployer, AzureDeployerBuilder};

#[cfg(feature = "volc")]
pub use providers::{VolcDeployer, VolcDeployerBuilder};
