//! Deployer registry, factory functions and metadata.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{DeployError, Result, ResultExt};
use crate::traits::Deployer;
use crate::types::{
    CertificateBundle, ConfigSource, DomainSet, ProviderConfig, ProviderMetadata, ProviderType,
};

#[cfg(feature = "aliyun")]
use crate::providers::AliyunDeployer;
#[cfg(feature = "azure")]
use crate::providers::AzureDeployer;
#[cfg(feature = "tencentcloud")]
use crate::providers::TencentCloudDeployer;
#[cfg(feature = "udomain")]
use crate::providers::UDomainDeployer;
#[cfg(feature = "upyun")]
use crate::providers::UpyunDeployer;
#[cfg(feature = "volc")]
use crate::providers::VolcDeployer;

/// Builds a deployer from a configuration snapshot.
pub type DeployerConstructor = fn(&ConfigSource) -> Result<Box<dyn Deployer>>;

/// Creates a [`Deployer`] instance from an explicit configuration.
///
/// The concrete deployer type is determined by the [`ProviderConfig`] variant.
///
/// # Examples
///
/// ```rust,no_run
/// use certdeploy_provider::{create_deployer, ProviderConfig, UDomainConfig};
///
/// let deployer = create_deployer(ProviderConfig::Udomain(UDomainConfig {
///     api_key: "your-api-key".to_string(),
/// })).unwrap();
/// assert_eq!(deployer.name(), "udomain");
/// ```
pub fn create_deployer(config: ProviderConfig) -> Result<Box<dyn Deployer>> {
    match config {
        #[cfg(feature = "aliyun")]
        ProviderConfig::Aliyun(config) => Ok(Box::new(AliyunDeployer::new(config)?)),
        #[cfg(feature = "tencentcloud")]
        ProviderConfig::Tencentcloud(config) => Ok(Box::new(TencentCloudDeployer::new(config)?)),
        #[cfg(feature = "udomain")]
        ProviderConfig::Udomain(config) => Ok(Box::new(UDomainDeployer::new(config)?)),
        #[cfg(feature = "upyun")]
        ProviderConfig::Upyun(config) => Ok(Box::new(UpyunDeployer::new(config)?)),
        #[cfg(feature = "azure")]
        ProviderConfig::Azure(config) => Ok(Box::new(AzureDeployer::new(config)?)),
        #[cfg(feature = "volc")]
        ProviderConfig::Volc(config) => Ok(Box::new(VolcDeployer::new(config)?)),
    }
}

fn create_from_source(provider: ProviderType, source: &ConfigSource) -> Result<Box<dyn Deployer>> {
    create_deployer(ProviderConfig::from_source(provider, source)?)
}

/// Name → constructor table.
///
/// [`with_builtin`](Self::with_builtin) registers every deployer enabled via
/// feature flags; [`register`](Self::register) adds or replaces an entry.
#[derive(Clone, Default)]
pub struct DeployerRegistry {
    constructors: BTreeMap<&'static str, DeployerConstructor>,
}

impl fmt::Debug for DeployerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.constructors.keys()).finish()
    }
}

impl DeployerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in deployers.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        #[cfg(feature = "aliyun")]
        registry.register("aliyun", |source| {
            create_from_source(ProviderType::Aliyun, source)
        });
        #[cfg(feature = "tencentcloud")]
        registry.register("tencentcloud", |source| {
            create_from_source(ProviderType::Tencentcloud, source)
        });
        #[cfg(feature = "udomain")]
        registry.register("udomain", |source| {
            create_from_source(ProviderType::Udomain, source)
        });
        #[cfg(feature = "upyun")]
        registry.register("upyun", |source| {
            create_from_source(ProviderType::Upyun, source)
        });
        #[cfg(feature = "azure")]
        registry.register("azure", |source| {
            create_from_source(ProviderType::Azure, source)
        });
        #[cfg(feature = "volc")]
        registry.register("volc", |source| create_from_source(ProviderType::Volc, source));
        registry
    }

    /// Register `constructor` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: &'static str, constructor: DeployerConstructor) -> &mut Self {
        if self.constructors.insert(name, constructor).is_some() {
            log::debug!("Deployer '{name}' replaced");
        }
        self
    }

    /// Build the deployer registered under `name`.
    ///
    /// Fails with [`DeployError::Configuration`] for an unknown name or a
    /// missing/invalid configuration value.
    pub fn create(&self, name: &str, source: &ConfigSource) -> Result<Box<dyn Deployer>> {
        let constructor = self.constructors.get(name.trim()).ok_or_else(|| {
            DeployError::configuration(format!(
                "no deployer named '{name}' (available: {})",
                self.names().join(", ")
            ))
        })?;
        constructor(source)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.constructors.keys().copied().collect()
    }
}

/// Look up `provider_name` in the built-in registry and push `bundle` to
/// every resource covered by `domains`.
pub async fn deploy(
    provider_name: &str,
    source: &ConfigSource,
    domains: &DomainSet,
    bundle: &CertificateBundle,
) -> Result<()> {
    let deployer = DeployerRegistry::with_builtin()
        .create(provider_name, source)
        .with_context(|| format!("create deployer {provider_name}"))?;
    log::info!("Deploying certificate for {domains} with {}", deployer.name());
    deployer
        .deploy(domains, bundle)
        .await
        .with_context(|| format!("deploy with {provider_name}"))
}

/// Returns metadata for all deployers enabled via feature flags.
pub fn get_all_deployer_metadata() -> Vec<ProviderMetadata> {
    vec![
        #[cfg(feature = "aliyun")]
        AliyunDeployer::metadata(),
        #[cfg(feature = "tencentcloud")]
        TencentCloudDeployer::metadata(),
        #[cfg(feature = "udomain")]
        UDomainDeployer::metadata(),
        #[cfg(feature = "upyun")]
        UpyunDeployer::metadata(),
        #[cfg(feature = "azure")]
        AzureDeployer::metadata(),
        #[cfg(feature = "volc")]
        VolcDeployer::metadata(),
    ]
}

#[cfg(all(test, feature = "all-providers"))]
mod tests {
    use super::*;

    fn source(pairs: &[(&str, &str)]) -> ConfigSource {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn builtin_names() {
        assert_eq!(
            DeployerRegistry::with_builtin().names(),
            vec!["aliyun", "azure", "tencentcloud", "udomain", "upyun", "volc"]
        );
    }

    #[test]
    fn unknown_name_is_configuration_error() {
        let Err(err) = DeployerRegistry::with_builtin().create("cloudflare", &source(&[])) else {
            panic!("expected an error");
        };
        assert!(matches!(err, DeployError::Configuration { .. }));
        assert!(err.to_string().contains("cloudflare"), "{err}");
    }

    #[test]
    fn missing_field_names_the_key() {
        let Err(err) = DeployerRegistry::with_builtin()
            .create("aliyun", &source(&[("ALIYUN_ACCESS_KEY_ID", "LTAI5t")]))
        else {
            panic!("expected an error");
        };
        assert!(matches!(err, DeployError::Configuration { .. }));
        assert!(err.to_string().contains("ALIYUN_ACCESS_KEY_SECRET"), "{err}");
    }

    #[test]
    fn creates_each_builtin() {
        let source = source(&[
            ("ALIYUN_ACCESS_KEY_ID", "id"),
            ("ALIYUN_ACCESS_KEY_SECRET", "secret"),
            ("TENCENTCLOUD_SECRET_ID", "id"),
            ("TENCENTCLOUD_SECRET_KEY", "key"),
            ("UDOMAIN_API_KEY", "key"),
            ("UPYUN_USERNAME", "user"),
            ("UPYUN_PASSWORD", "pass"),
            ("AZURE_KEY_VAULT_URI", "https://v.vault.azure.net/"),
            ("AZURE_TENANT_ID", "t"),
            ("AZURE_CLIENT_ID", "c"),
            ("AZURE_CLIENT_SECRET", "s"),
            ("VOLC_ACCESS_KEY_ID", "ak"),
            ("VOLC_SECRET_ACCESS_KEY", "sk"),
        ]);
        let registry = DeployerRegistry::with_builtin();
        for name in registry.names() {
            let deployer = registry
                .create(name, &source)
                .unwrap_or_else(|e| panic!("{name}: {e}"));
            assert_eq!(deployer.name(), name);
        }
    }

    #[test]
    fn metadata_lists_every_builtin() {
        let ids: Vec<&str> = get_all_deployer_metadata()
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids.len(), 6);
        for name in DeployerRegistry::with_builtin().names() {
            assert!(ids.contains(&name), "{name}");
        }
    }
}
