use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeployError;
use crate::matcher;
use crate::utils::log_sanitizer::mask_secret;

// ============ Domain Set ============

/// Domains covered by one certificate (subject CN plus every SAN DNS name).
///
/// Deduplicated case-insensitively and kept in insertion order, so the first
/// entry (normally the CN) is a stable "primary" name. Built once per
/// invocation and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DomainSet {
    domains: Vec<String>,
}

impl DomainSet {
    /// Builds a set from raw names, dropping blanks and case-insensitive duplicates.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for domain in domains {
            let domain = domain.as_ref().trim();
            if domain.is_empty() || set.contains(domain) {
                continue;
            }
            set.domains.push(domain.to_string());
        }
        set
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.domains
    }

    /// First inserted domain, used to name uploaded certificates.
    pub fn primary(&self) -> Option<&str> {
        self.domains.first().map(String::as_str)
    }

    /// Case-insensitive membership (no wildcard expansion).
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d.eq_ignore_ascii_case(domain))
    }

    /// Whether `candidate` is served by this certificate (wildcard-aware).
    pub fn covers(&self, candidate: &str) -> bool {
        matcher::matches_any(&self.domains, candidate)
    }
}

impl<'a> IntoIterator for &'a DomainSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.domains.iter()
    }
}

impl fmt::Display for DomainSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.domains.join(", "))
    }
}

// ============ Certificate Bundle ============

/// Certificate chain and private key, both PEM encoded.
///
/// Opaque to the workflows: they forward the PEM text as-is, except Azure which
/// packages it as PKCS#12.
#[derive(Clone)]
pub struct CertificateBundle {
    cert_pem: String,
    key_pem: String,
}

impl CertificateBundle {
    pub fn new(cert_pem: impl Into<String>, key_pem: impl Into<String>) -> Self {
        Self {
            cert_pem: cert_pem.into(),
            key_pem: key_pem.into(),
        }
    }

    pub fn cert_pem(&self) -> &str {
        &self.cert_pem
    }

    pub fn key_pem(&self) -> &str {
        &self.key_pem
    }
}

impl fmt::Debug for CertificateBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateBundle")
            .field("cert_pem", &format_args!("{} bytes", self.cert_pem.len()))
            .field("key_pem", &"<redacted>")
            .finish()
    }
}

// ============ Provider Types ============

/// Identifies which deployer implementation to use.
///
/// Each variant is gated behind its corresponding feature flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Aliyun CDN. Requires feature `aliyun`.
    #[cfg(feature = "aliyun")]
    Aliyun,
    /// Tencent Cloud CDN. Requires feature `tencentcloud`.
    #[cfg(feature = "tencentcloud")]
    Tencentcloud,
    /// UDomain CDN. Requires feature `udomain`.
    #[cfg(feature = "udomain")]
    Udomain,
    /// Upyun console. Requires feature `upyun`.
    #[cfg(feature = "upyun")]
    Upyun,
    /// Azure Key Vault. Requires feature `azure`.
    #[cfg(feature = "azure")]
    Azure,
    /// Volcengine CDN and DCDN. Requires feature `volc`.
    #[cfg(feature = "volc")]
    Volc,
}

impl ProviderType {
    /// Registry key of the provider.
    pub fn as_str(self) -> &'static str {
        match self {
            #[cfg(feature = "aliyun")]
            Self::Aliyun => "aliyun",
            #[cfg(feature = "tencentcloud")]
            Self::Tencentcloud => "tencentcloud",
            #[cfg(feature = "udomain")]
            Self::Udomain => "udomain",
            #[cfg(feature = "upyun")]
            Self::Upyun => "upyun",
            #[cfg(feature = "azure")]
            Self::Azure => "azure",
            #[cfg(feature = "volc")]
            Self::Volc => "volc",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            #[cfg(feature = "aliyun")]
            "aliyun" => Ok(Self::Aliyun),
            #[cfg(feature = "tencentcloud")]
            "tencentcloud" => Ok(Self::Tencentcloud),
            #[cfg(feature = "udomain")]
            "udomain" => Ok(Self::Udomain),
            #[cfg(feature = "upyun")]
            "upyun" => Ok(Self::Upyun),
            #[cfg(feature = "azure")]
            "azure" => Ok(Self::Azure),
            #[cfg(feature = "volc")]
            "volc" => Ok(Self::Volc),
            _ => Err(DeployError::configuration(format!(
                "no deployer named '{s}'"
            ))),
        }
    }
}

// ============ Provider Metadata Types ============

/// How a configuration value should be treated when displayed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain value, safe to print.
    Text,
    /// Secret value, never printed.
    Password,
    /// `true`/`false` switch.
    Flag,
}

/// One configuration key read by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfigField {
    /// Environment variable name (e.g., `"ALIYUN_ACCESS_KEY_ID"`).
    pub key: String,
    /// Human-readable label (e.g., `"Access Key ID"`).
    pub label: String,
    /// Value kind.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether deployment fails without it.
    pub required: bool,
    /// Optional help/description text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl ProviderConfigField {
    pub(crate) fn required(key: &str, label: &str, field_type: FieldType) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            field_type,
            required: true,
            help_text: None,
        }
    }

    pub(crate) fn optional(key: &str, label: &str, field_type: FieldType, help: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            field_type,
            required: false,
            help_text: Some(help.to_string()),
        }
    }
}

/// Static metadata describing a deployer.
///
/// Obtain via [`get_all_deployer_metadata()`](crate::get_all_deployer_metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Provider type identifier.
    pub id: ProviderType,
    /// Human-readable provider name.
    pub name: String,
    /// Short description of what gets updated.
    pub description: String,
    /// Configuration keys read by this provider.
    pub fields: Vec<ProviderConfigField>,
}

// ============ Configuration Source ============

/// Validation error for provider configuration.
///
/// Returned when a required key is missing, empty, or has an invalid format.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required key is missing entirely.
    #[error("Missing required field: {label} ({field})")]
    MissingField {
        /// Which provider the error relates to.
        provider: String,
        /// Configuration key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A key is present but empty/whitespace-only.
    #[error("Field must not be empty: {label} ({field})")]
    EmptyField {
        /// Which provider the error relates to.
        provider: String,
        /// Configuration key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A key has an invalid value.
    #[error("{label} ({field}): {reason}")]
    InvalidFormat {
        /// Which provider the error relates to.
        provider: String,
        /// Configuration key.
        field: String,
        /// Human-readable field label.
        label: String,
        /// Description of what's wrong with the value.
        reason: String,
    },
}

impl From<CredentialValidationError> for DeployError {
    fn from(err: CredentialValidationError) -> Self {
        let provider = match &err {
            CredentialValidationError::MissingField { provider, .. }
            | CredentialValidationError::EmptyField { provider, .. }
            | CredentialValidationError::InvalidFormat { provider, .. } => provider.clone(),
        };
        Self::configuration(format!("[{provider}] {err}"))
    }
}

/// Flat key-value snapshot that provider configurations are read from.
///
/// The CLI fills it from the process environment; tests build it from a map.
#[derive(Clone, Default)]
pub struct ConfigSource {
    values: HashMap<String, String>,
}

impl ConfigSource {
    /// Snapshot of the current process environment.
    pub fn from_env() -> Self {
        Self {
            values: std::env::vars().collect(),
        }
    }

    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Raw lookup; blank values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// First non-blank value among `keys`.
    pub fn get_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.get(k))
    }

    /// Obtain a required value and verify that it is not empty.
    pub(crate) fn get_required(
        &self,
        provider: &str,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match self.values.get(key) {
            None => Err(CredentialValidationError::MissingField {
                provider: provider.to_string(),
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                provider: provider.to_string(),
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.trim().to_string()),
        }
    }

    /// A switch is on only when set to `true` (case-insensitive).
    pub(crate) fn get_flag(&self, key: &str) -> bool {
        self.get(key)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigSource {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// 只输出键名，值可能是凭证
impl fmt::Debug for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("ConfigSource").field("keys", &keys).finish()
    }
}

// ============ Provider Configurations ============

/// Aliyun CDN configuration.
#[cfg(feature = "aliyun")]
#[derive(Clone, Serialize, Deserialize)]
pub struct AliyunConfig {
    pub access_key_id: String,
    pub access_key_secret: String,
    /// Only touch domains that already serve HTTPS.
    #[serde(default)]
    pub update_only: bool,
    /// Restrict the domain search to one resource group.
    #[serde(default)]
    pub resource_group: Option<String>,
}

#[cfg(feature = "aliyun")]
impl fmt::Debug for AliyunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliyunConfig")
            .field("access_key_id", &mask_secret(&self.access_key_id))
            .field("access_key_secret", &"<redacted>")
            .field("update_only", &self.update_only)
            .field("resource_group", &self.resource_group)
            .finish()
    }
}

#[cfg(feature = "aliyun")]
impl AliyunConfig {
    pub const ACCESS_KEY_ID: &'static str = "ALIYUN_ACCESS_KEY_ID";
    pub const ACCESS_KEY_SECRET: &'static str = "ALIYUN_ACCESS_KEY_SECRET";
    pub const UPDATE_ONLY: &'static str = "ALIYUN_CERT_UPDATE_ONLY";
    pub const RESOURCE_GROUP: &'static str = "ALIYUN_CERT_RESOURCE_GROUP";

    pub fn from_source(source: &ConfigSource) -> Result<Self, CredentialValidationError> {
        Ok(Self {
            access_key_id: source.get_required("aliyun", Self::ACCESS_KEY_ID, "Access Key ID")?,
            access_key_secret: source.get_required(
                "aliyun",
                Self::ACCESS_KEY_SECRET,
                "Access Key Secret",
            )?,
            update_only: source.get_flag(Self::UPDATE_ONLY),
            resource_group: source.get(Self::RESOURCE_GROUP).map(str::to_string),
        })
    }
}

/// Tencent Cloud CDN configuration.
#[cfg(feature = "tencentcloud")]
#[derive(Clone, Serialize, Deserialize)]
pub struct TencentCloudConfig {
    pub secret_id: String,
    pub secret_key: String,
    /// Only touch domains that already serve HTTPS.
    #[serde(default)]
    pub update_only: bool,
}

#[cfg(feature = "tencentcloud")]
impl fmt::Debug for TencentCloudConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TencentCloudConfig")
            .field("secret_id", &mask_secret(&self.secret_id))
            .field("secret_key", &"<redacted>")
            .field("update_only", &self.update_only)
            .finish()
    }
}

#[cfg(feature = "tencentcloud")]
impl TencentCloudConfig {
    pub const SECRET_ID: &'static str = "TENCENTCLOUD_SECRET_ID";
    pub const SECRET_KEY: &'static str = "TENCENTCLOUD_SECRET_KEY";
    pub const UPDATE_ONLY: &'static str = "TENCENTCLOUD_CERT_UPDATE_ONLY";

    pub fn from_source(source: &ConfigSource) -> Result<Self, CredentialValidationError> {
        Ok(Self {
            secret_id: source.get_required("tencentcloud", Self::SECRET_ID, "Secret ID")?,
            secret_key: source.get_required("tencentcloud", Self::SECRET_KEY, "Secret Key")?,
            update_only: source.get_flag(Self::UPDATE_ONLY),
        })
    }
}

/// UDomain CDN configuration.
#[cfg(feature = "udomain")]
#[derive(Clone, Serialize, Deserialize)]
pub struct UDomainConfig {
    pub api_key: String,
}

#[cfg(feature = "udomain")]
impl fmt::Debug for UDomainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UDomainConfig")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(feature = "udomain")]
impl UDomainConfig {
    pub const API_KEY: &'static str = "UDOMAIN_API_KEY";

    pub fn from_source(source: &ConfigSource) -> Result<Self, CredentialValidationError> {
        Ok(Self {
            api_key: source.get_required("udomain", Self::API_KEY, "API Key")?,
        })
    }
}

/// Upyun console account.
#[cfg(feature = "upyun")]
#[derive(Clone, Serialize, Deserialize)]
pub struct UpyunConfig {
    pub username: String,
    pub password: String,
}

#[cfg(feature = "upyun")]
impl fmt::Debug for UpyunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpyunConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(feature = "upyun")]
impl UpyunConfig {
    pub const USERNAME: &'static str = "UPYUN_USERNAME";
    pub const PASSWORD: &'static str = "UPYUN_PASSWORD";

    pub fn from_source(source: &ConfigSource) -> Result<Self, CredentialValidationError> {
        Ok(Self {
            username: source.get_required("upyun", Self::USERNAME, "Username")?,
            password: source.get_required("upyun", Self::PASSWORD, "Password")?,
        })
    }
}

/// Azure Key Vault configuration (service principal, client-credentials flow).
#[cfg(feature = "azure")]
#[derive(Clone, Serialize, Deserialize)]
pub struct AzureConfig {
    /// Vault base URI, e.g. `https://my-vault.vault.azure.net`.
    pub vault_uri: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

#[cfg(feature = "azure")]
impl fmt::Debug for AzureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureConfig")
            .field("vault_uri", &self.vault_uri)
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(feature = "azure")]
impl AzureConfig {
    pub const VAULT_URI: &'static str = "AZURE_KEY_VAULT_URI";
    pub const TENANT_ID: &'static str = "AZURE_TENANT_ID";
    pub const CLIENT_ID: &'static str = "AZURE_CLIENT_ID";
    pub const CLIENT_SECRET: &'static str = "AZURE_CLIENT_SECRET";

    pub fn from_source(source: &ConfigSource) -> Result<Self, CredentialValidationError> {
        let vault_uri = source.get_required("azure", Self::VAULT_URI, "Key Vault URI")?;
        if !vault_uri.starts_with("https://") && !vault_uri.starts_with("http://") {
            return Err(CredentialValidationError::InvalidFormat {
                provider: "azure".to_string(),
                field: Self::VAULT_URI.to_string(),
                label: "Key Vault URI".to_string(),
                reason: format!("expected an absolute URL, got '{vault_uri}'"),
            });
        }
        Ok(Self {
            vault_uri: vault_uri.trim_end_matches('/').to_string(),
            tenant_id: source.get_required("azure", Self::TENANT_ID, "Tenant ID")?,
            client_id: source.get_required("azure", Self::CLIENT_ID, "Client ID")?,
            client_secret: source.get_required("azure", Self::CLIENT_SECRET, "Client Secret")?,
        })
    }
}

/// Volcengine product lines the certificate is pushed to.
#[cfg(feature = "volc")]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VolcTarget {
    Cdn,
    Dcdn,
}

/// Volcengine configuration.
#[cfg(feature = "volc")]
#[derive(Clone, Serialize, Deserialize)]
pub struct VolcConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Product lines to update, in execution order.
    pub targets: Vec<VolcTarget>,
}

#[cfg(feature = "volc")]
impl fmt::Debug for VolcConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolcConfig")
            .field("access_key_id", &mask_secret(&self.access_key_id))
            .field("secret_access_key", &"<redacted>")
            .field("targets", &self.targets)
            .finish()
    }
}

#[cfg(feature = "volc")]
impl VolcConfig {
    pub const ACCESS_KEY_ID: &'static str = "VOLC_ACCESS_KEY_ID";
    pub const SECRET_ACCESS_KEY: &'static str = "VOLC_SECRET_ACCESS_KEY";
    pub const DEPLOY_TARGETS: &'static str = "VOLC_DEPLOY_TARGETS";

    pub fn from_source(source: &ConfigSource) -> Result<Self, CredentialValidationError> {
        let targets = match source.get(Self::DEPLOY_TARGETS) {
            Some(raw) => Self::parse_targets(raw)?,
            None => vec![VolcTarget::Cdn, VolcTarget::Dcdn],
        };
        Ok(Self {
            access_key_id: source.get_required("volc", Self::ACCESS_KEY_ID, "Access Key ID")?,
            secret_access_key: source.get_required(
                "volc",
                Self::SECRET_ACCESS_KEY,
                "Secret Access Key",
            )?,
            targets,
        })
    }

    /// Parses a comma separated target list. CDN always runs before DCDN.
    pub fn parse_targets(raw: &str) -> Result<Vec<VolcTarget>, CredentialValidationError> {
        let mut cdn = false;
        let mut dcdn = false;
        for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match item.to_ascii_lowercase().as_str() {
                "cdn" => cdn = true,
                "dcdn" => dcdn = true,
                other => {
                    return Err(CredentialValidationError::InvalidFormat {
                        provider: "volc".to_string(),
                        field: Self::DEPLOY_TARGETS.to_string(),
                        label: "Deploy Targets".to_string(),
                        reason: format!("unknown target '{other}', expected cdn or dcdn"),
                    });
                }
            }
        }
        let mut targets = Vec::new();
        if cdn {
            targets.push(VolcTarget::Cdn);
        }
        if dcdn {
            targets.push(VolcTarget::Dcdn);
        }
        Ok(targets)
    }
}

/// Type-safe configuration container for all supported deployers.
///
/// Pass this to [`create_deployer()`](crate::create_deployer) to instantiate a deployer.
///
/// # Serialization
///
/// Serialized as a tagged enum with `"provider"` as the tag and `"config"` as the content:
///
/// ```json
/// { "provider": "udomain", "config": { "api_key": "..." } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "config", rename_all = "lowercase")]
pub enum ProviderConfig {
    #[cfg(feature = "aliyun")]
    Aliyun(AliyunConfig),
    #[cfg(feature = "tencentcloud")]
    Tencentcloud(TencentCloudConfig),
    #[cfg(feature = "udomain")]
    Udomain(UDomainConfig),
    #[cfg(feature = "upyun")]
    Upyun(UpyunConfig),
    #[cfg(feature = "azure")]
    Azure(AzureConfig),
    #[cfg(feature = "volc")]
    Volc(VolcConfig),
}

impl ProviderConfig {
    /// Read the configuration of `provider` from `source`, validating required keys.
    pub fn from_source(
        provider: ProviderType,
        source: &ConfigSource,
    ) -> Result<Self, CredentialValidationError> {
        match provider {
            #[cfg(feature = "aliyun")]
            ProviderType::Aliyun => AliyunConfig::from_source(source).map(Self::Aliyun),
            #[cfg(feature = "tencentcloud")]
            ProviderType::Tencentcloud => {
                TencentCloudConfig::from_source(source).map(Self::Tencentcloud)
            }
            #[cfg(feature = "udomain")]
            ProviderType::Udomain => UDomainConfig::from_source(source).map(Self::Udomain),
            #[cfg(feature = "upyun")]
            ProviderType::Upyun => UpyunConfig::from_source(source).map(Self::Upyun),
            #[cfg(feature = "azure")]
            ProviderType::Azure => AzureConfig::from_source(source).map(Self::Azure),
            #[cfg(feature = "volc")]
            ProviderType::Volc => VolcConfig::from_source(source).map(Self::Volc),
        }
    }

    /// Returns the [`ProviderType`] corresponding to this configuration variant.
    pub fn provider_type(&self) -> ProviderType {
        match self {
            #[cfg(feature = "aliyun")]
            Self::Aliyun(_) => ProviderType::Aliyun,
            #[cfg(feature = "tencentcloud")]
            Self::Tencentcloud(_) => ProviderType::Tencentcloud,
            #[cfg(feature = "udomain")]
            Self::Udomain(_) => ProviderType::Udomain,
            #[cfg(feature = "upyun")]
            Self::Upyun(_) => ProviderType::Upyun,
            #[cfg(feature = "azure")]
            Self::Azure(_) => ProviderType::Azure,
            #[cfg(feature = "volc")]
            Self::Volc(_) => ProviderType::Volc,
        }
    }
}
