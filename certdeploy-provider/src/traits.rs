use async_trait::async_trait;

use crate::error::{DeployError, Result};
use crate::types::{CertificateBundle, DomainSet, ProviderMetadata};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（各 Provider 格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError) -> DeployError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> DeployError {
        DeployError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未分类的 API 错误（fallback）
    fn api_error(&self, raw: RawApiError) -> DeployError {
        DeployError::Api {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }

    /// 快捷方法：凭证错误
    fn credentials_error(&self, raw: RawApiError) -> DeployError {
        DeployError::InvalidCredentials {
            provider: self.provider_name().to_string(),
            raw_message: Some(raw.message),
        }
    }
}

/// Certificate deployment target.
///
/// One implementation per provider. A deployer is bound to its credentials at
/// construction time and holds no state between calls, so distinct instances
/// may deploy concurrently. Within one [`deploy`](Self::deploy) call every
/// provider request is awaited before the next one is issued.
#[async_trait]
pub trait Deployer: Send + Sync {
    /// Registry key of this deployer (e.g. `"aliyun"`).
    fn name(&self) -> &'static str;

    /// 获取 Deployer 元数据（类型级别）
    ///
    /// 返回名称、描述以及读取的配置项。不需要实例，可以在创建之前调用。
    fn metadata() -> ProviderMetadata
    where
        Self: Sized;

    /// Push `bundle` to every provider resource covered by `domains`.
    ///
    /// Fails fast: the first failed request aborts the call and nothing that
    /// was already applied is rolled back. Finding no matching resource is not
    /// an error.
    async fn deploy(&self, domains: &DomainSet, bundle: &CertificateBundle) -> Result<()>;
}
