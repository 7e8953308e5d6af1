//! 阿里云错误映射

use crate::error::DeployError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::AliyunDeployer;

/// 阿里云 CDN 错误码映射
/// 参考: <https://api.aliyun.com/document/Cdn/2018-05-10/errorCode>
impl ProviderErrorMapper for AliyunDeployer {
    fn provider_name(&self) -> &'static str {
        "aliyun"
    }

    fn map_error(&self, raw: RawApiError) -> DeployError {
        match raw.code.as_deref() {
            // ============ 认证错误 ============
            Some(
                "InvalidAccessKeyId.NotFound"
                | "InvalidAccessKeyId.Inactive"
                | "SignatureDoesNotMatch"
                | "IncompleteSignature"
                | "401"
                | "403",
            ) => self.credentials_error(raw),

            // ============ 其他错误 fallback ============
            _ => self.api_error(raw),
        }
    }
}
