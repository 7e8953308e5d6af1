//! 火山引擎错误映射

use crate::error::DeployError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::VolcDeployer;

/// 参考: <https://www.volcengine.com/docs/6369/68677>
impl ProviderErrorMapper for VolcDeployer {
    fn provider_name(&self) -> &'static str {
        "volc"
    }

    fn map_error(&self, raw: RawApiError) -> DeployError {
        match raw.code.as_deref() {
            Some(
                "InvalidAccessKey"
                | "InvalidSecretToken"
                | "SignatureDoesNotMatch"
                | "InvalidAuthorization"
                | "MissingAuthenticationToken"
                | "AccessDenied"
                | "401"
                | "403",
            ) => self.credentials_error(raw),
            _ => self.api_error(raw),
        }
    }
}
