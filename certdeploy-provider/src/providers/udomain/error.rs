//! UDomain 错误映射

use crate::error::DeployError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::UDomainDeployer;

impl ProviderErrorMapper for UDomainDeployer {
    fn provider_name(&self) -> &'static str {
        "udomain"
    }

    fn map_error(&self, raw: RawApiError) -> DeployError {
        match raw.code.as_deref() {
            // API key 无效时网关直接返回 401/403
            Some("401" | "403") => self.credentials_error(raw),
            _ => self.api_error(raw),
        }
    }
}
