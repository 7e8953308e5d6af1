//! Azure 错误映射

use crate::error::DeployError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::AzureDeployer;

impl ProviderErrorMapper for AzureDeployer {
    fn provider_name(&self) -> &'static str {
        "azure"
    }

    fn map_error(&self, raw: RawApiError) -> DeployError {
        match raw.code.as_deref() {
            // 身份认证（OAuth2 错误码）
            Some(
                "invalid_client" | "unauthorized_client" | "invalid_grant" | "invalid_request",
            ) => self.credentials_error(raw),
            // Key Vault 拒绝访问
            Some("401" | "403" | "Unauthorized" | "Forbidden") => self.credentials_error(raw),
            _ => self.api_error(raw),
        }
    }
}
