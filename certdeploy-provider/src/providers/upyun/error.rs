//! 又拍云错误映射

use crate::error::DeployError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::UpyunDeployer;

impl ProviderErrorMapper for UpyunDeployer {
    fn provider_name(&self) -> &'static str {
        "upyun"
    }

    fn map_error(&self, raw: RawApiError) -> DeployError {
        match raw.code.as_deref() {
            // 会话失效
            Some("401" | "403") => self.credentials_error(raw),
            _ => self.api_error(raw),
        }
    }
}
