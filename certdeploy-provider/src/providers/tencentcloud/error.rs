//! 腾讯云错误映射

use crate::error::DeployError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::TencentCloudDeployer;

/// 腾讯云错误码映射
/// 参考: <https://cloud.tencent.com/document/api/228/30983>
impl ProviderErrorMapper for TencentCloudDeployer {
    fn provider_name(&self) -> &'static str {
        "tencentcloud"
    }

    fn map_error(&self, raw: RawApiError) -> DeployError {
        match raw.code.as_deref() {
            Some(code)
                if code.starts_with("AuthFailure")
                    || code == "UnauthorizedOperation.CdnCamUnauthorized" =>
            {
                self.credentials_error(raw)
            }
            _ => self.api_error(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TencentCloudConfig;

    fn deployer() -> TencentCloudDeployer {
        TencentCloudDeployer::new(TencentCloudConfig {
            secret_id: "id".to_string(),
            secret_key: "key".to_string(),
            update_only: false,
        })
        .unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn auth_failures_are_credentials_errors() {
        for code in ["AuthFailure.SignatureFailure", "AuthFailure.SecretIdNotFound"] {
            let err = deployer().map_error(RawApiError::with_code(code, "denied"));
            assert!(
                matches!(err, DeployError::InvalidCredentials { .. }),
                "{code} -> {err:?}"
            );
        }
    }

    #[test]
    fn other_codes_are_api_errors() {
        let err = deployer().map_error(RawApiError::with_code(
            "InvalidParameter.CdnCertInfoNotFound",
            "certificate info not found",
        ));
        assert!(matches!(err, DeployError::Api { raw_code: Some(ref c), .. } if c == "InvalidParameter.CdnCertInfoNotFound"));
    }
}
