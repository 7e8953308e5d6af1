//! Azure HTTP 请求方法

use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};

use crate::error::{DeployError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::{
    AzureDeployer, KEY_VAULT_API_VERSION, KEY_VAULT_SCOPE, KeyVaultError, TokenError,
    TokenResponse,
};

impl AzureDeployer {
    /// Client-credentials 流程获取 Key Vault 访问令牌
    pub(crate) async fn fetch_token(&self) -> Result<String> {
        let url = format!(
            "{}/{}/oauth2/v2.0/token",
            self.login_base, self.config.tenant_id
        );
        let request = self.client.post(&url).form(&[
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("scope", KEY_VAULT_SCOPE),
        ]);

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), "POST", "oauth2/v2.0/token")
                .await?;

        if status >= 400 {
            let raw = match serde_json::from_str::<TokenError>(&response_text) {
                Ok(e) => RawApiError::with_code(e.error, e.error_description),
                Err(_) => RawApiError::with_code(status.to_string(), format!("HTTP {status}")),
            };
            log::error!("[azure] Token request failed: {:?} - {}", raw.code, raw.message);
            return Err(self.map_error(raw));
        }

        let token: TokenResponse = HttpUtils::parse_json(&response_text, self.provider_name())?;
        Ok(token.access_token)
    }

    /// 拼接 Vault 地址并附加 `api-version`
    pub(crate) fn vault_url(&self, path: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{path}", self.vault_base)).map_err(|e| {
            DeployError::configuration(format!("[azure] invalid vault path {path}: {e}"))
        })?;
        url.query_pairs_mut()
            .append_pair("api-version", KEY_VAULT_API_VERSION);
        Ok(url)
    }

    /// 发送 Key Vault 请求（Bearer 认证），HTTP 4xx 时解析 `error` 对象
    pub(crate) async fn send<T, B>(
        &self,
        token: &str,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
        B: Serialize,
    {
        let path = url.path().to_string();
        let mut request = self.client.request(method.clone(), url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), method.as_str(), &path)
                .await?;

        if status >= 400 {
            let raw = match serde_json::from_str::<KeyVaultError>(&response_text) {
                Ok(e) => RawApiError::with_code(e.error.code, e.error.message),
                Err(_) => RawApiError::with_code(status.to_string(), format!("HTTP {status}")),
            };
            log::error!(
                "[azure] {method} {path} failed: {:?} - {}",
                raw.code,
                raw.message
            );
            return Err(self.map_error(raw));
        }

        HttpUtils::parse_json(&response_text, self.provider_name())
    }
}
