//! UDomain HTTP 请求方法

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::{UDomainDeployer, UDomainResponse};

impl UDomainDeployer {
    fn build(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .header("Authorization", &self.config.api_key)
    }

    /// 发送请求并按 `code` 字段检查信封，`payload` 缺失视为错误
    pub(crate) async fn send<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
        B: Serialize,
    {
        self.send_optional(method, path, body)
            .await?
            .ok_or_else(|| self.parse_error("响应中缺少 payload 字段"))
    }

    /// 同 [`send`](Self::send)，但 `payload` 为 null 或缺失时返回 `None`
    pub(crate) async fn send_optional<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
        B: Serialize,
    {
        let mut request = self.build(method.clone(), path);
        if let Some(body) = body {
            request = request.json(body);
        }

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), method.as_str(), path)
                .await?;

        let envelope: UDomainResponse<T> = match serde_json::from_str(&response_text) {
            Ok(v) => v,
            Err(_) if status > 299 => {
                return Err(self.map_error(RawApiError::with_code(
                    status.to_string(),
                    format!("HTTP {status}"),
                )));
            }
            Err(e) => return Err(self.parse_error(e)),
        };

        if !envelope.is_success() {
            log::error!(
                "[udomain] {method} {path} failed: {} - {}",
                envelope.code,
                envelope.message
            );
            let code = if envelope.code.is_empty() {
                status.to_string()
            } else {
                envelope.code
            };
            return Err(self.map_error(RawApiError::with_code(code, envelope.message)));
        }

        Ok(envelope.payload)
    }

    /// `PUT` 请求，仅以 HTTP 状态码判断成败
    pub(crate) async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let request = self.build(Method::PUT, path).json(body);
        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), "PUT", path).await?;

        if status > 299 {
            let (code, message) =
                match serde_json::from_str::<UDomainResponse<serde_json::Value>>(&response_text) {
                    Ok(envelope) if !envelope.code.is_empty() => (envelope.code, envelope.message),
                    _ => (status.to_string(), format!("HTTP {status}")),
                };
            log::error!("[udomain] PUT {path} failed: {code} - {message}");
            return Err(self.map_error(RawApiError::with_code(code, message)));
        }
        Ok(())
    }
}
