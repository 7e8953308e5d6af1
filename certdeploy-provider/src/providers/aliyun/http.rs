//! 阿里云 HTTP 请求方法

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::common::sha256_hex;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::sign::FORM_CONTENT_TYPE;
use super::{ALIYUN_CDN_VERSION, AliyunDeployer, serialize_to_form};

impl AliyunDeployer {
    /// 执行阿里云 RPC 请求（参数以 form body 提交）
    pub(crate) async fn request<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        action: &str,
        params: &B,
    ) -> Result<T> {
        // 1. 序列化参数
        let body = serialize_to_form(params)?;
        let body_sha256 = sha256_hex(body.as_bytes());

        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let nonce = uuid::Uuid::new_v4().to_string();

        // 2. 生成签名
        let authorization = self.sign(action, &body_sha256, &timestamp, &nonce);

        // 3. 发送请求
        let request = self
            .client
            .post(self.endpoint.clone())
            .header("Host", &self.host)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .header("x-acs-action", action)
            .header("x-acs-version", ALIYUN_CDN_VERSION)
            .header("x-acs-date", &timestamp)
            .header("x-acs-signature-nonce", &nonce)
            .header("x-acs-content-sha256", &body_sha256)
            .header("Authorization", authorization)
            .body(body);

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), "POST", action).await?;

        // 4. 解析为 Value，检查错误信封（HTTP 4xx/5xx 时同样带 Code/Message）
        let value: serde_json::Value = match serde_json::from_str(&response_text) {
            Ok(v) => v,
            Err(_) if status >= 400 => {
                return Err(self.map_error(RawApiError::with_code(
                    status.to_string(),
                    format!("HTTP {status}"),
                )));
            }
            Err(e) => return Err(self.parse_error(e)),
        };

        if let (Some(code), Some(message)) = (
            value.get("Code").and_then(|v| v.as_str()),
            value.get("Message").and_then(|v| v.as_str()),
        ) {
            log::error!("[aliyun] {action} failed: {code} - {message}");
            return Err(self.map_error(RawApiError::with_code(code, message)));
        }
        if status >= 400 {
            return Err(self.map_error(RawApiError::with_code(
                status.to_string(),
                format!("HTTP {status}"),
            )));
        }

        // 5. 转换为目标类型
        serde_json::from_value(value).map_err(|e| self.parse_error(e))
    }
}
