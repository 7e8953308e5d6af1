//! 火山引擎 HTTP 请求方法

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::common::sha256_hex;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::sign::{JSON_CONTENT_TYPE, canonical_query};
use super::{VolcDeployer, VolcResponse, VolcService};

impl VolcDeployer {
    /// 执行 OpenAPI 请求：`POST /?Action=..&Version=..`，JSON 请求体
    pub(crate) async fn request<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        service: VolcService,
        action: &str,
        body: &B,
    ) -> Result<T> {
        // 1. 序列化请求体
        let payload = HttpUtils::to_json(body, self.provider_name())?;
        let payload_sha256 = sha256_hex(payload.as_bytes());

        // 2. 生成签名
        let x_date = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        let query = canonical_query(action, service.version);
        let authorization = self.sign(service, &query, &payload_sha256, &x_date);

        // 3. 发送请求
        let mut url = self.endpoint.clone();
        url.set_query(Some(&query));
        let request = self
            .client
            .post(url)
            .header("Host", &self.host)
            .header("Content-Type", JSON_CONTENT_TYPE)
            .header("X-Date", &x_date)
            .header("X-Content-Sha256", &payload_sha256)
            .header("Authorization", authorization)
            .body(payload);

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), "POST", action).await?;

        // 4. 解析响应，检查 ResponseMetadata.Error
        let response: VolcResponse = match serde_json::from_str(&response_text) {
            Ok(v) => v,
            Err(_) if status >= 400 => {
                return Err(self.map_error(RawApiError::with_code(
                    status.to_string(),
                    format!("HTTP {status}"),
                )));
            }
            Err(e) => return Err(self.parse_error(e)),
        };

        if let Some(error) = response.response_metadata.error {
            log::error!(
                "[volc] {action} failed: {} - {} (request id {})",
                error.code,
                error.message,
                response.response_metadata.request_id
            );
            return Err(self.map_error(RawApiError::with_code(error.code, error.message)));
        }
        if status >= 400 {
            return Err(self.map_error(RawApiError::with_code(
                status.to_string(),
                format!("HTTP {status}"),
            )));
        }

        // 5. 提取 Result
        serde_json::from_value(response.result).map_err(|e| self.parse_error(e))
    }
}
