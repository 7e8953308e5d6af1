//! 腾讯云 HTTP 请求方法

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::sign::JSON_CONTENT_TYPE;
use super::types::TencentError;
use super::{TENCENT_CDN_VERSION, TencentCloudDeployer, TencentResponse};

impl TencentCloudDeployer {
    /// 执行腾讯云 API 请求
    pub(crate) async fn request<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        action: &str,
        body: &B,
    ) -> Result<T> {
        // 1. 序列化请求体
        let payload = HttpUtils::to_json(body, self.provider_name())?;

        // 2. 生成签名
        let timestamp = Utc::now().timestamp();
        let authorization = self.sign(action, &payload, timestamp);

        // 3. 发送请求
        let request = self
            .client
            .post(self.endpoint.clone())
            .header("Content-Type", JSON_CONTENT_TYPE)
            .header("Host", &self.host)
            .header("X-TC-Action", action)
            .header("X-TC-Version", TENCENT_CDN_VERSION)
            .header("X-TC-Timestamp", timestamp.to_string())
            .header("Authorization", authorization)
            .body(payload);

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), "POST", action).await?;

        // 4. 解析响应
        let tc_response: TencentResponse =
            HttpUtils::parse_json(&response_text, self.provider_name())?;

        // 5. 处理错误
        if let Some(error) = tc_response.response.get("Error") {
            let error: TencentError =
                serde_json::from_value(error.clone()).map_err(|e| self.parse_error(e))?;
            log::error!("[tencentcloud] {action} failed: {} - {}", error.code, error.message);
            return Err(self.map_error(RawApiError::with_code(error.code, error.message)));
        }
        if status >= 400 {
            return Err(self.map_error(RawApiError::with_code(
                status.to_string(),
                format!("HTTP {status}"),
            )));
        }

        // 6. 提取数据
        serde_json::from_value(tc_response.response).map_err(|e| self.parse_error(e))
    }
}
