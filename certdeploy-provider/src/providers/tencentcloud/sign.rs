//! 腾讯云 TC3-HMAC-SHA256 签名

use chrono::{DateTime, Utc};

use crate::providers::common::{hmac_sha256, sha256_hex};

use super::{TENCENT_CDN_SERVICE, TencentCloudDeployer};

pub(crate) const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

impl TencentCloudDeployer {
    /// 生成 TC3-HMAC-SHA256 签名
    /// 参考: <https://cloud.tencent.com/document/api/228/30977>
    pub(crate) fn sign(&self, action: &str, payload: &str, timestamp: i64) -> String {
        let date = DateTime::from_timestamp(timestamp, 0)
            .unwrap_or_else(Utc::now)
            .format("%Y-%m-%d")
            .to_string();

        // 1. 拼接规范请求串
        let canonical_headers = format!(
            "content-type:{JSON_CONTENT_TYPE}\nhost:{}\nx-tc-action:{}\n",
            self.host,
            action.to_lowercase()
        );
        let signed_headers = "content-type;host;x-tc-action";
        let canonical_request = format!(
            "POST\n/\n\n{canonical_headers}\n{signed_headers}\n{}",
            sha256_hex(payload.as_bytes())
        );

        // 2. 拼接待签名字符串
        let algorithm = "TC3-HMAC-SHA256";
        let credential_scope = format!("{date}/{TENCENT_CDN_SERVICE}/tc3_request");
        let string_to_sign = format!(
            "{algorithm}\n{timestamp}\n{credential_scope}\n{}",
            sha256_hex(canonical_request.as_bytes())
        );

        // 3. 计算签名
        let secret_date = hmac_sha256(
            format!("TC3{}", self.config.secret_key).as_bytes(),
            date.as_bytes(),
        );
        let secret_service = hmac_sha256(&secret_date, TENCENT_CDN_SERVICE.as_bytes());
        let secret_signing = hmac_sha256(&secret_service, b"tc3_request");
        let signature = hex::encode(hmac_sha256(&secret_signing, string_to_sign.as_bytes()));

        // 4. 拼接 Authorization
        format!(
            "{algorithm} Credential={}/{credential_scope}, SignedHeaders={signed_headers}, Signature={signature}",
            self.config.secret_id
        )
    }
}
