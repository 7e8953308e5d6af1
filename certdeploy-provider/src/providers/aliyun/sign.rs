//! 阿里云 ACS3-HMAC-SHA256 签名

use crate::providers::common::{hmac_sha256, sha256_hex};

use super::{ALIYUN_CDN_VERSION, AliyunDeployer};

/// 签名所覆盖的请求头（按字母序）
const SIGNED_HEADERS: &str =
    "content-type;host;x-acs-action;x-acs-content-sha256;x-acs-date;x-acs-signature-nonce;x-acs-version";

pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

impl AliyunDeployer {
    /// 生成 ACS3-HMAC-SHA256 签名
    ///
    /// RPC 参数放在表单 body 中（证书内容过长，不适合 query string），
    /// 因此规范化查询串为空，payload hash 为 body 的 SHA256。
    /// 参考: <https://www.alibabacloud.com/help/zh/sdk/product-overview/v3-request-structure-and-signature>
    pub(crate) fn sign(
        &self,
        action: &str,
        body_sha256: &str,
        timestamp: &str,
        nonce: &str,
    ) -> String {
        // 1. 构造规范化请求头
        let canonical_headers = format!(
            "content-type:{FORM_CONTENT_TYPE}\nhost:{}\nx-acs-action:{action}\nx-acs-content-sha256:{body_sha256}\nx-acs-date:{timestamp}\nx-acs-signature-nonce:{nonce}\nx-acs-version:{ALIYUN_CDN_VERSION}\n",
            self.host
        );

        // 2. 构造规范化请求
        let canonical_request =
            format!("POST\n/\n\n{canonical_headers}\n{SIGNED_HEADERS}\n{body_sha256}");

        log::debug!("CanonicalRequest:\n{canonical_request}");

        // 3. 构造待签名字符串
        let string_to_sign = format!(
            "ACS3-HMAC-SHA256\n{}",
            sha256_hex(canonical_request.as_bytes())
        );

        // 4. 计算签名
        let signature = hex::encode(hmac_sha256(
            self.config.access_key_secret.as_bytes(),
            string_to_sign.as_bytes(),
        ));

        // 5. 构造 Authorization 头
        format!(
            "ACS3-HMAC-SHA256 Credential={},SignedHeaders={SIGNED_HEADERS},Signature={signature}",
            self.config.access_key_id
        )
    }
}
