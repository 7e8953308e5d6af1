//! 火山引擎 HMAC-SHA256 签名
//!
//! 参考: <https://www.volcengine.com/docs/6369/67269>

use crate::providers::common::{hmac_sha256, sha256_hex};

use super::{VolcDeployer, VolcService};

pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";

const ALGORITHM: &str = "HMAC-SHA256";
const SIGNED_HEADERS: &str = "content-type;host;x-content-sha256;x-date";

/// `Action=..&Version=..`（按参数名排序）
pub(crate) fn canonical_query(action: &str, version: &str) -> String {
    format!(
        "Action={}&Version={}",
        urlencoding::encode(action),
        urlencoding::encode(version)
    )
}

impl VolcDeployer {
    /// 生成 `Authorization` 头
    ///
    /// `x_date` 形如 `20240115T080000Z`，`payload_sha256` 为请求体的十六进制摘要。
    pub(crate) fn sign(
        &self,
        service: VolcService,
        query: &str,
        payload_sha256: &str,
        x_date: &str,
    ) -> String {
        let date = x_date.get(..8).unwrap_or(x_date);

        // 1. 规范请求
        let canonical_headers = format!(
            "content-type:{JSON_CONTENT_TYPE}\nhost:{}\nx-content-sha256:{payload_sha256}\nx-date:{x_date}\n",
            self.host
        );
        let canonical_request = format!(
            "POST\n/\n{query}\n{canonical_headers}\n{SIGNED_HEADERS}\n{payload_sha256}"
        );

        // 2. 待签名字符串
        let credential_scope = format!("{date}/{}/{}/request", service.region, service.name);
        let string_to_sign = format!(
            "{ALGORITHM}\n{x_date}\n{credential_scope}\n{}",
            sha256_hex(canonical_request.as_bytes())
        );

        // 3. 派生签名密钥
        let k_date = hmac_sha256(self.config.secret_access_key.as_bytes(), date.as_bytes());
        let k_region = hmac_sha256(&k_date, service.region.as_bytes());
        let k_service = hmac_sha256(&k_region, service.name.as_bytes());
        let k_signing = hmac_sha256(&k_service, b"request");
        let signature = hex::encode(hmac_sha256(&k_signing, string_to_sign.as_bytes()));

        format!(
            "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
            self.config.access_key_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::{CDN, DCDN, VolcDeployer};
    use super::canonical_query;
    use crate::types::{VolcConfig, VolcTarget};

    fn deployer(endpoint: &str) -> VolcDeployer {
        VolcDeployer::builder(VolcConfig {
            access_key_id: "AKLTtest".to_string(),
            secret_access_key: "secret".to_string(),
            targets: vec![VolcTarget::Cdn],
        })
        .endpoint(endpoint)
        .build()
        .unwrap_or_else(|e| panic!("{e}"))
    }

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn credential_scope_follows_service() {
        let d = deployer("https://open.volcengineapi.com");
        let query = canonical_query("DescribeCertConfig", CDN.version);
        let auth = d.sign(CDN, &query, EMPTY_SHA256, "20240115T080000Z");
        assert!(
            auth.starts_with("HMAC-SHA256 Credential=AKLTtest/20240115/cn-north-1/cdn/request, "),
            "got: {auth}"
        );
        assert!(auth.contains("SignedHeaders=content-type;host;x-content-sha256;x-date"));

        let auth = d.sign(DCDN, &query, EMPTY_SHA256, "20240115T080000Z");
        assert!(auth.contains("/20240115/cn-beijing/dcdn/request"), "got: {auth}");
    }

    #[test]
    fn host_is_part_of_signature() {
        let query = canonical_query("ListCertBind", DCDN.version);
        let a = deployer("https://open.volcengineapi.com").sign(
            DCDN,
            &query,
            EMPTY_SHA256,
            "20240115T080000Z",
        );
        let b = deployer("http://127.0.0.1:8080").sign(
            DCDN,
            &query,
            EMPTY_SHA256,
            "20240115T080000Z",
        );
        assert_ne!(a, b);
    }

    #[test]
    fn canonical_query_is_sorted_and_encoded() {
        assert_eq!(
            canonical_query("AddCdnCertificate", "2021-03-01"),
            "Action=AddCdnCertificate&Version=2021-03-01"
        );
    }
}
