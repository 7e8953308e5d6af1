//! Provider 公共工具函数

use std::time::Duration;

use hmac::{Hmac, Mac};
use reqwest::{Client, ClientBuilder, Url};
use sha2::{Digest, Sha256};

use crate::error::{DeployError, Result};

type HmacSha256 = Hmac<Sha256>;

// ============ HTTP Client ============

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

fn client_builder() -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .user_agent(concat!("certdeploy/", env!("CARGO_PKG_VERSION")))
}

fn build_client(builder: ClientBuilder, provider: &str) -> Result<Client> {
    builder.build().map_err(|e| DeployError::NetworkError {
        provider: provider.to_string(),
        detail: format!("failed to create HTTP client: {e}"),
    })
}

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(provider: &str) -> Result<Client> {
    build_client(client_builder(), provider)
}

/// HTTP Client with a cookie store, for console APIs that keep a login session.
#[cfg(feature = "upyun")]
pub fn create_session_client(provider: &str) -> Result<Client> {
    build_client(client_builder().cookie_store(true), provider)
}

// ============ Endpoint ============

/// Parse a configured endpoint and return it with its `host[:port]` authority.
///
/// The authority is what signature schemes put in the `Host` header.
pub fn parse_endpoint(endpoint: &str, provider: &str) -> Result<(Url, String)> {
    let url = Url::parse(endpoint).map_err(|e| {
        DeployError::configuration(format!("[{provider}] invalid endpoint '{endpoint}': {e}"))
    })?;
    let host = url.host_str().ok_or_else(|| {
        DeployError::configuration(format!("[{provider}] endpoint '{endpoint}' has no host"))
    })?;
    let authority = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    Ok((url, authority))
}

// ============ HMAC-SHA256 ============

/// HMAC-SHA256 计算（供 aliyun/tencentcloud/volc 签名使用）
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    // HMAC accepts keys of any length, new_from_slice cannot fail here
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        unreachable!("HMAC can take key of any size")
    };
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// SHA256 hex digest
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

// ============ 域名名称处理 ============

/// Turn a certificate domain into a provider search key.
///
/// `*.example.com` becomes `.example.com` (suffix search), plain names are
/// returned unchanged.
pub fn wildcard_search_key(domain: &str) -> &str {
    domain.strip_prefix('*').unwrap_or(domain)
}

/// Whether a search key produced by [`wildcard_search_key`] is a suffix search.
pub fn is_suffix_search(key: &str) -> bool {
    key.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hmac_sha256_rfc4231_case_2() {
        let mac = hmac_sha256(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            hex::encode(mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn sha256_of_empty_body() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn search_key_strips_wildcard_marker() {
        assert_eq!(wildcard_search_key("*.example.com"), ".example.com");
        assert!(is_suffix_search(wildcard_search_key("*.example.com")));
        assert_eq!(wildcard_search_key("www.example.com"), "www.example.com");
        assert!(!is_suffix_search("www.example.com"));
    }

    #[test]
    fn endpoint_authority_keeps_port() {
        let (_, host) = parse_endpoint("http://127.0.0.1:8080/", "test").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(host, "127.0.0.1:8080");
        let (_, host) = parse_endpoint("https://cdn.aliyuncs.com", "test").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(host, "cdn.aliyuncs.com");
        assert!(parse_endpoint("not a url", "test").is_err());
    }
}
