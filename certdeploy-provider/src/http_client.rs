//! Shared HTTP plumbing
//!
//! Every provider builds and signs its own `RequestBuilder`; this module only
//! sends it, logs the exchange and classifies transport failures. Requests are
//! sent once. Nothing here retries.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::DeployError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP 工具函数集
pub struct HttpUtils;

impl HttpUtils {
    /// Send a request and return `(status, body)`.
    ///
    /// # Arguments
    /// * `request_builder` - fully signed request
    /// * `provider_name` - provider key, used in logs and errors
    /// * `method_name` - HTTP method, for logs
    /// * `url_or_action` - path or API action name, for logs
    ///
    /// Timeouts map to [`DeployError::Timeout`], connection failures and
    /// gateway errors (502/503/504) to [`DeployError::NetworkError`]. Any other
    /// status is returned to the caller, which owns envelope parsing.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String), DeployError> {
        log::debug!("[{provider_name}] {method_name} {url_or_action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                DeployError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                DeployError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Gateway error (HTTP {status_code}) on {url_or_action}");
            return Err(DeployError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| DeployError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse a JSON response body.
    ///
    /// Failures are logged with a truncated copy of the body and returned as
    /// [`DeployError::ParseError`].
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, DeployError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            DeployError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Serialize a request body, mapping failures to [`DeployError::SerializationError`].
    pub fn to_json<T: serde::Serialize>(body: &T, provider_name: &str) -> Result<String, DeployError> {
        serde_json::to_string(body).map_err(|e| DeployError::SerializationError {
            provider: provider_name.to_string(),
            detail: e.to_string(),
        })
    }
}
