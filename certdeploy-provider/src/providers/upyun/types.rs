//! 又拍云控制台 API 类型定义和信封检查

use serde::Serialize;
use serde_json::Value;

use crate::traits::RawApiError;

#[derive(Debug, Serialize)]
pub struct SigninRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UploadCertificateRequest<'a> {
    pub certificate: &'a str,
    pub private_key: &'a str,
}

#[derive(Debug, Serialize)]
pub struct BindCertificateRequest<'a> {
    pub certificate_id: &'a str,
    pub domain: &'a str,
    pub https: bool,
}

#[derive(Debug, Serialize)]
pub struct MigrateDomainRequest<'a> {
    pub crt_id: &'a str,
    pub domain_name: &'a str,
}

/// 字符串或数字统一转为字符串
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn message_of(value: Option<&Value>) -> String {
    value.and_then(value_to_string).unwrap_or_default()
}

/// 信封错误，区分错误码出现的位置
#[derive(Debug)]
pub(crate) enum EnvelopeError {
    /// `data.error_code`（业务错误，迁移提示只出现在这里）
    Data(RawApiError),
    /// 顶层 `error_code` 或非 JSON 的 HTTP 错误
    TopLevel(RawApiError),
}

impl EnvelopeError {
    /// `data.error_code`，顶层错误码不算
    pub fn data_code(&self) -> Option<&str> {
        match self {
            Self::Data(raw) => raw.code.as_deref(),
            Self::TopLevel(_) => None,
        }
    }

    pub fn raw(&self) -> &RawApiError {
        match self {
            Self::Data(raw) | Self::TopLevel(raw) => raw,
        }
    }

    pub fn into_raw(self) -> RawApiError {
        match self {
            Self::Data(raw) | Self::TopLevel(raw) => raw,
        }
    }
}

/// 统一信封检查
///
/// - `data.error_code` 存在：错误消息取 `data.message`
/// - 顶层 `error_code` 存在：错误消息为 `{error}({message})`
pub fn check_envelope(body: &Value) -> Result<(), EnvelopeError> {
    if let Some(code) = body.pointer("/data/error_code") {
        return Err(EnvelopeError::Data(RawApiError {
            code: value_to_string(code),
            message: message_of(body.pointer("/data/message")),
        }));
    }
    if let Some(code) = body.get("error_code") {
        return Err(EnvelopeError::TopLevel(RawApiError {
            code: value_to_string(code),
            message: format!(
                "{}({})",
                message_of(body.get("error")),
                message_of(body.get("message"))
            ),
        }));
    }
    Ok(())
}

/// `data.result.certificate_id`
pub fn certificate_id(body: &Value) -> Option<String> {
    body.pointer("/data/result/certificate_id")
        .and_then(value_to_string)
        .filter(|id| !id.is_empty())
}

/// `data.domains[].name`
pub fn domain_names(body: &Value) -> Vec<String> {
    body.pointer("/data/domains")
        .and_then(Value::as_array)
        .map(|domains| {
            domains
                .iter()
                .filter_map(|d| d.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
