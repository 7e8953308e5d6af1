//! 控制台会话（typestate）
//!
//! `LoggedOut -> LoggedIn -> CertUploaded -> DomainsResolved`。每一步消费上一步
//! 的值，未登录时无法上传证书，未上传时无法查询或绑定域名。

use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;

use crate::error::{DeployError, Result};
use crate::http_client::HttpUtils;
use crate::providers::common::create_session_client;
use crate::traits::{ProviderErrorMapper, RawApiError};
use crate::types::CertificateBundle;

use super::types::{
    BindCertificateRequest, EnvelopeError, MigrateDomainRequest, SigninRequest,
    UploadCertificateRequest, certificate_id, check_envelope, domain_names,
};
use super::{MIGRATE_REQUIRED_CODE, UpyunDeployer};

pub(crate) struct LoggedOut;

pub(crate) struct LoggedIn;

pub(crate) struct CertUploaded {
    certificate_id: String,
}

pub(crate) struct DomainsResolved {
    certificate_id: String,
    domains: Vec<String>,
}

/// 绑定了 cookie 的控制台会话
pub(crate) struct Session<'a, S> {
    deployer: &'a UpyunDeployer,
    client: Client,
    state: S,
}

impl<'a, S> Session<'a, S> {
    /// 发送请求并检查信封，失败时返回信封错误以便调用方区分错误码
    async fn call<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<std::result::Result<Value, EnvelopeError>> {
        let url = self
            .deployer
            .base_url
            .join(path)
            .map_err(|e| DeployError::configuration(format!("[upyun] invalid path {path}: {e}")))?;
        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let (status, text) = HttpUtils::execute_request(
            request,
            self.deployer.provider_name(),
            method.as_str(),
            path,
        )
        .await?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str::<Value>(&text) {
                Ok(v) => v,
                Err(_) if status > 299 => {
                    return Ok(Err(EnvelopeError::TopLevel(RawApiError::with_code(
                        status.to_string(),
                        format!("HTTP {status}"),
                    ))));
                }
                Err(e) => return Err(self.deployer.parse_error(e)),
            }
        };

        Ok(check_envelope(&body).map(|()| body).map_err(|err| {
            let raw = err.raw();
            log::error!(
                "[upyun] {method} {path} failed: {:?} - {}",
                raw.code,
                raw.message
            );
            err
        }))
    }

    fn transition<T>(self, state: T) -> Session<'a, T> {
        Session {
            deployer: self.deployer,
            client: self.client,
            state,
        }
    }
}

impl<'a> Session<'a, LoggedOut> {
    /// 每次部署使用独立的 cookie 会话
    pub(crate) fn new(deployer: &'a UpyunDeployer) -> Result<Self> {
        Ok(Self {
            deployer,
            client: create_session_client("upyun")?,
            state: LoggedOut,
        })
    }

    /// `POST /accounts/signin/`，任何信封错误都视为凭证被拒绝
    pub(crate) async fn login(self) -> Result<Session<'a, LoggedIn>> {
        let config = &self.deployer.config;
        let outcome = self
            .call(
                Method::POST,
                "/accounts/signin/",
                Some(&SigninRequest {
                    username: &config.username,
                    password: &config.password,
                }),
            )
            .await?;

        match outcome {
            Ok(_) => Ok(self.transition(LoggedIn)),
            Err(err) => Err(self.deployer.credentials_error(err.into_raw())),
        }
    }
}

impl<'a> Session<'a, LoggedIn> {
    /// `POST /api/https/certificate/`
    pub(crate) async fn upload_certificate(
        self,
        bundle: &CertificateBundle,
    ) -> Result<Session<'a, CertUploaded>> {
        let body = self
            .call(
                Method::POST,
                "/api/https/certificate/",
                Some(&UploadCertificateRequest {
                    certificate: bundle.cert_pem(),
                    private_key: bundle.key_pem(),
                }),
            )
            .await?
            .map_err(|err| self.deployer.map_error(err.into_raw()))?;

        let certificate_id = certificate_id(&body)
            .ok_or_else(|| self.deployer.parse_error("missing data.result.certificate_id"))?;
        Ok(self.transition(CertUploaded { certificate_id }))
    }
}

impl<'a> Session<'a, CertUploaded> {
    pub(crate) fn certificate_id(&self) -> &str {
        &self.state.certificate_id
    }

    /// `GET /api/https/certificate/manager/?certificate_id=…`
    pub(crate) async fn resolve_domains(self) -> Result<Session<'a, DomainsResolved>> {
        let path = format!(
            "/api/https/certificate/manager/?certificate_id={}",
            urlencoding::encode(&self.state.certificate_id)
        );
        let body = self
            .call(Method::GET, &path, None::<&()>)
            .await?
            .map_err(|err| self.deployer.map_error(err.into_raw()))?;

        let domains = domain_names(&body);
        let certificate_id = self.state.certificate_id.clone();
        Ok(self.transition(DomainsResolved {
            certificate_id,
            domains,
        }))
    }
}

impl Session<'_, DomainsResolved> {
    pub(crate) fn domains(&self) -> &[String] {
        &self.state.domains
    }

    /// `POST /api/https/certificate/manager/`
    ///
    /// `data.error_code` 为 21713 时改走迁移接口一次，迁移结果即为绑定结果。
    /// 顶层 `error_code` 的 21713 按普通错误处理。
    pub(crate) async fn bind(&self, domain: &str) -> Result<()> {
        let certificate_id = self.state.certificate_id.as_str();
        let outcome = self
            .call(
                Method::POST,
                "/api/https/certificate/manager/",
                Some(&BindCertificateRequest {
                    certificate_id,
                    domain,
                    https: true,
                }),
            )
            .await?;

        match outcome {
            Ok(_) => Ok(()),
            Err(err) if err.data_code() == Some(MIGRATE_REQUIRED_CODE) => {
                log::info!("[upyun] Domain {domain} requires migration, migrating");
                self.migrate(domain).await
            }
            Err(err) => Err(self.deployer.map_error(err.into_raw())),
        }
    }

    /// `POST /api/https/migrate/domain`
    async fn migrate(&self, domain: &str) -> Result<()> {
        self.call(
            Method::POST,
            "/api/https/migrate/domain",
            Some(&MigrateDomainRequest {
                crt_id: &self.state.certificate_id,
                domain_name: domain,
            }),
        )
        .await?
        .map(|_| ())
        .map_err(|err| self.deployer.map_error(err.into_raw()))
    }
}
