//! certdeploy 命令行入口
//!
//! 作为 ACME 客户端（如 lego）的续期钩子运行，所有输入都来自环境变量：
//!
//! - `CERT_PATH` / `LEGO_CERT_PATH`：证书 PEM 路径
//! - `CERT_KEY_PATH` / `LEGO_CERT_KEY_PATH`：私钥 PEM 路径
//! - `CERT_DEPLOYER`：部署目标，默认 `aliyun`
//! - 各 deployer 自己的凭证变量，见 `certdeploy list`
//!
//! 用法：
//!
//! ```text
//! certdeploy          # 部署
//! certdeploy list     # 以 JSON 输出所有 deployer 及其配置项
//! ```

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use certdeploy_provider::{
    CertificateBundle, ConfigSource, DeployError, domains_from_certificate,
    get_all_deployer_metadata,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DEPLOYER: &str = "aliyun";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // stdout 留给 `list` 输出
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let result = match std::env::args().nth(1).as_deref() {
        None => run().await,
        Some("list") => list(),
        Some(other) => Err(anyhow::anyhow!(
            "unknown command '{other}' (run without arguments to deploy, or `list`)"
        )),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        // 配置和凭证问题降为 warn
        Err(err) if err.downcast_ref::<DeployError>().is_some_and(DeployError::is_expected) => {
            tracing::warn!("{err:#}");
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let source = ConfigSource::from_env();

    let (Some(cert_path), Some(key_path)) = (
        source.get_any(&["CERT_PATH", "LEGO_CERT_PATH"]),
        source.get_any(&["CERT_KEY_PATH", "LEGO_CERT_KEY_PATH"]),
    ) else {
        bail!("no cert file and/or key file given (set CERT_PATH and CERT_KEY_PATH)");
    };
    let deployer = source.get("CERT_DEPLOYER").unwrap_or(DEFAULT_DEPLOYER);

    tracing::info!("Deploying cert {cert_path}, key {key_path} using deployer: {deployer}");

    let cert_pem = read_pem(cert_path)?;
    let key_pem = read_pem(key_path)?;

    let domains = domains_from_certificate(&cert_pem)
        .context("failed to parse domains from certificate")?;
    if domains.is_empty() {
        tracing::warn!("Certificate {cert_path} does not name any domain");
    }

    let bundle = CertificateBundle::new(cert_pem, key_pem);
    certdeploy_provider::deploy(deployer, &source, &domains, &bundle)
        .await
        .context("failed to deploy")?;

    tracing::info!("Finished deploying certificate for {domains}");
    Ok(())
}

fn read_pem(path: &str) -> Result<String> {
    std::fs::read_to_string(Path::new(path)).with_context(|| format!("failed to read {path}"))
}

fn list() -> Result<()> {
    let metadata = get_all_deployer_metadata();
    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}
