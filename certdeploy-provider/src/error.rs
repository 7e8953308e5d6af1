use serde::Serialize;
use thiserror::Error;

/// Unified error type for every deployment operation.
///
/// Provider-facing variants carry a `provider` field identifying which workflow
/// produced the error. [`Context`](Self::Context) wraps any other variant with
/// the operation that was running (which domain, page, chunk or stage), so the
/// rendered message reads from the outermost step inwards.
///
/// No variant is retried anywhere: a single failed call aborts the whole
/// deploy invocation and already-applied changes stay in place.
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "code")]
pub enum DeployError {
    /// Unknown deployer name, missing credential or invalid option value.
    #[error("Configuration error: {detail}")]
    Configuration {
        /// Error details.
        detail: String,
    },

    /// The certificate or private key input could not be parsed.
    #[error("Certificate parse error: {detail}")]
    CertificateParse {
        /// Error details.
        detail: String,
    },

    /// The provider rejected the credentials or the login.
    #[error("[{provider}] Invalid credentials{}", fmt_raw(.raw_message.as_deref()))]
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// A network-level error occurred (DNS resolution failure, connection refused, 5xx gateway, etc.).
    #[error("[{provider}] Network error: {detail}")]
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("[{provider}] Request timeout: {detail}")]
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The provider answered with a non-success status or an embedded error envelope.
    #[error("[{provider}] API error{}: {raw_message}", fmt_code(.raw_code.as_deref()))]
    Api {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },

    /// Failed to parse the provider's API response.
    #[error("[{provider}] Parse error: {detail}")]
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    #[error("[{provider}] Serialization error: {detail}")]
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// A paginated listing stopped making progress.
    #[error("[{provider}] Enumeration error: {detail}")]
    Enumeration {
        /// Provider that produced the error.
        provider: String,
        /// Details about the stalled enumeration.
        detail: String,
    },

    /// Another error, annotated with the operation that was running.
    #[error("{context}: {source}")]
    Context {
        /// Operation context, e.g. `"describe domains .example.com page 2"`.
        context: String,
        /// The wrapped error.
        #[source]
        source: Box<DeployError>,
    },
}

fn fmt_raw(raw: Option<&str>) -> String {
    raw.map(|msg| format!(": {msg}")).unwrap_or_default()
}

fn fmt_code(code: Option<&str>) -> String {
    code.map(|c| format!(" [{c}]")).unwrap_or_default()
}

impl DeployError {
    /// Shortcut for [`DeployError::Configuration`].
    pub fn configuration(detail: impl Into<String>) -> Self {
        Self::Configuration {
            detail: detail.into(),
        }
    }

    /// Shortcut for [`DeployError::CertificateParse`].
    pub fn certificate(detail: impl Into<String>) -> Self {
        Self::CertificateParse {
            detail: detail.into(),
        }
    }

    /// Strips every [`Context`](Self::Context) layer and returns the underlying error.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::Context { source, .. } = current {
            current = source;
        }
        current
    }

    /// 是否为用户侧问题（配置、输入、凭证），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self.root_cause(),
            Self::Configuration { .. }
                | Self::CertificateParse { .. }
                | Self::InvalidCredentials { .. }
        )
    }
}

/// Convenience type alias for `Result<T, DeployError>`.
pub type Result<T> = std::result::Result<T, DeployError>;

/// Attach operation context to a failing [`Result`].
pub trait ResultExt<T> {
    /// Wrap the error with a fixed context string.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Wrap the error with a lazily built context string.
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| DeployError::Context {
            context: context.into(),
            source: Box::new(e),
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| DeployError::Context {
            context: f(),
            source: Box::new(e),
        })
    }
}
