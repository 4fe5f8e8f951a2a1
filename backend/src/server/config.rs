//! HTTP server configuration object and environment loading.

use std::net::SocketAddr;
use std::time::Duration;

use reqwest::Url;

use crate::domain::fields::TelegramPolicy;
use crate::domain::uniqueness::UniquenessScope;

/// Default bind address when `SUBMIT_BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Default verifier request timeout in seconds.
pub const DEFAULT_VERIFIER_TIMEOUT_SECS: u64 = 10;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) admin_token: Option<String>,
    pub(crate) verifier_url: Option<Url>,
    pub(crate) verifier_timeout: Duration,
    pub(crate) telegram_policy: TelegramPolicy,
    pub(crate) uniqueness_scope: UniquenessScope,
}

impl ServerConfig {
    /// Construct a configuration with defaults for everything but the
    /// bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            admin_token: None,
            verifier_url: None,
            verifier_timeout: Duration::from_secs(DEFAULT_VERIFIER_TIMEOUT_SECS),
            telegram_policy: TelegramPolicy::default(),
            uniqueness_scope: UniquenessScope::default(),
        }
    }

    /// Attach the admin credential mutating endpoints require.
    #[must_use]
    pub fn with_admin_token(mut self, token: impl Into<String>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    /// Attach the external username-verifier endpoint.
    ///
    /// Without one, the fixture verifier approves every username.
    #[must_use]
    pub fn with_verifier(mut self, url: Url, timeout: Duration) -> Self {
        self.verifier_url = Some(url);
        self.verifier_timeout = timeout;
        self
    }

    /// Override the Telegram acceptance policy.
    #[must_use]
    pub fn with_telegram_policy(mut self, policy: TelegramPolicy) -> Self {
        self.telegram_policy = policy;
        self
    }

    /// Override the uniqueness scope.
    #[must_use]
    pub fn with_uniqueness_scope(mut self, scope: UniquenessScope) -> Self {
        self.uniqueness_scope = scope;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the configured admin credential, if any.
    #[must_use]
    pub fn admin_token(&self) -> Option<&str> {
        self.admin_token.as_deref()
    }

    /// Load configuration from `SUBMIT_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] when a variable is present but cannot
    /// be parsed; absent variables fall back to defaults.
    pub fn from_env() -> std::io::Result<Self> {
        let bind_addr: SocketAddr = env_or("SUBMIT_BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse()
            .map_err(|error| invalid("SUBMIT_BIND_ADDR", &error))?;
        let mut config = Self::new(bind_addr);

        if let Ok(token) = std::env::var("SUBMIT_ADMIN_TOKEN") {
            config = config.with_admin_token(token);
        }

        if let Ok(raw) = std::env::var("SUBMIT_VERIFIER_URL") {
            let url = Url::parse(&raw).map_err(|error| invalid("SUBMIT_VERIFIER_URL", &error))?;
            let timeout_secs = env_or(
                "SUBMIT_VERIFIER_TIMEOUT_SECS",
                &DEFAULT_VERIFIER_TIMEOUT_SECS.to_string(),
            )
            .parse::<u64>()
            .map_err(|error| invalid("SUBMIT_VERIFIER_TIMEOUT_SECS", &error))?;
            config = config.with_verifier(url, Duration::from_secs(timeout_secs));
        }

        if let Ok(raw) = std::env::var("SUBMIT_TELEGRAM_POLICY") {
            config = config.with_telegram_policy(parse_telegram_policy(&raw)?);
        }

        if let Ok(raw) = std::env::var("SUBMIT_UNIQUENESS_SCOPE") {
            let scope = raw
                .parse::<UniquenessScope>()
                .map_err(|error| invalid("SUBMIT_UNIQUENESS_SCOPE", &error))?;
            config = config.with_uniqueness_scope(scope);
        }

        Ok(config)
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

fn invalid(name: &str, error: &dyn std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("invalid {name}: {error}"))
}

fn parse_telegram_policy(raw: &str) -> std::io::Result<TelegramPolicy> {
    match raw {
        "lenient" => Ok(TelegramPolicy::Lenient),
        "strict" => Ok(TelegramPolicy::Strict),
        other => Err(invalid(
            "SUBMIT_TELEGRAM_POLICY",
            &format!("unknown policy {other:?}, expected lenient or strict"),
        )),
    }
}
