//! Gateway configuration loaded via OrthoConfig.
//!
//! `LOOKUP_*` variables (or the matching CLI flags and config file keys)
//! populate [`GatewaySettings`]. [`GatewaySettings::resolve`] applies
//! defaults, honours the legacy `API_PORT` variable and reads the bot
//! credential through [`mockable::Env`] so tests can inject values.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::resources::{CdnBase, DEFAULT_CDN_BASE};
use crate::outbound::discord::{BotToken, DEFAULT_API_BASE};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Legacy port variable, used when `LOOKUP_PORT` is unset.
pub const LEGACY_PORT_ENV: &str = "API_PORT";
/// Bot credential variable.
pub const TOKEN_ENV: &str = "DISCORD_TOKEN";
/// Fallback bot credential variable.
pub const LEGACY_TOKEN_ENV: &str = "TOKEN";

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Loading from CLI, environment or file failed.
    #[error("failed to load configuration: {message}")]
    Load {
        /// Loader message.
        message: String,
    },
    /// A variable holds a value of the wrong shape.
    #[error("invalid {name}={value:?}: expected {expected}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// What was expected.
        expected: &'static str,
    },
    /// A configured URL is unusable.
    #[error("invalid {name} {value:?}: {reason}")]
    InvalidUrl {
        /// Setting name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Parser or scheme complaint.
        reason: String,
    },
    /// The HTTP client could not be built.
    #[error("failed to build upstream client: {message}")]
    Client {
        /// Builder message.
        message: String,
    },
}

/// Raw settings as loaded.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LOOKUP")]
pub struct GatewaySettings {
    /// Listener bind address.
    pub host: Option<String>,
    /// Listener port.
    pub port: Option<u16>,
    /// Upstream REST API base URL.
    pub upstream_base_url: Option<String>,
    /// CDN origin for image links.
    pub cdn_base_url: Option<String>,
    /// Upstream request timeout in seconds.
    pub upstream_timeout_secs: Option<u64>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Listener socket address.
    pub bind_addr: SocketAddr,
    /// Upstream REST API base.
    pub upstream_base: Url,
    /// CDN origin for image links.
    pub cdn: CdnBase,
    /// Upstream request timeout.
    pub upstream_timeout: Duration,
    /// Bot credential, when configured.
    pub token: Option<BotToken>,
}

impl GatewaySettings {
    /// Load from the given CLI arguments, `LOOKUP_*` variables and config file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when any source is malformed.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::load_from_iter(args).map_err(|error| SettingsError::Load {
            message: error.to_string(),
        })
    }

    /// Configured host, falling back to `127.0.0.1`.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Upstream timeout, at least one second.
    pub fn upstream_timeout(&self) -> Duration {
        let secs = self
            .upstream_timeout_secs
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS)
            .max(1);
        Duration::from_secs(secs)
    }

    /// Apply defaults and read the environment-only values.
    ///
    /// # Examples
    /// ```
    /// use lookup_gateway::settings::GatewaySettings;
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "API_PORT" => Some("8081".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let config = GatewaySettings::default().resolve(&env).expect("valid config");
    /// assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8081");
    /// assert!(config.token.is_none());
    /// ```
    ///
    /// # Errors
    ///
    /// Fails when the host, a port or a URL is malformed.
    pub fn resolve<E: Env>(&self, env: &E) -> Result<GatewayConfig, SettingsError> {
        Ok(GatewayConfig {
            bind_addr: self.bind_addr(env)?,
            upstream_base: self.upstream_base()?,
            cdn: self.cdn()?,
            upstream_timeout: self.upstream_timeout(),
            token: bot_token(env),
        })
    }

    fn bind_addr<E: Env>(&self, env: &E) -> Result<SocketAddr, SettingsError> {
        let ip: IpAddr = self
            .host()
            .parse()
            .map_err(|_| SettingsError::InvalidEnv {
                name: "LOOKUP_HOST",
                value: self.host().to_owned(),
                expected: "an IP address",
            })?;
        Ok(SocketAddr::new(ip, self.port(env)?))
    }

    fn port<E: Env>(&self, env: &E) -> Result<u16, SettingsError> {
        if let Some(port) = self.port {
            return Ok(port);
        }
        match env.string(LEGACY_PORT_ENV) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidEnv {
                    name: LEGACY_PORT_ENV,
                    value,
                    expected: "a port number",
                }),
            None => Ok(DEFAULT_PORT),
        }
    }

    fn upstream_base(&self) -> Result<Url, SettingsError> {
        let raw = self.upstream_base_url.as_deref().unwrap_or(DEFAULT_API_BASE);
        parse_http_url("LOOKUP_UPSTREAM_BASE_URL", raw)
    }

    fn cdn(&self) -> Result<CdnBase, SettingsError> {
        let raw = self.cdn_base_url.as_deref().unwrap_or(DEFAULT_CDN_BASE);
        parse_http_url("LOOKUP_CDN_BASE_URL", raw)?;
        Ok(CdnBase::new(raw))
    }
}

/// Read the bot credential from `DISCORD_TOKEN`, then `TOKEN`.
pub fn bot_token<E: Env>(env: &E) -> Option<BotToken> {
    [TOKEN_ENV, LEGACY_TOKEN_ENV]
        .into_iter()
        .find_map(|name| env.string(name).as_deref().and_then(BotToken::new))
}

fn parse_http_url(name: &'static str, raw: &str) -> Result<Url, SettingsError> {
    let invalid = |reason: String| SettingsError::InvalidUrl {
        name,
        value: raw.to_owned(),
        reason,
    };
    let url = Url::parse(raw).map_err(|error| invalid(error.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}
