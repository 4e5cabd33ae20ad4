use crate::error::ConfigError;
use serde_derive::Deserialize;
use std::fmt;
use std::str::FromStr;
use url::Url;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub(crate) fn load_app_config() -> Result<AppConfig, ConfigError> {
    envy::from_env::<AppConfig>().map_err(ConfigError::env_parse)
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

#[derive(Deserialize, Debug)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub(crate) fn load_server_config() -> Result<ServerConfig, ConfigError> {
    envy::prefixed("SERVER_")
        .from_env::<ServerConfig>()
        .map_err(ConfigError::env_parse)
}

fn default_sips_url() -> String {
    "https://sips.logosenergia.com".to_string()
}

fn default_query_path() -> String {
    "/custom/logosenergia/sips/index.php".to_string()
}

fn default_request_timeout_sec() -> u64 {
    20
}

fn default_invocation_timeout_sec() -> u64 {
    60
}

/// Portal location, credentials and timeouts, read from `SIPS_*` variables.
///
/// Credentials are optional here so the service can start without them; every
/// lookup calls [`SipsConfig::credentials`] before touching the network.
#[derive(Deserialize, Clone)]
pub struct SipsConfig {
    #[serde(default = "default_sips_url")]
    pub url: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_query_path")]
    pub query_path: String,
    #[serde(default = "default_request_timeout_sec")]
    pub request_timeout_sec: u64,
    // deadline for the whole login + query sequence
    #[serde(default = "default_invocation_timeout_sec")]
    pub invocation_timeout_sec: u64,
}

impl fmt::Debug for SipsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SipsConfig")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("query_path", &self.query_path)
            .field("request_timeout_sec", &self.request_timeout_sec)
            .field("invocation_timeout_sec", &self.invocation_timeout_sec)
            .finish()
    }
}

/// Login identifier and password for the portal.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

impl SipsConfig {
    /// Returns the portal credentials, or a [`ConfigError::Missing`] naming the
    /// first absent (or blank) variable.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let user =
            non_blank(self.user.as_deref()).ok_or_else(|| ConfigError::missing("SIPS_USER"))?;
        let password = non_blank(self.password.as_deref())
            .ok_or_else(|| ConfigError::missing("SIPS_PASSWORD"))?;
        Ok(Credentials {
            user: user.to_string(),
            password: password.to_string(),
        })
    }

    /// Portal base URL, always ending in `/` so portal paths join under any
    /// path prefix in `SIPS_URL`.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let mut url =
            Url::parse(&self.url).map_err(|e| ConfigError::invalid("SIPS_URL", e.to_string()))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) fn load_sips_config() -> Result<SipsConfig, ConfigError> {
    envy::prefixed("SIPS_")
        .from_env::<SipsConfig>()
        .map_err(ConfigError::env_parse)
}
