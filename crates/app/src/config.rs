//! Process configuration for the `myfit` shell.

use myfit_client::{ClientConfig, ConfigError};
use myfit_observability::{LogFormat, UnknownLogFormat};
use thiserror::Error;

pub const ENV_LOG_FORMAT: &str = "MYFIT_LOG_FORMAT";

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error(transparent)]
    Client(#[from] ConfigError),

    #[error("{ENV_LOG_FORMAT}: {0}")]
    LogFormat(#[from] UnknownLogFormat),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppConfigError> {
        let client = ClientConfig::from_lookup(&lookup)?;
        let log_format = match lookup(ENV_LOG_FORMAT) {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };
        Ok(Self { client, log_format })
    }
}
