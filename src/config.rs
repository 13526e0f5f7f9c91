use crate::slack::SigningSecret;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Process-wide settings, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub signing_secret: SigningSecret,
    pub kg_api_key: String,
    pub port: u16,
    pub lookup_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let signing_secret = SigningSecret::new(&required("SLACK_SECRET")?)?;
        let kg_api_key = required("KG_API_KEY")?;

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match lookup("LOOKUP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: "LOOKUP_TIMEOUT_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_LOOKUP_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "LOOKUP_TIMEOUT_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            signing_secret,
            kg_api_key,
            port,
            lookup_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
