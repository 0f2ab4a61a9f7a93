use crate::constants::{
    API_BASE, QA_MAX_GET_NEXT_ATTEMPTS, QA_MILLISECONDS_BETWEEN_GET_NEXT_ATTEMPTS,
    TOAST_TIMEOUT_MILLISECONDS,
};
use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_api_token")]
    pub api_token: Option<String>,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_get_next_attempts")]
    pub max_get_next_attempts: u32,

    #[serde(default = "default_millis_between_attempts")]
    pub millis_between_get_next_attempts: u64,

    #[serde(default = "default_toast_timeout")]
    pub toast_timeout_millis: u64,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

fn default_api_url() -> String {
    std::env::var("WSC_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string())
}

fn default_api_base() -> String {
    std::env::var("WSC_API_BASE").unwrap_or_else(|_| API_BASE.to_string())
}

fn default_api_token() -> Option<String> {
    std::env::var("WSC_API_TOKEN").ok().filter(|t| !t.is_empty())
}

fn default_poll_interval() -> u64 {
    env_parse("WSC_POLL_INTERVAL").unwrap_or(5)
}

fn default_request_timeout() -> u64 {
    env_parse("WSC_REQUEST_TIMEOUT").unwrap_or(30)
}

fn default_max_get_next_attempts() -> u32 {
    env_parse("WSC_MAX_GET_NEXT_ATTEMPTS").unwrap_or(QA_MAX_GET_NEXT_ATTEMPTS)
}

fn default_millis_between_attempts() -> u64 {
    env_parse("WSC_MILLISECONDS_BETWEEN_GET_NEXT_ATTEMPTS")
        .unwrap_or(QA_MILLISECONDS_BETWEEN_GET_NEXT_ATTEMPTS)
}

fn default_toast_timeout() -> u64 {
    env_parse("WSC_TOAST_TIMEOUT").unwrap_or(TOAST_TIMEOUT_MILLISECONDS)
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_base: default_api_base(),
            api_token: default_api_token(),
            poll_interval_secs: default_poll_interval(),
            request_timeout_secs: default_request_timeout(),
            max_get_next_attempts: default_max_get_next_attempts(),
            millis_between_get_next_attempts: default_millis_between_attempts(),
            toast_timeout_millis: default_toast_timeout(),
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Loads the YAML file at `path` if given, falling back to env and defaults
    /// for any field it leaves out.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                debug!("Loading console config from {}", path.display());
                let contents = std::fs::read_to_string(path)?;
                Self::from_yaml(&contents)?
            }
            None => Self::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(ConsoleError::Config("api_url must not be empty".into()));
        }
        if !self.api_base.starts_with('/') {
            return Err(ConsoleError::Config(format!(
                "api_base must start with '/': {}",
                self.api_base
            )));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConsoleError::Config(
                "poll_interval_secs must be greater than zero".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConsoleError::Config(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.max_get_next_attempts == 0 {
            return Err(ConsoleError::Config(
                "max_get_next_attempts must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// `{api_url}{api_base}` without a doubled slash.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), self.api_base)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn get_next_delay(&self) -> Duration {
        Duration::from_millis(self.millis_between_get_next_attempts)
    }

    pub fn toast_timeout(&self) -> Duration {
        Duration::from_millis(self.toast_timeout_millis)
    }
}
