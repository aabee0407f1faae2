use reqwest::Url;
use std::{env, fmt, path::Path, time::Duration};
use tracing::debug;

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "WEATHER_API_KEY";
pub const ENDPOINT_VAR: &str = "WEATHER_API_URL";
pub const TIMEOUT_VAR: &str = "WEATHER_TIMEOUT_SECS";

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything the fetcher needs to talk to the weather provider.
#[derive(Clone)]
pub struct Config {
    api_key: String,
    endpoint: Url,
    timeout: Option<Duration>,
}

impl Config {
    /// Config for the public endpoint with the default timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key: String = api_key.into();
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let endpoint = parse_endpoint(DEFAULT_ENDPOINT)?;

        Ok(Self {
            api_key,
            endpoint,
            timeout: Some(DEFAULT_TIMEOUT),
        })
    }

    /// Read the config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`], but with the variable source injected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key)?;

        if let Some(raw) = lookup(ENDPOINT_VAR).filter(|v| !v.trim().is_empty()) {
            config.endpoint = parse_endpoint(raw.trim())?;
        }

        if let Some(raw) = lookup(TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            config.timeout = parse_timeout_secs(&raw)?;
        }

        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, ConfigError> {
        self.endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }

    /// `None` disables the request deadline entirely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Parse a timeout given in whole seconds. `0` means no timeout.
pub fn parse_timeout_secs(raw: &str) -> Result<Option<Duration>, ConfigError> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidTimeout(raw.to_string()))?;

    Ok((secs > 0).then_some(Duration::from_secs(secs)))
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|_| ConfigError::InvalidEndpoint(raw.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::InvalidEndpoint(raw.to_string())),
    }
}

/// Seed the environment from a `.env` file. Variables that are already set are left alone.
///
/// With no explicit path a missing `.env` is not an error; an explicit path must exist.
pub fn load_dotenv(path: Option<&Path>) -> Result<(), ConfigError> {
    match path {
        Some(path) => {
            dotenv::from_path(path)?;
            debug!("Loaded environment from {}", path.display());
        }
        None => match dotenv::dotenv() {
            Ok(found) => debug!("Loaded environment from {}", found.display()),
            Err(dotenv::Error::Io(_)) => debug!("No .env file found"),
            Err(err) => return Err(err.into()),
        },
    }

    Ok(())
}
