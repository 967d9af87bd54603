use anyhow::{Context, Result};
use chrono_tz::Tz;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DATA_DIR_NAME, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_TIMEZONE, GEOCODING_API_BASE,
    OPEN_METEO_API_BASE,
};

pub const ENV_DATA_DIR: &str = "APEX_DATA_DIR";
pub const ENV_FORECAST_API_BASE: &str = "APEX_FORECAST_API_BASE";
pub const ENV_GEOCODING_API_BASE: &str = "APEX_GEOCODING_API_BASE";
pub const ENV_TIMEZONE: &str = "APEX_TIMEZONE";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "APEX_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct Config {
    /// Where storage.json lives
    pub data_dir: PathBuf,
    pub forecast_api_base: String,
    pub geocoding_api_base: String,
    pub timezone: Tz,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            forecast_api_base: OPEN_METEO_API_BASE.to_string(),
            geocoding_api_base: GEOCODING_API_BASE.to_string(),
            timezone: DEFAULT_TIMEZONE.parse().unwrap_or(Tz::UTC),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Build from `APEX_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but reading from an arbitrary source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(base) = get(ENV_FORECAST_API_BASE) {
            config.forecast_api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(base) = get(ENV_GEOCODING_API_BASE) {
            config.geocoding_api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(tz) = get(ENV_TIMEZONE) {
            config.timezone = tz
                .parse::<Tz>()
                .map_err(|e| anyhow::anyhow!("{}: {}", ENV_TIMEZONE, e))?;
        }
        if let Some(secs) = get(ENV_HTTP_TIMEOUT_SECS) {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", ENV_HTTP_TIMEOUT_SECS))?;
            config.http_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// IANA name sent to the forecast API
    pub fn timezone_name(&self) -> &'static str {
        self.timezone.name()
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", DATA_DIR_NAME)))
}
