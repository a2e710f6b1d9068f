use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::coverage::{DEFAULT_MAX_EVENTS, DEFAULT_RADIUS_KM};
use crate::swath::{SwathConfig, SwathConfigError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),
    #[error("Invalid swath settings: {0}")]
    Swath(#[from] SwathConfigError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tle: TleConfig,
    pub swath: SwathConfig,
    pub web: WebConfig,
    pub coverage: CoverageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TleConfig {
    /// A TLE file, or a directory of `.tle`/`.txt` files
    #[serde(default = "default_tle_path")]
    pub path: PathBuf,
}

impl Default for TleConfig {
    fn default() -> Self {
        Self {
            path: default_tle_path(),
        }
    }
}

fn default_tle_path() -> PathBuf {
    PathBuf::from("satellite.txt")
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
    /// Wall-clock budget of one orbit or revisit computation
    #[serde(
        default = "default_compute_timeout",
        deserialize_with = "deserialize_std_duration"
    )]
    pub compute_timeout: std::time::Duration,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: None,
            compute_timeout: default_compute_timeout(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_compute_timeout() -> std::time::Duration {
    std::time::Duration::from_secs(30)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    pub radius_km: f64,
    pub max_events: usize,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            max_events: DEFAULT_MAX_EVENTS,
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.swath.validate()?;
        Ok(config)
    }
}

/// Parse a humantime duration such as `5m` or `1h 30m`
pub fn parse_duration(s: &str) -> Result<chrono::Duration, ConfigError> {
    let std = humantime::parse_duration(s.trim())
        .map_err(|e| ConfigError::InvalidDuration(format!("{s}: {e}")))?;
    chrono::Duration::from_std(std).map_err(|e| ConfigError::InvalidDuration(format!("{s}: {e}")))
}

pub fn deserialize_duration<'de, D>(deserializer: D) -> Result<chrono::Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}

fn deserialize_std_duration<'de, D>(deserializer: D) -> Result<std::time::Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}
