use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub roster: RosterSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub profiles: ProfilesSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}

/// Locations of the materialized roster files and cache policy.
///
/// The files are produced and refreshed out-of-band by the data pipeline;
/// the TTL bounds how long a stale parse can be served after a refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterSettings {
    #[serde(default = "default_developers_path")]
    pub developers_path: String,
    #[serde(default = "default_engineers_path")]
    pub engineers_path: String,
    pub cache_capacity: Option<u64>,
    pub ttl_secs: Option<u64>,
}

impl Default for RosterSettings {
    fn default() -> Self {
        Self {
            developers_path: default_developers_path(),
            engineers_path: default_engineers_path(),
            cache_capacity: None,
            ttl_secs: None,
        }
    }
}

fn default_developers_path() -> String {
    "developers.json".to_string()
}
fn default_engineers_path() -> String {
    "tmt_engineers_with_projects.json".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MatchingSettings {
    pub max_top_n: Option<i64>,
}

/// Weight configuration for both recommendation profiles
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilesSettings {
    #[serde(default = "default_developer_weights")]
    pub developers: WeightsConfig,
    #[serde(default = "default_engineer_weights")]
    pub engineers: WeightsConfig,
}

impl Default for ProfilesSettings {
    fn default() -> Self {
        Self {
            developers: default_developer_weights(),
            engineers: default_engineer_weights(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    pub client: f64,
    pub skill: f64,
}

fn default_developer_weights() -> WeightsConfig {
    WeightsConfig {
        client: 0.6,
        skill: 0.4,
    }
}

fn default_engineer_weights() -> WeightsConfig {
    WeightsConfig {
        client: 0.4,
        skill: 0.6,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with TALENT_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with TALENT_)
            // e.g., TALENT_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("TALENT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("TALENT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
