//! Settlement job harness for tablebook.
//!
//! Loads a YAML [`Config`], validates it into a [`ValidatedConfig`], and builds the table
//! registry every subcommand shares.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tablebook_execution::{
    ConflictPolicy, DecodeOptions, PatternKind, RegistryError, TableRegistry, UnknownConflictPolicy,
    UnknownPatternKind,
};
use tablebook_types::{Family, PlacedBet, RawRoundEvent, UnknownFamily};
use thiserror::Error;
use tracing::Level;

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// One extra table route from the config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub kind: String,
    pub pattern: String,
    pub family: String,
}

/// Configuration for the settler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,
    #[serde(default = "default_binary_conflict")]
    pub binary_conflict: String,
    #[serde(default)]
    pub disabled_families: Vec<String>,
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_worker_threads() -> usize {
    4
}

fn default_binary_conflict() -> String {
    "prefer_win".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            worker_threads: default_worker_threads(),
            binary_conflict: default_binary_conflict(),
            disabled_families: Vec::new(),
            routes: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: usize },
    #[error("invalid binary_conflict: {0}")]
    InvalidConflictPolicy(#[from] UnknownConflictPolicy),
    #[error("{field} names an {source}")]
    UnknownFamily {
        field: &'static str,
        #[source]
        source: UnknownFamily,
    },
    #[error("invalid route kind: {0}")]
    InvalidRouteKind(#[from] UnknownPatternKind),
    #[error("invalid registry")]
    Registry(#[from] RegistryError),
}

/// Config with every field parsed and the registry checked.
#[derive(Clone, Debug)]
pub struct ValidatedConfig {
    pub log_level: Level,
    pub log_format: LogFormat,
    pub worker_threads: usize,
    pub options: DecodeOptions,
    pub disabled_families: Vec<Family>,
    pub routes: Vec<(PatternKind, String, Family)>,
}

fn ensure_nonzero(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidNonZero { field, value });
    }
    Ok(())
}

fn parse_family(field: &'static str, value: &str) -> Result<Family, ConfigError> {
    Family::from_str(value).map_err(|source| ConfigError::UnknownFamily { field, source })
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        ensure_nonzero("worker_threads", self.worker_threads)?;
        let log_level =
            Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            })?;
        let binary_conflict = ConflictPolicy::from_str(&self.binary_conflict)?;
        let disabled_families = self
            .disabled_families
            .iter()
            .map(|code| parse_family("disabled_families", code))
            .collect::<Result<Vec<_>, _>>()?;
        let routes = self
            .routes
            .iter()
            .map(|route| {
                let kind = PatternKind::from_str(&route.kind)?;
                let family = parse_family("routes", &route.family)?;
                Ok((kind, route.pattern.clone(), family))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let validated = ValidatedConfig {
            log_level,
            log_format: self.log_format,
            worker_threads: self.worker_threads,
            options: DecodeOptions { binary_conflict },
            disabled_families,
            routes,
        };
        validated.build_registry()?;
        Ok(validated)
    }
}

impl ValidatedConfig {
    /// Builds the registry described by this config.
    pub fn build_registry(&self) -> Result<TableRegistry, RegistryError> {
        let mut builder = TableRegistry::builder().options(self.options);
        for family in &self.disabled_families {
            builder = builder.disable(*family);
        }
        for (kind, pattern, family) in &self.routes {
            builder = builder.route(*kind, pattern.clone(), *family);
        }
        builder.build()
    }
}

/// Contents of a `settle --round` file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettleRequest {
    pub event: RawRoundEvent,
    #[serde(default)]
    pub bets: Vec<PlacedBet>,
}
