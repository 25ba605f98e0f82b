//! Top-level riskreg configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::defaults::MAX_READ_POOL_SIZE;
use super::{ObservabilityConfig, RatingConfig, StorageConfig, WorkflowConfig};
use crate::constants::CONFIG_FILENAME;
use crate::errors::{ConfigError, RatingError};
use crate::models::Role;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`RISKREG_*`)
/// 2. Project config (`riskreg.toml` in the project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RiskRegConfig {
    pub rating: RatingConfig,
    pub workflow: WorkflowConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl RiskRegConfig {
    /// Load configuration for a project root.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let project_config_path = root.join(CONFIG_FILENAME);
        let mut config = if project_config_path.exists() {
            Self::from_file(&project_config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides_from(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    /// Missing sections and keys fall back to compiled defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `RISKREG_*` overrides using the given variable lookup.
    ///
    /// Recognized keys: `RISKREG_DB_FILENAME`, `RISKREG_READ_POOL_SIZE`,
    /// `RISKREG_BUSY_TIMEOUT_MS`, `RISKREG_LOG_LEVEL`,
    /// `RISKREG_PRIVILEGED_ROLES` (comma separated).
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("RISKREG_DB_FILENAME") {
            self.storage.db_filename = name;
        }
        if let Some(raw) = lookup("RISKREG_READ_POOL_SIZE") {
            self.storage.read_pool_size = parse_env("RISKREG_READ_POOL_SIZE", &raw)?;
        }
        if let Some(raw) = lookup("RISKREG_BUSY_TIMEOUT_MS") {
            self.storage.busy_timeout_ms = parse_env("RISKREG_BUSY_TIMEOUT_MS", &raw)?;
        }
        if let Some(level) = lookup("RISKREG_LOG_LEVEL") {
            self.observability.log_level = level.trim().to_lowercase();
        }
        if let Some(raw) = lookup("RISKREG_PRIVILEGED_ROLES") {
            self.workflow.privileged_roles = raw
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.parse::<Role>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|message| ConfigError::ValidationFailed {
                    field: "RISKREG_PRIVILEGED_ROLES".to_string(),
                    message,
                })?;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rating.validate().map_err(|e| match e {
            RatingError::InvalidThresholdTable { domain, reason } => ConfigError::ValidationFailed {
                field: format!("rating.{domain}"),
                message: reason,
            },
            other => ConfigError::ValidationFailed {
                field: "rating".to_string(),
                message: other.to_string(),
            },
        })?;

        if self.workflow.privileged_roles.is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "workflow.privileged_roles".to_string(),
                message: "at least one privileged role is required".to_string(),
            });
        }
        if self.workflow.privileged_roles.contains(&Role::Viewer) {
            return Err(ConfigError::ValidationFailed {
                field: "workflow.privileged_roles".to_string(),
                message: "viewer cannot be privileged".to_string(),
            });
        }
        if !(1..=MAX_READ_POOL_SIZE).contains(&self.storage.read_pool_size) {
            return Err(ConfigError::ValidationFailed {
                field: "storage.read_pool_size".to_string(),
                message: format!("must be between 1 and {MAX_READ_POOL_SIZE}"),
            });
        }
        if self.storage.db_filename.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "storage.db_filename".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if !LOG_LEVELS.contains(&self.observability.log_level.as_str()) {
            return Err(ConfigError::ValidationFailed {
                field: "observability.log_level".to_string(),
                message: format!("must be one of {}", LOG_LEVELS.join(", ")),
            });
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::ValidationFailed {
        field: key.to_string(),
        message: format!("cannot parse {raw:?}"),
    })
}
