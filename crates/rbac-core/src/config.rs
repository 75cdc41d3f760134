//! Configuration types and loading

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::policy::ListFilter;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Per-entity list filter overrides, keyed by entity name
    /// (`"Module"`, `"state_infraction"`, ... matching is case and underscore insensitive).
    /// Values are `all` or `active_only`.
    #[serde(default)]
    pub policies: HashMap<String, ListFilter>,

    /// Seed data configuration (console binary)
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,rbac_services=debug".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SeedConfig {
    /// JSON file with records to load through the services
    pub file: Option<String>,
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
    #[error("Config file error: {0}")]
    FileError(#[from] config::ConfigError),
}

/// Prefix for environment overrides
const ENV_PREFIX: &str = "RBAC_";
const POLICY_PREFIX: &str = "RBAC_POLICY_";

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(filter) = std::env::var("RBAC_LOG") {
            config.logging.filter = filter;
        }
        if let Ok(v) = std::env::var("RBAC_LOG_JSON") {
            config.logging.json = v == "true" || v == "1" || v == "yes";
        }
        if let Ok(file) = std::env::var("RBAC_SEED_FILE") {
            config.seed.file = Some(file);
        }

        for (key, value) in std::env::vars() {
            if let Some(entity) = key.strip_prefix(POLICY_PREFIX) {
                let filter = value.parse::<ListFilter>().map_err(|message| {
                    ConfigError::InvalidValue {
                        key: key.clone(),
                        message,
                    }
                })?;
                config.policies.insert(entity.to_string(), filter);
            }
        }

        Ok(config)
    }

    /// Load configuration from a file (TOML, JSON or YAML by extension),
    /// overridden by `RBAC_`-prefixed environment variables using `__` as
    /// the section separator (e.g. `RBAC_LOGGING__JSON=true`).
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX.trim_end_matches('_'))
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// List filter override for an entity, if one is configured
    pub fn policy_for(&self, entity: &str) -> Option<ListFilter> {
        let wanted = normalize_entity_key(entity);
        self.policies
            .iter()
            .find(|(key, _)| normalize_entity_key(key) == wanted)
            .map(|(_, filter)| *filter)
    }
}

fn normalize_entity_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.logging.filter, "info,rbac_services=debug");
        assert!(!config.logging.json);
        assert!(config.policies.is_empty());
        assert!(config.seed.file.is_none());
    }

    #[test]
    fn test_policy_lookup_ignores_case_and_underscores() {
        let mut config = AppConfig::default();
        config
            .policies
            .insert("STATE_INFRACTION".to_string(), ListFilter::All);

        assert_eq!(config.policy_for("StateInfraction"), Some(ListFilter::All));
        assert_eq!(config.policy_for("Module"), None);
    }

    #[test]
    fn test_deserialize_policies() {
        let json = r#"{ "policies": { "module": "active_only", "Role": "all" } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.policy_for("Module"), Some(ListFilter::ActiveOnly));
        assert_eq!(config.policy_for("role"), Some(ListFilter::All));
        assert_eq!(config.logging.filter, LoggingConfig::default().filter);
    }
}
