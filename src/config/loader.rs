//! Configuration loading and merging logic
//!
//! Handles loading configuration from the config file and environment
//! overrides according to precedence rules.

use super::{paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Root config file
    /// 3. Built-in defaults
    pub fn load() -> Result<Config> {
        let root_path = paths::root_config_path();
        let config = if root_path.exists() {
            Self::load_file(&root_path)?
        } else {
            Self::load_defaults()
        };

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    ///
    /// Keys missing from the file keep their default values.
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration file, if one exists
    pub fn validate() -> Result<()> {
        let root_path = paths::root_config_path();
        if root_path.exists() {
            let config = Self::load_file(&root_path)?;
            if config.istio_namespace.trim().is_empty() {
                return Err(anyhow::anyhow!("istioNamespace must not be empty"));
            }
            if config.default_cluster_name.trim().is_empty() {
                return Err(anyhow::anyhow!("defaultClusterName must not be empty"));
            }
        }

        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        Config::default()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(config: Config) -> Config {
        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
        // Blank string overrides are ignored
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // MESH_TOPOLOGY_ISTIO_NAMESPACE override
        if let Some(namespace) = non_blank("MESH_TOPOLOGY_ISTIO_NAMESPACE") {
            config.istio_namespace = namespace;
        }

        // MESH_TOPOLOGY_CLUSTER_NAME override
        if let Some(name) = non_blank("MESH_TOPOLOGY_CLUSTER_NAME") {
            config.default_cluster_name = name;
        }

        // MESH_TOPOLOGY_CONCURRENCY override
        if let Some(concurrency) = lookup("MESH_TOPOLOGY_CONCURRENCY") {
            if let Ok(val) = concurrency.parse::<usize>() {
                config.resolve_concurrency = val;
            }
        }

        config
    }
}
