//! Configuration loading logic
//!
//! Precedence order (highest to lowest):
//! 1. Environment variable overrides
//! 2. Root config file
//! 3. Built-in defaults

use super::{defaults, paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers applied
    pub fn load() -> Result<Config> {
        let path = paths::root_config_path();
        let config = if path.exists() {
            Self::load_file(&path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::load_defaults()
        };

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    ///
    /// Missing keys fall back to their defaults.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the effective configuration
    pub fn validate() -> Result<()> {
        let config = Self::load().context("Failed to load configuration")?;

        if config.metrics.host.is_empty() {
            anyhow::bail!("metrics.host must not be empty");
        }
        if config.metrics.port == 0 {
            anyhow::bail!("metrics.port must be non-zero");
        }

        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        if let Ok(host) = std::env::var("CREDGRAPH_METRICS_HOST") {
            config.metrics.host = host;
        }

        if let Ok(port) = std::env::var("CREDGRAPH_METRICS_PORT") {
            match port.parse() {
                Ok(port) => config.metrics.port = port,
                Err(_) => tracing::warn!("Ignoring invalid CREDGRAPH_METRICS_PORT: {}", port),
            }
        }

        if let Ok(path) = std::env::var("CREDGRAPH_TOKEN_PATH") {
            config.metrics.token_path = path.into();
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.metrics.port, 9091);
    }

    #[test]
    fn test_load_file_fills_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "metrics:\n  port: 19091\n").unwrap();

        let config = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(config.metrics.port, 19091);
        assert_eq!(config.metrics.ca_config_map_name, "service-ca");
    }

    #[test]
    fn test_load_file_ignores_graph_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "graph:\n  title: audit\n").unwrap();

        let config = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_file_rejects_bad_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "metrics: [unclosed").unwrap();

        assert!(ConfigLoader::load_file(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        // SAFETY: set_var is unsafe in Rust 2024 due to potential data races.
        // No other test reads these variables.
        unsafe {
            std::env::set_var("CREDGRAPH_METRICS_HOST", "metrics.test.svc");
            std::env::set_var("CREDGRAPH_METRICS_PORT", "not-a-port");
        }

        let config = ConfigLoader::apply_env_overrides(Config::default());

        assert_eq!(config.metrics.host, "metrics.test.svc");
        assert_eq!(config.metrics.port, 9091);

        // SAFETY: see above.
        unsafe {
            std::env::remove_var("CREDGRAPH_METRICS_HOST");
            std::env::remove_var("CREDGRAPH_METRICS_PORT");
        }
    }
}
