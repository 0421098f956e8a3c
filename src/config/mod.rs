//! Configuration system
//!
//! Built-in defaults, an optional YAML file, and environment overrides.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, MetricsConfig};

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    let metrics = &config.metrics;
    match key {
        "metrics.host" => Ok(metrics.host.clone()),
        "metrics.port" => Ok(metrics.port.to_string()),
        "metrics.tokenPath" => Ok(metrics.token_path.display().to_string()),
        "metrics.caConfigMapNamespace" => Ok(metrics.ca_config_map_namespace.clone()),
        "metrics.caConfigMapName" => Ok(metrics.ca_config_map_name.clone()),
        "metrics.caBundleKey" => Ok(metrics.ca_bundle_key.clone()),
        "metrics.connectTimeoutSecs" => Ok(metrics.connect_timeout_secs.to_string()),
        "metrics.keepAliveSecs" => Ok(metrics.keep_alive_secs.to_string()),
        "metrics.tlsHandshakeTimeoutSecs" => Ok(metrics.tls_handshake_timeout_secs.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_value() {
        let config = Config::default();
        assert_eq!(get_config_value(&config, "metrics.port").unwrap(), "9091");
        assert_eq!(
            get_config_value(&config, "metrics.caBundleKey").unwrap(),
            "ca-bundle.crt"
        );
        assert!(get_config_value(&config, "metrics.nope").is_err());
        assert!(get_config_value(&config, "graph.title").is_err());
    }
}
