//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Metrics backend connection settings
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Metrics backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricsConfig {
    /// Service hostname, also used as the TLS server name
    #[serde(default = "default_metrics_host")]
    pub host: String,

    #[serde(default = "default_metrics_port")]
    pub port: u16,

    /// Mounted service account token used as the bearer credential
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,

    /// Namespace of the ConfigMap holding the trusted CA bundle
    #[serde(default = "default_ca_config_map_namespace")]
    pub ca_config_map_namespace: String,

    #[serde(default = "default_ca_config_map_name")]
    pub ca_config_map_name: String,

    /// Data key of the PEM bundle inside the ConfigMap
    #[serde(default = "default_ca_bundle_key")]
    pub ca_bundle_key: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,

    #[serde(default = "default_tls_handshake_timeout_secs")]
    pub tls_handshake_timeout_secs: u64,
}

impl MetricsConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }

    pub fn tls_handshake_timeout(&self) -> Duration {
        Duration::from_secs(self.tls_handshake_timeout_secs)
    }
}

// Default value functions
fn default_metrics_host() -> String {
    "thanos-querier.openshift-monitoring.svc".to_string()
}

fn default_metrics_port() -> u16 {
    9091
}

fn default_token_path() -> PathBuf {
    PathBuf::from("/var/run/secrets/kubernetes.io/serviceaccount/token")
}

fn default_ca_config_map_namespace() -> String {
    crate::resources::GLOBAL_MACHINE_SPECIFIED_CONFIG_NAMESPACE.to_string()
}

fn default_ca_config_map_name() -> String {
    "service-ca".to_string()
}

fn default_ca_bundle_key() -> String {
    "ca-bundle.crt".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_keep_alive_secs() -> u64 {
    30
}

fn default_tls_handshake_timeout_secs() -> u64 {
    10
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            host: default_metrics_host(),
            port: default_metrics_port(),
            token_path: default_token_path(),
            ca_config_map_namespace: default_ca_config_map_namespace(),
            ca_config_map_name: default_ca_config_map_name(),
            ca_bundle_key: default_ca_bundle_key(),
            connect_timeout_secs: default_connect_timeout_secs(),
            keep_alive_secs: default_keep_alive_secs(),
            tls_handshake_timeout_secs: default_tls_handshake_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.metrics.port, 9091);
        assert_eq!(config.metrics.ca_config_map_namespace, "openshift-config-managed");
        assert_eq!(config.metrics.tls_handshake_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("tokenPath"));
        assert!(yaml.contains("caConfigMapName"));
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
metrics:
  host: prometheus.example.svc
  port: 9092
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.metrics.host, "prometheus.example.svc");
        assert_eq!(config.metrics.port, 9092);
        assert_eq!(config.metrics.ca_bundle_key, "ca-bundle.crt");
    }
}
