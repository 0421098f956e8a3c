//! Read access to ConfigMaps
//!
//! A ConfigMap without a `data` section reads as an empty map, so a missing
//! CA bundle key is reported the same way whether the ConfigMap is empty or
//! just holds other keys.

use super::BoxError;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::Api;
use std::collections::BTreeMap;

/// Something that can read a ConfigMap's string data
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigMapSource: Send + Sync {
    async fn config_map(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<BTreeMap<String, String>, BoxError>;
}

#[async_trait]
impl ConfigMapSource for kube::Client {
    async fn config_map(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<BTreeMap<String, String>, BoxError> {
        tracing::debug!("Fetching ConfigMap {}/{}", namespace, name);
        let api: Api<ConfigMap> = Api::namespaced(self.clone(), namespace);
        let config_map = api.get(name).await?;
        Ok(string_data(config_map))
    }
}

/// String entries of a ConfigMap; `binaryData` is not consulted
fn string_data(config_map: ConfigMap) -> BTreeMap<String, String> {
    config_map.data.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_data_without_data_section() {
        assert!(string_data(ConfigMap::default()).is_empty());
    }

    #[test]
    fn test_string_data_ignores_binary_data() {
        let config_map = ConfigMap {
            data: Some(BTreeMap::from([(
                "ca-bundle.crt".to_string(),
                "pem".to_string(),
            )])),
            binary_data: Some(BTreeMap::new()),
            ..ConfigMap::default()
        };
        let data = string_data(config_map);
        assert_eq!(data.len(), 1);
        assert_eq!(data["ca-bundle.crt"], "pem");
    }
}
