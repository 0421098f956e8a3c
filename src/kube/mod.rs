//! Kubernetes client module
//!
//! Connects to the API server for the few commands that need live cluster
//! access. Graph rendering never touches the cluster.

use anyhow::{Context, Result};
use kube::{Client, Config};

/// Initialize and return a Kubernetes client
///
/// Uses the default kubeconfig loading strategy:
/// 1. In-cluster config (if running in a pod)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
pub async fn create_client() -> Result<Client> {
    let config = Config::infer()
        .await
        .context("Failed to load Kubernetes configuration")?;
    tracing::debug!("Connecting to Kubernetes API at {}", config.cluster_url);

    Client::try_from(config).context("Failed to create Kubernetes client")
}
