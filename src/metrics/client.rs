//! Authenticated client for the cluster's metrics query endpoint

use super::{ConfigMapSource, MetricsClientError};
use crate::config::MetricsConfig;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Query-capable handle bound to one metrics backend
#[derive(Debug, Clone)]
pub struct MetricsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl MetricsClient {
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Run an instant query and return the `data` member of the response
    pub async fn query(&self, expr: &str) -> Result<Value, MetricsClientError> {
        let url = self.base_url.join("api/v1/query")?;
        tracing::debug!("Querying {}: {}", url, expr);

        let resp = self
            .http
            .get(url)
            .query(&[("query", expr)])
            .send()
            .await
            .map_err(MetricsClientError::Request)?;

        let status = resp.status();
        let body = resp.text().await.map_err(MetricsClientError::Request)?;
        parse_query_response(status, &body)
    }
}

/// Interpret a query response, checking the HTTP status before the body
///
/// Proxies in front of the backend answer failures with plain text or HTML,
/// so a non-success status never requires a JSON body.
fn parse_query_response(status: StatusCode, body: &str) -> Result<Value, MetricsClientError> {
    if !status.is_success() {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| json.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| match body.trim() {
                "" => status.canonical_reason().unwrap_or("unknown error").to_string(),
                text => text.to_string(),
            });
        return Err(MetricsClientError::QueryFailed {
            status: status.as_u16(),
            message,
        });
    }

    let json: Value = serde_json::from_str(body).map_err(MetricsClientError::InvalidResponse)?;
    if json["status"] != "success" {
        let message = json
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(MetricsClientError::QueryFailed {
            status: status.as_u16(),
            message,
        });
    }

    Ok(json.get("data").cloned().unwrap_or(Value::Null))
}

/// Build a metrics client that authenticates with the mounted service
/// account token and trusts only the CA bundle published in a ConfigMap
///
/// The connection is verified against `settings.host`. Nothing here blocks
/// on the network: the token and the CA bundle are the only inputs read.
pub async fn new_metrics_client<S>(
    cancel: &CancellationToken,
    config_maps: &S,
    settings: &MetricsConfig,
) -> Result<MetricsClient, MetricsClientError>
where
    S: ConfigMapSource + ?Sized,
{
    if cancel.is_cancelled() {
        return Err(MetricsClientError::Cancelled);
    }

    let token = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(MetricsClientError::Cancelled),
        token = tokio::fs::read_to_string(&settings.token_path) => {
            token.map_err(|source| MetricsClientError::TokenRead {
                path: settings.token_path.clone(),
                source,
            })?
        }
    };

    let namespace = &settings.ca_config_map_namespace;
    let name = &settings.ca_config_map_name;
    let data = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(MetricsClientError::Cancelled),
        data = config_maps.config_map(namespace, name) => {
            data.map_err(|source| MetricsClientError::ConfigMap {
                namespace: namespace.clone(),
                name: name.clone(),
                source,
            })?
        }
    };

    let bundle = data
        .get(&settings.ca_bundle_key)
        .ok_or_else(|| MetricsClientError::MissingCaBundle {
            namespace: namespace.clone(),
            name: name.clone(),
            key: settings.ca_bundle_key.clone(),
        })?;
    let roots = reqwest::Certificate::from_pem_bundle(bundle.as_bytes()).map_err(|source| {
        MetricsClientError::InvalidCaBundle {
            namespace: namespace.clone(),
            name: name.clone(),
            source: Some(source),
        }
    })?;
    if roots.is_empty() {
        return Err(MetricsClientError::InvalidCaBundle {
            namespace: namespace.clone(),
            name: name.clone(),
            source: None,
        });
    }

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim())).map_err(|_| {
        MetricsClientError::InvalidToken {
            path: settings.token_path.clone(),
        }
    })?;
    auth.set_sensitive(true);
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);

    // reqwest's connect timeout spans both the TCP dial and the TLS handshake
    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .tls_built_in_root_certs(false)
        .connect_timeout(settings.connect_timeout() + settings.tls_handshake_timeout())
        .tcp_keepalive(settings.keep_alive());
    for root in roots {
        builder = builder.add_root_certificate(root);
    }
    let http = builder.build().map_err(MetricsClientError::ClientBuild)?;

    let base_url = Url::parse(&format!("https://{}:{}/", settings.host, settings.port))?;
    tracing::debug!(
        "Created metrics client for {} trusting {}/{}",
        base_url,
        namespace,
        name
    );

    Ok(MetricsClient { http, base_url })
}
