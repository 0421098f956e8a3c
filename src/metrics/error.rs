//! Errors returned by the metrics client factory and its queries

use std::path::PathBuf;
use thiserror::Error;

/// Error type for anything a [`super::ConfigMapSource`] may fail with
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum MetricsClientError {
    #[error("metrics client construction was cancelled")]
    Cancelled,

    #[error("error reading service account token from {}", .path.display())]
    TokenRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("service account token in {} is not a valid header value", .path.display())]
    InvalidToken { path: PathBuf },

    #[error("failed to get ConfigMap {namespace}/{name}")]
    ConfigMap {
        namespace: String,
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("ConfigMap {namespace}/{name} has no {key} entry")]
    MissingCaBundle {
        namespace: String,
        name: String,
        key: String,
    },

    #[error("CA bundle in ConfigMap {namespace}/{name} contains no usable certificates")]
    InvalidCaBundle {
        namespace: String,
        name: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("invalid metrics address")]
    InvalidAddress(#[from] url::ParseError),

    #[error("failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("metrics request failed")]
    Request(#[source] reqwest::Error),

    #[error("metrics backend returned a body that is not JSON")]
    InvalidResponse(#[source] serde_json::Error),

    #[error("query failed with HTTP {status}: {message}")]
    QueryFailed { status: u16, message: String },
}
