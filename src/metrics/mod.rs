//! Metrics backend client factory
//!
//! Produces an authenticated query client for the in-cluster metrics
//! endpoint. Independent of the provenance graph.

mod client;
mod error;
mod source;

pub use client::{MetricsClient, new_metrics_client};
pub use error::{BoxError, MetricsClientError};
#[cfg(test)]
pub use source::MockConfigMapSource;
pub use source::ConfigMapSource;
