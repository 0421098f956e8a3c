//! CLI command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use credgraph::config::{self, Config, ConfigLoader, paths};
use credgraph::graph::render_dot;
use credgraph::metrics::new_metrics_client;
use credgraph::resources;
use tokio_util::sync::CancellationToken;

/// Main commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Where do resources come from? Print the provenance graph in DOT format
    ResourceGraph,
    /// Print the provenance graph as an indented tree, roots first
    ResourceTree,
    /// Run an instant query against the in-cluster metrics backend
    MetricsQuery {
        /// Query expression
        expr: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print the effective configuration, or one value of it
    Get {
        /// Configuration key (e.g., "metrics.host", "metrics.port")
        key: Option<String>,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

pub async fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::ResourceGraph => print!("{}", resource_graph()?),
        Command::ResourceTree => {
            let graph = resources::kube_controller_manager()
                .context("Failed to build resource graph")?;
            for line in graph.dump() {
                println!("{}", line);
            }
        }
        Command::MetricsQuery { expr } => {
            let config = ConfigLoader::load()?;
            metrics_query(&config, &expr).await?;
        }
        Command::Config { subcommand } => handle_config_command(subcommand)?,
    }

    Ok(())
}

/// Build and render the kube-controller-manager provenance graph
///
/// The output is a committed artifact, so nothing in the configuration
/// affects it.
pub fn resource_graph() -> Result<String> {
    let graph =
        resources::kube_controller_manager().context("Failed to build resource graph")?;
    render_dot(&graph, resources::TITLE).context("Failed to render resource graph")
}

async fn metrics_query(config: &Config, expr: &str) -> Result<()> {
    let client = credgraph::kube::create_client().await?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("Interrupted, cancelling metrics client construction");
            on_interrupt.cancel();
        }
    });

    let metrics = new_metrics_client(&cancel, &client, &config.metrics)
        .await
        .context("Failed to create metrics client")?;
    let data = metrics
        .query(expr)
        .await
        .with_context(|| format!("Query failed: {}", expr))?;

    let json = serde_json::to_string_pretty(&data).context("Failed to serialize query result")?;
    println!("{}", json);
    Ok(())
}

/// Handle configuration subcommands
fn handle_config_command(cmd: ConfigSubcommand) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;

            if let Some(key) = key {
                println!("{}", config::get_config_value(&config, &key)?);
            } else {
                let yaml =
                    serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
                print!("{}", yaml);
            }
        }
        ConfigSubcommand::Path => {
            println!("{}", paths::root_config_path().display());
        }
        ConfigSubcommand::Validate => {
            ConfigLoader::validate().context("Configuration validation failed")?;
            println!("Configuration is valid");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_graph_uses_fixed_title() {
        // SAFETY: set_var is unsafe in Rust 2024 due to potential data races.
        // No other test reads this variable.
        unsafe {
            std::env::set_var("CREDGRAPH_TITLE", "audit");
        }

        let dot = resource_graph().unwrap();

        // SAFETY: see above.
        unsafe {
            std::env::remove_var("CREDGRAPH_TITLE");
        }

        assert!(dot.starts_with("digraph \"kube-controller-manager-operator\" {\n"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_resource_graph_is_stable() {
        assert_eq!(resource_graph().unwrap(), resource_graph().unwrap());
    }
}
