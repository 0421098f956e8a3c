//! Configuration file location

use directories::ProjectDirs;
use std::path::PathBuf;

/// Get the configuration directory path
///
/// `CREDGRAPH_CONFIG_DIR` wins when set. Otherwise this is the platform's
/// per-user config directory for credgraph, or `./.config/credgraph` when no
/// home directory can be found.
pub fn config_dir() -> PathBuf {
    std::env::var("CREDGRAPH_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            ProjectDirs::from("", "", "credgraph")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".").join(".config").join("credgraph"))
        })
}

/// Get the root configuration file path
pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}
