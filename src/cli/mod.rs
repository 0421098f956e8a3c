//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod commands;
mod logging;

pub use commands::{Command, handle_command};
pub use logging::init_logging;
