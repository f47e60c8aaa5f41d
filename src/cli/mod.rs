//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod commands;
mod logging;
mod output;

pub use commands::{ConfigSubcommand, handle_clusters_command, handle_config_command};
pub use logging::init_logging;
pub use output::{OutputFormat, render_clusters};
