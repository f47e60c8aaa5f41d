//! mesh-topology - lists the clusters of an Istio multi-cluster mesh

use anyhow::Result;
use clap::{Parser, Subcommand};
use mesh_topology::cli::{self, ConfigSubcommand, OutputFormat};
use std::path::PathBuf;

/// Discover the clusters of an Istio multi-cluster mesh
#[derive(Parser, Debug)]
#[command(name = "mesh-topology", version)]
#[command(about = "Discover the clusters of an Istio multi-cluster mesh", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// List the clusters participating in the mesh
    Clusters {
        /// Output format
        #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,

        /// Do not connect to remote clusters
        #[arg(long)]
        local_only: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    cli::init_logging(args.debug, args.log_file.as_deref())?;

    match args.command {
        Command::Clusters { output, local_only } => {
            cli::handle_clusters_command(output, local_only).await
        }
        Command::Config { subcommand } => cli::handle_config_command(subcommand),
    }
}
