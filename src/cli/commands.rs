//! CLI command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use std::sync::Arc;

use super::output::{OutputFormat, render_clusters};
use crate::config::{ConfigLoader, paths};
use crate::kube::{AmbientEndpoint, KubeRemoteClientFactory, MeshClient, RemoteClientFactory};
use crate::services::MeshService;

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Show the effective configuration
    Show,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Discover the mesh and print its clusters
pub async fn handle_clusters_command(output: OutputFormat, local_only: bool) -> Result<()> {
    let config = ConfigLoader::load().context("Failed to load configuration")?;

    let home = crate::kube::create_client().await?;
    match home.is_openshift().await {
        Ok(openshift) => tracing::debug!(openshift, "Detected home cluster platform"),
        Err(e) => tracing::debug!(error = %e, "Failed to detect home cluster platform"),
    }

    let factory: Option<Arc<dyn RemoteClientFactory>> = if local_only {
        None
    } else {
        Some(Arc::new(KubeRemoteClientFactory))
    };

    let service = MeshService::new(Arc::new(home), factory, config, AmbientEndpoint::from_env());
    tracing::debug!(
        namespace = %service.config().istio_namespace,
        concurrency = service.config().effective_concurrency(),
        "Resolving mesh clusters"
    );
    let clusters = service
        .get_clusters()
        .await
        .context("Failed to resolve mesh clusters")?;

    for cluster in clusters.iter().filter(|c| !c.has_known_network()) {
        tracing::debug!(cluster = %cluster.name, "Network could not be determined");
    }

    println!("{}", render_clusters(&clusters, output)?);
    Ok(())
}

/// Handle configuration subcommands
pub fn handle_config_command(cmd: ConfigSubcommand) -> Result<()> {
    match cmd {
        ConfigSubcommand::Show => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;
            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
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
