//! Mesh topology resolution
//!
//! `MeshService` builds a point-in-time inventory of every cluster in the
//! mesh: the home cluster first, then one entry per remote secret found in
//! the control namespace. Failures reaching the home cluster abort the
//! discovery. Failures specific to a remote cluster only degrade its entry.

use super::home::HomeResolver;
use super::network;
use crate::config::Config;
use crate::constants::{CLUSTER_ANNOTATION, MULTI_CLUSTER_SECRET_SELECTOR};
use crate::error::{MeshError, MeshResult};
use crate::kube::{AmbientEndpoint, MeshClient, RemoteClientFactory};
use crate::models::{ClusterInfo, RemoteSecret};
use futures::stream::{self, StreamExt};
use k8s_openapi::api::core::v1::Secret;
use std::collections::HashMap;
use std::sync::Arc;

/// Extract the target cluster name and credential document from a remote secret
///
/// The `networking.istio.io/cluster` annotation names the cluster and the
/// document is stored under the same key in the secret's data.
pub fn parse_remote_secret(secret: &Secret) -> MeshResult<(String, RemoteSecret)> {
    let secret_name = secret.metadata.name.clone().unwrap_or_default();

    let cluster_name = secret
        .metadata
        .annotations
        .as_ref()
        .and_then(|a| a.get(CLUSTER_ANNOTATION))
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| MeshError::MissingAnnotation {
            secret: secret_name.clone(),
        })?
        .clone();

    let data = secret
        .data
        .as_ref()
        .and_then(|d| d.get(&cluster_name))
        .ok_or_else(|| MeshError::MissingData {
            secret: secret_name.clone(),
            key: cluster_name.clone(),
        })?;

    let doc = RemoteSecret::decode(&data.0)?;
    Ok((cluster_name, doc))
}

/// Resolves the clusters participating in the mesh
pub struct MeshService {
    home: Arc<dyn MeshClient>,
    remote_factory: Option<Arc<dyn RemoteClientFactory>>,
    config: Config,
    ambient: AmbientEndpoint,
}

impl MeshService {
    /// Create a service bound to the home cluster
    ///
    /// Without a `remote_factory` remote clusters are still listed but
    /// reported as inaccessible with an unknown network.
    pub fn new(
        home: Arc<dyn MeshClient>,
        remote_factory: Option<Arc<dyn RemoteClientFactory>>,
        config: Config,
        ambient: AmbientEndpoint,
    ) -> Self {
        Self {
            home,
            remote_factory,
            config,
            ambient,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve the entry describing the home cluster
    pub async fn resolve_home_cluster(&self) -> MeshResult<ClusterInfo> {
        let resolver = HomeResolver::new(self.home.as_ref(), &self.config, &self.ambient);
        let name = resolver.resolve_name().await?;
        let endpoint = resolver.resolve_endpoint();
        let network = network::home_network(self.home.as_ref(), &self.config).await;

        Ok(ClusterInfo::home(name, endpoint).with_network(network))
    }

    /// Resolve every cluster of the mesh
    ///
    /// The home cluster is always the first entry; remote clusters follow in
    /// the order their secrets were listed.
    pub async fn get_clusters(&self) -> MeshResult<Vec<ClusterInfo>> {
        let home = self.resolve_home_cluster().await?;

        let secrets = self
            .home
            .list_secrets(&self.config.istio_namespace, MULTI_CLUSTER_SECRET_SELECTOR)
            .await?;

        let remotes: Vec<Option<ClusterInfo>> = stream::iter(secrets.iter())
            .map(|secret| self.resolve_remote_cluster(secret))
            .buffered(self.config.effective_concurrency())
            .collect()
            .await;

        let clusters = assemble_inventory(home, remotes.into_iter().flatten());

        tracing::info!(
            clusters = clusters.len(),
            secrets = secrets.len(),
            "Resolved mesh topology"
        );
        Ok(clusters)
    }

    /// Build the entry for one remote secret, `None` when the secret is unusable
    async fn resolve_remote_cluster(&self, secret: &Secret) -> Option<ClusterInfo> {
        let secret_name = secret.metadata.name.clone().unwrap_or_default();

        let (cluster_name, doc) = match parse_remote_secret(secret) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(secret = %secret_name, error = %e, "Skipping remote secret");
                return None;
            }
        };

        let credential = match doc.active_credential() {
            Ok(credential) => credential,
            Err(e) => {
                tracing::warn!(
                    secret = %secret_name,
                    cluster = %cluster_name,
                    error = %e,
                    "Skipping remote secret"
                );
                return None;
            }
        };

        let mut info = ClusterInfo::remote(&cluster_name, &credential.server, &secret_name);

        let client = match &self.remote_factory {
            Some(factory) => factory.connect(&credential).await,
            None => Err(MeshError::NoRemoteFactory),
        };

        match client {
            Ok(client) => {
                info.accessible = true;
                let network =
                    network::remote_network(client.as_ref(), &self.config.istio_namespace).await;
                info = info.with_network(network);
            }
            Err(e) => {
                tracing::warn!(
                    cluster = %cluster_name,
                    server = %credential.server,
                    error = %e,
                    "Remote cluster is not accessible"
                );
            }
        }

        Some(info)
    }
}

/// Combine the home entry and remote entries into one inventory
///
/// Remote entries sharing a name keep the first position and the last
/// value. A remote entry named like the home cluster is dropped.
fn assemble_inventory(
    home: ClusterInfo,
    remotes: impl IntoIterator<Item = ClusterInfo>,
) -> Vec<ClusterInfo> {
    let mut clusters = vec![home];
    let mut positions: HashMap<String, usize> = HashMap::new();

    for remote in remotes {
        if remote.name == clusters[0].name {
            tracing::warn!(
                cluster = %remote.name,
                secret = %remote.secret_name,
                "Remote secret targets the home cluster, ignoring it"
            );
            continue;
        }

        match positions.get(&remote.name) {
            Some(&idx) => {
                tracing::debug!(
                    cluster = %remote.name,
                    previous = %clusters[idx].secret_name,
                    secret = %remote.secret_name,
                    "Cluster listed by several secrets, keeping the last one"
                );
                clusters[idx] = remote;
            }
            None => {
                positions.insert(remote.name.clone(), clusters.len());
                clusters.push(remote);
            }
        }
    }

    clusters
}
