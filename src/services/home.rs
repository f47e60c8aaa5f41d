//! Home cluster identity
//!
//! The home cluster's name comes from the `CLUSTER_ID` environment
//! variable of the istiod deployment. Its endpoint is synthesized from the
//! ambient host/port settings when available, so it matches a client built
//! from the same settings.

use crate::config::Config;
use crate::constants::CLUSTER_ID_ENV;
use crate::error::MeshResult;
use crate::kube::{AmbientEndpoint, MeshClient};
use k8s_openapi::api::apps::v1::Deployment;

/// Extract `CLUSTER_ID` from the first container that sets it
pub fn cluster_id_from_deployment(deployment: &Deployment) -> Option<String> {
    deployment
        .spec
        .as_ref()
        .and_then(|spec| spec.template.spec.as_ref())
        .into_iter()
        .flat_map(|pod| pod.containers.iter())
        .flat_map(|container| container.env.iter().flatten())
        .find(|var| var.name == CLUSTER_ID_ENV)
        .and_then(|var| var.value.clone())
        .filter(|value| !value.trim().is_empty())
}

/// Resolves the name and endpoint of the home cluster
pub struct HomeResolver<'a> {
    client: &'a dyn MeshClient,
    config: &'a Config,
    ambient: &'a AmbientEndpoint,
}

impl<'a> HomeResolver<'a> {
    pub fn new(client: &'a dyn MeshClient, config: &'a Config, ambient: &'a AmbientEndpoint) -> Self {
        Self {
            client,
            config,
            ambient,
        }
    }

    /// Cluster name, falling back to the configured default
    ///
    /// A missing deployment or variable is not an error. Failing to reach
    /// the home cluster is.
    pub async fn resolve_name(&self) -> MeshResult<String> {
        let deployment = self
            .client
            .get_deployment(&self.config.istio_namespace, &self.config.istiod_deployment)
            .await?;

        let Some(deployment) = deployment else {
            tracing::debug!(
                namespace = %self.config.istio_namespace,
                deployment = %self.config.istiod_deployment,
                default = %self.config.default_cluster_name,
                "Control plane deployment not found, using default cluster name"
            );
            return Ok(self.config.default_cluster_name.clone());
        };

        match cluster_id_from_deployment(&deployment) {
            Some(name) => Ok(name),
            None => {
                tracing::debug!(
                    deployment = %self.config.istiod_deployment,
                    default = %self.config.default_cluster_name,
                    "{} not set on control plane, using default cluster name",
                    CLUSTER_ID_ENV
                );
                Ok(self.config.default_cluster_name.clone())
            }
        }
    }

    /// API endpoint of the home cluster
    pub fn resolve_endpoint(&self) -> String {
        self.ambient
            .api_endpoint()
            .unwrap_or_else(|| self.client.cluster_url())
    }
}
