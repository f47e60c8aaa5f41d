//! Control-plane access used by the resolver
//!
//! The resolver only talks to clusters through [`MeshClient`], so the home
//! cluster, remote clusters built from secrets and test doubles are
//! interchangeable.

use crate::error::MeshResult;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{ConfigMap, Namespace, Secret};
use kube::api::ListParams;
use kube::{Api, Client};
#[cfg(test)]
use mockall::automock;

/// API group only served by OpenShift clusters
const OPENSHIFT_API_GROUP: &str = "project.openshift.io";

/// Trait abstracting the Kubernetes reads needed to discover the mesh
///
/// Lookups of a single named object return `Ok(None)` when the object
/// does not exist. Any other failure is returned as an error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MeshClient: Send + Sync {
    /// Whether the cluster is an OpenShift cluster
    async fn is_openshift(&self) -> MeshResult<bool>;

    /// List secrets in a namespace matching a label selector
    async fn list_secrets(&self, namespace: &str, selector: &str) -> MeshResult<Vec<Secret>>;

    async fn get_deployment(&self, namespace: &str, name: &str) -> MeshResult<Option<Deployment>>;

    async fn get_config_map(&self, namespace: &str, name: &str) -> MeshResult<Option<ConfigMap>>;

    async fn get_namespace(&self, name: &str) -> MeshResult<Option<Namespace>>;

    /// API server URL this client is connected to
    fn cluster_url(&self) -> String;
}

/// [`MeshClient`] backed by a kube-rs client
#[derive(Clone)]
pub struct KubeMeshClient {
    client: Client,
    cluster_url: String,
}

impl KubeMeshClient {
    pub fn new(client: Client, cluster_url: impl Into<String>) -> Self {
        let cluster_url = cluster_url.into();
        Self {
            client,
            cluster_url: cluster_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MeshClient for KubeMeshClient {
    async fn is_openshift(&self) -> MeshResult<bool> {
        let groups = self.client.list_api_groups().await?;
        Ok(groups.groups.iter().any(|g| g.name == OPENSHIFT_API_GROUP))
    }

    async fn list_secrets(&self, namespace: &str, selector: &str) -> MeshResult<Vec<Secret>> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let list = api.list(&ListParams::default().labels(selector)).await?;
        tracing::debug!(
            namespace = %namespace,
            selector = %selector,
            count = list.items.len(),
            "Listed secrets"
        );
        Ok(list.items)
    }

    async fn get_deployment(&self, namespace: &str, name: &str) -> MeshResult<Option<Deployment>> {
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.get_opt(name).await?)
    }

    async fn get_config_map(&self, namespace: &str, name: &str) -> MeshResult<Option<ConfigMap>> {
        let api: Api<ConfigMap> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.get_opt(name).await?)
    }

    async fn get_namespace(&self, name: &str) -> MeshResult<Option<Namespace>> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        Ok(api.get_opt(name).await?)
    }

    fn cluster_url(&self) -> String {
        self.cluster_url.clone()
    }
}
