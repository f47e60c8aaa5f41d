//! Cluster inventory entries

use crate::constants::UNKNOWN_NETWORK;
use serde::{Deserialize, Serialize};

/// One cluster participating in the mesh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInfo {
    /// Cluster name, unique within an inventory
    pub name: String,

    /// API server URL, empty when unknown
    pub api_endpoint: String,

    /// Whether this is the cluster the resolver runs against
    pub is_kiali_home: bool,

    /// Remote secret this entry was built from, empty for the home cluster
    pub secret_name: String,

    /// Mesh network, `unknown` when it could not be determined
    pub network: String,

    /// Whether a working client could be built for this cluster
    pub accessible: bool,
}

impl ClusterInfo {
    /// Entry for the home cluster
    pub fn home(name: impl Into<String>, api_endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_endpoint: api_endpoint.into(),
            is_kiali_home: true,
            secret_name: String::new(),
            network: UNKNOWN_NETWORK.to_string(),
            accessible: true,
        }
    }

    /// Entry for a remote cluster discovered through a secret
    ///
    /// Starts inaccessible; the caller flips `accessible` once a client
    /// has been built.
    pub fn remote(
        name: impl Into<String>,
        api_endpoint: impl Into<String>,
        secret_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            api_endpoint: api_endpoint.into(),
            is_kiali_home: false,
            secret_name: secret_name.into(),
            network: UNKNOWN_NETWORK.to_string(),
            accessible: false,
        }
    }

    /// Set the network, falling back to the `unknown` sentinel for blank values
    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        let network = network.into();
        self.network = if network.trim().is_empty() {
            UNKNOWN_NETWORK.to_string()
        } else {
            network
        };
        self
    }

    pub fn has_known_network(&self) -> bool {
        self.network != UNKNOWN_NETWORK
    }
}

/// Find a cluster by name
pub fn find_cluster<'a>(clusters: &'a [ClusterInfo], name: &str) -> Option<&'a ClusterInfo> {
    clusters.iter().find(|c| c.name == name)
}

/// The home entry of an inventory, if present
pub fn home_cluster(clusters: &[ClusterInfo]) -> Option<&ClusterInfo> {
    clusters.iter().find(|c| c.is_kiali_home)
}
