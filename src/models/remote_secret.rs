//! Remote secret credential documents
//!
//! Istio stores the credentials for each remote cluster as a kubeconfig
//! document inside a labeled Secret, keyed by the cluster name. Only the
//! parts needed to reach the remote API server are modelled here.

use crate::error::{MeshError, MeshResult};
use crate::kube::remote::RemoteClusterConfig;
use serde::{Deserialize, Serialize};

/// Kubeconfig-shaped document held by a remote secret
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSecret {
    #[serde(default)]
    pub clusters: Vec<RemoteSecretClusterListItem>,
    #[serde(default)]
    pub users: Vec<RemoteSecretUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSecretClusterListItem {
    #[serde(default)]
    pub name: String,
    pub cluster: RemoteSecretCluster,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSecretCluster {
    #[serde(rename = "certificate-authority-data", default)]
    pub certificate_authority_data: String,
    pub server: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSecretUser {
    #[serde(default)]
    pub name: String,
    pub user: RemoteSecretUserToken,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSecretUserToken {
    #[serde(default)]
    pub token: String,
}

impl RemoteSecret {
    /// Decode a document from the raw bytes stored in the secret
    pub fn decode(data: &[u8]) -> MeshResult<Self> {
        let doc: RemoteSecret = serde_yaml::from_slice(data)?;
        Ok(doc)
    }

    /// Credentials used to reach the remote cluster
    ///
    /// Uses the first cluster and the first user of the document. Entries
    /// are not matched by name. The server URL and CA bundle are taken as-is;
    /// they are checked when a client is built from them.
    pub fn active_credential(&self) -> MeshResult<RemoteClusterConfig> {
        let cluster = self
            .clusters
            .first()
            .ok_or_else(|| MeshError::InvalidCredential("document lists no clusters".into()))?;
        let user = self
            .users
            .first()
            .ok_or_else(|| MeshError::InvalidCredential("document lists no users".into()))?;

        let endpoint = &cluster.cluster;
        Ok(RemoteClusterConfig {
            server: endpoint.server.trim().to_string(),
            certificate_authority_data: endpoint.certificate_authority_data.trim().to_string(),
            bearer_token: user.user.token.clone(),
        })
    }
}
