//! Clients for remote clusters
//!
//! Remote clusters are reached with the server URL, CA bundle and bearer
//! token taken from their remote secret. The factory is injected into the
//! resolver so deployments without remote access (or tests) can swap it.

use super::client::{KubeMeshClient, MeshClient};
use crate::error::{MeshError, MeshResult};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
#[cfg(test)]
use mockall::automock;
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Name used for the cluster, user and context of a synthesized kubeconfig
const REMOTE_CONTEXT: &str = "remote";

/// Connection settings for a remote cluster
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteClusterConfig {
    pub server: String,
    /// Base64 encoded PEM bundle, empty to rely on system roots
    pub certificate_authority_data: String,
    pub bearer_token: String,
}

impl fmt::Debug for RemoteClusterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteClusterConfig")
            .field("server", &self.server)
            .field(
                "certificate_authority_data",
                &format_args!("<{} bytes>", self.certificate_authority_data.len()),
            )
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}

impl RemoteClusterConfig {
    /// Check the server URL and CA bundle before building a client
    pub fn validate(&self) -> MeshResult<()> {
        Url::parse(&self.server).map_err(|e| {
            MeshError::InvalidCredential(format!("invalid server URL '{}': {}", self.server, e))
        })?;

        if !self.certificate_authority_data.is_empty() {
            STANDARD.decode(&self.certificate_authority_data).map_err(|e| {
                MeshError::InvalidCredential(format!("invalid CA data: {}", e))
            })?;
        }

        Ok(())
    }

    /// Build a single-context kubeconfig for these settings
    pub fn to_kubeconfig(&self) -> MeshResult<Kubeconfig> {
        let mut cluster = json!({ "server": self.server });
        if !self.certificate_authority_data.is_empty() {
            cluster["certificate-authority-data"] = json!(self.certificate_authority_data);
        }

        let doc = json!({
            "apiVersion": "v1",
            "kind": "Config",
            "clusters": [{ "name": REMOTE_CONTEXT, "cluster": cluster }],
            "users": [{ "name": REMOTE_CONTEXT, "user": { "token": self.bearer_token } }],
            "contexts": [{
                "name": REMOTE_CONTEXT,
                "context": { "cluster": REMOTE_CONTEXT, "user": REMOTE_CONTEXT }
            }],
            "current-context": REMOTE_CONTEXT,
        });

        serde_json::from_value(doc)
            .map_err(|e| MeshError::KubeConfig(format!("failed to build kubeconfig: {}", e)))
    }
}

/// Builds clients for remote clusters
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RemoteClientFactory: Send + Sync {
    async fn connect(&self, config: &RemoteClusterConfig) -> MeshResult<Arc<dyn MeshClient>>;
}

/// [`RemoteClientFactory`] producing kube-rs backed clients
///
/// Building the client does not contact the remote API server; an
/// unreachable cluster only surfaces on its first request.
#[derive(Debug, Clone, Copy, Default)]
pub struct KubeRemoteClientFactory;

#[async_trait]
impl RemoteClientFactory for KubeRemoteClientFactory {
    async fn connect(&self, config: &RemoteClusterConfig) -> MeshResult<Arc<dyn MeshClient>> {
        config.validate()?;
        let kubeconfig = config.to_kubeconfig()?;
        let kube_config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|e| MeshError::KubeConfig(e.to_string()))?;

        let client = Client::try_from(kube_config)?;
        tracing::debug!(server = %config.server, "Built remote cluster client");

        Ok(Arc::new(KubeMeshClient::new(client, config.server.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RemoteClusterConfig {
        RemoteClusterConfig {
            server: "https://192.168.144.17:123".to_string(),
            certificate_authority_data: "eAo=".to_string(),
            bearer_token: "bar".to_string(),
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", config());
        assert!(debug.contains("https://192.168.144.17:123"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("bar"));
    }

    #[test]
    fn test_kubeconfig_has_single_context() {
        let kubeconfig = config().to_kubeconfig().unwrap();
        assert_eq!(kubeconfig.current_context.as_deref(), Some(REMOTE_CONTEXT));
        assert_eq!(kubeconfig.clusters.len(), 1);
        assert_eq!(kubeconfig.auth_infos.len(), 1);
        assert_eq!(kubeconfig.contexts.len(), 1);

        let cluster = kubeconfig.clusters[0].cluster.as_ref().unwrap();
        assert_eq!(cluster.server.as_deref(), Some("https://192.168.144.17:123"));
        assert_eq!(cluster.certificate_authority_data.as_deref(), Some("eAo="));
    }

    #[test]
    fn test_validate() {
        assert!(config().validate().is_ok());

        let mut no_ca = config();
        no_ca.certificate_authority_data.clear();
        assert!(no_ca.validate().is_ok());

        let mut bad_ca = config();
        bad_ca.certificate_authority_data = "not-base64!".to_string();
        assert!(matches!(bad_ca.validate(), Err(MeshError::InvalidCredential(_))));

        let mut bad_server = config();
        bad_server.server = "not a url".to_string();
        assert!(matches!(bad_server.validate(), Err(MeshError::InvalidCredential(_))));
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_ca() {
        let mut bad_ca = config();
        bad_ca.certificate_authority_data = "not-base64!".to_string();

        let result = KubeRemoteClientFactory.connect(&bad_ca).await;
        assert!(matches!(result, Err(MeshError::InvalidCredential(_))));
    }

    #[test]
    fn test_kubeconfig_omits_empty_ca() {
        let mut config = config();
        config.certificate_authority_data.clear();
        let kubeconfig = config.to_kubeconfig().unwrap();
        let cluster = kubeconfig.clusters[0].cluster.as_ref().unwrap();
        assert!(cluster.certificate_authority_data.is_none());
    }
}
