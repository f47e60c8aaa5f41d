//! Kubernetes client module
//!
//! Handles connection to the home cluster's API server and the ambient
//! connection settings describing it. Remote cluster clients live in
//! [`remote`].

pub mod client;
pub mod remote;

pub use client::{KubeMeshClient, MeshClient};
pub use remote::{KubeRemoteClientFactory, RemoteClientFactory, RemoteClusterConfig};

use crate::constants::{SERVICE_HOST_ENV, SERVICE_PORT_ENV};
use anyhow::{Context, Result};
use kube::{Client, Config};
use url::Url;

/// Initialize a client for the home cluster
///
/// Uses the default kubeconfig loading strategy:
/// 1. In-cluster config (if running in a pod)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
pub async fn create_client() -> Result<KubeMeshClient> {
    let config = Config::infer()
        .await
        .context("Failed to infer Kubernetes configuration")?;

    let cluster_url = config.cluster_url.to_string();
    if let Ok(url) = Url::parse(&cluster_url) {
        tracing::debug!(host = ?url.host_str(), "Connecting to home cluster");
    }

    let client = Client::try_from(config).context("Failed to create Kubernetes client")?;
    Ok(KubeMeshClient::new(client, cluster_url))
}

/// Host and port of the API server as seen from inside a pod
///
/// Kubernetes injects these into every container. Read once at startup and
/// passed to the resolver instead of being looked up ad hoc.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmbientEndpoint {
    pub host: Option<String>,
    pub port: Option<String>,
}

impl AmbientEndpoint {
    pub fn new(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            port: Some(port.into()),
        }
    }

    /// Read `KUBERNETES_SERVICE_HOST` and `KUBERNETES_SERVICE_PORT`
    pub fn from_env() -> Self {
        Self {
            host: std::env::var(SERVICE_HOST_ENV).ok(),
            port: std::env::var(SERVICE_PORT_ENV).ok(),
        }
    }

    /// Endpoint URL, `None` unless both host and port are set
    pub fn api_endpoint(&self) -> Option<String> {
        let host = self.host.as_deref().map(str::trim).filter(|h| !h.is_empty())?;
        let port = self.port.as_deref().map(str::trim).filter(|p| !p.is_empty())?;

        // IPv6 literals need brackets in the authority
        if host.contains(':') && !host.starts_with('[') {
            Some(format!("http://[{}]:{}", host, port))
        } else {
            Some(format!("http://{}:{}", host, port))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_endpoint_from_host_and_port() {
        let ambient = AmbientEndpoint::new("127.0.0.2", "9443");
        assert_eq!(
            ambient.api_endpoint().as_deref(),
            Some("http://127.0.0.2:9443")
        );
    }

    #[test]
    fn test_api_endpoint_ipv6() {
        let ambient = AmbientEndpoint::new("fd00::1", "443");
        assert_eq!(ambient.api_endpoint().as_deref(), Some("http://[fd00::1]:443"));
    }

    #[test]
    fn test_api_endpoint_requires_both_values() {
        assert!(AmbientEndpoint::default().api_endpoint().is_none());

        let ambient = AmbientEndpoint {
            host: Some("10.0.0.1".to_string()),
            port: None,
        };
        assert!(ambient.api_endpoint().is_none());

        let ambient = AmbientEndpoint::new("10.0.0.1", " ");
        assert!(ambient.api_endpoint().is_none());
    }
}
