//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Namespace holding the Istio control plane, its config and remote secrets
    #[serde(default = "default_istio_namespace")]
    pub istio_namespace: String,

    /// Control plane deployment whose environment carries `CLUSTER_ID`
    #[serde(default = "default_istiod_deployment")]
    pub istiod_deployment: String,

    /// Config map holding the sidecar injector values
    #[serde(default = "default_sidecar_injector_config_map")]
    pub sidecar_injector_config_map: String,

    /// Home cluster name used when `CLUSTER_ID` cannot be found
    #[serde(default = "default_cluster_name")]
    pub default_cluster_name: String,

    /// Maximum number of remote clusters resolved at the same time
    #[serde(default = "default_resolve_concurrency")]
    pub resolve_concurrency: usize,
}

// Default value functions
fn default_istio_namespace() -> String {
    "istio-system".to_string()
}

fn default_istiod_deployment() -> String {
    "istiod".to_string()
}

fn default_sidecar_injector_config_map() -> String {
    "istio-sidecar-injector".to_string()
}

fn default_cluster_name() -> String {
    "Kubernetes".to_string()
}

fn default_resolve_concurrency() -> usize {
    8
}

impl Default for Config {
    fn default() -> Self {
        Self {
            istio_namespace: default_istio_namespace(),
            istiod_deployment: default_istiod_deployment(),
            sidecar_injector_config_map: default_sidecar_injector_config_map(),
            default_cluster_name: default_cluster_name(),
            resolve_concurrency: default_resolve_concurrency(),
        }
    }
}

impl Config {
    /// Fully qualified host of the egress gateway in the control namespace
    pub fn egress_gateway_host(&self) -> String {
        format!(
            "istio-egressgateway.{}.svc.cluster.local",
            self.istio_namespace
        )
    }

    /// Concurrency limit actually applied, never below one
    pub fn effective_concurrency(&self) -> usize {
        self.resolve_concurrency.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.istio_namespace, "istio-system");
        assert_eq!(config.istiod_deployment, "istiod");
        assert_eq!(config.sidecar_injector_config_map, "istio-sidecar-injector");
        assert_eq!(config.default_cluster_name, "Kubernetes");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("istioNamespace"));
        assert!(yaml.contains("defaultClusterName"));
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
istioNamespace: mesh-system
defaultClusterName: east
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.istio_namespace, "mesh-system");
        assert_eq!(config.default_cluster_name, "east");
        assert_eq!(config.istiod_deployment, "istiod");
    }

    #[test]
    fn test_egress_gateway_host_follows_namespace() {
        let config = Config {
            istio_namespace: "mesh-system".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.egress_gateway_host(),
            "istio-egressgateway.mesh-system.svc.cluster.local"
        );
    }

    #[test]
    fn test_effective_concurrency() {
        let config = Config {
            resolve_concurrency: 0,
            ..Default::default()
        };
        assert_eq!(config.effective_concurrency(), 1);
        assert_eq!(Config::default().effective_concurrency(), 8);
    }
}
