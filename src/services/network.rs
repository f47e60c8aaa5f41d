//! Network identity of mesh clusters
//!
//! The home cluster's network is read from the sidecar injector values
//! (`global.network`). Remote clusters advertise theirs with the
//! `topology.istio.io/network` label on the control namespace.

use crate::config::Config;
use crate::constants::{NETWORK_LABEL, SIDECAR_INJECTOR_VALUES_KEY, UNKNOWN_NETWORK};
use crate::kube::MeshClient;
use k8s_openapi::api::core::v1::Namespace;
use serde_json::Value;

/// Extract `global.network` from the injector values JSON
pub fn network_from_injector_values(values: &str) -> Option<String> {
    let values: Value = match serde_json::from_str(values) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "Sidecar injector values are not valid JSON");
            return None;
        }
    };

    values
        .pointer("/global/network")
        .and_then(|n| n.as_str())
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
}

/// Read the network label of a namespace
pub fn network_from_namespace(namespace: &Namespace) -> Option<String> {
    namespace
        .metadata
        .labels
        .as_ref()
        .and_then(|labels| labels.get(NETWORK_LABEL))
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(String::from)
}

/// Network of the home cluster, `unknown` when undetermined
pub async fn home_network(client: &dyn MeshClient, config: &Config) -> String {
    let config_map = match client
        .get_config_map(&config.istio_namespace, &config.sidecar_injector_config_map)
        .await
    {
        Ok(Some(cm)) => cm,
        Ok(None) => {
            tracing::debug!(
                config_map = %config.sidecar_injector_config_map,
                "Sidecar injector config map not found"
            );
            return UNKNOWN_NETWORK.to_string();
        }
        Err(e) => {
            tracing::warn!(
                config_map = %config.sidecar_injector_config_map,
                error = %e,
                "Failed to fetch sidecar injector config map"
            );
            return UNKNOWN_NETWORK.to_string();
        }
    };

    config_map
        .data
        .as_ref()
        .and_then(|data| data.get(SIDECAR_INJECTOR_VALUES_KEY))
        .and_then(|values| network_from_injector_values(values))
        .unwrap_or_else(|| UNKNOWN_NETWORK.to_string())
}

/// Network of a remote cluster, `unknown` when undetermined
pub async fn remote_network(client: &dyn MeshClient, istio_namespace: &str) -> String {
    match client.get_namespace(istio_namespace).await {
        Ok(Some(ns)) => network_from_namespace(&ns).unwrap_or_else(|| UNKNOWN_NETWORK.to_string()),
        Ok(None) => {
            tracing::debug!(namespace = %istio_namespace, "Control namespace not found on remote");
            UNKNOWN_NETWORK.to_string()
        }
        Err(e) => {
            tracing::warn!(
                namespace = %istio_namespace,
                error = %e,
                "Failed to fetch control namespace on remote"
            );
            UNKNOWN_NETWORK.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use crate::kube::client::MockMeshClient;
    use k8s_openapi::api::core::v1::ConfigMap;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::collections::BTreeMap;

    fn labeled_namespace(labels: &[(&str, &str)]) -> Namespace {
        Namespace {
            metadata: ObjectMeta {
                name: Some("istio-system".to_string()),
                labels: Some(
                    labels
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                ),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn injector(values: &str) -> ConfigMap {
        ConfigMap {
            data: Some(BTreeMap::from([(
                SIDECAR_INJECTOR_VALUES_KEY.to_string(),
                values.to_string(),
            )])),
            ..Default::default()
        }
    }

    #[test]
    fn test_network_from_injector_values() {
        assert_eq!(
            network_from_injector_values(r#"{ "global": { "network": "kialiNetwork" } }"#)
                .as_deref(),
            Some("kialiNetwork")
        );
        assert!(network_from_injector_values(r#"{ "global": {} }"#).is_none());
        assert!(network_from_injector_values(r#"{ "global": { "network": "" } }"#).is_none());
        assert!(network_from_injector_values(r#"{ "global": { "network": 7 } }"#).is_none());
        assert!(network_from_injector_values("global: network").is_none());
    }

    #[test]
    fn test_network_from_namespace() {
        let ns = labeled_namespace(&[(NETWORK_LABEL, "network2")]);
        assert_eq!(network_from_namespace(&ns).as_deref(), Some("network2"));

        let ns = labeled_namespace(&[("istio-injection", "enabled")]);
        assert!(network_from_namespace(&ns).is_none());
        assert!(network_from_namespace(&Namespace::default()).is_none());
    }

    #[tokio::test]
    async fn test_home_network_from_config_map() {
        let mut client = MockMeshClient::new();
        client
            .expect_get_config_map()
            .withf(|ns, name| ns == "istio-system" && name == "istio-sidecar-injector")
            .returning(|_, _| Ok(Some(injector(r#"{"global":{"network":"net1"}}"#))));

        assert_eq!(home_network(&client, &Config::default()).await, "net1");
    }

    #[tokio::test]
    async fn test_home_network_degrades_to_unknown() {
        let mut missing = MockMeshClient::new();
        missing.expect_get_config_map().returning(|_, _| Ok(None));
        assert_eq!(home_network(&missing, &Config::default()).await, UNKNOWN_NETWORK);

        let mut failing = MockMeshClient::new();
        failing
            .expect_get_config_map()
            .returning(|_, _| Err(MeshError::KubeConfig("forbidden".into())));
        assert_eq!(home_network(&failing, &Config::default()).await, UNKNOWN_NETWORK);

        let mut garbled = MockMeshClient::new();
        garbled
            .expect_get_config_map()
            .returning(|_, _| Ok(Some(injector("not json"))));
        assert_eq!(home_network(&garbled, &Config::default()).await, UNKNOWN_NETWORK);

        let mut no_data = MockMeshClient::new();
        no_data
            .expect_get_config_map()
            .returning(|_, _| Ok(Some(ConfigMap::default())));
        assert_eq!(home_network(&no_data, &Config::default()).await, UNKNOWN_NETWORK);
    }

    #[tokio::test]
    async fn test_remote_network() {
        let mut client = MockMeshClient::new();
        client
            .expect_get_namespace()
            .withf(|name| name == "istio-system")
            .returning(|_| Ok(Some(labeled_namespace(&[(NETWORK_LABEL, "TheRemoteNetwork")]))));
        assert_eq!(remote_network(&client, "istio-system").await, "TheRemoteNetwork");

        let mut failing = MockMeshClient::new();
        failing
            .expect_get_namespace()
            .returning(|_| Err(MeshError::KubeConfig("timeout".into())));
        assert_eq!(remote_network(&failing, "istio-system").await, UNKNOWN_NETWORK);
    }
}
