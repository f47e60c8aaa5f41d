//! Remote secret parsing tests
//!
//! Covers secrets shaped like the ones `istioctl create-remote-secret`
//! produces.

use k8s_openapi::ByteString;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use mesh_topology::services::parse_remote_secret;
use mesh_topology::{MeshError, RemoteSecret};
use std::collections::BTreeMap;

const ISTIOCTL_KUBECONFIG: &str = r#"apiVersion: v1
clusters:
- cluster:
    certificate-authority-data: LS0tLS1CRUdJTiBDRVJUSUZJQ0FURS0tLS0tCg==
    server: https://cluster2.example.com:6443
  name: cluster2
contexts:
- context:
    cluster: cluster2
    user: cluster2
  name: cluster2
current-context: cluster2
kind: Config
preferences: {}
users:
- name: cluster2
  user:
    token: eyJhbGciOiJSUzI1NiJ9.payload.signature
"#;

fn secret(annotation: Option<&str>, key: &str, data: &str) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some("istio-remote-secret-cluster2".to_string()),
            annotations: annotation.map(|cluster| {
                BTreeMap::from([(
                    "networking.istio.io/cluster".to_string(),
                    cluster.to_string(),
                )])
            }),
            labels: Some(BTreeMap::from([(
                "istio/multiCluster".to_string(),
                "true".to_string(),
            )])),
            ..Default::default()
        },
        data: Some(BTreeMap::from([(
            key.to_string(),
            ByteString(data.as_bytes().to_vec()),
        )])),
        ..Default::default()
    }
}

#[test]
fn test_parse_istioctl_secret() {
    let (cluster, doc) =
        parse_remote_secret(&secret(Some("cluster2"), "cluster2", ISTIOCTL_KUBECONFIG)).unwrap();
    assert_eq!(cluster, "cluster2");

    let credential = doc.active_credential().unwrap();
    assert_eq!(credential.server, "https://cluster2.example.com:6443");
    assert_eq!(credential.bearer_token, "eyJhbGciOiJSUzI1NiJ9.payload.signature");
    assert!(!format!("{:?}", credential).contains("payload"));
}

#[test]
fn test_annotation_must_match_data_key() {
    let err = parse_remote_secret(&secret(Some("cluster3"), "cluster2", ISTIOCTL_KUBECONFIG))
        .unwrap_err();
    assert!(matches!(err, MeshError::MissingData { ref key, .. } if key == "cluster3"));
}

#[test]
fn test_missing_annotation() {
    let err = parse_remote_secret(&secret(None, "cluster2", ISTIOCTL_KUBECONFIG)).unwrap_err();
    assert!(matches!(err, MeshError::MissingAnnotation { .. }));
}

#[test]
fn test_undecodable_payload() {
    let err = parse_remote_secret(&secret(Some("cluster2"), "cluster2", "- just\n- a list\n"))
        .unwrap_err();
    assert!(matches!(err, MeshError::Decode(_)));
}

#[test]
fn test_decode_round_trip_preserves_first_entries() {
    let doc = RemoteSecret::decode(ISTIOCTL_KUBECONFIG.as_bytes()).unwrap();
    let encoded = serde_yaml::to_string(&doc).unwrap();
    let decoded = RemoteSecret::decode(encoded.as_bytes()).unwrap();
    assert_eq!(doc, decoded);
    assert_eq!(decoded.clusters[0].name, "cluster2");
}
