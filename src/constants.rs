//! Well-known Istio keys used during discovery

/// Label selector matching multi-cluster remote secrets
pub const MULTI_CLUSTER_SECRET_SELECTOR: &str = "istio/multiCluster=true";

/// Annotation naming the cluster a remote secret targets
pub const CLUSTER_ANNOTATION: &str = "networking.istio.io/cluster";

/// Environment variable on the istiod container holding the cluster name
pub const CLUSTER_ID_ENV: &str = "CLUSTER_ID";

/// Data key of the sidecar injector config map holding the Helm values
pub const SIDECAR_INJECTOR_VALUES_KEY: &str = "values";

/// Namespace label carrying the network of a remote cluster
pub const NETWORK_LABEL: &str = "topology.istio.io/network";

/// Sentinel used when a network cannot be determined
pub const UNKNOWN_NETWORK: &str = "unknown";

/// Ambient settings pointing at the API server of the current cluster
pub const SERVICE_HOST_ENV: &str = "KUBERNETES_SERVICE_HOST";
pub const SERVICE_PORT_ENV: &str = "KUBERNETES_SERVICE_PORT";
