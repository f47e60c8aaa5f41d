//! Mesh topology library
//!
//! Discovers the clusters of an Istio multi-cluster mesh starting from the
//! home cluster: its own identity and network, plus every remote cluster
//! registered through a remote secret.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mesh_topology::config::Config;
//! use mesh_topology::kube::{AmbientEndpoint, KubeRemoteClientFactory, create_client};
//! use mesh_topology::services::MeshService;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let home = create_client().await?;
//! let service = MeshService::new(
//!     Arc::new(home),
//!     Some(Arc::new(KubeRemoteClientFactory)),
//!     Config::default(),
//!     AmbientEndpoint::from_env(),
//! );
//!
//! for cluster in service.get_clusters().await? {
//!     println!("{} ({})", cluster.name, cluster.network);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod kube;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use error::{MeshError, MeshResult};
pub use models::{ClusterInfo, RemoteSecret, find_cluster, home_cluster};
pub use services::MeshService;
