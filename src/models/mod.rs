//! Mesh topology model layer
//!
//! - `cluster.rs` - Inventory entries returned by discovery
//! - `remote_secret.rs` - Credential documents stored in remote secrets

pub mod cluster;
pub mod remote_secret;

pub use cluster::{ClusterInfo, find_cluster, home_cluster};
pub use remote_secret::RemoteSecret;
