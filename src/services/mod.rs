//! Service layer for mesh discovery
//!
//! Combines the home identity, network identity and remote secret
//! resolution into a single cluster inventory.

pub mod home;
pub mod mesh_service;
pub mod network;

pub use home::HomeResolver;
pub use mesh_service::{MeshService, parse_remote_secret};
