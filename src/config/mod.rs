//! Configuration system for mesh-topology
//!
//! Settings naming the Istio control plane objects inspected during
//! discovery, loaded from an optional YAML file with environment overrides.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::Config;
