//! Error types for mesh topology resolution

/// Errors produced while resolving the mesh topology
///
/// Only errors reaching the home cluster abort a discovery. The remaining
/// variants are raised per remote secret and degrade that single entry.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error(transparent)]
    Kube(#[from] kube::Error),

    #[error("Failed to build client configuration: {0}")]
    KubeConfig(String),

    #[error("Failed to decode remote secret: {0}")]
    Decode(String),

    #[error("Invalid remote credential: {0}")]
    InvalidCredential(String),

    #[error("Secret {secret} has no cluster annotation")]
    MissingAnnotation { secret: String },

    #[error("Secret {secret} has no data for cluster {key}")]
    MissingData { secret: String, key: String },

    #[error("No remote client factory configured")]
    NoRemoteFactory,
}

/// Result type for mesh operations
pub type MeshResult<T> = Result<T, MeshError>;

impl From<serde_yaml::Error> for MeshError {
    fn from(e: serde_yaml::Error) -> Self {
        MeshError::Decode(e.to_string())
    }
}
