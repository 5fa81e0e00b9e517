// ABOUTME: File transfer trait for container runtimes.
// ABOUTME: Copies a tar archive into a container's filesystem.

use crate::types::ContainerId;
use async_trait::async_trait;
use bytes::Bytes;

/// File copy operations.
#[async_trait]
pub trait FileOps: Send + Sync {
    /// Extract `archive` (a tar stream) into the container at `path`.
    async fn copy_to_container(
        &self,
        id: &ContainerId,
        path: &str,
        archive: Bytes,
    ) -> Result<(), FileError>;
}

/// Errors from file operations.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("failed to build archive: {0}")]
    Archive(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
