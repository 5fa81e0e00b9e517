// ABOUTME: Image operations trait for container runtimes.
// ABOUTME: Check whether an image is present locally and pull it if not.

use async_trait::async_trait;

/// Image operations: check existence, pull.
#[async_trait]
pub trait ImageOps: Send + Sync {
    /// Pull an image from its registry.
    async fn pull_image(&self, reference: &str) -> Result<(), ImageError>;

    /// Check if an image exists locally.
    async fn image_exists(&self, reference: &str) -> Result<bool, ImageError>;
}

/// Errors from image operations.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("pull failed: {0}")]
    PullFailed(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
