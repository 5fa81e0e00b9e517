// ABOUTME: Network operations trait for container runtimes.
// ABOUTME: Connect and disconnect containers with per-network endpoint settings.

use super::shared_types::EndpointConfig;
use crate::types::{ContainerId, NetworkId};
use async_trait::async_trait;

/// Network attachment operations.
#[async_trait]
pub trait NetworkOps: Send + Sync {
    /// Connect a container to a network.
    async fn connect_to_network(
        &self,
        container: &ContainerId,
        network: &NetworkId,
        endpoint: &EndpointConfig,
    ) -> Result<(), NetworkError>;

    /// Disconnect a container from a network.
    async fn disconnect_from_network(
        &self,
        container: &ContainerId,
        network: &NetworkId,
        force: bool,
    ) -> Result<(), NetworkError>;
}

/// Errors from network operations.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("network not found: {0}")]
    NotFound(String),

    #[error("container not connected to network: {0}")]
    NotConnected(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
