// ABOUTME: Shared types used across runtime trait definitions.
// ABOUTME: CreateRequest, ContainerDetails, EndpointConfig and the port map alias.

use crate::types::ContainerId;
use bollard::models::{ContainerCreateBody, HostConfig, NetworkingConfig, PortBinding};
use std::collections::HashMap;

/// Port bindings keyed by `"<port>/<protocol>"`, as the daemon reports them.
pub type PortMap = HashMap<String, Option<Vec<PortBinding>>>;

/// A fully translated container creation request.
///
/// The three sections mirror the daemon's create payload: process settings,
/// host settings and the initial network endpoint.
#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    /// Container name.
    pub name: String,
    /// Image, command, environment, labels, healthcheck.
    pub process: ContainerCreateBody,
    /// Resources, mounts, port bindings, restart policy.
    pub host: HostConfig,
    /// The endpoint the container is created on.
    pub networking: NetworkingConfig,
}

impl CreateRequest {
    /// Merge the three sections into the daemon's create body.
    pub fn to_body(&self) -> ContainerCreateBody {
        ContainerCreateBody {
            host_config: Some(self.host.clone()),
            networking_config: Some(self.networking.clone()),
            ..self.process.clone()
        }
    }
}

/// Settings for attaching a container to one network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointConfig {
    /// DNS aliases on this network.
    pub aliases: Vec<String>,
    /// Static IPv4 address.
    pub ipv4_address: Option<String>,
    /// Static IPv6 address.
    pub ipv6_address: Option<String>,
}

/// The subset of inspect output the reconciler observes.
#[derive(Debug, Clone)]
pub struct ContainerDetails {
    /// Container ID.
    pub id: ContainerId,
    /// Container name without the leading slash.
    pub name: String,
    /// Whether the main process is running.
    pub running: bool,
    /// Exit code of the last run.
    pub exit_code: i64,
    /// RFC 3339 timestamp of the last exit, empty or zero-valued if never.
    pub finished_at: String,
    /// Error message the daemon recorded for the last run.
    pub error: String,
    /// Published port bindings.
    pub ports: PortMap,
    /// Attached networks by name.
    pub networks: HashMap<String, NetworkEndpoint>,
}

impl ContainerDetails {
    /// A stopped container that never ran, with no ports or networks.
    pub fn new(id: ContainerId) -> Self {
        Self {
            id,
            name: String::new(),
            running: false,
            exit_code: 0,
            finished_at: String::new(),
            error: String::new(),
            ports: PortMap::new(),
            networks: HashMap::new(),
        }
    }
}

/// Addressing of a container on one network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkEndpoint {
    /// IPv4 address in this network.
    pub ip_address: String,
    /// Prefix length of the address.
    pub ip_prefix_len: i64,
    /// Gateway.
    pub gateway: String,
}
