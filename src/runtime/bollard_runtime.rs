// ABOUTME: Bollard-based container runtime implementation.
// ABOUTME: Supports both Docker and Podman via Docker-compatible API.

use crate::runtime::error::ConnectionError;
use crate::runtime::traits::{
    ContainerDetails, ContainerError, ContainerFilters, ContainerOps, ContainerSummary,
    CreateRequest, EndpointConfig, FileError, FileOps, ImageError, ImageOps, LogError, LogLine,
    LogLines, LogOps, LogOptions, LogStream, NetworkEndpoint, NetworkError, NetworkOps,
    RemoveOptions, WaitCondition,
};
use crate::runtime::types::RuntimeInfo;
use crate::types::{ContainerId, NetworkId};
use async_trait::async_trait;
use bollard::Docker;
use bollard::models::{EndpointIpamConfig, EndpointSettings};
use bollard::query_parameters::{
    CreateContainerOptions, CreateImageOptions, InspectContainerOptions, ListContainersOptions,
    LogsOptions, RemoveContainerOptions, StopContainerOptions, UploadToContainerOptions,
    WaitContainerOptions,
};
use bytes::Bytes;
use futures::StreamExt;
use std::time::Duration;

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn map_image_pull_error(e: bollard::errors::Error, image_name: &str) -> ImageError {
    ImageError::PullFailed(format!("{}: {}", image_name, e))
}

fn map_container_create_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::ImageNotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 409 => ContainerError::AlreadyExists(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_container_stop_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::NotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 304 => ContainerError::NotRunning(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_container_not_found_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::NotFound(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

/// Removal and wait-for-removal both report a concurrent removal with 409.
fn map_container_removal_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::NotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 409 || message.contains("is already in progress") => {
            ContainerError::RemovalInProgress(message.clone())
        }
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_network_connect_error(e: bollard::errors::Error) -> NetworkError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => NetworkError::NotFound(message.clone()),
        _ => NetworkError::Runtime(e.to_string()),
    }
}

fn map_network_disconnect_error(e: bollard::errors::Error) -> NetworkError {
    match &e {
        bollard::errors::Error::DockerResponseServerError { message, .. }
            if message.contains("is not connected to the network") =>
        {
            NetworkError::NotConnected(message.clone())
        }
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => NetworkError::NotFound(message.clone()),
        _ => NetworkError::Runtime(e.to_string()),
    }
}

/// Whole seconds for the stop API, rounding any fraction up so a
/// sub-second grace period still waits before the kill.
fn stop_timeout_secs(timeout: Duration) -> i32 {
    let secs = timeout
        .as_secs()
        .saturating_add(u64::from(timeout.subsec_nanos() > 0));
    i32::try_from(secs).unwrap_or(i32::MAX)
}

fn map_upload_error(e: bollard::errors::Error) -> FileError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => FileError::ContainerNotFound(message.clone()),
        _ => FileError::Runtime(e.to_string()),
    }
}

// =============================================================================
// BollardRuntime
// =============================================================================

/// Container runtime implementation using bollard.
///
/// Supports both Docker and Podman via Docker-compatible API.
pub struct BollardRuntime {
    client: Docker,
}

impl BollardRuntime {
    /// Create a new BollardRuntime from a Docker client.
    pub fn new(client: Docker) -> Self {
        Self { client }
    }

    /// Connect to a container runtime using detected runtime info.
    ///
    /// Use with `detect_local()` to find the socket.
    pub fn connect(info: &RuntimeInfo) -> Result<Self, ConnectionError> {
        let client =
            Docker::connect_with_unix(&info.socket_path, 120, bollard::API_DEFAULT_VERSION)
                .map_err(|e| ConnectionError::Socket {
                    socket: info.socket_path.clone(),
                    message: e.to_string(),
                })?;
        Ok(Self::new(client))
    }

    /// Check that the daemon answers on the socket.
    pub async fn ping(&self) -> Result<(), ConnectionError> {
        self.client
            .ping()
            .await
            .map_err(|e| ConnectionError::Ping(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ImageOps for BollardRuntime {
    async fn pull_image(&self, reference: &str) -> Result<(), ImageError> {
        let opts = CreateImageOptions {
            from_image: Some(reference.to_string()),
            ..Default::default()
        };

        // Pull returns a stream of progress updates - consume it
        let mut stream = self.client.create_image(Some(opts), None, None);
        while let Some(result) = stream.next().await {
            result.map_err(|e| map_image_pull_error(e, reference))?;
        }

        Ok(())
    }

    async fn image_exists(&self, reference: &str) -> Result<bool, ImageError> {
        match self.client.inspect_image(reference).await {
            Ok(_) => Ok(true),
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => Ok(false),
            Err(e) => Err(ImageError::Runtime(format!(
                "failed to inspect {}: {}",
                reference, e
            ))),
        }
    }
}

#[async_trait]
impl ContainerOps for BollardRuntime {
    async fn create_container(
        &self,
        request: &CreateRequest,
    ) -> Result<ContainerId, ContainerError> {
        let opts = CreateContainerOptions {
            name: Some(request.name.clone()),
            ..Default::default()
        };

        let response = self
            .client
            .create_container(Some(opts), request.to_body())
            .await
            .map_err(map_container_create_error)?;

        for warning in &response.warnings {
            tracing::warn!(container = %request.name, "{}", warning);
        }

        Ok(ContainerId::new(response.id))
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.client
            .start_container(
                id.as_str(),
                None::<bollard::query_parameters::StartContainerOptions>,
            )
            .await
            .map_err(map_container_not_found_error)
    }

    async fn stop_container(
        &self,
        id: &ContainerId,
        timeout: Duration,
    ) -> Result<(), ContainerError> {
        let opts = StopContainerOptions {
            t: Some(stop_timeout_secs(timeout)),
            signal: None,
        };

        self.client
            .stop_container(id.as_str(), Some(opts))
            .await
            .map_err(map_container_stop_error)
    }

    async fn remove_container(
        &self,
        id: &ContainerId,
        opts: &RemoveOptions,
    ) -> Result<(), ContainerError> {
        let remove_opts = RemoveContainerOptions {
            force: opts.force,
            v: opts.remove_volumes,
            ..Default::default()
        };

        self.client
            .remove_container(id.as_str(), Some(remove_opts))
            .await
            .map_err(map_container_removal_error)
    }

    async fn inspect_container(
        &self,
        id: &ContainerId,
    ) -> Result<ContainerDetails, ContainerError> {
        let details = self
            .client
            .inspect_container(id.as_str(), None::<InspectContainerOptions>)
            .await
            .map_err(map_container_not_found_error)?;

        let mut observed = ContainerDetails::new(id.clone());
        observed.name = details
            .name
            .unwrap_or_default()
            .trim_start_matches('/')
            .to_string();

        if let Some(state) = details.state {
            observed.running = state.running.unwrap_or(false);
            observed.exit_code = state.exit_code.unwrap_or_default();
            observed.finished_at = state.finished_at.unwrap_or_default();
            observed.error = state.error.unwrap_or_default();
        }

        if let Some(settings) = details.network_settings {
            observed.ports = settings.ports.unwrap_or_default();
            for (name, endpoint) in settings.networks.unwrap_or_default() {
                observed.networks.insert(
                    name,
                    NetworkEndpoint {
                        ip_address: endpoint.ip_address.unwrap_or_default(),
                        ip_prefix_len: endpoint.ip_prefix_len.unwrap_or_default(),
                        gateway: endpoint.gateway.unwrap_or_default(),
                    },
                );
            }
        }

        Ok(observed)
    }

    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerSummary>, ContainerError> {
        let opts = ListContainersOptions {
            all: filters.all,
            ..Default::default()
        };

        // Podman reports "stopping" as a container state during shutdown, but bollard
        // doesn't recognize it and fails deserialization. Retry after a short delay
        // since "stopping" is a transient state.
        let mut last_error = None;
        for attempt in 0..3 {
            match self.client.list_containers(Some(opts.clone())).await {
                Ok(containers) => {
                    return Ok(containers
                        .into_iter()
                        .map(|c| ContainerSummary {
                            id: ContainerId::new(c.id.unwrap_or_default()),
                        })
                        .collect());
                }
                Err(e) => {
                    let err_str = e.to_string();
                    if (err_str.contains("unknown variant `stopping`")
                        || err_str.contains("unknown variant `stopped`"))
                        && attempt < 2
                    {
                        tokio::time::sleep(Duration::from_millis(500)).await;
                        last_error = Some(err_str);
                        continue;
                    }
                    return Err(ContainerError::Runtime(err_str));
                }
            }
        }

        Err(ContainerError::Runtime(
            last_error.unwrap_or_else(|| "list_containers failed".to_string()),
        ))
    }

    async fn wait_container(
        &self,
        id: &ContainerId,
        condition: WaitCondition,
    ) -> Result<i64, ContainerError> {
        let opts = WaitContainerOptions {
            condition: condition.as_str().to_string(),
            ..Default::default()
        };

        let mut stream = self.client.wait_container(id.as_str(), Some(opts));
        let mut status_code = 0;
        while let Some(result) = stream.next().await {
            match result {
                Ok(response) => status_code = response.status_code,
                // bollard surfaces a non-zero exit as an error; for us it is a result.
                Err(bollard::errors::Error::DockerContainerWaitError { code, .. }) => {
                    status_code = code;
                }
                Err(e) => return Err(map_container_removal_error(e)),
            }
        }

        Ok(status_code)
    }
}

#[async_trait]
impl NetworkOps for BollardRuntime {
    async fn connect_to_network(
        &self,
        container: &ContainerId,
        network: &NetworkId,
        endpoint: &EndpointConfig,
    ) -> Result<(), NetworkError> {
        let ipam_config = if endpoint.ipv4_address.is_some() || endpoint.ipv6_address.is_some() {
            Some(EndpointIpamConfig {
                ipv4_address: endpoint.ipv4_address.clone(),
                ipv6_address: endpoint.ipv6_address.clone(),
                ..Default::default()
            })
        } else {
            None
        };

        let config = bollard::models::NetworkConnectRequest {
            container: container.to_string(),
            endpoint_config: Some(EndpointSettings {
                aliases: if endpoint.aliases.is_empty() {
                    None
                } else {
                    Some(endpoint.aliases.clone())
                },
                ipam_config,
                ..Default::default()
            }),
        };

        self.client
            .connect_network(network.as_str(), config)
            .await
            .map_err(map_network_connect_error)
    }

    async fn disconnect_from_network(
        &self,
        container: &ContainerId,
        network: &NetworkId,
        force: bool,
    ) -> Result<(), NetworkError> {
        let config = bollard::models::NetworkDisconnectRequest {
            container: container.to_string(),
            force: Some(force),
        };

        self.client
            .disconnect_network(network.as_str(), config)
            .await
            .map_err(map_network_disconnect_error)
    }
}

#[async_trait]
impl FileOps for BollardRuntime {
    async fn copy_to_container(
        &self,
        id: &ContainerId,
        path: &str,
        archive: Bytes,
    ) -> Result<(), FileError> {
        let opts = UploadToContainerOptions {
            path: path.to_string(),
            ..Default::default()
        };

        self.client
            .upload_to_container(id.as_str(), Some(opts), bollard::body_full(archive))
            .await
            .map_err(map_upload_error)
    }
}

#[async_trait]
impl LogOps for BollardRuntime {
    async fn container_logs(
        &self,
        id: &ContainerId,
        opts: &LogOptions,
    ) -> Result<LogLines, LogError> {
        let log_opts = LogsOptions {
            stdout: opts.stdout,
            stderr: opts.stderr,
            follow: opts.follow,
            timestamps: opts.timestamps,
            tail: "all".to_string(),
            ..Default::default()
        };

        let stream = self.client.logs(id.as_str(), Some(log_opts));

        let mapped_stream = stream.map(|result| {
            result
                .map(|output| {
                    let (stream_type, data) = match output {
                        bollard::container::LogOutput::StdErr { message } => {
                            (LogStream::Stderr, message)
                        }
                        bollard::container::LogOutput::StdOut { message }
                        | bollard::container::LogOutput::StdIn { message }
                        | bollard::container::LogOutput::Console { message } => {
                            (LogStream::Stdout, message)
                        }
                    };

                    LogLine {
                        content: String::from_utf8_lossy(&data).to_string(),
                        stream: stream_type,
                    }
                })
                .map_err(|e| LogError::StreamError(e.to_string()))
        });

        Ok(Box::pin(mapped_stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_error(status_code: u16, message: &str) -> bollard::errors::Error {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message: message.to_string(),
        }
    }

    #[test]
    fn stop_of_stopped_container_is_not_running() {
        assert!(matches!(
            map_container_stop_error(server_error(304, "")),
            ContainerError::NotRunning(_)
        ));
    }

    #[test]
    fn concurrent_removal_is_recognised() {
        assert!(matches!(
            map_container_removal_error(server_error(409, "conflict")),
            ContainerError::RemovalInProgress(_)
        ));
        assert!(matches!(
            map_container_removal_error(server_error(500, "removal of container abc is already in progress")),
            ContainerError::RemovalInProgress(_)
        ));
        assert!(matches!(
            map_container_removal_error(server_error(404, "no such container")),
            ContainerError::NotFound(_)
        ));
    }

    #[test]
    fn disconnect_from_unattached_network_is_not_connected() {
        assert!(matches!(
            map_network_disconnect_error(server_error(
                500,
                "container abc is not connected to the network bridge"
            )),
            NetworkError::NotConnected(_)
        ));
        assert!(matches!(
            map_network_disconnect_error(server_error(500, "boom")),
            NetworkError::Runtime(_)
        ));
    }

    #[test]
    fn forbidden_disconnect_is_not_mistaken_for_detached() {
        assert!(matches!(
            map_network_disconnect_error(server_error(
                403,
                "operation not supported for host network"
            )),
            NetworkError::Runtime(_)
        ));
    }

    #[test]
    fn stop_timeout_rounds_fractions_up() {
        assert_eq!(stop_timeout_secs(Duration::from_millis(500)), 1);
        assert_eq!(stop_timeout_secs(Duration::from_millis(1500)), 2);
        assert_eq!(stop_timeout_secs(Duration::from_secs(10)), 10);
        assert_eq!(stop_timeout_secs(Duration::ZERO), 0);
        assert_eq!(stop_timeout_secs(Duration::MAX), i32::MAX);
    }

    #[test]
    fn create_conflict_is_already_exists() {
        assert!(matches!(
            map_container_create_error(server_error(409, "name in use")),
            ContainerError::AlreadyExists(_)
        ));
        assert!(matches!(
            map_container_create_error(server_error(404, "no such image")),
            ContainerError::ImageNotFound(_)
        ));
    }
}
