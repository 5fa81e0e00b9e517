// ABOUTME: Desired-state translator: maps a DesiredContainer onto daemon request shapes.
// ABOUTME: Pure and total; fails only on contradictions visible without I/O.

mod convert;
mod devices;
mod error;
mod healthcheck;
mod host;
mod mounts;
mod networks;
mod ports;
mod resources;
mod volumes;

pub use devices::translate_devices;
pub use error::TranslateError;
pub use healthcheck::{parse_lenient_duration, translate_healthcheck};
pub use mounts::translate_mounts;
pub use networks::{NetworkAttach, translate_networks};
pub use ports::{PortTranslation, translate_ports};
pub use resources::{ResourceTranslation, translate_resources};
pub use volumes::{VolumeTranslation, translate_volumes};

use crate::config::DesiredContainer;
use crate::runtime::CreateRequest;
use bollard::models::{ContainerCreateBody, HostConfig, NetworkingConfig};
use convert::{non_empty, non_empty_map, non_empty_set};

/// Everything needed to bring a container into existence.
#[derive(Debug, Clone)]
pub struct Translation {
    /// The create call.
    pub request: CreateRequest,
    /// Networks to connect after the default network has been dropped.
    /// Empty means the container stays on the daemon's default network.
    pub networks: Vec<NetworkAttach>,
}

/// Build the create request and network plan for `desired`.
pub fn translate(desired: &DesiredContainer) -> Result<Translation, TranslateError> {
    if let Some(command) = &desired.command
        && command.iter().any(String::is_empty)
    {
        return Err(TranslateError::EmptyCommandValue);
    }

    let ports = translate_ports(&desired.ports);
    let volumes = translate_volumes(&desired.volumes)?;
    let resources = translate_resources(&desired.resources)?;

    let process = ContainerCreateBody {
        image: Some(desired.image.clone()),
        hostname: desired.hostname.clone(),
        domainname: desired.domainname.clone(),
        env: non_empty_set(&desired.env),
        cmd: desired.command.clone(),
        entrypoint: desired.entrypoint.clone(),
        user: desired.user.clone(),
        working_dir: desired.working_dir.clone(),
        labels: non_empty_map(&desired.labels),
        exposed_ports: non_empty(ports.exposed),
        volumes: non_empty(volumes.anonymous),
        healthcheck: desired.healthcheck.as_ref().map(translate_healthcheck),
        ..Default::default()
    };

    let mut host = HostConfig {
        port_bindings: if ports.bindings.is_empty() {
            None
        } else {
            Some(ports.bindings)
        },
        binds: non_empty(volumes.binds),
        volumes_from: non_empty(volumes.from_containers),
        mounts: non_empty(translate_mounts(&desired.mounts)),
        devices: non_empty(translate_devices(&desired.devices)),
        memory: resources.memory,
        memory_swap: resources.memory_swap,
        cpu_shares: resources.cpu_shares,
        cpuset_cpus: resources.cpu_set,
        auto_remove: Some(desired.lifecycle.rm),
        ..Default::default()
    };
    host::apply_host_settings(desired, &mut host);

    let networks = translate_networks(desired);
    tracing::debug!(
        container = %desired.name,
        networks = networks.len(),
        "translated desired state"
    );

    Ok(Translation {
        request: CreateRequest {
            name: desired.name.to_string(),
            process,
            host,
            networking: NetworkingConfig::default(),
        },
        networks,
    })
}
