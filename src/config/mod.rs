// ABOUTME: Strongly-typed desired state for a single container.
// ABOUTME: Handles YAML parsing and the defaults of every optional attribute.

mod healthcheck;
mod lifecycle;
mod networking;
mod ports;
mod resources;
mod restart_policy;
mod settings;
mod storage;
mod upload;

pub use healthcheck::HealthcheckSpec;
pub use lifecycle::Lifecycle;
pub use networking::{ExtraHost, NetworkAttachment};
pub use ports::{DEFAULT_HOST_IP, PortSpec, Protocol};
pub use resources::{ResourceLimits, Ulimit};
pub use restart_policy::RestartPolicy;
pub use settings::ReconcilerSettings;
pub use storage::{
    BindOptions, DeviceSpec, MountSpec, MountType, Propagation, TmpfsOptions, VolumeOptions,
    VolumeSpec,
};
pub use upload::UploadSpec;

use crate::error::{Error, Result};
use crate::types::{ContainerName, NetworkAlias};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// The declared target configuration of one container.
///
/// Every attribute except the [`Lifecycle`] flags is fixed once the container
/// exists: changing any of them means destroying and recreating it (see
/// [`crate::diff::plan`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesiredContainer {
    pub name: ContainerName,
    pub image: String,

    #[serde(default)]
    pub lifecycle: Lifecycle,

    #[serde(default)]
    pub hostname: Option<String>,

    #[serde(default)]
    pub domainname: Option<String>,

    #[serde(default)]
    pub command: Option<Vec<String>>,

    #[serde(default)]
    pub entrypoint: Option<Vec<String>>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub working_dir: Option<String>,

    /// `KEY=VALUE` entries.
    #[serde(default)]
    pub env: BTreeSet<String>,

    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    #[serde(default)]
    pub resources: ResourceLimits,

    #[serde(default)]
    pub ulimits: Vec<Ulimit>,

    #[serde(default)]
    pub ports: Vec<PortSpec>,

    #[serde(default)]
    pub publish_all_ports: bool,

    #[serde(default)]
    pub hosts: Vec<ExtraHost>,

    #[serde(default)]
    pub network_mode: Option<String>,

    #[serde(default)]
    pub dns: BTreeSet<String>,

    #[serde(default)]
    pub dns_opts: BTreeSet<String>,

    #[serde(default)]
    pub dns_search: BTreeSet<String>,

    /// Legacy network list; ignored when `networks_advanced` is non-empty.
    #[serde(default)]
    pub networks: BTreeSet<String>,

    /// Aliases applied on every network of the legacy `networks` list.
    #[serde(default)]
    pub network_aliases: BTreeSet<NetworkAlias>,

    #[serde(default)]
    pub networks_advanced: Vec<NetworkAttachment>,

    #[serde(default)]
    pub links: BTreeSet<String>,

    #[serde(default)]
    pub volumes: Vec<VolumeSpec>,

    #[serde(default)]
    pub mounts: Vec<MountSpec>,

    /// Container path to tmpfs mount options.
    #[serde(default)]
    pub tmpfs: BTreeMap<String, String>,

    #[serde(default)]
    pub devices: Vec<DeviceSpec>,

    #[serde(default)]
    pub healthcheck: Option<HealthcheckSpec>,

    #[serde(default)]
    pub capabilities: Option<Capabilities>,

    #[serde(default)]
    pub privileged: bool,

    #[serde(default)]
    pub restart: RestartPolicy,

    #[serde(default)]
    pub max_retry_count: Option<i64>,

    #[serde(default)]
    pub log_driver: LogDriver,

    #[serde(default)]
    pub log_opts: BTreeMap<String, String>,

    #[serde(default)]
    pub sysctls: BTreeMap<String, String>,

    #[serde(default)]
    pub ipc_mode: Option<String>,

    #[serde(default)]
    pub pid_mode: Option<String>,

    #[serde(default)]
    pub userns_mode: Option<String>,

    #[serde(default)]
    pub uploads: Vec<UploadSpec>,
}

/// Linux capabilities to add to or drop from the default set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default)]
    pub add: BTreeSet<String>,
    #[serde(default)]
    pub drop: BTreeSet<String>,
}

/// Logging drivers the daemon ships with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogDriver {
    #[default]
    JsonFile,
    Syslog,
    Journald,
    Gelf,
    Fluentd,
    Awslogs,
}

impl LogDriver {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogDriver::JsonFile => "json-file",
            LogDriver::Syslog => "syslog",
            LogDriver::Journald => "journald",
            LogDriver::Gelf => "gelf",
            LogDriver::Fluentd => "fluentd",
            LogDriver::Awslogs => "awslogs",
        }
    }
}

impl DesiredContainer {
    /// A container with the given name and image and every other attribute
    /// at its default.
    pub fn new(name: ContainerName, image: impl Into<String>) -> Self {
        Self {
            name,
            image: image.into(),
            lifecycle: Lifecycle::default(),
            hostname: None,
            domainname: None,
            command: None,
            entrypoint: None,
            user: None,
            working_dir: None,
            env: BTreeSet::new(),
            labels: BTreeMap::new(),
            resources: ResourceLimits::default(),
            ulimits: Vec::new(),
            ports: Vec::new(),
            publish_all_ports: false,
            hosts: Vec::new(),
            network_mode: None,
            dns: BTreeSet::new(),
            dns_opts: BTreeSet::new(),
            dns_search: BTreeSet::new(),
            networks: BTreeSet::new(),
            network_aliases: BTreeSet::new(),
            networks_advanced: Vec::new(),
            links: BTreeSet::new(),
            volumes: Vec::new(),
            mounts: Vec::new(),
            tmpfs: BTreeMap::new(),
            devices: Vec::new(),
            healthcheck: None,
            capabilities: None,
            privileged: false,
            restart: RestartPolicy::default(),
            max_retry_count: None,
            log_driver: LogDriver::default(),
            log_opts: BTreeMap::new(),
            sysctls: BTreeMap::new(),
            ipc_mode: None,
            pid_mode: None,
            userns_mode: None,
            uploads: Vec::new(),
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
