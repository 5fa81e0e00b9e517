// ABOUTME: The reconciled entity: desired state, recorded runtime identity, observations.
// ABOUTME: This is what the CLI persists in its state file.

use crate::config::{DesiredContainer, PortSpec};
use crate::flatten::NetworkData;
use crate::types::ContainerId;
use serde::{Deserialize, Serialize};

/// One managed container.
///
/// `id` is set by create and cleared by delete or when the container is
/// found to be gone. At most one runtime container exists per record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerRecord {
    pub desired: DesiredContainer,

    #[serde(default)]
    pub id: Option<ContainerId>,

    #[serde(default)]
    pub observed: Option<ObservedState>,
}

impl ContainerRecord {
    pub fn new(desired: DesiredContainer) -> Self {
        Self {
            desired,
            id: None,
            observed: None,
        }
    }

    pub(crate) fn forget(&mut self) {
        self.id = None;
        self.observed = None;
    }
}

/// Computed fields populated once the container is accepted as stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedState {
    /// Only recorded while the container is stopped.
    #[serde(default)]
    pub exit_code: Option<i64>,

    /// Output captured during attach-and-wait.
    #[serde(default)]
    pub container_logs: Option<String>,

    #[serde(default)]
    pub ports: Vec<PortSpec>,

    #[serde(default)]
    pub network_data: Vec<NetworkData>,

    /// Addressing on the first network by name.
    #[serde(default)]
    pub ip_address: Option<String>,

    #[serde(default)]
    pub ip_prefix_length: Option<i64>,

    #[serde(default)]
    pub gateway: Option<String>,
}
