// ABOUTME: Volume, mount and device declarations.
// ABOUTME: Each mount type carries its own option block; the others are ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Legacy `-v` style volume entry.
///
/// Exactly one of `container_path` and `from_container` must be set. With a
/// container path, `volume_name` (falling back to `host_path`) becomes the
/// bind source; without either the path becomes an anonymous volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeSpec {
    #[serde(default)]
    pub from_container: Option<String>,

    #[serde(default)]
    pub container_path: Option<String>,

    #[serde(default)]
    pub host_path: Option<String>,

    #[serde(default)]
    pub volume_name: Option<String>,

    #[serde(default)]
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountSpec {
    pub target: String,

    #[serde(default)]
    pub source: Option<String>,

    #[serde(rename = "type")]
    pub kind: MountType,

    #[serde(default)]
    pub read_only: Option<bool>,

    #[serde(default)]
    pub bind_options: Option<BindOptions>,

    #[serde(default)]
    pub volume_options: Option<VolumeOptions>,

    #[serde(default)]
    pub tmpfs_options: Option<TmpfsOptions>,
}

impl MountSpec {
    pub fn new(kind: MountType, target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            source: None,
            kind,
            read_only: None,
            bind_options: None,
            volume_options: None,
            tmpfs_options: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MountType {
    Bind,
    Volume,
    Tmpfs,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindOptions {
    #[serde(default)]
    pub propagation: Option<Propagation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Propagation {
    Private,
    Rprivate,
    Shared,
    Rshared,
    Slave,
    Rslave,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeOptions {
    #[serde(default)]
    pub no_copy: Option<bool>,

    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    #[serde(default)]
    pub driver_name: Option<String>,

    #[serde(default)]
    pub driver_options: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmpfsOptions {
    #[serde(default)]
    pub size_bytes: Option<i64>,

    /// Permission bits, e.g. `0o1777` written as `1023`.
    #[serde(default)]
    pub mode: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSpec {
    pub host_path: String,

    /// Defaults to `host_path`.
    #[serde(default)]
    pub container_path: Option<String>,

    /// cgroup permissions; defaults to `rwm`.
    #[serde(default)]
    pub permissions: Option<String>,
}

impl DeviceSpec {
    pub fn new(host_path: impl Into<String>) -> Self {
        Self {
            host_path: host_path.into(),
            container_path: None,
            permissions: None,
        }
    }
}
