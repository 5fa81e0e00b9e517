// ABOUTME: Device declarations to daemon device mappings.
// ABOUTME: Missing container paths and permissions get defaults.

use crate::config::DeviceSpec;
use bollard::models::DeviceMapping;

const DEFAULT_PERMISSIONS: &str = "rwm";

/// Absent or empty container paths mirror the host path; absent or empty
/// permissions become `rwm`.
pub fn translate_devices(devices: &[DeviceSpec]) -> Vec<DeviceMapping> {
    devices
        .iter()
        .map(|device| {
            let container_path = device
                .container_path
                .as_deref()
                .filter(|p| !p.is_empty())
                .unwrap_or(&device.host_path);
            let permissions = device
                .permissions
                .as_deref()
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_PERMISSIONS);

            DeviceMapping {
                path_on_host: Some(device.host_path.clone()),
                path_in_container: Some(container_path.to_string()),
                cgroup_permissions: Some(permissions.to_string()),
            }
        })
        .collect()
}
