// ABOUTME: Remaining host-config settings: restart, logging, DNS, namespaces and limits.
// ABOUTME: Empty collections are left unset so the daemon applies its defaults.

use super::convert::{non_empty, non_empty_map, non_empty_set};
use crate::config::{DesiredContainer, RestartPolicy};
use bollard::models::{HostConfig, HostConfigLogConfig, ResourcesUlimits, RestartPolicyNameEnum};

pub(crate) fn apply_host_settings(desired: &DesiredContainer, host: &mut HostConfig) {
    host.privileged = Some(desired.privileged);
    host.publish_all_ports = Some(desired.publish_all_ports);
    host.restart_policy = Some(bollard::models::RestartPolicy {
        name: Some(restart_policy_name(desired.restart)),
        maximum_retry_count: match desired.restart {
            RestartPolicy::OnFailure => desired.max_retry_count,
            _ => None,
        },
    });
    host.log_config = Some(HostConfigLogConfig {
        typ: Some(desired.log_driver.as_str().to_string()),
        config: non_empty_map(&desired.log_opts),
    });

    host.extra_hosts = non_empty(
        desired
            .hosts
            .iter()
            .map(|h| format!("{}:{}", h.host, h.ip))
            .collect(),
    );
    host.ulimits = non_empty(
        desired
            .ulimits
            .iter()
            .map(|u| ResourcesUlimits {
                name: Some(u.name.clone()),
                soft: Some(u.soft),
                hard: Some(u.hard),
            })
            .collect(),
    );

    if let Some(caps) = &desired.capabilities {
        host.cap_add = non_empty_set(&caps.add);
        host.cap_drop = non_empty_set(&caps.drop);
    }

    host.dns = non_empty_set(&desired.dns);
    host.dns_options = non_empty_set(&desired.dns_opts);
    host.dns_search = non_empty_set(&desired.dns_search);
    host.links = non_empty_set(&desired.links);
    host.tmpfs = non_empty_map(&desired.tmpfs);
    host.sysctls = non_empty_map(&desired.sysctls);

    host.network_mode = desired.network_mode.clone();
    host.ipc_mode = desired.ipc_mode.clone();
    host.pid_mode = desired.pid_mode.clone();
    host.userns_mode = desired.userns_mode.clone();
}

fn restart_policy_name(policy: RestartPolicy) -> RestartPolicyNameEnum {
    match policy {
        RestartPolicy::No => RestartPolicyNameEnum::NO,
        RestartPolicy::Always => RestartPolicyNameEnum::ALWAYS,
        RestartPolicy::UnlessStopped => RestartPolicyNameEnum::UNLESS_STOPPED,
        RestartPolicy::OnFailure => RestartPolicyNameEnum::ON_FAILURE,
    }
}
