// ABOUTME: Replacement planning between two desired states of the same container.
// ABOUTME: Lifecycle flags change in place; everything else forces a new container.

use super::ports::ports_equivalent;
use crate::config::DesiredContainer;
use serde::Serialize;

/// What applying `new` over `old` requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Plan {
    Unchanged,
    /// Only lifecycle flags differ; the container is kept.
    InPlace { fields: Vec<&'static str> },
    /// At least one immutable attribute differs.
    Replace { fields: Vec<&'static str> },
}

impl Plan {
    pub fn requires_replacement(&self) -> bool {
        matches!(self, Plan::Replace { .. })
    }
}

macro_rules! collect_changed {
    ($out:ident, $old:expr, $new:expr; $($field:ident),+ $(,)?) => {
        $(
            if $old.$field != $new.$field {
                $out.push(stringify!($field));
            }
        )+
    };
}

pub fn plan(old: &DesiredContainer, new: &DesiredContainer) -> Plan {
    let replace = force_new_changes(old, new);
    if !replace.is_empty() {
        return Plan::Replace { fields: replace };
    }

    let in_place = lifecycle_changes(old, new);
    if !in_place.is_empty() {
        return Plan::InPlace { fields: in_place };
    }

    Plan::Unchanged
}

/// Names of immutable attributes that differ.
pub fn force_new_changes(old: &DesiredContainer, new: &DesiredContainer) -> Vec<&'static str> {
    let mut changed = Vec::new();

    collect_changed!(changed, old, new;
        name, image, hostname, domainname, command, entrypoint, user, working_dir,
        env, labels, resources, ulimits,
    );

    if !ports_equivalent(&old.ports, &new.ports) {
        changed.push("ports");
    }

    collect_changed!(changed, old, new;
        publish_all_ports, hosts, network_mode, dns, dns_opts, dns_search,
        networks, network_aliases, networks_advanced, links, volumes, mounts,
        tmpfs, devices, healthcheck, capabilities, privileged, restart,
        max_retry_count, log_driver, log_opts, sysctls, ipc_mode, pid_mode,
        userns_mode, uploads,
    );

    changed
}

/// Names of lifecycle flags that differ.
pub fn lifecycle_changes(old: &DesiredContainer, new: &DesiredContainer) -> Vec<&'static str> {
    let mut changed = Vec::new();
    collect_changed!(changed, old.lifecycle, new.lifecycle;
        rm, start, attach, logs, must_run, destroy_grace_period,
    );
    changed
}
